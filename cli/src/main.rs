//! Skillgraph CLI: build graphs and recommendations from job-postings rows
//!
//! Rows are read as a JSON array of `{"specialty", "region", "skills"}`
//! objects, already filtered by whatever produced them.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use skillgraph::{
    ComponentGrouper, Engine, EngineConfig, GraphKind, GroupAxis, NodeClass, NodeGrouper,
    PostingRow, ScoredNode,
};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "skillgraph",
    version,
    about = "Skill graphs and recommendations for job postings"
)]
struct Cli {
    /// JSON file with posting rows
    #[arg(long, short, global = true, env = "SKILLGRAPH_INPUT")]
    input: Option<PathBuf>,

    /// YAML engine configuration
    #[arg(long, global = true, env = "SKILLGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Override the group axis of the bipartite graph
    #[arg(long, global = true)]
    axis: Option<Axis>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Kind {
    Bipartite,
    Cooccurrence,
}

impl From<Kind> for GraphKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Bipartite => GraphKind::Bipartite,
            Kind::Cooccurrence => GraphKind::Cooccurrence,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Axis {
    Specialty,
    Region,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Class {
    First,
    Second,
    Single,
}

impl From<Class> for NodeClass {
    fn from(class: Class) -> Self {
        match class {
            Class::First => NodeClass::First,
            Class::Second => NodeClass::Second,
            Class::Single => NodeClass::Single,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph and print its nodes and edges
    Graph {
        #[arg(long, default_value = "bipartite")]
        kind: Kind,

        /// Attach connected-component group ids
        #[arg(long)]
        grouped: bool,
    },
    /// List selectable node labels (tags, then group keys)
    Choices,
    /// Recommend nodes similar to NODE
    Similar {
        node: String,

        /// Class of the candidates
        #[arg(long, default_value = "first")]
        class: Class,

        #[arg(long, default_value = "bipartite")]
        kind: Kind,

        /// Number of results (defaults to the configured value)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Recommend the heaviest neighbors of NODE
    Neighbors {
        node: String,

        /// Class of the neighbors
        #[arg(long, default_value = "second")]
        class: Class,

        #[arg(long, default_value = "bipartite")]
        kind: Kind,

        #[arg(long)]
        top: Option<usize>,
    },
}

fn main() {
    let directives = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(axis) = cli.axis {
        config.axis = match axis {
            Axis::Specialty => GroupAxis::Specialty,
            Axis::Region => GroupAxis::Region,
        };
    }
    let engine = Engine::new(config)?;
    let rows = load_rows(cli.input.as_ref())?;
    info!("Loaded {} rows", rows.len());

    match cli.command {
        Commands::Graph { kind, grouped } => {
            let grouper: Option<&dyn NodeGrouper> = if grouped {
                Some(&ComponentGrouper)
            } else {
                None
            };
            let snapshot = engine.snapshot(kind.into(), &rows, grouper);
            match snapshot {
                None => println!("(no graph: no rows with usable values)"),
                Some(snapshot) => match cli.format {
                    OutputFormat::Json => println!("{}", snapshot.to_json()?),
                    OutputFormat::Csv => {
                        println!("source,target,weight");
                        for edge in &snapshot.edges {
                            let source = &snapshot.nodes[edge.source as usize].label;
                            let target = &snapshot.nodes[edge.target as usize].label;
                            println!("{},{},{}", csv_cell(source), csv_cell(target), edge.weight);
                        }
                    }
                    OutputFormat::Table => {
                        let mut table = Table::new();
                        table.set_content_arrangement(ContentArrangement::Dynamic);
                        table.set_header(vec![
                            "node",
                            "class",
                            "degree",
                            "weighted degree",
                            "group",
                        ]);
                        for node in &snapshot.nodes {
                            table.add_row(vec![
                                node.label.clone(),
                                node.class.to_string(),
                                node.degree.to_string(),
                                node.weighted_degree.to_string(),
                                node.group.map(|g| g.to_string()).unwrap_or_default(),
                            ]);
                        }
                        println!("{}", table);
                        println!(
                            "{} node(s), {} edge(s)",
                            snapshot.nodes.len(),
                            snapshot.edges.len()
                        );
                    }
                },
            }
        }
        Commands::Choices => {
            let choices = engine.node_choices(&rows);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&choices)?),
                _ => {
                    for choice in choices {
                        println!("{}", choice);
                    }
                }
            }
        }
        Commands::Similar { node, class, kind, top } => {
            let recs = engine.recommend_similar(kind.into(), &rows, &node, class.into(), top)?;
            print_recommendations(recs, "similarity", &cli.format)?;
        }
        Commands::Neighbors { node, class, kind, top } => {
            let recs =
                engine.neighbor_recommendations(kind.into(), &rows, &node, class.into(), top)?;
            print_recommendations(recs, "weight", &cli.format)?;
        }
    }

    Ok(())
}

fn load_rows(path: Option<&PathBuf>) -> Result<Vec<PostingRow>> {
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            parse_rows(BufReader::new(file))
                .with_context(|| format!("parsing rows from {}", path.display()))
        }
        None => parse_rows(std::io::stdin().lock()).context("parsing rows from stdin"),
    }
}

/// An empty array is valid input; it builds no graph.
fn parse_rows<R: Read>(reader: R) -> Result<Vec<PostingRow>> {
    Ok(serde_json::from_reader(reader)?)
}

/// `RUST_LOG` directives, falling back to `info` when unset or invalid
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn print_recommendations(
    recs: Option<Vec<ScoredNode>>,
    score_name: &str,
    format: &OutputFormat,
) -> Result<()> {
    let recs = match recs {
        Some(recs) => recs,
        None => {
            println!("(no graph: no rows with usable values)");
            return Ok(());
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recs)?),
        OutputFormat::Csv => {
            println!("node,class,{}", score_name);
            for rec in &recs {
                println!("{},{},{}", csv_cell(&rec.node), rec.class, rec.score);
            }
        }
        OutputFormat::Table => {
            if recs.is_empty() {
                println!("(no results)");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["node", "class", score_name]);
            for rec in &recs {
                table.add_row(vec![
                    rec.node.clone(),
                    rec.class.to_string(),
                    format!("{:.3}", rec.score),
                ]);
            }
            println!("{}", table);
            println!("{} result(s)", recs.len());
        }
    }
    Ok(())
}

fn csv_cell(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_empty_rows_build_no_graph() {
        let rows = parse_rows("[]".as_bytes()).unwrap();
        assert!(rows.is_empty());

        let engine = Engine::new(EngineConfig::default()).unwrap();
        assert!(engine.snapshot(GraphKind::Bipartite, &rows, None).is_none());
        let recs = engine
            .recommend_similar(GraphKind::Bipartite, &rows, "Backend", NodeClass::First, None)
            .unwrap();
        assert!(recs.is_none());
    }

    #[test]
    fn test_parse_rows_with_missing_fields() {
        let json = r#"[{"specialty": "Backend", "skills": "Rust, SQL"}, {"region": "Kazan"}]"#;
        let rows = parse_rows(json.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region, None);
        assert_eq!(rows[1].skills, None);
        assert!(parse_rows("{".as_bytes()).is_err());
    }

    #[test]
    fn test_log_filter_reads_directives() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_csv_cell_quoting() {
        assert_eq!(csv_cell("rust"), "rust");
        assert_eq!(csv_cell("a,b"), "\"a,b\"");
        assert_eq!(csv_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
