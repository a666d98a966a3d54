//! Row shapes consumed by the builders
//!
//! Postings arrive already filtered by the caller. Every field is an explicit
//! `Option`; a missing value is `None`, never an absent key.

use crate::tags::{Tag, TagNormalizer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One job posting as supplied by the tabular-data collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostingRow {
    /// Specialty name
    #[serde(default)]
    pub specialty: Option<String>,
    /// Region name
    #[serde(default)]
    pub region: Option<String>,
    /// Raw delimited skills field
    #[serde(default)]
    pub skills: Option<String>,
}

impl PostingRow {
    pub fn new(specialty: Option<&str>, region: Option<&str>, skills: Option<&str>) -> Self {
        Self {
            specialty: specialty.map(str::to_string),
            region: region.map(str::to_string),
            skills: skills.map(str::to_string),
        }
    }
}

/// A row reduced to its group key and normalized tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRow {
    pub group: Option<String>,
    pub tags: Vec<Tag>,
}

impl TaggedRow {
    pub fn new(group: Option<&str>, tags: &[&str]) -> Self {
        Self {
            group: group.map(str::to_string),
            tags: tags.iter().map(|t| Tag::from(*t)).collect(),
        }
    }
}

/// Which row attribute supplies the group key of the incidence matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupAxis {
    #[default]
    Specialty,
    Region,
    /// Federal district resolved from the region through a `DistrictLookup`
    District,
}

/// Result of a region lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum District {
    Known(String),
    Unknown,
}

/// Region -> district mapping supplied by the caller
pub trait DistrictLookup: Send + Sync {
    fn lookup(&self, region: &str) -> District;
}

impl DistrictLookup for HashMap<String, String> {
    fn lookup(&self, region: &str) -> District {
        self.get(region)
            .map(|d| District::Known(d.clone()))
            .unwrap_or(District::Unknown)
    }
}

/// Resolve the group key of a row along `axis`.
///
/// `District` without a lookup, or with an `Unknown` result, gives `None`.
pub fn group_key(
    row: &PostingRow,
    axis: GroupAxis,
    lookup: Option<&dyn DistrictLookup>,
) -> Option<String> {
    match axis {
        GroupAxis::Specialty => row.specialty.clone(),
        GroupAxis::Region => row.region.clone(),
        GroupAxis::District => {
            let region = row.region.as_deref()?;
            match lookup?.lookup(region) {
                District::Known(name) => Some(name),
                District::Unknown => None,
            }
        }
    }
}

/// Normalize the skills field of every row and attach its group key
pub fn tag_rows(
    rows: &[PostingRow],
    axis: GroupAxis,
    normalizer: &TagNormalizer,
    lookup: Option<&dyn DistrictLookup>,
) -> Vec<TaggedRow> {
    rows.iter()
        .map(|row| TaggedRow {
            group: group_key(row, axis, lookup),
            tags: normalizer.normalize(row.skills.as_deref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn districts() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("Moscow".to_string(), "Central".to_string());
        map.insert("Kazan".to_string(), "Volga".to_string());
        map
    }

    #[test]
    fn test_group_key_by_axis() {
        let row = PostingRow::new(Some("Analyst"), Some("Kazan"), Some("sql"));
        let lookup = districts();

        assert_eq!(group_key(&row, GroupAxis::Specialty, None).as_deref(), Some("Analyst"));
        assert_eq!(group_key(&row, GroupAxis::Region, None).as_deref(), Some("Kazan"));
        assert_eq!(
            group_key(&row, GroupAxis::District, Some(&lookup)).as_deref(),
            Some("Volga")
        );
        assert_eq!(group_key(&row, GroupAxis::District, None), None);
    }

    #[test]
    fn test_unknown_district_has_no_group() {
        let row = PostingRow::new(Some("Analyst"), Some("Atlantis"), Some("sql"));
        let lookup = districts();
        assert_eq!(group_key(&row, GroupAxis::District, Some(&lookup)), None);
    }

    #[test]
    fn test_tag_rows_keeps_every_row() {
        let rows = vec![
            PostingRow::new(Some("Dev"), None, Some("Rust, Go")),
            PostingRow::new(None, None, Some("SQL")),
            PostingRow::new(Some("Dev"), None, None),
        ];
        let tagged = tag_rows(&rows, GroupAxis::Specialty, &TagNormalizer::default(), None);

        assert_eq!(tagged.len(), 3);
        assert_eq!(tagged[0], TaggedRow::new(Some("Dev"), &["rust", "go"]));
        assert_eq!(tagged[1], TaggedRow::new(None, &["sql"]));
        assert!(tagged[2].tags.is_empty());
    }

    #[test]
    fn test_row_deserializes_with_missing_fields() {
        let row: PostingRow = serde_json::from_str(r#"{"specialty": "QA"}"#).unwrap();
        assert_eq!(row.specialty.as_deref(), Some("QA"));
        assert_eq!(row.skills, None);
    }
}
