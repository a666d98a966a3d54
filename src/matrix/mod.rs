//! Count matrices derived from tagged rows
//!
//! Both matrices are sparse and rebuilt from scratch for every row set.
//! An empty matrix means no graph can be built; it is not an error.

pub mod cooccurrence;
pub mod incidence;

pub use cooccurrence::CooccurrenceMatrix;
pub use incidence::IncidenceMatrix;
