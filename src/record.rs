//! Records read from and written to peak tables.

pub mod annotation;
pub mod bedgraph;

pub use annotation::AnnotationRecord;
pub use bedgraph::BedGraphRecord;
