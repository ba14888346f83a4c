//! In-memory tables loaded from the value and annotation files.

pub mod annotation;
pub mod value;

pub use annotation::AnnotationTable;
pub use value::Column;
pub use value::ValueTable;
pub use value::KEY_COLUMN;
