//! Permission-annotated tree views.

pub mod materializer;
pub mod record;

pub use materializer::{TreeMaterializer, DEFAULT_START_LEVEL};
pub use record::{count_records, find_record, AnnotatedNodeRecord};
