//! Data model for medical report generation.

pub mod metadata;
pub mod record;
pub mod registry;
pub mod replacement;
pub mod token;
pub mod value;

pub use metadata::MetadataFields;
pub use record::TabularRecord;
pub use registry::{DoctorEntry, DoctorRegistry, UNKNOWN_CREDENTIAL};
pub use replacement::{ReplacementMap, ReplacementSection};
pub use token::{PlaceholderToken, reserved};
pub use value::CellValue;
