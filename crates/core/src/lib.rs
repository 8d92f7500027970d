pub mod config;
pub mod error;
pub mod record;
pub mod render;

pub use config::{Config, Credentials};
pub use error::{Error, Result};
pub use record::{FieldSpec, FieldValue, Record, RecordSchema, TypeSpec};
