//! Configuration document <-> record translation

pub mod de;
pub mod error;
pub mod mapping;
pub mod schema;
pub mod ser;

pub use de::{parse, parse_with_diagnostics, Degradation};
pub use error::ConfigError;
pub use ser::serialize;
