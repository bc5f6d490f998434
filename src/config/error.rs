//! Whole-document failures

use thiserror::Error;

/// Errors that discard the entire parse attempt.
///
/// Anything not listed here is recovered locally by the deserializer
/// (defaulted or dropped) and never reaches the caller as an error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Malformed configuration document: {0}")]
    MalformedDocument(#[from] serde_json::Error),
    #[error("Invalid Virtual Machine Configuration: \"NanaBox\".\"Type\" must be \"VirtualMachine\"")]
    InvalidDocumentType,
    #[error("Unsupported configuration version {0}")]
    UnsupportedVersion(u64),
    #[error("Missing or invalid field \"{0}\"")]
    MissingOrInvalidField(&'static str),
    #[error("Invalid Processor Count")]
    InvalidProcessorCount,
    #[error("Invalid Memory Size")]
    InvalidMemorySize,
}
