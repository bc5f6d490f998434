//! NanaBox configuration library
//!
//! Translates the JSON virtual machine configuration document into a
//! validated [`VirtualMachineConfiguration`] record and back.

pub mod cli;
pub mod config;
pub mod vm;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use config::schema::VirtualMachineConfiguration;
pub use config::{parse, parse_with_diagnostics, serialize, ConfigError, Degradation};
pub use vm::creator::VmCreator;

/// Library error type for file and CLI helpers
pub type Result<T> = anyhow::Result<T>;
