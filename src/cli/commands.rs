//! CLI command definitions

use crate::config::mapping::TextMapping;
use crate::config::schema::GuestType;
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// NanaBox configuration tool (Rust)
#[derive(Parser, Debug)]
#[command(name = "nanabox-config", about = "NanaBox virtual machine configuration tool")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Validate a configuration file and print a summary
    Check {
        file: PathBuf,
        /// Also fail when any setting was ignored or defaulted
        #[arg(long)]
        strict: bool,
    },

    /// Rewrite a configuration file in canonical form
    Fmt {
        file: PathBuf,
        /// Write the result back to the file instead of stdout
        #[arg(long, short)]
        write: bool,
    },

    /// Create a new configuration file
    New {
        file: PathBuf,

        /// VM display name
        #[arg(long)]
        name: String,

        /// Guest OS family
        #[arg(long, value_parser = parse_guest_type, default_value = "Windows")]
        guest_type: GuestType,

        /// Processor count
        #[arg(long, default_value_t = 2)]
        cpus: u32,

        /// Memory (MB)
        #[arg(long, default_value_t = 4096)]
        memory: u32,

        /// Do not add a network adapter
        #[arg(long)]
        no_network: bool,

        #[arg(long)]
        secure_boot: bool,

        #[arg(long)]
        tpm: bool,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate man page
    ManPage,
}

/// Guest type by its document spelling
fn parse_guest_type(text: &str) -> Result<GuestType, String> {
    GuestType::from_text(text).ok_or_else(|| {
        let known: Vec<&str> = GuestType::TABLE.iter().filter_map(|(_, t)| *t).collect();
        format!("expected one of: {}", known.join(", "))
    })
}
