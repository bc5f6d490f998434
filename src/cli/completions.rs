//! Shell completion and man page generation

use crate::cli::commands::Cli;
use crate::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Write shell completions for `shell`
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
}

/// Render the man page
pub fn render_man_page() -> Result<String> {
    let man = clap_mangen::Man::new(Cli::command());
    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bash_completions_name_binary() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut out);
        assert!(String::from_utf8(out).unwrap().contains("nanabox-config"));
    }

    #[test]
    fn test_man_page_header() {
        assert!(render_man_page().unwrap().contains(".TH"));
    }
}
