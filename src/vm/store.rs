//! Configuration file persistence

use crate::config::schema::VirtualMachineConfiguration;
use crate::config::{parse_with_diagnostics, serialize, Degradation};
use crate::Result;
use anyhow::Context;
use log::debug;
use std::fs;
use std::path::Path;

/// Save VM configuration to file
pub fn save_conf(path: &Path, cfg: &VirtualMachineConfiguration) -> Result<()> {
    let mut text = serialize(cfg);
    text.push('\n');
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    debug!("Saved configuration '{}' to {}", cfg.name, path.display());
    Ok(())
}

/// Load VM configuration from file
pub fn load_conf(path: &Path) -> Result<VirtualMachineConfiguration> {
    load_conf_with_diagnostics(path).map(|(cfg, _)| cfg)
}

/// Load VM configuration from file, keeping the list of local recoveries
pub fn load_conf_with_diagnostics(
    path: &Path,
) -> Result<(VirtualMachineConfiguration, Vec<Degradation>)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let (cfg, degradations) = parse_with_diagnostics(&text)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    if !degradations.is_empty() {
        debug!(
            "{}: {} setting(s) ignored or defaulted",
            path.display(),
            degradations.len()
        );
    }
    Ok((cfg, degradations))
}
