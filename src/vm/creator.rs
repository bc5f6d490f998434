//! New VM configuration creation

use crate::config::schema::*;
use crate::Result;
use anyhow::anyhow;
use log::info;

/// VM Creation parameters
pub struct CreateParams {
    pub name: String,
    pub guest_type: GuestType,
    pub processor_count: u32,
    /// Memory (MB)
    pub memory_size: u32,
    pub network: bool,
    pub secure_boot: bool,
    pub tpm: bool,
}

/// VM Creator
pub struct VmCreator;

impl VmCreator {
    /// Build a fresh configuration record from the given parameters
    pub fn build(params: CreateParams) -> Result<VirtualMachineConfiguration> {
        if params.name.trim().is_empty() {
            return Err(anyhow!("VM name must not be empty"));
        }
        if params.processor_count == 0 {
            return Err(anyhow!("Processor count must be at least 1"));
        }
        if params.memory_size == 0 {
            return Err(anyhow!("Memory size must be at least 1 MB"));
        }
        if params.guest_type == GuestType::Unknown {
            return Err(anyhow!("Guest type must be Windows or Linux"));
        }

        let mut cfg = VirtualMachineConfiguration::new(
            params.guest_type,
            params.name.clone(),
            params.processor_count,
            params.memory_size,
        );

        if params.network {
            cfg.network_adapters.push(NetworkAdapterConfiguration {
                enabled: true,
                connected: true,
                mac_address: random_mac(),
            });
        }

        cfg.secure_boot = params.secure_boot;
        cfg.tpm = params.tpm;
        cfg.guest_state_file = format!("{}.vmgs", params.name);
        cfg.runtime_state_file = format!("{}.vmrs", params.name);

        info!(
            "Built configuration for '{}' ({} vCPU, {} MB)",
            cfg.name, cfg.processor_count, cfg.memory_size
        );
        Ok(cfg)
    }
}

/// Random MAC in the Hyper-V OUI
pub fn random_mac() -> String {
    format!(
        "00:15:5D:{:02X}:{:02X}:{:02X}",
        rand::random::<u8>(),
        rand::random::<u8>(),
        rand::random::<u8>()
    )
}
