use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use nanabox_config::cli::commands::{Cli, Cmd};
use nanabox_config::cli::completions::{render_man_page, write_completions};
use nanabox_config::config::mapping::TextMapping;
use nanabox_config::config::schema::{GpuAssignmentMode, VirtualMachineConfiguration};
use nanabox_config::serialize;
use nanabox_config::vm::creator::{CreateParams, VmCreator};
use nanabox_config::vm::store::{load_conf_with_diagnostics, save_conf};
use std::fs;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn print_summary(cfg: &VirtualMachineConfiguration) {
    let text_or = |text: Option<&'static str>, fallback: &'static str| text.unwrap_or(fallback);
    println!("Name:            {}", cfg.name);
    println!("Guest type:      {}", text_or(cfg.guest_type.to_text(), "Unknown"));
    println!("Processors:      {}", cfg.processor_count);
    println!("Memory (MB):     {}", cfg.memory_size);
    match cfg.gpu.assignment_mode {
        GpuAssignmentMode::List => {
            println!("GPU:             List ({})", cfg.gpu.selected_devices.join(", "))
        }
        mode => println!("GPU:             {}", text_or(mode.to_text(), "Disabled")),
    }
    println!("COM ports:       {}", cfg.com_ports.len());
    println!("Network:         {}", cfg.network_adapters.len());
    println!("SCSI devices:    {}", cfg.scsi_devices.len());
    println!("Shared folders:  {}", cfg.shared_folders.len());
    println!("Secure boot:     {}", cfg.secure_boot);
    println!("TPM:             {}", cfg.tpm);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Cmd::Check { file, strict } => {
            let (cfg, degradations) = load_conf_with_diagnostics(&file)?;
            print_summary(&cfg);
            for degradation in &degradations {
                println!("warning: {degradation}");
            }
            if strict && !degradations.is_empty() {
                return Err(anyhow!(
                    "{}: {} setting(s) ignored or defaulted",
                    file.display(),
                    degradations.len()
                ));
            }
            println!("{} is valid", file.display());
        }

        Cmd::Fmt { file, write } => {
            let (cfg, _) = load_conf_with_diagnostics(&file)?;
            if write {
                save_conf(&file, &cfg)?;
                info!("Rewrote {}", file.display());
            } else {
                println!("{}", serialize(&cfg));
            }
        }

        Cmd::New {
            file,
            name,
            guest_type,
            cpus,
            memory,
            no_network,
            secure_boot,
            tpm,
            force,
        } => {
            if file.exists() && !force {
                return Err(anyhow!(
                    "{} already exists (use --force to overwrite)",
                    file.display()
                ));
            }
            let cfg = VmCreator::build(CreateParams {
                name,
                guest_type,
                processor_count: cpus,
                memory_size: memory,
                network: !no_network,
                secure_boot,
                tpm,
            })?;
            if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            save_conf(&file, &cfg)?;
            println!("Created VM configuration '{}' at {}", cfg.name, file.display());
        }

        Cmd::Completions { shell } => {
            write_completions(shell, &mut std::io::stdout());
        }

        Cmd::ManPage => {
            print!("{}", render_man_page()?);
        }
    }
    Ok(())
}
