//! VNX Inventory
//!
//! Queries one VNX/CLARiiON array through naviseccli (or reads a saved
//! `-xml` report) and prints its LUNs, disks or HBA ports.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vnx_inventory::{
    parse_report, ArrayInventory, Error, InventoryClient, NaviSecCli, NaviSecConfig, Records,
    ReportKind, Result,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// VNX Inventory - LUN, disk and HBA inventory from naviseccli
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    report: Report,

    /// Array management address (SP IP or hostname)
    #[arg(long, short = 'a', env = "NAVISEC_ADDRESS", global = true)]
    address: Option<String>,

    /// Parse a saved XML report instead of running naviseccli
    #[arg(long, short = 'i', global = true)]
    input: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, env = "VNX_INVENTORY_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Path to naviseccli
    #[arg(long, env = "NAVISECCLI_PATH", global = true)]
    naviseccli: Option<PathBuf>,

    /// naviseccli security file directory
    #[arg(long, env = "NAVISEC_SECFILE", global = true)]
    secfile: Option<PathBuf>,

    /// Kill naviseccli after this many seconds
    #[arg(long, env = "NAVISEC_TIMEOUT", global = true)]
    timeout_secs: Option<u64>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Report {
    /// Logical units (`lun -list`)
    Luns,
    /// Physical disks (`getdisk -all`)
    Disks,
    /// Host bus adapters and their SP ports (`port -list -hba`)
    Hbas,
    /// All three reports
    All,
}

impl Report {
    fn kind(self) -> Option<ReportKind> {
        match self {
            Report::Luns => Some(ReportKind::Volumes),
            Report::Disks => Some(ReportKind::Disks),
            Report::Hbas => Some(ReportKind::Adapters),
            Report::All => None,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    if let Err(e) = run(&args).await {
        error!("{}", e);
        eprintln!("vnx-inventory: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.input {
        let kind = args.report.kind().ok_or_else(|| {
            Error::Configuration("--input holds a single report; pick luns, disks or hbas".into())
        })?;
        info!("Parsing {} report from {}", kind, path.display());
        let raw = std::fs::read(path)?;
        let records = parse_report(kind, &raw)?;
        return print_records(&records, args.format);
    }

    let address = args.address.as_deref().ok_or_else(|| {
        Error::Configuration("--address is required unless --input is given".into())
    })?;

    let config = load_config(args)?;
    info!("Starting VNX inventory v{} against {}", vnx_inventory::VERSION, address);
    let client = InventoryClient::new(NaviSecCli::new(config));

    match args.report.kind() {
        Some(kind) => {
            let records = client.report(address, kind).await?;
            print_records(&records, args.format)
        }
        None => {
            let inventory = client.collect(address).await?;
            print_inventory(&inventory, args.format)
        }
    }
}

/// File config first, then flag/env overrides
fn load_config(args: &Args) -> Result<NaviSecConfig> {
    let mut config = match &args.config {
        Some(path) => NaviSecConfig::from_yaml_file(path)?,
        None => NaviSecConfig::default(),
    };
    if let Some(path) = &args.naviseccli {
        config.binary_path = path.clone();
    }
    if let Some(path) = &args.secfile {
        config.secfile_path = Some(path.clone());
    }
    if args.timeout_secs.is_some() {
        config.timeout_secs = args.timeout_secs;
    }
    config.validate()?;
    Ok(config)
}

// =============================================================================
// Output
// =============================================================================

fn print_records(records: &Records, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(records)?),
        OutputFormat::Text => print_text(records),
    }
    Ok(())
}

fn print_inventory(inventory: &ArrayInventory, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(inventory)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(inventory)?),
        OutputFormat::Text => {
            println!("{} ({})", inventory.endpoint, inventory.collected_at.to_rfc3339());
            print_text(&Records::Volumes(inventory.volumes.clone()));
            print_text(&Records::Disks(inventory.disks.clone()));
            print_text(&Records::Adapters(inventory.hbas.clone()));
        }
    }
    Ok(())
}

fn print_text(records: &Records) {
    match records {
        Records::Volumes(volumes) => {
            for (i, v) in volumes.iter().enumerate() {
                println!(
                    "{} LUN {} {} {:.3} GB pool={} raid={} thin={}",
                    i, v.id, v.name, v.user_capacity_gb, v.pool_name, v.raid_type, v.is_thin_lun
                );
            }
        }
        Records::Disks(disks) => {
            for (i, d) in disks.iter().enumerate() {
                println!(
                    "{} {} {} {} {} {}",
                    i, d.location, d.vendor_id, d.product_id, d.serial_number, d.drive_type.trim_end()
                );
            }
        }
        Records::Adapters(hbas) => {
            for (i, h) in hbas.iter().enumerate() {
                println!("{} {} {} {}", i, h.uid, h.server_name, h.server_ip_address);
                for p in &h.ports {
                    println!(
                        "    {} port {} logged_in={} sg={}",
                        p.sp_name, p.sp_port_id, p.logged_in, p.storage_group_name
                    );
                }
            }
        }
    }
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries the report; logs go to stderr
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
