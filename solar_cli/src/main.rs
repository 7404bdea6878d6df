//! # Solar Planner CLI
//!
//! Terminal front end for `solar_core`: cable sizing against stored
//! defaults, and a persisted device list with its daily energy summary.

mod cli;
mod report;

use std::fs;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use solar_core::calculations::cable::{size_cable, CableInput, CableResult};
use solar_core::calculations::cable_table::{gauge_report, GaugeReportRow};
use solar_core::calculations::energy::summarize;
use solar_core::devices::{export_devices, import_devices, Device, ImportMode};
use solar_core::errors::CalcError;
use solar_core::file_io::DataStore;
use solar_core::settings::Settings;

use cli::{Cli, Command, DeviceCommand, SettingsCommand, SizeArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {:#}", err);
    if let Some(calc) = err.downcast_ref::<CalcError>() {
        if calc.is_recoverable() {
            eprintln!("The data store is busy; retry once the other writer finishes.");
        }
        if let Ok(json) = serde_json::to_string_pretty(calc) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
    }
}

fn open_store(cli: &Cli) -> Result<DataStore> {
    let store = match &cli.data_dir {
        Some(dir) => DataStore::open(dir.clone()),
        None => DataStore::from_env(),
    }
    .context("opening data store")?;
    debug!(path = %store.path().display(), "data store ready");
    Ok(store)
}

fn run(cli: Cli) -> Result<()> {
    let store = open_store(&cli)?;
    match cli.command {
        Command::Size(args) => run_size(&store, &args),
        Command::Energy { json } => run_energy(&store, json),
        Command::Devices { command } => run_devices(&store, command),
        Command::Settings { command } => run_settings(&store, command),
    }
}

#[derive(Serialize)]
struct SizeOutput<'a> {
    input: &'a CableInput,
    result: &'a CableResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<&'a [GaugeReportRow]>,
}

fn run_size(store: &DataStore, args: &SizeArgs) -> Result<()> {
    let settings = store.load_settings()?;
    let input = args.to_input(&settings);
    debug!(?input, "sizing request");

    let result = size_cable(&input)?;
    let table = if args.table { Some(gauge_report(&input)?) } else { None };

    if args.json {
        let output = SizeOutput {
            input: &input,
            result: &result,
            table: table.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let mut out = io::stdout().lock();
    report::cable_report(&mut out, &input, &result)?;
    if let Some(rows) = table {
        writeln!(out)?;
        report::gauge_table(&mut out, &rows, args.all)?;
    }
    Ok(())
}

fn run_energy(store: &DataStore, json: bool) -> Result<()> {
    let devices = store.load_devices()?;
    let summary = summarize(&devices);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        report::energy_report(&mut io::stdout().lock(), &devices, &summary)?;
    }
    Ok(())
}

fn run_devices(store: &DataStore, command: DeviceCommand) -> Result<()> {
    match command {
        DeviceCommand::List { json } => {
            let devices = store.load_devices()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&devices.devices)?);
            } else {
                report::device_table(&mut io::stdout().lock(), &devices)?;
            }
        }
        DeviceCommand::Add {
            name,
            power,
            duty,
            count,
        } => {
            let device = Device::new(name, power, duty, count)?;
            let mut devices = store.load_devices()?;
            let id = devices.add(device);
            store.save_devices(&devices)?;
            println!("Added device {}", id);
        }
        DeviceCommand::Remove { id } => {
            let mut devices = store.load_devices()?;
            let removed = devices
                .remove(&id)
                .ok_or_else(|| CalcError::invalid_input("id", &id, "No device with this id"))?;
            store.save_devices(&devices)?;
            println!("Removed {} ({})", removed.name, removed.id);
        }
        DeviceCommand::Import { file, replace } => {
            let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let imported = import_devices(&text)?;
            let mode = if replace { ImportMode::Replace } else { ImportMode::Append };
            let mut devices = store.load_devices()?;
            let count = devices.apply_import(imported, mode);
            store.save_devices(&devices)?;
            info!(count, ?mode, file = %file.display(), "devices imported");
            println!("Imported {} device(s); {} total", count, devices.len());
        }
        DeviceCommand::Export { file } => {
            let devices = store.load_devices()?;
            let json = export_devices(&devices)?;
            fs::write(&file, json).with_context(|| format!("writing {}", file.display()))?;
            println!("Exported {} device(s) to {}", devices.len(), file.display());
        }
    }
    Ok(())
}

fn run_settings(store: &DataStore, command: SettingsCommand) -> Result<()> {
    match command {
        SettingsCommand::Show { json } => {
            let settings = store.load_settings()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                report::settings_report(&mut io::stdout().lock(), &settings)?;
            }
        }
        SettingsCommand::Set(args) => {
            let settings = args.apply_to(&store.load_settings()?);
            store.save_settings(&settings)?;
            report::settings_report(&mut io::stdout().lock(), &settings)?;
        }
        SettingsCommand::Reset => {
            let settings = Settings::default();
            store.save_settings(&settings)?;
            report::settings_report(&mut io::stdout().lock(), &settings)?;
        }
    }
    Ok(())
}
