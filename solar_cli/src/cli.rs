//! Command line definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use solar_core::calculations::cable::{CableInput, InstallType};
use solar_core::conductors::ConductorMaterial;
use solar_core::settings::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "solar",
    version,
    about = "Off-grid solar planning: cable sizing and daily energy budget"
)]
pub struct Cli {
    /// Directory holding app.json (devices and settings)
    #[arg(long, global = true, env = "APP_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the minimum AWG conductor for a circuit
    Size(SizeArgs),

    /// Daily energy summary of the stored device list
    Energy {
        /// Print JSON instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Manage the device list
    Devices {
        #[command(subcommand)]
        command: DeviceCommand,
    },

    /// Show or change sizing defaults
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

fn parse_install(s: &str) -> Result<InstallType, String> {
    InstallType::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_material(s: &str) -> Result<ConductorMaterial, String> {
    ConductorMaterial::from_str_flexible(s).map_err(|e| e.to_string())
}

/// Circuit parameters. Anything omitted comes from the stored settings.
#[derive(Args, Debug, Clone, Default)]
pub struct CircuitArgs {
    /// Installation type: dc, ac1 (single-phase) or ac3 (three-phase)
    #[arg(long, value_parser = parse_install)]
    pub install: Option<InstallType>,

    /// Nominal system voltage (V)
    #[arg(long)]
    pub voltage: Option<f64>,

    /// Allowable voltage drop (%)
    #[arg(long)]
    pub drop: Option<f64>,

    /// Conductor material: cu or al
    #[arg(long, value_parser = parse_material)]
    pub material: Option<ConductorMaterial>,

    /// Ambient temperature (°C), -20 to 80
    #[arg(long, allow_negative_numbers = true)]
    pub ambient: Option<f64>,

    /// Power factor (AC loads)
    #[arg(long)]
    pub pf: Option<f64>,

    /// Additional efficiency factor (inverter, controller)
    #[arg(long)]
    pub efficiency: Option<f64>,
}

impl CircuitArgs {
    /// Overlay the given flags on `settings`.
    pub fn apply_to(&self, settings: &Settings) -> Settings {
        let mut merged = settings.clone();
        merged.install_type = self.install.unwrap_or(merged.install_type);
        merged.material = self.material.unwrap_or(merged.material);
        merged.voltage_v = self.voltage.unwrap_or(merged.voltage_v);
        merged.drop_pct = self.drop.unwrap_or(merged.drop_pct);
        merged.ambient_c = self.ambient.unwrap_or(merged.ambient_c);
        merged.power_factor = self.pf.unwrap_or(merged.power_factor);
        merged.efficiency = self.efficiency.unwrap_or(merged.efficiency);
        merged
    }
}

#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    /// Load power (W)
    #[arg(long)]
    pub load: f64,

    /// One-way distance from source to load (m)
    #[arg(long, default_value_t = 10.0)]
    pub distance: f64,

    /// OCPD (breaker/fuse) rating in A, for the grounding suggestion
    #[arg(long)]
    pub ocpd: Option<f64>,

    #[command(flatten)]
    pub circuit: CircuitArgs,

    /// Also print the per-gauge comparison table
    #[arg(long)]
    pub table: bool,

    /// Include failing sizes in the table
    #[arg(long, requires = "table")]
    pub all: bool,

    /// Print JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

impl SizeArgs {
    /// Build the sizing input, falling back to `settings` for omitted flags.
    pub fn to_input(&self, settings: &Settings) -> CableInput {
        let input = self.circuit.apply_to(settings).cable_input(self.distance, self.load);
        match self.ocpd {
            Some(ocpd) => input.with_ocpd(ocpd),
            None => input,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    /// List stored devices
    List {
        #[arg(long)]
        json: bool,
    },

    /// Add a device
    Add {
        /// Short name, e.g. "washing machine"
        name: String,

        /// Power draw while running (W)
        #[arg(long)]
        power: f64,

        /// Average hours per day the device is on
        #[arg(long)]
        duty: f64,

        /// How many of this device
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Remove a device by id
    Remove { id: String },

    /// Import devices from JSON (a list, or {"devices": [...]})
    Import {
        file: PathBuf,

        /// Replace the current list instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Export devices to a JSON file
    Export { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show current defaults
    Show {
        #[arg(long)]
        json: bool,
    },

    /// Change defaults
    Set(CircuitArgs),

    /// Restore factory defaults
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_size_uses_settings_for_omitted_flags() {
        let cli = parse(&["solar", "size", "--load", "500"]);
        let Command::Size(args) = cli.command else {
            panic!("expected size command");
        };
        let input = args.to_input(&Settings::default());
        assert_eq!(input.distance_m, 10.0);
        assert_eq!(input.load_w, 500.0);
        assert_eq!(input.voltage_v, 24.0);
        assert_eq!(input.install_type, InstallType::Dc);
        assert_eq!(input.ocpd_a, None);
    }

    #[test]
    fn test_size_flags_override_settings() {
        let cli = parse(&[
            "solar", "size", "--load", "9000", "--distance", "35", "--install", "ac3", "--voltage", "400",
            "--material", "al", "--ambient", "-5", "--pf", "0.9", "--ocpd", "40", "--table", "--all",
        ]);
        let Command::Size(args) = cli.command else {
            panic!("expected size command");
        };
        assert!(args.table && args.all);
        let input = args.to_input(&Settings::default());
        assert_eq!(input.install_type, InstallType::ThreePhase);
        assert_eq!(input.material, ConductorMaterial::Aluminum);
        assert_eq!(input.voltage_v, 400.0);
        assert_eq!(input.distance_m, 35.0);
        assert_eq!(input.ambient_c, -5.0);
        assert_eq!(input.power_factor, 0.9);
        assert_eq!(input.drop_pct, 3.0);
        assert_eq!(input.ocpd_a, Some(40.0));
    }

    #[test]
    fn test_size_requires_load() {
        assert!(Cli::try_parse_from(["solar", "size"]).is_err());
    }

    #[test]
    fn test_all_requires_table() {
        assert!(Cli::try_parse_from(["solar", "size", "--load", "10", "--all"]).is_err());
    }

    #[test]
    fn test_install_aliases() {
        let cli = parse(&["solar", "size", "--load", "10", "--install", "ac_1ph"]);
        let Command::Size(args) = cli.command else {
            panic!("expected size command");
        };
        assert_eq!(args.circuit.install, Some(InstallType::SinglePhase));

        let cli = parse(&["solar", "size", "--load", "10", "--install", "three-phase", "--material", "aluminium"]);
        let Command::Size(args) = cli.command else {
            panic!("expected size command");
        };
        assert_eq!(args.circuit.install, Some(InstallType::ThreePhase));
        assert_eq!(args.circuit.material, Some(ConductorMaterial::Aluminum));
    }

    #[test]
    fn test_unknown_install_or_material_rejected() {
        assert!(Cli::try_parse_from(["solar", "size", "--load", "10", "--install", "ac2"]).is_err());
        assert!(Cli::try_parse_from(["solar", "size", "--load", "10", "--material", "gold"]).is_err());
    }

    #[test]
    fn test_device_commands() {
        let cli = parse(&["solar", "devices", "add", "Fridge", "--power", "120", "--duty", "8"]);
        match cli.command {
            Command::Devices {
                command: DeviceCommand::Add { name, power, duty, count },
            } => {
                assert_eq!(name, "Fridge");
                assert_eq!(power, 120.0);
                assert_eq!(duty, 8.0);
                assert_eq!(count, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = parse(&["solar", "devices", "import", "devices.json", "--replace"]);
        assert!(matches!(
            cli.command,
            Command::Devices {
                command: DeviceCommand::Import { replace: true, .. }
            }
        ));
    }

    #[test]
    fn test_global_data_dir() {
        let cli = parse(&["solar", "energy", "--data-dir", "/tmp/solar", "--json"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/solar")));
        assert!(matches!(cli.command, Command::Energy { json: true }));
    }

    #[test]
    fn test_settings_set_merges() {
        let cli = parse(&["solar", "settings", "set", "--voltage", "48", "--drop", "2"]);
        let Command::Settings {
            command: SettingsCommand::Set(args),
        } = cli.command
        else {
            panic!("expected settings set");
        };
        let merged = args.apply_to(&Settings::default());
        assert_eq!(merged.voltage_v, 48.0);
        assert_eq!(merged.drop_pct, 2.0);
        assert_eq!(merged.material, ConductorMaterial::Copper);
    }
}
