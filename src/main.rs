mod config;
mod error;
mod paths;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{load_cfg, save_cfg};
use crate::error::HarnessError;
use crate::pipeline::{print_pipeline, resolve_mode, run_pipeline, ModeFlags, ProcessRunner};

#[derive(Parser, Debug)]
#[command(name = "romtest")]
#[command(about = "Runs the ROM generator against a base ROM and checks the result end to end")]
#[command(version)]
struct Args {
    /// Only check that the generator accepts the base ROM, without writing any output
    #[arg(long)]
    direct: bool,

    /// Generate a patch, apply it with the Python randomizer, and run the result
    #[arg(long = "patch")]
    patch_and_run: bool,

    /// Config file (default: $XDG_CONFIG_HOME/romtest/settings.json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base ROM to feed the generator
    #[arg(long, value_name = "FILE")]
    base_rom: Option<PathBuf>,

    /// Directory for generated patches and ROMs
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Stop after the ROM is built instead of opening it in the emulator
    #[arg(long)]
    no_emulator: bool,

    /// Print the commands that would run and exit
    #[arg(long)]
    dry_run: bool,

    /// Write the effective config to the config file and exit
    #[arg(long)]
    write_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> Result<(), HarnessError> {
    let selection = resolve_mode(ModeFlags {
        direct: args.direct,
        patch_and_run: args.patch_and_run,
    });
    if !selection.ignored.is_empty() {
        tracing::warn!(
            "Ignoring {} in favor of {} mode",
            selection.ignored.join(", "),
            selection.mode
        );
    }

    let cfg_path = args.config.unwrap_or_else(paths::default_config_path);
    let mut cfg = load_cfg(&cfg_path)?;
    if let Some(base_rom) = args.base_rom {
        cfg.base_rom = base_rom;
    }
    if let Some(output_dir) = args.output_dir {
        cfg.output_dir = output_dir;
    }
    if args.no_emulator {
        cfg.launch_emulator = false;
    }

    if args.write_config {
        save_cfg(&cfg_path, &cfg)?;
        tracing::info!("Wrote config to {}", cfg_path.display());
        return Ok(());
    }
    let cfg = cfg.into_absolute()?;

    if args.dry_run {
        return print_pipeline(selection.mode, &cfg);
    }

    tracing::info!("Base ROM: {}", cfg.base_rom.display());
    tracing::info!("Output directory: {}", cfg.output_dir.display());

    let report = run_pipeline(selection.mode, &cfg, &mut ProcessRunner)?;
    tracing::debug!("States: {:?}", report.history);
    tracing::info!(
        "{} pipeline passed ({} stages)",
        report.mode,
        report.stages.len()
    );
    Ok(())
}
