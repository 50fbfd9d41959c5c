use clap::{Parser, Subcommand};
use core_mods::archive::ZipArchiver;
use core_mods::config::{self, RunPaths};
use core_mods::{generate, manifest, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "core-mods")]
#[command(about = "Build core-mod .qmod packages and their index page")]
#[command(long_about = "\
Build core-mod .qmod packages and their index page

Reads core_mods.json, a JSON object keyed by game version:

  {
    \"1.28.0_4124311467\": {
      \"lastUpdated\": \"2023-05-09T17:45:12.381Z\",
      \"mods\": [
        { \"id\": \"beatsaber-hook\", \"version\": \"3.14.0\", \"downloadLink\": \"https://...\" }
      ]
    }
  }

and writes into the output directory:

  index.html                   # One link per package, in manifest order
  1.28.0_4124311467.qmod       # Zip holding mod.json for that game version

Package versions come from lastUpdated (2023-05-09T17:45:12.381Z becomes
2023.05.09-174512381Z) and archive file times are set to the same instant.

Run with no command to build. Run 'core-mods gen-config' to generate a
documented core-mods.toml.")]
#[command(version)]
struct Cli {
    /// Input manifest
    #[arg(long, default_value = RunPaths::MANIFEST_FILE, global = true)]
    manifest: PathBuf,

    /// Deploy directory for index.html and the .qmod archives
    #[arg(long, default_value = ".", global = true)]
    output: PathBuf,

    /// Optional config file (stock defaults when absent)
    #[arg(long, default_value = "core-mods.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate every package and the index (default)
    Build,
    /// Validate the manifest and show the packages a build would produce
    Check,
    /// Print a stock core-mods.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let paths = RunPaths {
        manifest: cli.manifest,
        output_dir: cli.output,
    };

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let settings = config::load_config(&cli.config)?;
            println!("==> Building packages from {}", paths.manifest.display());
            let report = generate::generate(&paths, &settings, &ZipArchiver)?;
            output::print_generate_output(&report);
            println!("==> Build complete: {}", paths.output_dir.display());
        }
        Command::Check => {
            let settings = config::load_config(&cli.config)?;
            let manifest = manifest::load_manifest(&paths.manifest)?;
            let planned = generate::plan(&manifest, &settings)?;
            output::print_check_output(&planned, &paths.manifest);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
