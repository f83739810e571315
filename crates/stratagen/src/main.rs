//! The Strata table generator CLI.
//!
//! Provides the `stratagen` command with the following subcommands:
//!
//! - `stratagen emit --catalog <json> --outdir <dir>` - Build both scope
//!   name maps and write the persisted artifacts
//!   (`instance_map.json`, `device_map.json`)
//! - `stratagen stats --catalog <json>` - Print hash-table statistics
//!   without writing anything
//!
//! The catalog argument is a normalized catalog document; see the
//! strata-registry crate for the format.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use strata_registry::{Catalog, CatalogDocument, Scope};
use strata_tables::{stats_report, NameMap, ScopeArtifact, StringMapBuilder};

#[derive(Parser)]
#[command(name = "stratagen", version, about = "Entry-point table generator for Strata")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the name maps and write the persisted table artifacts
    Emit {
        /// Path to the normalized catalog document (JSON)
        #[arg(long)]
        catalog: PathBuf,

        /// Directory to write the artifacts into (created if missing)
        #[arg(long)]
        outdir: PathBuf,
    },
    /// Print hash-table statistics without writing artifacts
    Stats {
        /// Path to the normalized catalog document (JSON)
        #[arg(long)]
        catalog: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Emit { catalog, outdir } => emit(&catalog, &outdir),
        Commands::Stats { catalog } => stats(&catalog),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Build both scope maps and write them as JSON artifacts.
fn emit(catalog_path: &Path, outdir: &Path) -> Result<(), String> {
    let catalog = load_catalog(catalog_path)?;
    std::fs::create_dir_all(outdir)
        .map_err(|e| format!("Failed to create {}: {}", outdir.display(), e))?;

    for (scope, filename) in [
        (Scope::Instance, "instance_map.json"),
        (Scope::Device, "device_map.json"),
    ] {
        let map = build_map(&catalog, scope)?;
        let artifact = ScopeArtifact::from_map(&map);
        let json = serde_json::to_string_pretty(&artifact)
            .map_err(|e| format!("Failed to serialize {}: {}", filename, e))?;
        let path = outdir.join(filename);
        std::fs::write(&path, json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        print!("{}", stats_report(scope_label(scope), &map));
    }

    Ok(())
}

/// Print statistics for both scope maps.
fn stats(catalog_path: &Path) -> Result<(), String> {
    let catalog = load_catalog(catalog_path)?;
    for scope in [Scope::Instance, Scope::Device] {
        let map = build_map(&catalog, scope)?;
        print!("{}", stats_report(scope_label(scope), &map));
    }
    Ok(())
}

fn load_catalog(path: &Path) -> Result<Catalog, String> {
    CatalogDocument::from_file(path)?
        .into_catalog()
        .map_err(|e| format!("Invalid catalog: {}", e))
}

fn build_map(catalog: &Catalog, scope: Scope) -> Result<NameMap, String> {
    let mut builder = StringMapBuilder::new();
    for (name, num) in catalog.names_in(scope) {
        builder.add(name, num);
    }
    builder
        .bake()
        .map_err(|e| format!("Failed to build {} map: {}", scope_label(scope), e))
}

fn scope_label(scope: Scope) -> &'static str {
    match scope {
        Scope::Instance => "instance",
        Scope::Device => "device",
    }
}
