//! nbtmesh - export a scene dump to an NBTMesh file
//!
//! Reads a JSON scene dump (optionally gzip-compressed, `.gz`) produced by the
//! authoring host and writes the compressed tag tree to the output path.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use nbtmesh::codec::decompress;
use nbtmesh::{ExportOptions, InMemoryScene, export_scene};

#[derive(Parser)]
#[command(name = "nbtmesh")]
#[command(about = "Export a scene dump to an NBTMesh file")]
#[command(version)]
struct Cli {
    /// Scene dump (JSON, or gzip-compressed JSON ending in .gz)
    scene: PathBuf,

    /// Output .nbtmesh file
    output: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_scene(path: &Path) -> Result<InMemoryScene> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read scene: {:?}", path))?;
    let json = if path.extension().is_some_and(|ext| ext == "gz") {
        decompress(&bytes).with_context(|| format!("Failed to decompress scene: {:?}", path))?
    } else {
        bytes
    };
    serde_json::from_slice(&json).with_context(|| format!("Failed to parse scene: {:?}", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    tracing::info!("Loading scene {:?}", cli.scene);
    let mut scene = load_scene(&cli.scene)?;

    tracing::info!("Exporting {:?} -> {:?}", cli.scene, cli.output);
    let summary = export_scene(&mut scene, &cli.output, &ExportOptions::default())
        .with_context(|| format!("Failed to export {:?}", cli.output))?;

    tracing::info!(
        "Done! {} meshes, {} triangle groups, {} materials, {} bytes",
        summary.meshes,
        summary.triangle_groups,
        summary.materials,
        summary.bytes_written
    );
    Ok(())
}
