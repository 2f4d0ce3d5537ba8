// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Orthocrop CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use orthocrop::{GridConfig, Orthocrop, PanelStatus, Scene};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "orthocrop")]
#[command(about = "Crop an orthographic camera to an object on a block grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Grid settings (TOML); defaults to ./orthocrop.toml or built-in values
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Measure the active object and store Width/Height on it
    Extract {
        /// Scene JSON file
        scene: PathBuf,

        /// Output scene file, defaults to rewriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Move the camera and set the render border to crop to the active object
    Crop {
        /// Scene JSON file
        scene: PathBuf,

        /// Output scene file, defaults to rewriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show grid settings and the active object's frame
    Status {
        /// Scene JSON file
        scene: PathBuf,
    },

    /// Write the default grid settings to a TOML file
    InitConfig {
        #[arg(default_value = orthocrop::config::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Extract { scene, output } => extract_command(cli, scene, output.as_deref()),
        Commands::Crop { scene, output } => crop_command(cli, scene, output.as_deref()),
        Commands::Status { scene } => status_command(cli, scene),
        Commands::InitConfig { output } => {
            GridConfig::default().save(output)?;
            println!("Wrote default settings to {}", output.display());
            Ok(())
        }
        Commands::Version => {
            println!("Orthocrop v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<GridConfig> {
    match &cli.config {
        Some(path) => GridConfig::from_file(path),
        None => GridConfig::load(),
    }
}

fn start(cli: &Cli) -> Result<Orthocrop> {
    let mut orthocrop = Orthocrop::new();
    orthocrop.initialize(load_config(cli)?)?;
    Ok(orthocrop)
}

fn extract_command(cli: &Cli, input: &Path, output: Option<&Path>) -> Result<()> {
    let orthocrop = start(cli)?;
    let mut scene = Scene::from_file(input)?;

    let extraction = orthocrop
        .set_width_and_height(&mut scene)
        .context("Set width & height failed")?;
    scene.save(output.unwrap_or(input))?;

    println!(
        "{} {} x {} blocks",
        "Width x Height:".bright_black(),
        extraction.frame.width_blocks.to_string().cyan(),
        extraction.frame.height_blocks.to_string().cyan()
    );
    if let Some(origin) = extraction.origin {
        println!(
            "{} ({:.4}, {:.4}, {:.4})",
            "Origin moved to:".bright_black(),
            origin.x,
            origin.y,
            origin.z
        );
    }
    Ok(())
}

fn crop_command(cli: &Cli, input: &Path, output: Option<&Path>) -> Result<()> {
    let orthocrop = start(cli)?;
    let mut scene = Scene::from_file(input)?;

    let result = orthocrop
        .crop_to_active(&mut scene)
        .context("Crop to active failed")?;
    scene.save(output.unwrap_or(input))?;

    let camera = result.camera_location;
    println!(
        "{} ({:.4}, {:.4}, {:.4})",
        "Camera:".bright_black(),
        camera.x,
        camera.y,
        camera.z
    );
    println!(
        "{} x [{:.4}, {:.4}]  y [{:.4}, {:.4}]",
        "Border:".bright_black(),
        result.border.min_x,
        result.border.max_x,
        result.border.min_y,
        result.border.max_y
    );
    println!(
        "{} {}",
        "Resolution:".bright_black(),
        format!("{:.1}%", result.resolution_percentage).yellow()
    );
    Ok(())
}

fn status_command(cli: &Cli, input: &Path) -> Result<()> {
    let orthocrop = start(cli)?;
    let scene = Scene::from_file(input)?;

    match orthocrop.panel_status(&scene)? {
        PanelStatus::NeedsOrthographicCamera => {
            println!(
                "{}",
                "The scene camera needs to be in orthographic mode.".yellow()
            );
        }
        PanelStatus::Ready {
            grid,
            margin,
            frame,
        } => {
            println!("{}", "Orthocrop 2D".bold());
            println!("  {} {}", "Block Size:".bright_black(), grid.block_size);
            println!(
                "  {} {}",
                "Reference Ortho Scale:".bright_black(),
                grid.reference_ortho_scale
            );
            println!(
                "  {} {}",
                "Center Origin:".bright_black(),
                grid.set_origin_on_extract
            );
            println!(
                "  {} {}",
                "Overwrite Properties:".bright_black(),
                grid.overwrite_on_extract
            );
            match margin {
                Some(margin) => println!("  {} {}", "Block Margin:".bright_black(), margin),
                None => println!("  {}", "No active object".bright_black()),
            }
            match frame {
                Some(frame) => println!(
                    "  {} {} x {}",
                    "Width x Height:".bright_black(),
                    frame.width_blocks,
                    frame.height_blocks
                ),
                None if margin.is_some() => println!(
                    "  {}",
                    "Width/Height not set, run `orthocrop extract` first".yellow()
                ),
                None => {}
            }
        }
    }
    Ok(())
}
