//! Tile Cutter - cut a square image into a zoom/x/y tile pyramid.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tile_cutter::{
    config::{Cli, Command, GenerateArgs, PlanArgs},
    plan_for_file, PyramidPlan, TileGenerator,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Generate(args) => run_generate(args),
        Command::Plan(args) => run_plan(args),
    }
}

// =============================================================================
// Generate Command
// =============================================================================

fn run_generate(args: GenerateArgs) -> ExitCode {
    init_logging(args.verbose);

    let config = args.to_config();

    info!("Configuration:");
    info!("  Source: {}", config.image_path.display());
    info!("  Output: {}", config.output_dir.display());
    info!("  Tile size: {}px", config.tile_size);
    info!("  Min zoom offset: {}", config.min_zoom_offset);
    info!("  Format: {}", config.format);

    let summary = match TileGenerator::new(config).and_then(|generator| generator.run()) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize summary: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tile_cutter=debug"
    } else {
        "tile_cutter=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Plan Command
// =============================================================================

fn run_plan(args: PlanArgs) -> ExitCode {
    let plan = match plan_for_file(
        &args.tiling.image,
        args.tiling.tile_size,
        args.tiling.min_zoom_offset,
    ) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_plan(&args, &plan);
    }

    ExitCode::SUCCESS
}

fn print_plan(args: &PlanArgs, plan: &PyramidPlan) {
    println!("Tile Pyramid Plan");
    println!("═════════════════");
    println!();
    println!("Source:    {}", args.tiling.image.display());
    println!("Size:      {0}x{0}", plan.source_size());
    println!("Tile size: {}px", plan.tile_size());
    println!("Max zoom:  {}", plan.max_zoom());
    println!("Skipped:   {}", plan.min_zoom_offset());
    println!();

    if plan.is_empty() {
        println!("  (no levels remain after the zoom offset)");
        return;
    }

    println!("  z   source  width     grid     tiles");
    println!("  ─────────────────────────────────────");
    for level in plan.levels() {
        println!(
            "  {:<3} {:<7} {:<9} {:<8} {}",
            level.adjusted_zoom,
            level.zoom,
            level.width,
            format!("{}x{}", level.cols, level.rows),
            level.tile_count()
        );
    }
    println!();
    println!("Total: {} tile(s)", plan.total_tiles());
}
