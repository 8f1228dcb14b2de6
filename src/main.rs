//! rectnest - nested rectangle detector
//!
//! CLI entry point

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rectnest::{annotate, exit_codes, RectangleDetector};

/// Detect nested rectangles in an image and report their nesting levels
#[derive(Debug, Parser)]
#[command(name = "rectnest", version, about)]
struct Cli {
    /// Input image file
    input: PathBuf,

    /// Annotated output image path (default: <input stem>_annotated.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print records as JSON instead of human-readable lines
    #[arg(long)]
    json: bool,

    /// Skip writing the annotated image
    #[arg(long)]
    no_annotate: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all non-result output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if !cli.input.exists() {
        eprintln!("Error: Input file does not exist: {}", cli.input.display());
        std::process::exit(exit_codes::INPUT_NOT_FOUND);
    }

    std::process::exit(match run(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_codes::GENERAL_ERROR
        }
    });
}

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let image = image::open(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?
        .to_rgb8();

    let detector = RectangleDetector::new();
    let records = detector.detect(&image)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}", record);
        }
    }

    if !cli.no_annotate {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&cli.input));
        let annotated = annotate(&image, &records);
        annotated
            .save(&output)
            .with_context(|| format!("failed to save {}", output.display()))?;
        if !cli.quiet {
            eprintln!("Annotated image saved to {}", output.display());
        }
    }

    Ok(())
}

/// `<stem>_annotated.png` next to the input file
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}_annotated.png", stem))
}
