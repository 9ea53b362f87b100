use crate::config::{LayoutConfig, load_config};
use crate::error::CanvasError;
use crate::parser::{build_canvas, parse_canvas_input};
use crate::render::{SaveOptions, render_json, write_output_json};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "canvasforge",
    version,
    about = "Build a JSON Canvas file from a node/group/edge description"
)]
pub struct Args {
    /// Input JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file, or '-' for stdout. Overrides the document's "output" key.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Layout config JSON file (spacing and sizing constants)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Skip group overlap resolution
    #[arg(long = "no-layout")]
    pub no_layout: bool,

    /// Write single-line JSON
    #[arg(long = "compact")]
    pub compact: bool,

    /// Log layout decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Where a run put its canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    File(PathBuf),
    Stdout,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    let config = load_config(args.config.as_deref())?;
    let input = read_input(args.input.as_deref())?;
    if let Written::File(path) = execute(&args, &input, config)? {
        println!("Canvas saved to {}", path.display());
    }
    Ok(())
}

pub fn execute(args: &Args, input: &str, config: LayoutConfig) -> Result<Written> {
    if input.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "no input given; usage: echo '<canvas JSON>' | canvasforge"
        ));
    }

    let mut parsed = parse_canvas_input(input)?;
    let document_output = parsed.output.take();
    let mut canvas = build_canvas(parsed, config).context("error processing canvas data")?;
    let output = args
        .output
        .clone()
        .or(document_output)
        .ok_or(CanvasError::MissingOutput)?;

    let options = SaveOptions {
        resolve_layout: !args.no_layout,
        pretty: !args.compact,
    };
    if output == Path::new("-") {
        if options.resolve_layout {
            canvas.resolve_layout();
        }
        let json = render_json(&canvas.to_file(), options.pretty)?;
        write_output_json(&json, None)?;
        return Ok(Written::Stdout);
    }

    let path = canvas
        .save_with(&output, options)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(Written::File(path))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
