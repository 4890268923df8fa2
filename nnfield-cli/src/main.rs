use clap::Parser;
use nnfield::io::{load_rgb_image, save_rgb_png};
use nnfield::{MatchParams, NnfResult, PatchMatcher};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Approximate nearest-neighbor field between two images (PatchMatch)"
)]
struct Cli {
    /// Image the field is computed for.
    source: PathBuf,
    /// Image the field points into; may have different dimensions.
    target: PathBuf,
    /// Output PNG: the source reconstructed from matched target pixels.
    #[arg(short, long, value_name = "FILE", default_value = "nnf.png")]
    output: PathBuf,
    /// Patch radius; the comparison window is (2r+1) squared.
    #[arg(long, default_value_t = 3)]
    radius: usize,
    /// Number of propagation/search iterations.
    #[arg(long, default_value_t = 3)]
    iterations: usize,
    /// RNG seed; the same seed reproduces the exact same field.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Enable tracing output (filtered by RUST_LOG).
    #[arg(long)]
    trace: bool,
}

fn run(cli: &Cli) -> NnfResult<()> {
    let source = load_rgb_image(&cli.source)?;
    let target = load_rgb_image(&cli.target)?;
    tracing::info!(
        source_w = source.width(),
        source_h = source.height(),
        target_w = target.width(),
        target_h = target.height(),
        radius = cli.radius,
        iterations = cli.iterations,
        "matching"
    );

    let params = MatchParams {
        radius: cli.radius,
        iterations: cli.iterations,
        seed: cli.seed,
    };
    let mut matcher = PatchMatcher::new(source.view(), target.view(), &params)?;
    matcher.run();

    save_rgb_png(&matcher.reconstruct(), &cli.output)?;
    tracing::info!(output = %cli.output.display(), "wrote reconstruction");
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
