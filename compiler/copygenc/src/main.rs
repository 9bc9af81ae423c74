//! The `copygen` command.
//!
//! `copygen <manifest.json> [-o <out.go>]` writes a Go copy method for every
//! record reachable from the manifest's seeds.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use copygenc::{init_tracing, run, RunOptions};

#[derive(Parser)]
#[command(name = "copygen", version, about = "Generate Go deep-copy methods")]
struct Cli {
    /// Path to the JSON type manifest
    manifest: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Name of the generated method (overrides the manifest)
    #[arg(long)]
    method: Option<String>,

    /// Struct tag key that excludes a field (overrides the manifest)
    #[arg(long = "skip-tag")]
    skip_tag: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let options = RunOptions {
        manifest: cli.manifest,
        output: cli.output,
        method: cli.method,
        skip_tag: cli.skip_tag,
    };
    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
