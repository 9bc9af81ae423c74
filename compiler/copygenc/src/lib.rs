//! Copygen command-line front end.
//!
//! Loads a JSON type manifest, resolves it into a [`TypeTable`] and runs
//! one generation session over its seeds.
//!
//! [`TypeTable`]: copygen_ir::TypeTable

pub mod error;
pub mod manifest;
pub mod type_expr;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;

pub use error::CliError;
pub use manifest::{Loaded, Manifest};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Only active when `RUST_LOG` is set, e.g.
/// `RUST_LOG=copygen_emit=debug copygen types.json`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}

/// Options for one invocation.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub manifest: PathBuf,
    /// Output file; stdout when unset.
    pub output: Option<PathBuf>,
    /// Overrides the manifest's method name.
    pub method: Option<String>,
    /// Overrides the manifest's skip-tag key.
    pub skip_tag: Option<String>,
}

/// Parse and resolve a manifest from JSON text.
pub fn load(text: &str) -> Result<Loaded, CliError> {
    Manifest::from_json(text)?.resolve()
}

/// Render the Go source for a manifest given as JSON text.
pub fn render(text: &str) -> Result<String, CliError> {
    Ok(load(text)?.generator().generate())
}

/// Load the manifest, generate, and write the result.
///
/// The whole output is rendered before anything is written, so a failed
/// load never leaves a partial file behind.
#[tracing::instrument(level = "debug", skip_all, fields(manifest = %options.manifest.display()))]
pub fn run(options: &RunOptions) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&options.manifest).map_err(|source| CliError::Read {
        path: options.manifest.clone(),
        source,
    })?;
    let mut loaded = load(&text)?;
    if let Some(method) = &options.method {
        loaded.config.method.clone_from(method);
    }
    if let Some(skip_tag) = &options.skip_tag {
        loaded.config.skip_tag.clone_from(skip_tag);
    }

    let code = loaded.generator().generate();
    match &options.output {
        Some(path) => std::fs::write(path, code).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(code.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
