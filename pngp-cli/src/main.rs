// pngp: hide a short secret in a PNG as an extra chunk after IHDR.

mod config;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pngp_core::{ChecksumMode, EmbedOptions};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "pngp", author, version, about, long_about = None)]
struct Args {
    /// Input PNG
    #[arg(short, long)]
    input: PathBuf,

    /// Output PNG (defaults to the configured output, output.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Secret to put into the image
    #[arg(short, long, default_value = "")]
    secret: String,

    /// Write a real CRC-32 for the injected chunk instead of zeros
    #[arg(long)]
    crc: bool,

    /// Print the secret hidden in the input and exit
    #[arg(long, conflicts_with_all = ["output", "secret", "crc"])]
    reveal: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (cfg, skipped) = config::load();

    // Logs go to stderr; stdout carries only the result.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level)),
        )
        .init();

    if let Some(s) = skipped {
        tracing::warn!(path = %s.path.display(), reason = %s.reason, "ignoring config file");
    }

    if args.reveal {
        let secret = pngp_core::reveal_file(&args.input)
            .with_context(|| format!("reading secret from {}", args.input.display()))?;
        match secret {
            Some(bytes) => println!("{}", String::from_utf8_lossy(&bytes)),
            None => anyhow::bail!("no secret chunk in {}", args.input.display()),
        }
        return Ok(());
    }

    let (output, options) = resolve(&args, cfg);
    tracing::debug!(?options, output = %output.display(), "embedding");

    let report = pngp_core::embed_file(&args.input, &output, args.secret.as_bytes(), &options)
        .with_context(|| {
            format!(
                "embedding into {} -> {}",
                args.input.display(),
                output.display()
            )
        })?;
    println!("Total size: {}", report.total_payload);
    Ok(())
}

/// Flags win over config (which already carries env overrides).
fn resolve(args: &Args, cfg: Config) -> (PathBuf, EmbedOptions) {
    let output = args.output.clone().unwrap_or(cfg.output);
    let checksum = if args.crc {
        ChecksumMode::Crc32
    } else {
        cfg.checksum
    };
    (output, EmbedOptions { checksum })
}
