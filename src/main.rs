//! lsbhide - hide byte payloads inside media carriers
//!
//! CLI front end over the library: hide a secret file in a carrier,
//! extract it back, or check a carrier for signs of hidden data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lsbhide::{detect_in_file, extract_from_file, hide_in_file};

/// LSB steganography for images (png/bmp), audio (wav), and video (y4m)
#[derive(Parser)]
#[command(name = "lsbhide", version)]
#[command(about = "Hide data in the least significant bits of media files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a secret file inside a carrier
    Hide {
        /// Carrier media file (png, bmp, wav, or y4m)
        #[arg(short, long)]
        cover: PathBuf,

        /// File whose bytes are hidden
        #[arg(short, long)]
        secret: PathBuf,

        /// Destination path for the modified carrier
        #[arg(short, long)]
        output: PathBuf,

        /// Encrypt the payload with this password before embedding
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Extract hidden data from a carrier
    Extract {
        /// Carrier media file holding hidden data
        #[arg(short, long)]
        input: PathBuf,

        /// Destination path for the recovered payload
        #[arg(short, long)]
        output: PathBuf,

        /// Password the payload was hidden with
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Check a carrier's LSB plane for signs of hidden data
    Detect {
        /// Media file to inspect
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Hide {
            cover,
            secret,
            output,
            password,
        } => {
            let data = fs::read(&secret)
                .with_context(|| format!("failed to read secret file {}", secret.display()))?;
            hide_in_file(&cover, &data, &output, password.as_deref())?;
            println!("Data hidden successfully");
        }

        Commands::Extract {
            input,
            output,
            password,
        } => {
            let data = extract_from_file(&input, password.as_deref())?;
            fs::write(&output, &data)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Data extracted successfully");
        }

        Commands::Detect { file } => {
            println!("Steganography detected: {}", detect_in_file(&file)?);
        }
    }

    Ok(())
}
