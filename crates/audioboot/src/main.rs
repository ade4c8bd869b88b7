use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use avrasm_rs::srec::parse_srec;
use avrasm_rs::transport::{paginate, Command, Modulator};
use avrasm_rs::{wav, ByteImage, TransportConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Encode a program image for the audio bootloader", long_about = None)]
struct Cli {
    /// Input file: S-records, or a raw binary with --raw
    #[arg(value_name = "FILE")]
    input: PathBuf,
    /// Treat the input as a raw binary loaded at --base
    #[arg(long)]
    raw: bool,
    /// Load address for --raw input
    #[arg(long, default_value_t = 0u32)]
    base: u32,
    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Wav)]
    format: Format,
    /// JSON transport settings
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the frame list before encoding
    #[arg(long)]
    frames: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Wav,
    Signal,
}

fn load(cli: &Cli) -> Result<ByteImage> {
    if cli.raw {
        let bytes = std::fs::read(&cli.input)?;
        let mut img = ByteImage::new();
        img.load(cli.base, &bytes)?;
        return Ok(img);
    }
    let text = std::fs::read_to_string(&cli.input)?;
    Ok(parse_srec(&text)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let image = load(&cli).with_context(|| format!("loading {}", cli.input.display()))?;
    let cfg = match &cli.config {
        Some(p) => TransportConfig::from_json(&std::fs::read_to_string(p)?)?,
        None => TransportConfig::default(),
    };

    let frames = paginate(&image)?;
    if cli.frames {
        println!("{:<6} {:<6} {:<8}", "cmd", "page", "addr");
        for f in &frames {
            let cmd = match f.command { Command::Page => "page", Command::Run => "run" };
            println!("{cmd:<6} {:<6} {:#08x}", f.page, f.page as u32 * 128);
        }
    }
    let signal = Modulator::new(cfg).frames(&frames);
    info!(bytes = image.len(), frames = frames.len(), samples = signal.len(), "encoded");

    let out = match cli.format {
        Format::Wav => wav::render(&signal, &cfg),
        Format::Signal => signal.samples().iter().map(|v| format!("{v}\n")).collect::<String>().into_bytes(),
    };
    std::fs::write(&cli.output, out).with_context(|| format!("writing {}", cli.output.display()))?;
    Ok(())
}
