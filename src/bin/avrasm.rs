use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use avrasm_rs::instructions::TABLE;
use avrasm_rs::output::finish;
use avrasm_rs::{Artifact, AssembleOptions, Assembler, OutputMode, TransportConfig};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble AVR source into S-records, a listing or bootloader audio"
)]
struct Opts {
    /// Assembler source (one instruction or directive per line)
    #[arg(value_name = "SOURCE", required_unless_present = "mnemonics")]
    input: Option<PathBuf>,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Mode::Srec)]
    mode: Mode,
    /// JSON file overriding transport settings (sample_rate, sync_edges, ...)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Report diagnostics as JSON
    #[arg(long)]
    json: bool,
    /// Write the label table (offset and name per line) to FILE
    #[arg(long, value_name = "FILE")]
    symbols: Option<PathBuf>,
    /// Print the supported mnemonics and exit
    #[arg(long)]
    mnemonics: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Srec,
    Listing,
    Audio,
    Signal,
}

impl From<Mode> for OutputMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Srec => OutputMode::Srec,
            Mode::Listing => OutputMode::Listing,
            Mode::Audio => OutputMode::Audio,
            Mode::Signal => OutputMode::Signal,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    if opts.mnemonics {
        for d in TABLE {
            println!("{:<8} {:?}", d.mnemonic, d.form);
        }
        return Ok(());
    }
    let Some(input) = opts.input else { bail!("no input file") };

    let source = std::fs::read_to_string(&input).with_context(|| format!("reading {}", input.display()))?;
    let transport = match &opts.config {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            TransportConfig::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
        }
        None => TransportConfig::default(),
    };
    let options = AssembleOptions { mode: opts.mode.into(), transport };

    let built = Assembler::new().assemble(&source).and_then(|program| {
        let artifact = finish(&program, &options)?;
        Ok((program, artifact))
    });
    let (program, artifact) = match built {
        Ok(p) => p,
        Err(diags) => {
            if opts.json {
                eprintln!("{}", serde_json::to_string_pretty(&diags)?);
            } else {
                for d in &diags {
                    eprintln!("{d}");
                }
            }
            bail!("{}: {} error(s)", input.display(), diags.len());
        }
    };

    if let Some(path) = &opts.symbols {
        if program.symbols.is_empty() {
            warn!("no labels defined");
        }
        let table: String = program
            .symbols
            .by_offset()
            .into_iter()
            .map(|(name, offset)| format!("{offset:06x} {name}\n"))
            .collect();
        std::fs::write(path, table).with_context(|| format!("writing {}", path.display()))?;
    }

    let bytes = match artifact {
        Artifact::Text(t) => t.into_bytes(),
        Artifact::Bytes(b) => b,
        Artifact::Signal(s) => s.samples().iter().map(|v| format!("{v}\n")).collect::<String>().into_bytes(),
    };
    match &opts.output {
        Some(path) => std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?,
        None => std::io::stdout().write_all(&bytes)?,
    }
    Ok(())
}
