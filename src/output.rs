use tracing::info;

use crate::assembler::{Assembler, Program};
use crate::config::{AssembleOptions, OutputMode, TransportConfig};
use crate::error::{AsmError, Diagnostic, TransportError};
use crate::listing::to_listing;
use crate::srec::to_srec;
use crate::transport::{encode_image, Signal};
use crate::wav;

/// A finished output artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Text(String),
    Bytes(Vec<u8>),
    Signal(Signal),
}

/// Assembles `source` and renders it per `options.mode`. Either the artifact
/// or every diagnostic, never both.
pub fn assemble(source: &str, options: &AssembleOptions) -> Result<Artifact, Vec<Diagnostic>> {
    let program = Assembler::new().assemble(source)?;
    finish(&program, options)
}

/// Renders an assembled program, reporting transport failures against the
/// source line that holds the offending byte.
pub fn finish(program: &Program, options: &AssembleOptions) -> Result<Artifact, Vec<Diagnostic>> {
    render(program, options.mode, &options.transport).map_err(|e| {
        let TransportError::PageIndex { addr, .. } = e;
        vec![Diagnostic::new(line_at(program, addr), AsmError::from(e))]
    })
}

pub fn render(program: &Program, mode: OutputMode, transport: &TransportConfig) -> Result<Artifact, TransportError> {
    info!(?mode, words = program.image.len(), "rendering");
    Ok(match mode {
        OutputMode::Srec => Artifact::Text(to_srec(&program.image.to_bytes())),
        OutputMode::Listing => Artifact::Text(to_listing(&program.lines)),
        OutputMode::Signal => Artifact::Signal(encode_image(&program.image.to_bytes(), transport)?),
        OutputMode::Audio => {
            let signal = encode_image(&program.image.to_bytes(), transport)?;
            Artifact::Bytes(wav::render(&signal, transport))
        }
    })
}

// source line whose words cover `addr`, 0 if none
fn line_at(program: &Program, addr: u32) -> usize {
    program
        .lines
        .iter()
        .find(|l| (l.offset..l.offset + 2 * l.words.len() as u32).contains(&(addr & !1)))
        .map_or(0, |l| l.line)
}
