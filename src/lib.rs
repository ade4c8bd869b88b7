pub mod assembler;
pub mod config;
pub mod encoder;
pub mod error;
pub mod image;
pub mod instructions;
pub mod listing;
pub mod operand;
pub mod output;
pub mod srec;
pub mod symbols;
pub mod transport;
pub mod wav;

pub mod isa {
    pub mod avr; // classic 8-bit AVR
}

pub use assembler::{Assembler, Line, Program};
pub use config::{AssembleOptions, OutputMode, TransportConfig};
pub use error::{AddressOverflow, AsmError, ConfigError, Diagnostic, RecordError, TransportError};
pub use image::{ByteImage, WordImage};
pub use output::{assemble, Artifact};
pub use transport::Signal;
