use serde::Serialize;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    #[error("doesn't match as code: {0}")]
    Syntax(String),
    #[error("no such mnemonic: {0}")]
    UnknownMnemonic(String),
    #[error("not a register: {0}")]
    RegisterFormat(String),
    #[error("register {reg} out of range: {min}<>{max}")]
    RegisterRange { reg: String, min: u8, max: u8 },
    #[error("constant is not a number: {0}")]
    ConstantFormat(String),
    #[error("constant {value} out of range: {min}<>{max}")]
    ConstantRange { value: i64, min: i64, max: i64 },
    #[error("not enough bits for number ({value}, {bits})")]
    ImmediateOverflow { value: i64, bits: u32 },
    #[error("bad operand: {0}")]
    BadOperand(String),
    #[error("missing operand {0}")]
    MissingOperand(usize),
    #[error("location is odd: {0:#x}")]
    LocationParity(i64),
    #[error("label redefined: {0}")]
    DuplicateLabel(String),
    #[error("unresolved symbol: {0}")]
    Unresolved(String),
    #[error("code at {offset:#x} runs past the last flash page")]
    PageSpace { offset: u32 },
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// A per-line error, tagged with the 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    #[serde(serialize_with = "as_message")]
    pub error: AsmError,
}

impl Diagnostic {
    pub fn new(line: usize, error: AsmError) -> Self {
        Self { line, error }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.error)
    }
}

fn as_message<S: serde::Serializer>(err: &AsmError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(err)
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("line {line}: missing 'S' start code")]
    StartCode { line: usize },
    #[error("line {line}: unsupported record type S{kind}")]
    RecordType { line: usize, kind: char },
    #[error("line {line}: bad hex digits")]
    Hex { line: usize },
    #[error("line {line}: length byte {declared} does not match record")]
    Length { line: usize, declared: usize },
    #[error("line {line}: checksum {found:#04x}, expected {expected:#04x}")]
    Checksum { line: usize, found: u8, expected: u8 },
    #[error("line {line}: data runs past address 0xffffffff")]
    Address { line: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid transport config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("sample rate {0} Hz is outside 1..={max}", max = crate::config::MAX_SAMPLE_RATE)]
    SampleRate(u32),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    #[error("byte at {addr:#x} is on page {page:#x}, beyond the 16-bit page field")]
    PageIndex { addr: u32, page: u32 },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{len} bytes at {base:#x} run past address 0xffffffff")]
pub struct AddressOverflow {
    pub base: u32,
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_is_tagged_with_line() {
        let d = Diagnostic::new(3, AsmError::UnknownMnemonic("FOO".into()));
        assert_eq!(d.to_string(), "Line 3: no such mnemonic: FOO");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"line":3,"error":"no such mnemonic: FOO"}"#);
    }
}
