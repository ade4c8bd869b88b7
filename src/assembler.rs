use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::encoder::{Ctx, Encoded, Encoder, Operands, Resolved};
use crate::error::{AsmError, Diagnostic};
use crate::image::WordImage;
use crate::isa::avr::AvrEncoder;
use crate::operand::{check_range, const_value, parse_int};
use crate::symbols::SymbolTable;

/// One past the last byte the bootloader's 16-bit page index reaches.
pub const CODE_END: u32 = 0x80_0000;
/// Highest byte offset `_LOC` may select.
pub const MAX_LOCATION: i64 = CODE_END as i64 - 2;

/// A source line after pass 1: words may still be waiting on a label.
#[derive(Debug)]
pub struct LineRecord {
    pub line: usize,
    pub text: String,
    pub offset: u32,
    pub code: Encoded,
}

/// A fully resolved source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub line: usize,
    pub text: String,
    pub offset: u32,
    pub words: Resolved,
}

#[derive(Debug, Default)]
pub struct PassOne {
    pub records: Vec<LineRecord>,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone)]
pub struct Program {
    pub lines: Vec<Line>,
    pub image: WordImage,
    pub symbols: SymbolTable,
}

#[derive(Default)]
struct State {
    offset: u32,
    subs: HashMap<String, String>,
    out: PassOne,
}

pub struct Assembler<E: Encoder = AvrEncoder> {
    encoder: E,
}

impl Assembler<AvrEncoder> {
    pub fn new() -> Self {
        Self { encoder: AvrEncoder::new() }
    }
}

impl Default for Assembler<AvrEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Encoder> Assembler<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    /// Both passes. Any pass-1 diagnostic skips pass 2.
    pub fn assemble(&self, source: &str) -> Result<Program, Vec<Diagnostic>> {
        pass_two(self.pass_one(source))
    }

    /// Walks every line once, collecting labels, directives and encodings.
    /// A bad line becomes a diagnostic and the scan goes on.
    pub fn pass_one(&self, source: &str) -> PassOne {
        let mut st = State::default();
        for (idx, raw) in source.lines().enumerate() {
            let number = idx + 1;
            let text = raw.trim();
            let mut code = strip_comment(text);
            if code.is_empty() {
                continue;
            }
            if let Some((label, rest)) = split_label(code) {
                if let Err(e) = st.out.symbols.define(label, st.offset) {
                    st.out.diagnostics.push(Diagnostic::new(number, e));
                }
                code = rest.trim();
            }
            if code.is_empty() {
                continue;
            }
            if let Err(e) = self.statement(&mut st, number, text, code) {
                debug!(line = number, error = %e, "pass 1 error");
                st.out.diagnostics.push(Diagnostic::new(number, e));
            }
        }
        info!(
            lines = st.out.records.len(),
            labels = st.out.symbols.len(),
            errors = st.out.diagnostics.len(),
            "pass 1 done"
        );
        st.out
    }

    fn statement(&self, st: &mut State, number: usize, text: &str, code: &str) -> Result<(), AsmError> {
        let (mnemonic, a, b) = split_statement(code)?;
        let upper = mnemonic.to_ascii_uppercase();

        match upper.as_str() {
            "_REPLACE" => {
                let key = a.ok_or(AsmError::MissingOperand(1))?;
                let value = b.ok_or(AsmError::MissingOperand(2))?;
                st.subs.insert(key.to_string(), value.to_string());
                return Ok(());
            }
            "_LOC" => {
                let a = a.ok_or(AsmError::MissingOperand(1))?;
                let loc = parse_int(a).ok_or_else(|| AsmError::ConstantFormat(a.to_string()))?;
                if loc & 1 != 0 {
                    return Err(AsmError::LocationParity(loc));
                }
                let loc = check_range(loc, 0, MAX_LOCATION)? as u32;
                if loc < st.offset {
                    warn!(line = number, from = st.offset, to = loc, "location moved backwards");
                }
                st.offset = loc;
                return Ok(());
            }
            "_IW" => {
                let a = a.ok_or(AsmError::MissingOperand(1))?;
                let w = const_value(a, 0, 0xffff)? as u16;
                return self.push(st, number, text, Encoded::Ready(Resolved::Word(w)));
            }
            _ => {}
        }

        let subst = |t: &'_ str| -> String { st.subs.get(t).cloned().unwrap_or_else(|| t.to_string()) };
        let (a, b) = (a.map(subst), b.map(subst));
        let ops = Operands::new(a.as_deref(), b.as_deref());
        let ctx = Ctx { offset: st.offset, symbols: &st.out.symbols };
        let encoded = self.encoder.encode(&upper, &ops, &ctx)?;
        self.push(st, number, text, encoded)
    }

    fn push(&self, st: &mut State, number: usize, text: &str, code: Encoded) -> Result<(), AsmError> {
        let size = 2 * code.words() as u32;
        if st.offset + size > CODE_END {
            return Err(AsmError::PageSpace { offset: st.offset });
        }
        debug!(line = number, offset = st.offset, ?code, "assembled");
        st.out.records.push(LineRecord { line: number, text: text.to_string(), offset: st.offset, code });
        st.offset += size;
        Ok(())
    }
}

/// Resolves deferred words against the complete symbol table and lays the
/// result out as a sparse image.
pub fn pass_two(pass: PassOne) -> Result<Program, Vec<Diagnostic>> {
    let PassOne { records, symbols, diagnostics } = pass;
    if !diagnostics.is_empty() {
        return Err(diagnostics);
    }

    let mut errors = Vec::new();
    let mut lines = Vec::with_capacity(records.len());
    let mut image = WordImage::new();
    for LineRecord { line, text, offset, code } in records {
        match code.resolve(&symbols) {
            Ok(words) => {
                for (i, w) in words.words().enumerate() {
                    image.insert(offset + 2 * i as u32, w);
                }
                lines.push(Line { line, text, offset, words });
            }
            Err(e) => errors.push(Diagnostic::new(line, e)),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    info!(words = image.len(), "pass 2 done");
    Ok(Program { lines, image, symbols })
}

fn strip_comment(s: &str) -> &str {
    s.find(['#', ';']).map_or(s, |p| &s[..p]).trim()
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn split_label(s: &str) -> Option<(&str, &str)> {
    let (name, rest) = s.split_once(':')?;
    (!name.is_empty() && name.bytes().all(is_word)).then_some((name, rest))
}

// mnemonic [op1[, op2]]; op2 is a single token
fn split_statement(s: &str) -> Result<(&str, Option<&str>, Option<&str>), AsmError> {
    let syntax = || AsmError::Syntax(s.to_string());
    let (mnemonic, rest) = match s.find(char::is_whitespace) {
        Some(p) => (&s[..p], s[p..].trim()),
        None => (s, ""),
    };
    if mnemonic.is_empty() || !mnemonic.bytes().all(is_word) {
        return Err(syntax());
    }
    if rest.is_empty() {
        return Ok((mnemonic, None, None));
    }
    match rest.split_once(',') {
        None => Ok((mnemonic, Some(rest), None)),
        Some((a, b)) => {
            let (a, b) = (a.trim(), b.trim());
            if a.is_empty() || b.is_empty() || b.contains(char::is_whitespace) {
                return Err(syntax());
            }
            Ok((mnemonic, Some(a), Some(b)))
        }
    }
}
