use std::fmt;

use crate::error::AsmError;
use crate::symbols::SymbolTable;

/// Final machine words for one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Word(u16),
    Pair(u16, u16),
}

impl Resolved {
    pub fn len(&self) -> usize {
        match self {
            Resolved::Word(_) => 1,
            Resolved::Pair(..) => 2,
        }
    }

    pub fn words(&self) -> impl Iterator<Item = u16> {
        let (first, second) = match *self {
            Resolved::Word(w) => (w, None),
            Resolved::Pair(hi, lo) => (hi, Some(lo)),
        };
        std::iter::once(first).chain(second)
    }
}

pub type Resolver = Box<dyn FnOnce(&SymbolTable) -> Result<Resolved, AsmError>>;

/// Result of encoding a line in pass 1.
pub enum Encoded {
    Ready(Resolved),
    /// Waits for the complete symbol table. `words` is the size it will occupy.
    Deferred { words: usize, resolve: Resolver },
}

impl Encoded {
    pub fn words(&self) -> usize {
        match self {
            Encoded::Ready(r) => r.len(),
            Encoded::Deferred { words, .. } => *words,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Encoded::Deferred { .. })
    }

    pub fn resolve(self, symbols: &SymbolTable) -> Result<Resolved, AsmError> {
        match self {
            Encoded::Ready(r) => Ok(r),
            Encoded::Deferred { resolve, .. } => resolve(symbols),
        }
    }
}

impl fmt::Debug for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoded::Ready(r) => f.debug_tuple("Ready").field(r).finish(),
            Encoded::Deferred { words, .. } => f.debug_struct("Deferred").field("words", words).finish_non_exhaustive(),
        }
    }
}

/// Up to two operand tokens, already trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Operands<'a> {
    pub a: Option<&'a str>,
    pub b: Option<&'a str>,
}

impl<'a> Operands<'a> {
    pub fn new(a: Option<&'a str>, b: Option<&'a str>) -> Self {
        let keep = |s: &'a str| if s.trim().is_empty() { None } else { Some(s.trim()) };
        Self { a: a.and_then(keep), b: b.and_then(keep) }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn one(a: &'a str) -> Self {
        Self::new(Some(a), None)
    }

    pub fn two(a: &'a str, b: &'a str) -> Self {
        Self::new(Some(a), Some(b))
    }

    pub fn a(&self) -> Result<&'a str, AsmError> {
        self.a.ok_or(AsmError::MissingOperand(1))
    }

    pub fn b(&self) -> Result<&'a str, AsmError> {
        self.b.ok_or(AsmError::MissingOperand(2))
    }
}

/// Where the line sits and what is known so far.
#[derive(Clone, Copy)]
pub struct Ctx<'a> {
    pub offset: u32,
    pub symbols: &'a SymbolTable,
}

pub type EncodeFn = fn(&Operands<'_>, &Ctx<'_>) -> Result<Encoded, AsmError>;

pub trait Encoder {
    fn encode(&self, mnemonic: &str, ops: &Operands<'_>, ctx: &Ctx<'_>) -> Result<Encoded, AsmError>;
}
