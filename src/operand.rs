use crate::error::AsmError;
use crate::symbols::SymbolTable;

/// Parses a decimal or `0x` hex literal with an optional sign.
pub fn parse_int(s: &str) -> Option<i64> {
    let t = s.trim();
    let (neg, body) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let v = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else {
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        body.parse::<i64>().ok()?
    };
    Some(if neg { -v } else { v })
}

fn reg_index(s: &str, min: u8, max: u8) -> Result<u8, AsmError> {
    let t = s.trim();
    let bad = || AsmError::RegisterFormat(t.to_string());
    let digits = t
        .strip_prefix(['r', 'R'])
        .filter(|d| (1..=2).contains(&d.len()) && d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(bad)?;
    let d: u8 = digits.parse().map_err(|_| bad())?;
    if d < min || d > max {
        return Err(AsmError::RegisterRange { reg: t.to_string(), min, max });
    }
    Ok(d)
}

/// Rd, shifted into bits 8..4.
pub fn dest_reg(s: &str, min: u8, max: u8) -> Result<u16, AsmError> {
    let d = reg_index(s, min, max)? as u16;
    Ok((d & 0x1f) << 4)
}

/// Rr, split into bits 3..0 and bit 9.
pub fn src_reg(s: &str, min: u8, max: u8) -> Result<u16, AsmError> {
    let r = reg_index(s, min, max)? as u16;
    Ok((r & 0xf) | (((r >> 4) & 1) << 9))
}

/// Upper register pair (R24, R26, R28, R30) as a 2-bit index.
pub fn pair_reg(s: &str) -> Result<u16, AsmError> {
    let d = reg_index(s, 24, 30)?;
    if d % 2 != 0 {
        return Err(AsmError::RegisterRange { reg: s.trim().to_string(), min: 24, max: 30 });
    }
    Ok(((d - 24) / 2) as u16)
}

pub fn check_range(value: i64, min: i64, max: i64) -> Result<i64, AsmError> {
    if value < min || value > max {
        return Err(AsmError::ConstantRange { value, min, max });
    }
    Ok(value)
}

pub fn const_value(s: &str, min: i64, max: i64) -> Result<i64, AsmError> {
    let v = parse_int(s).ok_or_else(|| AsmError::ConstantFormat(s.trim().to_string()))?;
    check_range(v, min, max)
}

/// Folds a signed value into `bits` of two's complement.
/// Accepts `-2^(bits-1)..=2^(bits-1)-1`.
pub fn fit_twos_complement(value: i64, bits: u32) -> Result<u16, AsmError> {
    debug_assert!((2..=16).contains(&bits));
    let half = 1i64 << (bits - 1);
    if value < -half || value > half - 1 {
        return Err(AsmError::ImmediateOverflow { value, bits });
    }
    let folded = if value < 0 { 0x1_0000 + value } else { value };
    Ok((folded as u16) & (0xffff >> (16 - bits)))
}

/// Resolves a branch/call operand to a word displacement.
///
/// Literals are taken as-is. Symbols become `(addr - rel) / 2` for relative
/// forms and `addr / 2` for absolute ones. `None` means the symbol is not
/// known yet.
pub fn target(s: &str, symbols: &SymbolTable, rel: Option<u32>) -> Option<i64> {
    if let Some(v) = parse_int(s) {
        return Some(v);
    }
    let addr = symbols.get(s.trim())? as i64;
    Some((addr - rel.unwrap_or(0) as i64) >> 1)
}

/// X/Y/Z pointer forms with optional post-increment or pre-decrement.
pub fn pointer(s: &str) -> Result<u16, AsmError> {
    let t = s.trim().to_ascii_uppercase();
    Ok(match t.as_str() {
        "X" => 0x900c,
        "X+" => 0x900d,
        "-X" => 0x900e,
        "Y" => 0x8008,
        "Y+" => 0x9009,
        "-Y" => 0x900a,
        "Z" => 0x8000,
        "Z+" => 0x9001,
        "-Z" => 0x9002,
        _ => return Err(AsmError::BadOperand(s.trim().to_string())),
    })
}

/// Y+q / Z+q displacement forms.
pub fn pointer_disp(s: &str) -> Result<u16, AsmError> {
    let t = s.trim().to_ascii_uppercase();
    let bad = || AsmError::BadOperand(s.trim().to_string());
    let (base, q) = match t.split_once('+') {
        Some(("Y", q)) => (0x8008u16, q),
        Some(("Z", q)) => (0x8000u16, q),
        _ => return Err(bad()),
    };
    if q.is_empty() || !q.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let q = const_value(q, 0, 64)? as u16;
    Ok(base | ((q & 0x20) << 8) | ((q & 0x18) << 7) | (q & 0x7))
}

pub fn is_z(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("z")
}
