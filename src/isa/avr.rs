use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoder::{Ctx, Encoded, Encoder, Operands, Resolved};
use crate::error::AsmError;
use crate::instructions;
use crate::operand::{
    check_range, const_value, dest_reg, fit_twos_complement, is_z, pair_reg, pointer, pointer_disp, src_reg, target,
};

/// 8-bit AVR encoder (classic core, full mnemonic surface, no device checks)
pub struct AvrEncoder;

impl AvrEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AvrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for AvrEncoder {
    fn encode(&self, mnemonic: &str, ops: &Operands<'_>, ctx: &Ctx<'_>) -> Result<Encoded, AsmError> {
        let desc = instructions::lookup(mnemonic).ok_or_else(|| AsmError::UnknownMnemonic(mnemonic.to_string()))?;
        (desc.encode)(ops, ctx)
    }
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sreg: u8 {
const C = 1 << 0; // Carry
const Z = 1 << 1; // Zero
const N = 1 << 2; // Negative
const V = 1 << 3; // Two's complement overflow
const S = 1 << 4; // Sign
const H = 1 << 5; // Half carry
const T = 1 << 6; // Transfer bit
const I = 1 << 7; // Global interrupt enable
}
}

impl Sreg {
    /// Bit index of a single flag.
    pub fn index(self) -> u16 {
        self.bits().trailing_zeros() as u16
    }
}

type Res = Result<Encoded, AsmError>;

fn word(w: u16) -> Res {
    Ok(Encoded::Ready(Resolved::Word(w)))
}

fn pair(first: u16, second: u16) -> Res {
    Ok(Encoded::Ready(Resolved::Pair(first, second)))
}

/// Encodes now if `operand` is known, otherwise hands back a resolver that
/// retries against the finished symbol table.
fn resolve_or_defer<F>(operand: &str, ctx: &Ctx<'_>, rel: Option<u32>, words: usize, finish: F) -> Res
where
    F: FnOnce(i64) -> Result<Resolved, AsmError> + 'static,
{
    if let Some(k) = target(operand, ctx.symbols, rel) {
        return finish(k).map(Encoded::Ready);
    }
    let name = operand.trim().to_string();
    debug!(symbol = %name, offset = ctx.offset, "deferring reference");
    Ok(Encoded::Deferred {
        words,
        resolve: Box::new(move |symbols| {
            let k = target(&name, symbols, rel).ok_or_else(|| AsmError::Unresolved(name.clone()))?;
            finish(k)
        }),
    })
}

// Rd, Rr (0..31)
fn alu(base: u16, ops: &Operands<'_>) -> Res {
    word(base | dest_reg(ops.a()?, 0, 31)? | src_reg(ops.b()?, 0, 31)?)
}

// Rd (16..31), K (0..255)
fn imm8(base: u16, reg: &str, k: i64) -> Res {
    let k = check_range(k, 0, 255)? as u16;
    word(base | (dest_reg(reg, 16, 31)? & 0xf0) | ((k & 0xf0) << 4) | (k & 0xf))
}

fn imm8_ops(base: u16, ops: &Operands<'_>) -> Res {
    imm8(base, ops.a()?, const_value(ops.b()?, 0, 255)?)
}

// Rd (0..31)
fn one_reg(base: u16, ops: &Operands<'_>) -> Res {
    word(base | dest_reg(ops.a()?, 0, 31)?)
}

// Rd, b
fn reg_bit(base: u16, ops: &Operands<'_>) -> Res {
    word(base | dest_reg(ops.a()?, 0, 31)? | const_value(ops.b()?, 0, 7)? as u16)
}

// A (0..31), b
fn io_bit(base: u16, ops: &Operands<'_>) -> Res {
    word(base | ((const_value(ops.a()?, 0, 31)? as u16) << 3) | const_value(ops.b()?, 0, 7)? as u16)
}

fn io_port(base: u16, reg: &str, port: &str) -> Res {
    let a = const_value(port, 0, 63)? as u16;
    word(base | dest_reg(reg, 0, 31)? | ((a & 0x30) << 5) | (a & 0x0f))
}

// Rd in {24,26,28,30}, K (0..63)
fn word_imm(base: u16, ops: &Operands<'_>) -> Res {
    let d = pair_reg(ops.a()?)?;
    let k = const_value(ops.b()?, 0, 63)? as u16;
    word(base | ((d & 0x3) << 4) | ((k & 0x30) << 2) | (k & 0x0f))
}

// Rd, Rr (16..23)
fn mul_low(base: u16, ops: &Operands<'_>) -> Res {
    word(base | (dest_reg(ops.a()?, 16, 23)? & 0x70) | (src_reg(ops.b()?, 16, 23)? & 0x7))
}

// 7-bit relative, s selects the SREG bit
fn cond_branch(base: u16, s: u16, operand: &str, ctx: &Ctx<'_>) -> Res {
    resolve_or_defer(operand, ctx, Some(ctx.offset + 2), 1, move |k| {
        let k = check_range(k, -64, 63)?;
        Ok(Resolved::Word(base | s | (fit_twos_complement(k, 7)? << 3)))
    })
}

// 12-bit relative
fn rel12(base: u16, operand: &str, ctx: &Ctx<'_>) -> Res {
    resolve_or_defer(operand, ctx, Some(ctx.offset + 2), 1, move |k| {
        let k = check_range(k, -2048, 2048)?;
        Ok(Resolved::Word(base | fit_twos_complement(k, 12)?))
    })
}

// 22-bit absolute word address, second word carries the low 16 bits
fn abs22(base: u16, operand: &str, ctx: &Ctx<'_>) -> Res {
    resolve_or_defer(operand, ctx, None, 2, move |k| {
        let k = check_range(k, 0, 0x40_0000)? as u32;
        let hk = ((k >> 16) & 0x3f) as u16;
        Ok(Resolved::Pair(base | ((hk & 0x3e) << 3) | (hk & 1), (k & 0xffff) as u16))
    })
}

// Z-only read-modify-write forms: first operand must be Z
fn z_rmw(base: u16, ops: &Operands<'_>) -> Res {
    let z = ops.a()?;
    if !is_z(z) {
        return Err(AsmError::BadOperand(z.to_string()));
    }
    word(base | dest_reg(ops.b()?, 0, 31)?)
}

// Program memory loads: bare form or Rd, Z / Rd, Z+
fn pm_load(bare: u16, z: u16, zinc: u16, ops: &Operands<'_>) -> Res {
    let Some(a) = ops.a else { return word(bare) };
    let r = 0x9000 | dest_reg(a, 0, 31)?;
    match ops.b.map(|b| b.to_ascii_uppercase()).as_deref() {
        Some("Z") => word(r | z),
        Some("Z+") => word(r | zinc),
        other => Err(AsmError::BadOperand(other.unwrap_or("").to_string())),
    }
}

// --- arithmetic and logic ---

pub fn add(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x0c00, ops) }
pub fn adc(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x1c00, ops) }
pub fn sub(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x1800, ops) }
pub fn sbc(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x0800, ops) }
pub fn and(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x2000, ops) }
pub fn or(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x2800, ops) }
pub fn eor(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x2400, ops) }
pub fn cp(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x1400, ops) }
pub fn cpc(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x0400, ops) }
pub fn cpse(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x1000, ops) }
pub fn mov(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x2c00, ops) }
pub fn mul(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { alu(0x9c00, ops) }

pub fn andi(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { imm8_ops(0x7000, ops) }
pub fn ori(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { imm8_ops(0x6000, ops) }
pub fn cpi(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { imm8_ops(0x3000, ops) }
pub fn ldi(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { imm8_ops(0xe000, ops) }
pub fn subi(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { imm8_ops(0x5000, ops) }
pub fn sbci(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { imm8_ops(0x4000, ops) }

pub fn asr(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x9405, ops) }
pub fn com(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x9400, ops) }
pub fn dec(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x940a, ops) }
pub fn inc(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x9403, ops) }
pub fn lsr(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x9406, ops) }
pub fn neg(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x9401, ops) }
pub fn ror(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x9407, ops) }
pub fn swap(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x9402, ops) }
pub fn pop(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x900f, ops) }
pub fn push(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { one_reg(0x920f, ops) }

pub fn adiw(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { word_imm(0x9600, ops) }
pub fn sbiw(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { word_imm(0x9700, ops) }

pub fn fmul(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { mul_low(0x0308, ops) }
pub fn fmuls(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { mul_low(0x0380, ops) }
pub fn fmulsu(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { mul_low(0x0388, ops) }
pub fn mulsu(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { mul_low(0x0300, ops) }

pub fn muls(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    word(0x0200 | (dest_reg(ops.a()?, 16, 31)? & 0xf0) | (src_reg(ops.b()?, 16, 31)? & 0xf))
}

pub fn movw(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    // both registers go through the Rd shifter, then get halved into place
    let d = dest_reg(ops.a()?, 0, 31)?;
    let r = dest_reg(ops.b()?, 0, 31)?;
    word(0x0100 | ((d >> 1) & 0xf0) | ((r >> 5) & 0xf))
}

pub fn ser(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    word(0xef0f | (dest_reg(ops.a()?, 16, 31)? & 0xf0))
}

pub fn des(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    word(0x940b | ((const_value(ops.a()?, 0, 15)? as u16) << 4))
}

// --- aliases over the rules above ---

pub fn clr(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    let a = ops.a()?;
    eor(&Operands::two(a, a), ctx)
}

pub fn lsl(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    let a = ops.a()?;
    add(&Operands::two(a, a), ctx)
}

pub fn rol(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    let a = ops.a()?;
    adc(&Operands::two(a, a), ctx)
}

pub fn tst(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    let a = ops.a()?;
    and(&Operands::two(a, a), ctx)
}

/// Clear bits: ANDI with the complemented mask.
pub fn cbr(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    let k = const_value(ops.b()?, 0, 255)?;
    imm8(0x7000, ops.a()?, !k & 0xff)
}

/// Set bits: same opcode as ORI.
pub fn sbr(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    ori(ops, ctx)
}

// --- bit and flag ---

pub fn bld(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { reg_bit(0xf800, ops) }
pub fn bst(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { reg_bit(0xfa00, ops) }
pub fn sbrc(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { reg_bit(0xfc00, ops) }
pub fn sbrs(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { reg_bit(0xfe00, ops) }

pub fn cbi(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { io_bit(0x9800, ops) }
pub fn sbi(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { io_bit(0x9a00, ops) }
pub fn sbic(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { io_bit(0x9900, ops) }
pub fn sbis(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { io_bit(0x9b00, ops) }

fn bset_with(s: u16) -> Res {
    word(0x9408 | ((s & 0x7) << 4))
}

fn bclr_with(s: u16) -> Res {
    word(0x9488 | ((s & 0x7) << 4))
}

pub fn bset(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(const_value(ops.a()?, 0, 7)? as u16) }
pub fn bclr(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(const_value(ops.a()?, 0, 7)? as u16) }

pub fn sec(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::C.index()) }
pub fn sez(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::Z.index()) }
pub fn sen(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::N.index()) }
pub fn sev(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::V.index()) }
pub fn ses(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::S.index()) }
pub fn seh(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::H.index()) }
pub fn set(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::T.index()) }
pub fn sei(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bset_with(Sreg::I.index()) }

pub fn clc(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::C.index()) }
pub fn clz(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::Z.index()) }
pub fn cln(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::N.index()) }
pub fn clv(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::V.index()) }
pub fn cls(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::S.index()) }
pub fn clh(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::H.index()) }
pub fn clt(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::T.index()) }
pub fn cli(_: &Operands<'_>, _: &Ctx<'_>) -> Res { bclr_with(Sreg::I.index()) }

// --- branches, jumps and calls ---

fn brbs_with(flag: Sreg, ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    cond_branch(0xf000, flag.index(), ops.a()?, ctx)
}

fn brbc_with(flag: Sreg, ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    cond_branch(0xf400, flag.index(), ops.a()?, ctx)
}

pub fn brbs(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    cond_branch(0xf000, const_value(ops.a()?, 0, 7)? as u16, ops.b()?, ctx)
}

pub fn brbc(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res {
    cond_branch(0xf400, const_value(ops.a()?, 0, 7)? as u16, ops.b()?, ctx)
}

pub fn brcs(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::C, ops, ctx) }
pub fn brlo(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::C, ops, ctx) }
pub fn breq(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::Z, ops, ctx) }
pub fn brmi(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::N, ops, ctx) }
pub fn brvs(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::V, ops, ctx) }
pub fn brlt(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::S, ops, ctx) }
pub fn brhs(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::H, ops, ctx) }
pub fn brts(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::T, ops, ctx) }
pub fn brie(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbs_with(Sreg::I, ops, ctx) }

pub fn brcc(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::C, ops, ctx) }
pub fn brsh(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::C, ops, ctx) }
pub fn brne(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::Z, ops, ctx) }
pub fn brpl(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::N, ops, ctx) }
pub fn brvc(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::V, ops, ctx) }
pub fn brge(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::S, ops, ctx) }
pub fn brhc(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::H, ops, ctx) }
pub fn brtc(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::T, ops, ctx) }
pub fn brid(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { brbc_with(Sreg::I, ops, ctx) }

pub fn rjmp(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { rel12(0xc000, ops.a()?, ctx) }
pub fn rcall(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { rel12(0xd000, ops.a()?, ctx) }
pub fn jmp(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { abs22(0x940c, ops.a()?, ctx) }
pub fn call(ops: &Operands<'_>, ctx: &Ctx<'_>) -> Res { abs22(0x940e, ops.a()?, ctx) }

// --- loads and stores ---

pub fn ld(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    word(dest_reg(ops.a()?, 0, 31)? | pointer(ops.b()?)?)
}

pub fn ldd(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    word(dest_reg(ops.a()?, 0, 31)? | pointer_disp(ops.b()?)?)
}

pub fn st(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    word(0x0200 | dest_reg(ops.b()?, 0, 31)? | pointer(ops.a()?)?)
}

pub fn std(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    word(0x0200 | dest_reg(ops.b()?, 0, 31)? | pointer_disp(ops.a()?)?)
}

pub fn lds(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    let k = const_value(ops.b()?, 0, 65535)? as u16;
    pair(0x9000 | dest_reg(ops.a()?, 0, 31)?, k)
}

pub fn sts(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    let k = const_value(ops.a()?, 0, 65535)? as u16;
    pair(0x9200 | dest_reg(ops.b()?, 0, 31)?, k)
}

pub fn lpm(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { pm_load(0x95c8, 4, 5, ops) }
pub fn elpm(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { pm_load(0x95d8, 6, 7, ops) }

pub fn spm(ops: &Operands<'_>, _: &Ctx<'_>) -> Res {
    match ops.a {
        None => word(0x95e8),
        Some(a) if a.eq_ignore_ascii_case("z+") => word(0x95f8),
        Some(a) => Err(AsmError::BadOperand(a.to_string())),
    }
}

pub fn lac(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { z_rmw(0x9206, ops) }
pub fn las(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { z_rmw(0x9205, ops) }
pub fn lat(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { z_rmw(0x9207, ops) }
pub fn xch(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { z_rmw(0x9204, ops) }

// --- I/O ---

pub fn r#in(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { io_port(0xb000, ops.a()?, ops.b()?) }
pub fn out(ops: &Operands<'_>, _: &Ctx<'_>) -> Res { io_port(0xb800, ops.b()?, ops.a()?) }

// --- control ---

pub fn nop(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x0000) }
pub fn ret(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9508) }
pub fn reti(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9518) }
pub fn icall(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9509) }
pub fn ijmp(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9409) }
pub fn eicall(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9519) }
pub fn eijmp(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9419) }
pub fn sleep(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9588) }
pub fn wdr(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x95a8) }
pub fn brk(_: &Operands<'_>, _: &Ctx<'_>) -> Res { word(0x9598) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTable;

    fn enc(m: &str, ops: Operands<'_>) -> Resolved {
        let syms = SymbolTable::new();
        let ctx = Ctx { offset: 0, symbols: &syms };
        match AvrEncoder::new().encode(m, &ops, &ctx).unwrap() {
            Encoded::Ready(r) => r,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn sreg_indices() {
        assert_eq!(Sreg::C.index(), 0);
        assert_eq!(Sreg::Z.index(), 1);
        assert_eq!(Sreg::I.index(), 7);
    }

    #[test]
    fn flag_aliases_match_bset_bclr() {
        for (alias, s) in [("SEC", "0"), ("SEZ", "1"), ("SEH", "5"), ("SEI", "7")] {
            assert_eq!(enc(alias, Operands::none()), enc("BSET", Operands::one(s)));
        }
        for (alias, s) in [("CLC", "0"), ("CLV", "3"), ("CLT", "6"), ("CLI", "7")] {
            assert_eq!(enc(alias, Operands::none()), enc("BCLR", Operands::one(s)));
        }
        assert_eq!(enc("CLI", Operands::none()), Resolved::Word(0x94f8));
        assert_eq!(enc("CLH", Operands::none()), Resolved::Word(0x94d8));
    }

    #[test]
    fn movw_halves_register_numbers() {
        assert_eq!(enc("MOVW", Operands::two("r24", "r30")), Resolved::Word(0x01cf));
    }
}
