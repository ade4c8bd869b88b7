use serde::Serialize;

use crate::encoder::EncodeFn;
use crate::isa::avr;

/// Operand shape, as a front end should write it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Form {
    Implied,
    Reg,
    RegReg,
    RegImm,
    RegBit,
    IoBit,
    Io,
    /// SREG bit index
    Flag,
    /// Bare constant, e.g. the DES round
    Const,
    Relative,
    FlagRelative,
    Absolute,
    Indirect,
    Direct,
}

#[derive(Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub form: Form,
    pub encode: EncodeFn,
}

const fn d(mnemonic: &'static str, form: Form, encode: EncodeFn) -> InstrDesc {
    InstrDesc { mnemonic, form, encode }
}

use Form::*;

pub const TABLE: &[InstrDesc] = &[
    d("ADC", RegReg, avr::adc),
    d("ADD", RegReg, avr::add),
    d("ADIW", RegImm, avr::adiw),
    d("AND", RegReg, avr::and),
    d("ANDI", RegImm, avr::andi),
    d("ASR", Reg, avr::asr),
    d("BCLR", Flag, avr::bclr),
    d("BLD", RegBit, avr::bld),
    d("BRBC", FlagRelative, avr::brbc),
    d("BRBS", FlagRelative, avr::brbs),
    d("BRCC", Relative, avr::brcc),
    d("BRCS", Relative, avr::brcs),
    d("BREAK", Implied, avr::brk),
    d("BREQ", Relative, avr::breq),
    d("BRGE", Relative, avr::brge),
    d("BRHC", Relative, avr::brhc),
    d("BRHS", Relative, avr::brhs),
    d("BRID", Relative, avr::brid),
    d("BRIE", Relative, avr::brie),
    d("BRLO", Relative, avr::brlo),
    d("BRLT", Relative, avr::brlt),
    d("BRMI", Relative, avr::brmi),
    d("BRNE", Relative, avr::brne),
    d("BRPL", Relative, avr::brpl),
    d("BRSH", Relative, avr::brsh),
    d("BRTC", Relative, avr::brtc),
    d("BRTS", Relative, avr::brts),
    d("BRVC", Relative, avr::brvc),
    d("BRVS", Relative, avr::brvs),
    d("BSET", Flag, avr::bset),
    d("BST", RegBit, avr::bst),
    d("CALL", Absolute, avr::call),
    d("CBI", IoBit, avr::cbi),
    d("CBR", RegImm, avr::cbr),
    d("CLC", Implied, avr::clc),
    d("CLH", Implied, avr::clh),
    d("CLI", Implied, avr::cli),
    d("CLN", Implied, avr::cln),
    d("CLR", Reg, avr::clr),
    d("CLS", Implied, avr::cls),
    d("CLT", Implied, avr::clt),
    d("CLV", Implied, avr::clv),
    d("CLZ", Implied, avr::clz),
    d("COM", Reg, avr::com),
    d("CP", RegReg, avr::cp),
    d("CPC", RegReg, avr::cpc),
    d("CPI", RegImm, avr::cpi),
    d("CPSE", RegReg, avr::cpse),
    d("CRB", RegImm, avr::cbr),
    d("DEC", Reg, avr::dec),
    d("DES", Const, avr::des),
    d("EICALL", Implied, avr::eicall),
    d("EIJMP", Implied, avr::eijmp),
    d("ELPM", Indirect, avr::elpm),
    d("EOR", RegReg, avr::eor),
    d("FMUL", RegReg, avr::fmul),
    d("FMULS", RegReg, avr::fmuls),
    d("FMULSU", RegReg, avr::fmulsu),
    d("ICALL", Implied, avr::icall),
    d("IJMP", Implied, avr::ijmp),
    d("IN", Io, avr::r#in),
    d("INC", Reg, avr::inc),
    d("JMP", Absolute, avr::jmp),
    d("LAC", Indirect, avr::lac),
    d("LAS", Indirect, avr::las),
    d("LAT", Indirect, avr::lat),
    d("LD", Indirect, avr::ld),
    d("LDD", Indirect, avr::ldd),
    d("LDI", RegImm, avr::ldi),
    d("LDS", Direct, avr::lds),
    d("LPM", Indirect, avr::lpm),
    d("LSL", Reg, avr::lsl),
    d("LSR", Reg, avr::lsr),
    d("MOV", RegReg, avr::mov),
    d("MOVW", RegReg, avr::movw),
    d("MUL", RegReg, avr::mul),
    d("MULS", RegReg, avr::muls),
    d("MULSU", RegReg, avr::mulsu),
    d("NEG", Reg, avr::neg),
    d("NOP", Implied, avr::nop),
    d("OR", RegReg, avr::or),
    d("ORI", RegImm, avr::ori),
    d("OUT", Io, avr::out),
    d("POP", Reg, avr::pop),
    d("PUSH", Reg, avr::push),
    d("RCALL", Relative, avr::rcall),
    d("RET", Implied, avr::ret),
    d("RETI", Implied, avr::reti),
    d("RJMP", Relative, avr::rjmp),
    d("ROL", Reg, avr::rol),
    d("ROR", Reg, avr::ror),
    d("SBC", RegReg, avr::sbc),
    d("SBCI", RegImm, avr::sbci),
    d("SBI", IoBit, avr::sbi),
    d("SBIC", IoBit, avr::sbic),
    d("SBIS", IoBit, avr::sbis),
    d("SBIW", RegImm, avr::sbiw),
    d("SBR", RegImm, avr::sbr),
    d("SBRC", RegBit, avr::sbrc),
    d("SBRS", RegBit, avr::sbrs),
    d("SEC", Implied, avr::sec),
    d("SEH", Implied, avr::seh),
    d("SEI", Implied, avr::sei),
    d("SEN", Implied, avr::sen),
    d("SER", Reg, avr::ser),
    d("SES", Implied, avr::ses),
    d("SET", Implied, avr::set),
    d("SEV", Implied, avr::sev),
    d("SEZ", Implied, avr::sez),
    d("SLEEP", Implied, avr::sleep),
    d("SPM", Indirect, avr::spm),
    d("ST", Indirect, avr::st),
    d("STD", Indirect, avr::std),
    d("STS", Direct, avr::sts),
    d("SUB", RegReg, avr::sub),
    d("SUBI", RegImm, avr::subi),
    d("SWAP", Reg, avr::swap),
    d("TST", Reg, avr::tst),
    d("WDR", Implied, avr::wdr),
    d("XCH", Indirect, avr::xch),
];

/// Case-insensitive lookup. `TABLE` is kept sorted by mnemonic.
pub fn lookup(mnemonic: &str) -> Option<&'static InstrDesc> {
    let key = mnemonic.to_ascii_uppercase();
    TABLE
        .binary_search_by(|desc| desc.mnemonic.cmp(key.as_str()))
        .ok()
        .map(|i| &TABLE[i])
}
