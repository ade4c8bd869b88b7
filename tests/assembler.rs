use avrasm_rs::{assemble, AsmError, AssembleOptions, Assembler, OutputMode};

#[test]
fn unknown_mnemonic_reports_its_line() {
    let diags = Assembler::new().assemble("nop\nnop\nfoo r1\nnop").unwrap_err();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 3);
    assert!(matches!(diags[0].error, AsmError::UnknownMnemonic(_)));
    assert!(diags[0].to_string().starts_with("Line 3: "));
}

#[test]
fn every_bad_line_is_reported() {
    let diags = Assembler::new().assemble("ldi r1, 3\nnop\nadd r0\nbogus").unwrap_err();
    let lines: Vec<usize> = diags.iter().map(|d| d.line).collect();
    assert_eq!(lines, vec![1, 3, 4]);
    assert_eq!(diags[1].error, AsmError::MissingOperand(2));
}

#[test]
fn odd_location_is_rejected() {
    let err = assemble("_LOC 3\nnop", &AssembleOptions::default()).unwrap_err();
    assert_eq!(err.len(), 1);
    assert_eq!(err[0].line, 1);
    assert_eq!(err[0].error, AsmError::LocationParity(3));
}

#[test]
fn undefined_label_fails_in_second_pass() {
    let pass = Assembler::new().pass_one("rjmp nowhere");
    assert!(pass.diagnostics.is_empty());
    let diags = avrasm_rs::assembler::pass_two(pass).unwrap_err();
    assert_eq!(diags[0].error, AsmError::Unresolved("nowhere".into()));
}

#[test]
fn duplicate_label_keeps_first() {
    let pass = Assembler::new().pass_one("a: nop\na: ret");
    assert_eq!(pass.symbols.get("a"), Some(0));
    assert_eq!(pass.diagnostics.len(), 1);
    assert_eq!(pass.diagnostics[0].line, 2);
    assert_eq!(pass.diagnostics[0].error, AsmError::DuplicateLabel("a".into()));
}

#[test]
fn replace_substitutes_operands() {
    let prog = Assembler::new()
        .assemble("_REPLACE tmp, r16\n_REPLACE one, 1\nldi tmp, one\nmov r0, tmp")
        .unwrap();
    assert_eq!(prog.image.get(0), Some(0xe001));
    assert_eq!(prog.image.get(2), Some(0x2e00));
}

#[test]
fn location_leaves_holes() {
    let prog = Assembler::new().assemble("nop\n_LOC 0x10\nret\n_IW 0xbeef").unwrap();
    let addrs: Vec<u32> = prog.image.iter().map(|(a, _)| a).collect();
    assert_eq!(addrs, vec![0x00, 0x10, 0x12]);
    assert_eq!(prog.image.get(0x12), Some(0xbeef));
    assert_eq!(prog.lines.len(), 3);
}

#[test]
fn labels_comments_and_blank_lines() {
    let src = "; header\n\nstart:\n  ldi r16, 10 # count\nloop: dec r16\n  brne loop\n  rjmp start";
    let prog = Assembler::new().assemble(src).unwrap();
    assert_eq!(prog.symbols.get("start"), Some(0));
    assert_eq!(prog.symbols.get("loop"), Some(2));
    assert_eq!(prog.lines.iter().map(|l| l.line).collect::<Vec<_>>(), vec![4, 5, 6, 7]);
    // rjmp at 6 back to 0: (0 - 8) / 2
    assert_eq!(prog.image.get(6), Some(0xcffc));
}

#[test]
fn assembling_twice_is_identical() {
    let src = "call sub\nrjmp end\nsub: ret\nend: nop";
    let opts = AssembleOptions::new(OutputMode::Srec);
    assert_eq!(assemble(src, &opts).unwrap(), assemble(src, &opts).unwrap());
}

#[test]
fn mnemonics_ignore_case() {
    let a = Assembler::new().assemble("Ldi R16, 0x10\nRJMP 0").unwrap();
    let b = Assembler::new().assemble("ldi r16, 0x10\nrjmp 0").unwrap();
    assert_eq!(a.image, b.image);
}
