use pretty_assertions::assert_eq;

use avrasm_rs::srec::{parse_srec, to_srec};
use avrasm_rs::{assemble, Artifact, AssembleOptions, Assembler, OutputMode, RecordError};

#[test]
fn small_program_as_srec() {
    let out = assemble("ldi r16, 1\nloop: dec r16\nbrne loop\nret", &AssembleOptions::default()).unwrap();
    let Artifact::Text(text) = out else { panic!("expected text") };
    assert_eq!(text, "S0030000FC\nS10B000001E00A95F1F70895EF\nS9030000FC\n");
}

#[test]
fn holes_split_records() {
    let prog = Assembler::new().assemble("nop\n_LOC 0x10\nret").unwrap();
    let text = to_srec(&prog.image.to_bytes());
    assert_eq!(text, "S0030000FC\nS105000000 00FA\nS10500100895 4D\nS9030000FC\n".replace(' ', ""));
    assert_eq!(parse_srec(&text).unwrap(), prog.image.to_bytes());
}

#[test]
fn long_runs_wrap_at_sixteen_bytes() {
    let src = (0..10).map(|_| "nop").collect::<Vec<_>>().join("\n");
    let prog = Assembler::new().assemble(&src).unwrap();
    let text = to_srec(&prog.image.to_bytes());
    let data: Vec<&str> = text.lines().filter(|l| l.starts_with("S1")).collect();
    assert_eq!(data.len(), 2);
    assert!(data[0].starts_with("S1130000"));
    assert!(data[1].starts_with("S1070010"));
}

#[test]
fn empty_program_is_header_and_trailer() {
    let out = assemble("; nothing", &AssembleOptions::new(OutputMode::Srec)).unwrap();
    assert_eq!(out, Artifact::Text("S0030000FC\nS9030000FC\n".into()));
}

#[test]
fn malformed_records() {
    assert_eq!(parse_srec("X1030000FC").unwrap_err(), RecordError::StartCode { line: 1 });
    assert_eq!(parse_srec("S0030000FC\nS1zz").unwrap_err(), RecordError::Hex { line: 2 });
    assert!(matches!(parse_srec("S1090000FC").unwrap_err(), RecordError::Length { line: 1, .. }));
    assert!(matches!(parse_srec("S4030000FC").unwrap_err(), RecordError::RecordType { kind: '4', .. }));
}

#[test]
fn records_must_fit_the_address_space() {
    assert_eq!(parse_srec("S0030000FC\nS307FFFFFFFF1122C9").unwrap_err(), RecordError::Address { line: 2 });
    let img = parse_srec("S306FFFFFFFF11EC").unwrap();
    assert_eq!(img.len(), 1);
    assert_eq!(to_srec(&img), "S0030000FC\nS306FFFFFFFF11EC\nS9030000FC\n");
}
