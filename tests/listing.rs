use pretty_assertions::assert_eq;

use avrasm_rs::{assemble, Artifact, AssembleOptions, OutputMode};

fn listing(src: &str) -> String {
    match assemble(src, &AssembleOptions::new(OutputMode::Listing)).unwrap() {
        Artifact::Text(t) => t,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn rows_match_gnu_layout() {
    let src = "ldi r16, 1\nloop: dec r16\n\tbrne loop\nret";
    let expected = [
        "   1 0000 01E0     \tldi r16,1",
        "   2 0002 0A95     \tloop: dec r16",
        "   3 0004 F1F7     \tbrne loop",
        "   4 0006 0895     \tret",
    ]
    .join("\n");
    assert_eq!(listing(src), expected);
}

#[test]
fn two_word_rows_and_skipped_lines() {
    let src = "; setup\n_LOC 0x100\njmp 0x200\n_IW 0x1234";
    let expected = [
        "   3 0100 0C94 0002 \tjmp 0x200",
        "   4 0104 3412     \t_IW 0x1234",
    ]
    .join("\n");
    assert_eq!(listing(src), expected);
}

#[test]
fn tabs_and_comment_commas() {
    assert_eq!(listing("mov\tr1,\t r2 ; a, b"), "   1 0000 122C     \tmov r1,r2 ; a, b");
}
