use crate::assembler::Line;
use crate::encoder::Resolved;

/// One row per assembled line, in the layout of `avr-as -al` so the two can
/// be diffed: line number, offset, bytes in memory order, source text.
pub fn to_listing(lines: &[Line]) -> String {
    lines.iter().map(fmt_line).collect::<Vec<_>>().join("\n")
}

pub fn fmt_line(line: &Line) -> String {
    let mut s = format!("{:>4} {:04x} ", line.line, line.offset);
    match line.words {
        Resolved::Word(w) => {
            s.push_str(&byte_swapped(w));
            s.push_str("     ");
        }
        Resolved::Pair(..) => {
            for w in line.words.words() {
                s.push_str(&byte_swapped(w));
                s.push(' ');
            }
        }
    }
    s.push('\t');
    s.push_str(&compact_source(&line.text));
    s
}

fn byte_swapped(w: u16) -> String {
    let [lo, hi] = w.to_le_bytes();
    format!("{lo:02X}{hi:02X}")
}

// tabs become spaces; the first ", <ws>" loses its whitespace
fn compact_source(text: &str) -> String {
    let text = text.replace('\t', " ");
    let hit = text
        .match_indices(',')
        .map(|(i, _)| i)
        .find(|&i| text[i + 1..].starts_with(char::is_whitespace));
    match hit {
        Some(i) => format!("{},{}", &text[..i], text[i + 1..].trim_start()),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_double_words() {
        let one = Line { line: 7, text: "add\tr0,  r1".into(), offset: 0x10, words: Resolved::Word(0x0c01) };
        assert_eq!(fmt_line(&one), "   7 0010 010C     \tadd r0,r1");
        let two = Line { line: 12, text: "call 0x100".into(), offset: 0x12, words: Resolved::Pair(0x940e, 0x0100) };
        assert_eq!(fmt_line(&two), "  12 0012 0E94 0001 \tcall 0x100");
    }

    #[test]
    fn only_first_spaced_comma_is_compacted() {
        assert_eq!(compact_source("ldi r16,1 ; a, b, c"), "ldi r16,1 ; a,b, c");
    }
}
