//! Motorola S-record text for a [`ByteImage`].

use std::fmt::Write;

use crate::error::RecordError;
use crate::image::ByteImage;

pub const HEADER: &str = "S0030000FC";
pub const TRAILER: &str = "S9030000FC";
pub const MAX_RECORD_DATA: usize = 16;

/// Header, data records in address order, trailer. Each line ends in `\n`.
///
/// A record stops at 16 data bytes or at the first hole. Records that fit
/// below 0x10000 are S1 (16-bit address); anything above is S3.
pub fn to_srec(image: &ByteImage) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');

    let mut iter = image.iter().peekable();
    while let Some((start, first)) = iter.next() {
        let mut data = vec![first];
        while data.len() < MAX_RECORD_DATA {
            match iter.peek() {
                Some(&(addr, b)) if addr == start + data.len() as u32 => {
                    data.push(b);
                    iter.next();
                }
                _ => break,
            }
        }
        write_record(&mut out, start, &data);
    }

    out.push_str(TRAILER);
    out.push('\n');
    out
}

fn write_record(out: &mut String, start: u32, data: &[u8]) {
    let last = start as u64 + data.len() as u64 - 1;
    let (kind, addr): (char, Vec<u8>) = if last <= 0xFFFF {
        ('1', (start as u16).to_be_bytes().to_vec())
    } else {
        ('3', start.to_be_bytes().to_vec())
    };
    let len = (addr.len() + data.len() + 1) as u8;
    let sum = addr
        .iter()
        .chain(data)
        .fold(len, |acc, b| acc.wrapping_add(*b));

    let _ = write!(out, "S{kind}{len:02X}");
    for b in addr.iter().chain(data) {
        let _ = write!(out, "{b:02X}");
    }
    let _ = writeln!(out, "{:02X}", !sum);
}

/// Reads S1/S2/S3 data records back into a byte image, checking every
/// length and checksum. S0, S5..S9 are accepted and ignored.
pub fn parse_srec(text: &str) -> Result<ByteImage, RecordError> {
    let mut image = ByteImage::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let rec = raw.trim();
        if rec.is_empty() {
            continue;
        }
        let body = rec.strip_prefix(['S', 's']).ok_or(RecordError::StartCode { line })?;
        let mut chars = body.chars();
        let kind = chars.next().ok_or(RecordError::StartCode { line })?;
        let bytes = decode_hex(chars.as_str()).ok_or(RecordError::Hex { line })?;

        let (&declared, rest) = bytes.split_first().ok_or(RecordError::Hex { line })?;
        if declared as usize != rest.len() || rest.is_empty() {
            return Err(RecordError::Length { line, declared: declared as usize });
        }
        let (&found, payload) = rest.split_last().ok_or(RecordError::Length { line, declared: declared as usize })?;
        let expected = !payload.iter().fold(declared, |acc, b| acc.wrapping_add(*b));
        if found != expected {
            return Err(RecordError::Checksum { line, found, expected });
        }

        let addr_len = match kind {
            '1' => 2,
            '2' => 3,
            '3' => 4,
            '0' | '5' | '6' | '7' | '8' | '9' => continue,
            other => return Err(RecordError::RecordType { line, kind: other }),
        };
        if payload.len() < addr_len {
            return Err(RecordError::Length { line, declared: declared as usize });
        }
        let (addr, data) = payload.split_at(addr_len);
        let base = addr.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32);
        image.load(base, data).map_err(|_| RecordError::Address { line })?;
    }
    Ok(image)
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.is_ascii() {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
