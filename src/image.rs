use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AddressOverflow;

/// Sparse word-addressed program image. Keys are byte addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordImage {
    words: BTreeMap<u32, u16>,
}

impl WordImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, addr: u32, word: u16) -> Option<u16> {
        self.words.insert(addr, word)
    }

    pub fn get(&self, addr: u32) -> Option<u16> {
        self.words.get(&addr).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u16)> + '_ {
        self.words.iter().map(|(a, w)| (*a, *w))
    }

    /// Splits every word little-endian: low byte at `addr`, high byte at `addr + 1`.
    pub fn to_bytes(&self) -> ByteImage {
        self.iter()
            .flat_map(|(addr, w)| {
                let [lo, hi] = w.to_le_bytes();
                [(addr, lo), (addr + 1, hi)]
            })
            .collect()
    }
}

/// Sparse byte image. Missing keys are holes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteImage {
    bytes: BTreeMap<u32, u8>,
}

impl ByteImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, addr: u32, byte: u8) -> Option<u8> {
        self.bytes.insert(addr, byte)
    }

    pub fn get(&self, addr: u32) -> Option<u8> {
        self.bytes.get(&addr).copied()
    }

    pub fn contains(&self, addr: u32) -> bool {
        self.bytes.contains_key(&addr)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.bytes.iter().map(|(a, b)| (*a, *b))
    }

    /// Copies `data` in starting at `base`. Nothing is written if the last
    /// byte would land above `u32::MAX`.
    pub fn load(&mut self, base: u32, data: &[u8]) -> Result<(), AddressOverflow> {
        let overflow = AddressOverflow { base, len: data.len() };
        if let Some(last) = data.len().checked_sub(1) {
            u32::try_from(last).ok().and_then(|n| base.checked_add(n)).ok_or(overflow)?;
        }
        for (addr, b) in (base..).zip(data) {
            self.bytes.insert(addr, *b);
        }
        Ok(())
    }
}

impl FromIterator<(u32, u8)> for ByteImage {
    fn from_iter<I: IntoIterator<Item = (u32, u8)>>(iter: I) -> Self {
        Self { bytes: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_little_endian_and_keep_holes() {
        let mut img = WordImage::new();
        img.insert(0, 0x0c01);
        img.insert(6, 0x9508);
        let bytes = img.to_bytes();
        assert_eq!(bytes.len(), 4);
        assert_eq!(bytes.get(0), Some(0x01));
        assert_eq!(bytes.get(1), Some(0x0c));
        assert!(!bytes.contains(2));
        assert_eq!(bytes.get(6), Some(0x08));
        assert_eq!(bytes.get(7), Some(0x95));
    }

    #[test]
    fn load_stops_at_the_address_ceiling() {
        let mut img = ByteImage::new();
        img.load(u32::MAX - 1, &[1, 2]).unwrap();
        assert_eq!(img.get(u32::MAX), Some(2));
        let err = img.load(u32::MAX, &[3, 4]).unwrap_err();
        assert_eq!(err, AddressOverflow { base: u32::MAX, len: 2 });
        assert_eq!(img.get(u32::MAX), Some(2));
        assert!(img.load(u32::MAX, &[]).is_ok());
    }
}
