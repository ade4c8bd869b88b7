//! Paging and Manchester modulation for the audio bootloader.
//!
//! A frame is command, page index (LE16), the fixed 0xAA 0x55 marker and 128
//! payload bytes. Page frames (command 2) carry flash pages, one run frame
//! (command 3) ends the transfer. Each frame is sent as sync edges, a start
//! pulse, then every bit MSB first; page frames are followed by silence.

use std::collections::BTreeSet;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::image::ByteImage;

pub const PAGE_SIZE: usize = 128;
pub const HEADER_LEN: usize = 5;
pub const FRAME_LEN: usize = HEADER_LEN + PAGE_SIZE;
/// Stands where a CRC would be. The bootloader only checks for this value.
pub const MAGIC: [u8; 2] = [0xAA, 0x55];
pub const SAMPLES_PER_EDGE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Page = 2,
    Run = 3,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub command: Command,
    pub page: u16,
    pub payload: [u8; PAGE_SIZE],
}

impl Frame {
    pub fn page(page: u16, payload: [u8; PAGE_SIZE]) -> Self {
        Self { command: Command::Page, page, payload }
    }

    pub fn run() -> Self {
        Self { command: Command::Run, page: 0, payload: [0; PAGE_SIZE] }
    }

    pub fn to_bytes(&self) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        out[0] = self.command as u8;
        out[1..3].copy_from_slice(&self.page.to_le_bytes());
        out[3..5].copy_from_slice(&MAGIC);
        out[HEADER_LEN..].copy_from_slice(&self.payload);
        out
    }
}

/// One page frame per 128-byte page holding any data (gaps filled with
/// 0xFF), in address order, then the run frame. Fails if a page index
/// does not fit the 16-bit wire field.
pub fn paginate(image: &ByteImage) -> Result<Vec<Frame>, TransportError> {
    let pages: BTreeSet<u32> = image.iter().map(|(addr, _)| addr / PAGE_SIZE as u32).collect();
    let mut frames = Vec::with_capacity(pages.len() + 1);
    for page in pages {
        let base = page * PAGE_SIZE as u32;
        let mut payload = [0xFFu8; PAGE_SIZE];
        for (i, slot) in payload.iter_mut().enumerate() {
            if let Some(b) = image.get(base + i as u32) {
                *slot = b;
            }
        }
        let index = u16::try_from(page).map_err(|_| TransportError::PageIndex { addr: base, page })?;
        frames.push(Frame::page(index, payload));
    }
    frames.push(Frame::run());
    Ok(frames)
}

/// Ternary sample stream, one of -1, 0, +1 per sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal(Vec<i8>);

impl Signal {
    pub fn samples(&self) -> &[i8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// On/off per sample for a light or relay that can only toggle.
    pub fn blink_states(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().map(|&v| v >= 1)
    }

    fn edge(&mut self, bit: bool) {
        let v: i8 = if bit { 1 } else { -1 };
        self.0.extend_from_slice(&[v, v, -v, -v]);
    }

    fn silence(&mut self, n: usize) {
        self.0.resize(self.0.len() + n, 0);
    }
}

pub struct Modulator {
    cfg: TransportConfig,
}

impl Modulator {
    pub fn new(cfg: TransportConfig) -> Self {
        Self { cfg }
    }

    pub fn frame(&self, frame: &Frame, signal: &mut Signal) {
        for _ in 0..self.cfg.sync_edges {
            signal.edge(false);
        }
        signal.edge(true);
        let bytes = frame.to_bytes();
        for bit in bytes.view_bits::<Msb0>() {
            signal.edge(*bit);
        }
    }

    /// Modulates `frames`, padding silence after every frame but the last.
    pub fn frames(&self, frames: &[Frame]) -> Signal {
        let mut signal = Signal::default();
        for (i, frame) in frames.iter().enumerate() {
            trace!(command = ?frame.command, page = frame.page, "frame");
            self.frame(frame, &mut signal);
            if i + 1 < frames.len() {
                signal.silence(self.cfg.silence_samples);
            }
        }
        signal
    }
}

pub fn encode_image(image: &ByteImage, cfg: &TransportConfig) -> Result<Signal, TransportError> {
    Ok(Modulator::new(*cfg).frames(&paginate(image)?))
}
