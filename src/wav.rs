use crate::config::TransportConfig;
use crate::transport::Signal;

pub const CHANNELS: u16 = 2;
pub const BITS_PER_SAMPLE: u16 = 16;
pub const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;
pub const HEADER_LEN: usize = 44;

/// RIFF/WAVE container: linear PCM, both channels carry the same sample.
/// The byte rate saturates for configs that skipped
/// [`TransportConfig::validate`].
pub fn render(signal: &Signal, cfg: &TransportConfig) -> Vec<u8> {
    let data_len = (signal.len() * BLOCK_ALIGN as usize) as u32;
    let fmt_len = 16u32;

    let mut out = Vec::with_capacity(HEADER_LEN + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(4 + (8 + fmt_len) + (8 + data_len)).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&fmt_len.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&cfg.sample_rate.to_le_bytes());
    out.extend_from_slice(&cfg.sample_rate.saturating_mul(BLOCK_ALIGN as u32).to_le_bytes());
    out.extend_from_slice(&BLOCK_ALIGN.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for &s in signal.samples() {
        let v = (s as i16).saturating_mul(cfg.amplitude).to_le_bytes();
        for _ in 0..CHANNELS {
            out.extend_from_slice(&v);
        }
    }
    out
}
