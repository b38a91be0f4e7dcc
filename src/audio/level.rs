//! Sample-level transforms for the handset audio path.
//!
//! Mono 16 kHz, signed 16-bit PCM on both directions. The microphone
//! delivers 32-bit I2S frames that carry the useful signal in the upper
//! bits; the speaker expects attenuated output so the handset capsule is
//! not overdriven.

/// Sampling rate of both audio directions.
pub const SAMPLE_RATE_HZ: u32 = 16_000;

/// Default right-shift applied to speaker samples.
/// The resulting gain factor is 1 / 2^4.
pub const DEFAULT_GAIN_SHIFT: u8 = 4;

/// Right-shift that scales a raw 32-bit microphone frame into i16 range.
pub const MIC_SAMPLE_SHIFT: u8 = 13;

/// Attenuate samples in place by an arithmetic right shift.
///
/// Shifts of 15 or more zero out (or sign-saturate) every sample; the
/// speaker config validates the shift before it gets here.
#[inline]
pub fn attenuate(samples: &mut [i16], gain_shift: u8) {
    let shift = gain_shift.min(15) as u32;
    for sample in samples {
        *sample >>= shift;
    }
}

/// Convert raw 32-bit microphone frames to 16-bit PCM.
///
/// Each frame is shifted down by [`MIC_SAMPLE_SHIFT`] and clamped into i16
/// range. Returns the number of samples written (the shorter of the two
/// slices).
pub fn mic_to_pcm(raw: &[i32], out: &mut [i16]) -> usize {
    let n = raw.len().min(out.len());
    for i in 0..n {
        let scaled = raw[i] >> MIC_SAMPLE_SHIFT;
        out[i] = scaled.clamp(i16::MIN as i32, i16::MAX as i32) as i16;
    }
    n
}

/// Reassemble little-endian byte pairs into i16 samples.
///
/// The playback entry point receives raw bytes; a trailing odd byte is
/// ignored. Returns the number of samples written.
pub fn pcm_from_le_bytes(bytes: &[u8], out: &mut [i16]) -> usize {
    let n = (bytes.len() / 2).min(out.len());
    for i in 0..n {
        out[i] = i16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]);
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attenuate_default_shift() {
        let mut samples = [16_000i16, -16_000, 0, 15];
        attenuate(&mut samples, DEFAULT_GAIN_SHIFT);
        assert_eq!(samples, [1_000, -1_000, 0, 0]);
    }

    #[test]
    fn test_attenuate_shift_clamped() {
        let mut samples = [i16::MAX, i16::MIN];
        attenuate(&mut samples, 200);
        // Arithmetic shift keeps the sign bit
        assert_eq!(samples, [0, -1]);
    }

    #[test]
    fn test_mic_to_pcm_scaling() {
        let raw = [1 << MIC_SAMPLE_SHIFT, -(1 << MIC_SAMPLE_SHIFT)];
        let mut out = [0i16; 2];
        assert_eq!(mic_to_pcm(&raw, &mut out), 2);
        assert_eq!(out, [1, -1]);
    }

    #[test]
    fn test_mic_to_pcm_clamps() {
        let raw = [i32::MAX, i32::MIN];
        let mut out = [0i16; 2];
        mic_to_pcm(&raw, &mut out);
        assert_eq!(out, [i16::MAX, i16::MIN]);
    }

    #[test]
    fn test_mic_to_pcm_short_output() {
        let raw = [0i32; 8];
        let mut out = [0i16; 4];
        assert_eq!(mic_to_pcm(&raw, &mut out), 4);
    }

    #[test]
    fn test_pcm_from_le_bytes() {
        let bytes = [0x34, 0x12, 0xFF, 0xFF, 0xAB];
        let mut out = [0i16; 4];
        // Trailing odd byte ignored
        assert_eq!(pcm_from_le_bytes(&bytes, &mut out), 2);
        assert_eq!(out[0], 0x1234);
        assert_eq!(out[1], -1);
    }
}
