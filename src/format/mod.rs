//! Output-format negotiation
//!
//! Callers describe the PCM format they would like to receive; the synthesis
//! engine only renders three encodings (unsigned 8, signed 16, signed 32 bit,
//! native endianness). [`resolve`] reconciles the two: defaults are filled in
//! and every requested encoding is coerced to the nearest engine-native
//! bucket. The coercion is silent and lossy on purpose — the engine cannot
//! represent the rejected variants, and a request is a preference, not a
//! contract.
//!
//! Coercion table:
//! - sample rate: `0` (no preference) → 44100 Hz, anything else passes through
//! - channels: exactly `1` → mono, every other value → stereo
//! - encoding: `None` → S16; U8/S8 → U8; S32/F32 (either endianness) → S32;
//!   S16 (either endianness) → S16

use serde::{Deserialize, Serialize};

/// Default output sample rate when the caller states no preference
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Sample encodings a caller may request
///
/// Mirrors the encodings a typical host pipeline can express, including
/// variants the engine cannot render natively. See [`resolve`] for how each
/// maps onto [`OutputEncoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleEncoding {
    /// Unsigned 8-bit
    U8,
    /// Signed 8-bit
    S8,
    /// Signed 16-bit, little-endian
    S16Le,
    /// Signed 16-bit, big-endian
    S16Be,
    /// Signed 32-bit, little-endian
    S32Le,
    /// Signed 32-bit, big-endian
    S32Be,
    /// 32-bit float, little-endian
    F32Le,
    /// 32-bit float, big-endian
    F32Be,
}

/// The three encodings the synthesis engine renders natively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputEncoding {
    /// Unsigned 8-bit
    U8,
    /// Signed 16-bit, native endianness
    S16,
    /// Signed 32-bit, native endianness
    S32,
}

impl OutputEncoding {
    /// Bit width of one sample in this encoding
    pub fn bits(&self) -> u32 {
        match self {
            OutputEncoding::U8 => 8,
            OutputEncoding::S16 => 16,
            OutputEncoding::S32 => 32,
        }
    }

    /// Byte width of one sample in this encoding
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits() / 8) as usize
    }
}

/// A caller's desired output format, supplied before open
///
/// `Default` yields an all-no-preference request, which resolves to
/// 44100 Hz stereo signed-16.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRequest {
    /// Desired sample rate in Hz. `0` means no preference.
    pub sample_rate: u32,
    /// Desired channel count. Only exactly `1` selects mono; every other
    /// value (including `0`) resolves to stereo.
    pub channels: u16,
    /// Desired sample encoding. `None` means no preference.
    pub encoding: Option<SampleEncoding>,
}

/// A concrete, engine-supported output format
///
/// Invariants: `sample_rate > 0` whenever the request's rate was `0`
/// (a nonzero requested rate passes through unvalidated), and
/// `channels` is always 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFormat {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Output channel count (1 or 2)
    pub channels: u16,
    /// Output sample encoding
    pub encoding: OutputEncoding,
}

/// Resolve a caller's format request into an engine-supported format
///
/// Pure and total: every request resolves, none errors. Unrepresentable
/// encodings are approximated by the nearest native bucket rather than
/// rejected, since the engine offers exactly three output encodings and
/// hosts probe decoders with whatever format their device negotiated.
pub fn resolve(request: FormatRequest) -> ResolvedFormat {
    let sample_rate = if request.sample_rate == 0 {
        DEFAULT_SAMPLE_RATE
    } else {
        request.sample_rate
    };

    // Mono only on explicit request; everything else is stereo.
    let channels = if request.channels == 1 { 1 } else { 2 };

    let encoding = match request.encoding {
        None => OutputEncoding::S16,
        Some(SampleEncoding::U8) | Some(SampleEncoding::S8) => OutputEncoding::U8,
        Some(SampleEncoding::S32Le)
        | Some(SampleEncoding::S32Be)
        | Some(SampleEncoding::F32Le)
        | Some(SampleEncoding::F32Be) => OutputEncoding::S32,
        Some(SampleEncoding::S16Le) | Some(SampleEncoding::S16Be) => OutputEncoding::S16,
    };

    ResolvedFormat {
        sample_rate,
        channels,
        encoding,
    }
}
