//! Synthesis-engine capability contract
//!
//! The adapter never parses tracker data itself. It drives an external
//! module-synthesis engine through the narrow contract in
//! [`SynthesisEngine`]: hand over a complete in-memory buffer plus a
//! settings block, get back an opaque module handle, then stream PCM and
//! seek by time against that handle. Engines in the wild are ModPlug-style
//! renderers; anything honoring the contract works, which is also how the
//! test suite substitutes a scripted mock.
//!
//! Ownership rules at this seam:
//! - `load` borrows the buffer. Whatever the engine needs past the call it
//!   must copy; the caller drops the buffer the moment `load` returns.
//! - `unload` consumes the handle by value. A handle can therefore be
//!   released at most once, and never used afterwards.

use crate::format::ResolvedFormat;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[cfg(test)]
pub(crate) mod testing;

bitflags! {
    /// Engine feature-flag word passed at load time
    ///
    /// Bit values match the ModPlug settings flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct EngineFlags: u32 {
        /// Oversampled rendering
        const OVERSAMPLING = 1 << 0;
        /// Noise reduction filter
        const NOISE_REDUCTION = 1 << 1;
        /// Reverb processing
        const REVERB = 1 << 2;
        /// Bass expansion (megabass)
        const BASS_EXPANSION = 1 << 3;
        /// Surround enhancement
        const SURROUND = 1 << 4;
    }
}

/// Resampling algorithm the engine uses when rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResamplingMode {
    /// Nearest-neighbor (fastest, harshest)
    Nearest,
    /// Linear interpolation
    Linear,
    /// Cubic spline interpolation
    Spline,
    /// 8-tap FIR filter (best quality)
    #[default]
    Fir,
}

/// Settings block handed to the engine at load time
///
/// Built once per session from the negotiated output format plus fixed
/// tuning constants, passed by reference to [`SynthesisEngine::load`] and
/// not retained afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Enabled rendering features
    pub flags: EngineFlags,
    /// Output channel count (1 or 2)
    pub channels: u16,
    /// Output sample bit width (8, 16 or 32)
    pub bits: u32,
    /// Output sample rate in Hz
    pub frequency: u32,
    /// Resampling algorithm
    pub resampling: ResamplingMode,
    /// Reverb wet level, 0-100
    pub reverb_depth: u32,
    /// Reverb delay in milliseconds
    pub reverb_delay: u32,
    /// Bass expansion level, 0-100
    pub bass_amount: u32,
    /// Bass cutoff in Hz
    pub bass_range: u32,
    /// Surround effect level, 0-100
    pub surround_depth: u32,
    /// Surround delay in milliseconds
    pub surround_delay: u32,
    /// Times to loop the song; 0 plays through once
    pub loop_count: i32,
}

impl EngineSettings {
    /// Build load-time settings for a negotiated output format
    ///
    /// The tuning constants are fixed, borrowed from the XMMS ModPlug
    /// plugin's defaults. Reverb depths are populated but the reverb flag
    /// stays off.
    pub fn for_output(format: &ResolvedFormat) -> Self {
        EngineSettings {
            flags: EngineFlags::OVERSAMPLING
                | EngineFlags::NOISE_REDUCTION
                | EngineFlags::BASS_EXPANSION
                | EngineFlags::SURROUND,
            channels: format.channels,
            bits: format.encoding.bits(),
            frequency: format.sample_rate,
            resampling: ResamplingMode::Fir,
            reverb_depth: 30,
            reverb_delay: 100,
            bass_amount: 40,
            bass_range: 30,
            surround_depth: 20,
            surround_delay: 20,
            loop_count: 0,
        }
    }
}

/// Capability contract the adapter consumes from a module-synthesis engine
///
/// Implementations are typically thin handles over an FFI library (often
/// zero-sized, or an `Arc` for stateful engines) and must be cheap to
/// clone. All methods are synchronous and in-process.
///
/// The read contract has no error channel: a return of `0` means the module
/// is exhausted, and any internal engine anomaly surfaces the same way.
/// Seeking past the end is clamped by the engine, never rejected.
pub trait SynthesisEngine {
    /// Opaque handle to one loaded module
    ///
    /// Owning a value of this type is owning the engine-side resource;
    /// release goes through [`SynthesisEngine::unload`] exactly once.
    type Module;

    /// One-time engine initialization; `false` means the engine is
    /// unusable and no load may be attempted
    fn init(&self) -> bool;

    /// Parse a complete module file from memory
    ///
    /// Returns `None` when the buffer is not a parseable module. The engine
    /// must not retain `data` beyond this call — the caller releases the
    /// buffer as soon as `load` returns, on both paths.
    fn load(&self, data: &[u8], settings: &EngineSettings) -> Option<Self::Module>;

    /// Render up to `out.len()` bytes of PCM; `0` means exhausted
    fn read(&self, module: &mut Self::Module, out: &mut [u8]) -> usize;

    /// Reposition to `position_ms` milliseconds from the start
    ///
    /// Out-of-range targets are clamped, not rejected.
    fn seek(&self, module: &mut Self::Module, position_ms: u32);

    /// Total rendered length of the module in milliseconds
    fn length_ms(&self, module: &Self::Module) -> u32;

    /// Release a module handle
    fn unload(&self, module: Self::Module);
}
