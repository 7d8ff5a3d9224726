//! Tracker Module Decoder Adapter
//!
//! Bridges a sample-based streaming-audio pipeline to a module-synthesis
//! engine (a ModPlug-style tracker renderer) that needs its entire input
//! in memory before it can produce a single PCM frame. Handles everything
//! around the engine: extension gating, bounded full-stream buffering,
//! output-format negotiation, and the open/read/seek/rewind/close session
//! lifecycle with correct end-of-stream semantics.
//!
//! # Features
//! - Extension allow-list gating for ~22 tracker formats (MOD, XM, IT, S3M, ...)
//! - Bounded in-memory buffering of arbitrary byte sources (2^31-1 byte ceiling)
//! - Negotiation of caller format requests into the engine's three native
//!   output encodings (unsigned 8, signed 16, signed 32 bit)
//! - Ownership-enforced engine-handle lifecycle (no double-free, no
//!   use-after-close)
//! - Engine-agnostic: any renderer implementing [`SynthesisEngine`] plugs in
//!
//! # Quick start
//! ## Open a session and drain it
//! ```no_run
//! use moddecode::{FormatRequest, ModuleDecoder, SynthesisEngine};
//! # fn demo<E: SynthesisEngine + Clone>(engine: E) -> moddecode::Result<()> {
//! let decoder = ModuleDecoder::new(engine);
//! assert!(decoder.init());
//!
//! let mut source = std::fs::File::open("song.xm")?;
//! let mut session = decoder.open(&mut source, Some("xm"), FormatRequest::default())?;
//!
//! let mut pcm = [0u8; 4096];
//! while !session.at_end() {
//!     let n = session.read(&mut pcm);
//!     // hand &pcm[..n] to the output device
//! }
//! session.close();
//! # Ok(())
//! # }
//! ```
//!
//! ## Ask for a specific output format
//! ```
//! use moddecode::{resolve, FormatRequest, OutputEncoding, SampleEncoding};
//! let request = FormatRequest {
//!     sample_rate: 48_000,
//!     channels: 1,
//!     encoding: Some(SampleEncoding::F32Le),
//! };
//! let resolved = resolve(request);
//! assert_eq!(resolved.sample_rate, 48_000);
//! assert_eq!(resolved.channels, 1);
//! // Float output is approximated by the nearest engine-native encoding.
//! assert_eq!(resolved.encoding, OutputEncoding::S32);
//! ```
//!
//! # Limitations
//! Once a session is open, `read`/`seek`/`rewind` cannot fail observably:
//! the engine contract reports exhaustion (and any internal anomaly) solely
//! through `read` returning zero bytes. Seek targets past the end are
//! clamped by the engine, not rejected. Callers needing stronger guarantees
//! must layer them on top.

#![warn(missing_docs)]

// Domain modules
pub mod decoder; // Pipeline front-end & extension gating
pub mod engine; // Synthesis-engine capability contract
pub mod format; // Output-format negotiation
pub mod session; // Decode session state machine
pub mod source; // Byte-source capability & buffer loader

/// Error types for decoder-adapter operations
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// File extension absent or not in the module-format allow-list
    #[error("Not a recognized module extension: {0}")]
    UnsupportedFormat(String),

    /// Source length unknown, non-positive, or beyond the buffer ceiling
    #[error("Stream size unavailable or out of range: {0}")]
    SizeUnavailable(i64),

    /// Buffer allocation for the stream contents failed
    #[error("Out of memory buffering {0} bytes")]
    OutOfMemory(usize),

    /// Source ended before delivering its declared length
    #[error("Short read: got {got} of {expected} bytes")]
    ShortRead {
        /// Bytes actually delivered before the stream ended
        got: usize,
        /// Bytes the source declared it would deliver
        expected: usize,
    },

    /// Engine rejected the fully loaded buffer as unparseable
    #[error("Engine rejected stream: not a module file")]
    NotAModule,

    /// IO error from the underlying byte source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for decoder-adapter operations
pub type Result<T> = std::result::Result<T, DecodeError>;

// Public API exports
pub use decoder::{is_module_extension, DecoderInfo, ModuleDecoder, MODULE_EXTENSIONS};
pub use engine::{EngineFlags, EngineSettings, ResamplingMode, SynthesisEngine};
pub use format::{resolve, FormatRequest, OutputEncoding, ResolvedFormat, SampleEncoding};
pub use session::DecodeSession;
pub use source::{load_fully, ByteSource, MAX_MODULE_BYTES};
