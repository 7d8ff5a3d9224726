//! Decode session state machine
//!
//! One [`DecodeSession`] covers one playback of one module: open buffers
//! the stream and hands it to the engine, read streams PCM until the engine
//! reports exhaustion, seek/rewind reposition, close releases the engine
//! handle. The session state machine is
//! Open → EndOfStream → (seek/rewind) → Open, with the closed state
//! represented by the session value no longer existing: [`DecodeSession::open`]
//! creates it, [`DecodeSession::close`] consumes it, and the borrow checker
//! rules out use-after-close and double-close at compile time. A session
//! dropped without close still releases its handle exactly once.
//!
//! All operations are synchronous and single-threaded; a session has one
//! owner and no internal locking.

use crate::decoder::is_module_extension;
use crate::engine::{EngineSettings, SynthesisEngine};
use crate::format::{resolve, FormatRequest, ResolvedFormat};
use crate::source::{load_fully, ByteSource};
use crate::{DecodeError, Result};

/// A live decoding session over one loaded module
///
/// Owns the engine handle for its whole lifetime. After open, no operation
/// can fail observably and the hot read path performs no allocation.
pub struct DecodeSession<E: SynthesisEngine> {
    engine: E,
    /// Live engine handle; `None` only after close/drop has released it
    module: Option<E::Module>,
    at_end: bool,
    duration_ms: u32,
    output: ResolvedFormat,
}

impl<E: SynthesisEngine> DecodeSession<E> {
    /// Open a decoding session over `source`
    ///
    /// Gates on the extension hint first (the engine's own content
    /// detection false-positives on arbitrary binary data, so an absent or
    /// unlisted extension fails with [`DecodeError::UnsupportedFormat`]
    /// before the source is touched). The stream is then buffered whole,
    /// the requested format resolved, and the engine asked to load. The
    /// buffer is released as soon as the load call returns, whether it
    /// succeeded or not; the engine keeps its own copy of whatever it
    /// needs. A rejected buffer fails with [`DecodeError::NotAModule`].
    ///
    /// This is the session's sole allocation point. Successful sessions are
    /// always seekable.
    pub fn open<S>(
        engine: E,
        source: &mut S,
        extension_hint: Option<&str>,
        request: FormatRequest,
    ) -> Result<Self>
    where
        S: ByteSource + ?Sized,
    {
        match extension_hint {
            Some(ext) if is_module_extension(ext) => {}
            Some(ext) => return Err(DecodeError::UnsupportedFormat(ext.to_string())),
            None => return Err(DecodeError::UnsupportedFormat(String::from("<none>"))),
        }

        let data = load_fully(source)?;
        let output = resolve(request);
        let settings = EngineSettings::for_output(&output);

        // Exactly-once, unconditional release: the buffer dies here on both
        // the accept and reject paths.
        let module = engine.load(&data, &settings);
        drop(data);
        let module = module.ok_or(DecodeError::NotAModule)?;

        let duration_ms = engine.length_ms(&module);
        Ok(DecodeSession {
            engine,
            module: Some(module),
            at_end: false,
            duration_ms,
            output,
        })
    }

    /// Render up to `out.len()` bytes of PCM into `out`
    ///
    /// Returns the number of bytes produced, uninterpreted, in the
    /// negotiated output format. A return of `0` marks end-of-stream;
    /// further reads keep returning `0` without any state change until
    /// [`DecodeSession::seek`] or [`DecodeSession::rewind`]. There is no
    /// error path: the engine contract folds any internal anomaly into the
    /// zero-return convention.
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let Some(module) = self.module.as_mut() else {
            return 0;
        };
        let produced = self.engine.read(module, out);
        if produced == 0 {
            self.at_end = true;
        }
        produced
    }

    /// Reposition to `position_ms` milliseconds from the start
    ///
    /// Infallible: the engine clamps out-of-range targets rather than
    /// rejecting them, and the adapter does not re-validate. Clears the
    /// end-of-stream state.
    pub fn seek(&mut self, position_ms: u32) {
        let Some(module) = self.module.as_mut() else {
            return;
        };
        self.engine.seek(module, position_ms);
        self.at_end = false;
    }

    /// Return to the start of the module
    ///
    /// Equivalent to `seek(0)`; infallible, clears end-of-stream.
    pub fn rewind(&mut self) {
        self.seek(0);
    }

    /// Whether the last read hit end-of-stream
    pub fn at_end(&self) -> bool {
        self.at_end
    }

    /// Total rendered length in milliseconds, captured at open
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// The negotiated output format this session renders in
    pub fn output_format(&self) -> ResolvedFormat {
        self.output
    }

    /// Whether the session supports seeking (always true for modules)
    pub fn is_seekable(&self) -> bool {
        true
    }

    /// Close the session, releasing the engine handle
    ///
    /// Consumes the session; further use is a compile error. The handle is
    /// released exactly once whether a session is closed explicitly or
    /// simply dropped.
    pub fn close(mut self) {
        if let Some(module) = self.module.take() {
            self.engine.unload(module);
        }
    }
}

impl<E: SynthesisEngine> Drop for DecodeSession<E> {
    fn drop(&mut self) {
        if let Some(module) = self.module.take() {
            self.engine.unload(module);
        }
    }
}
