//! Pipeline front-end
//!
//! The host pipeline sees one decoder per format family and probes each in
//! turn. [`ModuleDecoder`] is the module-family entry: it owns the one-time
//! engine initialization, publishes the registration descriptor, and opens
//! [`DecodeSession`]s. Every open-time failure means "not my stream" — the
//! host moves on to the next decoder, nothing is fatal.

pub mod extensions;

pub use extensions::{is_module_extension, MODULE_EXTENSIONS};

use crate::engine::SynthesisEngine;
use crate::format::FormatRequest;
use crate::session::DecodeSession;
use crate::source::ByteSource;
use crate::Result;
use parking_lot::Once;
use std::sync::atomic::{AtomicBool, Ordering};

/// Registration metadata for the host's decoder registry
///
/// Descriptive only; nothing here affects decoding behavior.
#[derive(Debug, Clone, Copy)]
pub struct DecoderInfo {
    /// Extensions this decoder claims
    pub extensions: &'static [&'static str],
    /// Human-readable description
    pub description: &'static str,
    /// Author attribution
    pub author: &'static str,
    /// Reference URL
    pub url: &'static str,
}

/// Module-music decoder front-end over a synthesis engine
///
/// The engine type is typically a zero-sized FFI shim or an `Arc` handle;
/// each opened session gets its own clone.
pub struct ModuleDecoder<E> {
    engine: E,
    init_once: Once,
    init_ok: AtomicBool,
}

impl<E: SynthesisEngine + Clone> ModuleDecoder<E> {
    /// Create a decoder front-end over `engine`
    ///
    /// The engine is not initialized yet; call [`ModuleDecoder::init`]
    /// before opening sessions.
    pub fn new(engine: E) -> Self {
        ModuleDecoder {
            engine,
            init_once: Once::new(),
            init_ok: AtomicBool::new(false),
        }
    }

    /// One-time engine initialization
    ///
    /// The engine's init runs at most once per decoder; later calls return
    /// the cached result. A `false` result gates registration — the host
    /// must not open sessions through an uninitialized decoder.
    pub fn init(&self) -> bool {
        self.init_once.call_once(|| {
            self.init_ok.store(self.engine.init(), Ordering::Release);
        });
        self.init_ok.load(Ordering::Acquire)
    }

    /// Process-wide teardown counterpart to [`ModuleDecoder::init`]
    ///
    /// The engine contract has nothing to tear down; present for registry
    /// symmetry.
    pub fn quit(&self) {}

    /// Open a decode session over `source`
    ///
    /// See [`DecodeSession::open`] for the full negotiation and failure
    /// semantics. All errors are non-fatal probe rejections.
    pub fn open<S>(
        &self,
        source: &mut S,
        extension_hint: Option<&str>,
        request: FormatRequest,
    ) -> Result<DecodeSession<E>>
    where
        S: ByteSource + ?Sized,
    {
        DecodeSession::open(self.engine.clone(), source, extension_hint, request)
    }

    /// Registration descriptor for this decoder
    pub fn info(&self) -> DecoderInfo {
        DecoderInfo {
            extensions: MODULE_EXTENSIONS,
            description: "Play tracker modules through a synthesis engine",
            author: "slippyex",
            url: "https://github.com/slippyex/moddecode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::MockEngine;
    use crate::DecodeError;
    use std::io::Cursor;

    #[test]
    fn test_init_runs_engine_init_exactly_once() {
        let engine = MockEngine::new(vec![]);
        let decoder = ModuleDecoder::new(engine.clone());

        assert!(decoder.init());
        assert!(decoder.init());
        assert!(decoder.init());
        assert_eq!(engine.state().init_calls, 1);
    }

    #[test]
    fn test_failed_init_result_is_cached() {
        let engine = MockEngine::failing_init();
        let decoder = ModuleDecoder::new(engine.clone());

        assert!(!decoder.init());
        assert!(!decoder.init());
        assert_eq!(engine.state().init_calls, 1);
    }

    #[test]
    fn test_open_full_lifecycle() {
        let engine = MockEngine::new(vec![512, 512, 128]);
        let decoder = ModuleDecoder::new(engine.clone());
        assert!(decoder.init());

        let mut source = Cursor::new(vec![0x11u8; 500]);
        let mut session = decoder
            .open(&mut source, Some("XM"), FormatRequest::default())
            .unwrap();

        let mut out = [0u8; 1024];
        let mut total = 0;
        while !session.at_end() {
            total += session.read(&mut out);
        }
        assert_eq!(total, 512 + 512 + 128);

        session.close();
        assert_eq!(engine.state().unloads, 1);
    }

    #[test]
    fn test_each_open_gets_an_independent_session() {
        let engine = MockEngine::new(vec![64]);
        let decoder = ModuleDecoder::new(engine.clone());

        let mut first_src = Cursor::new(vec![1u8; 32]);
        let mut second_src = Cursor::new(vec![2u8; 48]);
        let first = decoder
            .open(&mut first_src, Some("IT"), FormatRequest::default())
            .unwrap();
        let second = decoder
            .open(&mut second_src, Some("MOD"), FormatRequest::default())
            .unwrap();

        let state = engine.state();
        assert_eq!(state.loads.len(), 2);
        assert_eq!(state.loads[0], vec![1u8; 32]);
        assert_eq!(state.loads[1], vec![2u8; 48]);
        drop(state);

        first.close();
        second.close();
        assert_eq!(engine.state().unloads, 2);
    }

    #[test]
    fn test_open_rejects_foreign_extension() {
        let decoder = ModuleDecoder::new(MockEngine::new(vec![]));
        let mut source = Cursor::new(vec![0u8; 16]);
        let result = decoder.open(&mut source, Some("TXT"), FormatRequest::default());
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_descriptor_claims_the_allow_list() {
        let decoder = ModuleDecoder::new(MockEngine::new(vec![]));
        let info = decoder.info();
        assert_eq!(info.extensions.len(), 22);
        assert!(info.extensions.contains(&"XM"));
        assert!(!info.description.is_empty());
        assert!(!info.url.is_empty());
    }
}
