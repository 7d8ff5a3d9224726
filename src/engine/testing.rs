//! Scripted mock engine for session and decoder tests

use super::{EngineSettings, SynthesisEngine};
use parking_lot::Mutex;
use std::sync::Arc;

/// Scripted stand-in for a real synthesis engine
///
/// Renders according to a fixed script of per-call byte counts and records
/// every contract interaction so tests can assert call pairing and buffer
/// handover.
#[derive(Clone)]
pub(crate) struct MockEngine {
    inner: Arc<Mutex<MockState>>,
}

pub(crate) struct MockState {
    /// Result `init` reports to the adapter
    pub init_result: bool,
    /// Whether `load` accepts the buffer
    pub accept_load: bool,
    /// Value `length_ms` reports
    pub length_ms: u32,
    /// Byte counts successive `read` calls deliver before returning 0
    pub read_script: Vec<usize>,
    pub init_calls: usize,
    pub loads: Vec<Vec<u8>>,
    pub unloads: usize,
    pub seeks: Vec<u32>,
    pub last_settings: Option<EngineSettings>,
}

/// Mock module handle: an index into the owning engine's read script
pub(crate) struct MockModule {
    pos: usize,
}

impl MockEngine {
    pub fn new(read_script: Vec<usize>) -> Self {
        MockEngine {
            inner: Arc::new(Mutex::new(MockState {
                init_result: true,
                accept_load: true,
                length_ms: 120_000,
                read_script,
                init_calls: 0,
                loads: Vec::new(),
                unloads: 0,
                seeks: Vec::new(),
                last_settings: None,
            })),
        }
    }

    pub fn rejecting() -> Self {
        let engine = MockEngine::new(vec![]);
        engine.inner.lock().accept_load = false;
        engine
    }

    pub fn failing_init() -> Self {
        let engine = MockEngine::new(vec![]);
        engine.inner.lock().init_result = false;
        engine
    }

    pub fn state(&self) -> parking_lot::MutexGuard<'_, MockState> {
        self.inner.lock()
    }
}

impl SynthesisEngine for MockEngine {
    type Module = MockModule;

    fn init(&self) -> bool {
        let mut state = self.inner.lock();
        state.init_calls += 1;
        state.init_result
    }

    fn load(&self, data: &[u8], settings: &EngineSettings) -> Option<MockModule> {
        let mut state = self.inner.lock();
        state.loads.push(data.to_vec());
        state.last_settings = Some(*settings);
        state.accept_load.then_some(MockModule { pos: 0 })
    }

    fn read(&self, module: &mut MockModule, out: &mut [u8]) -> usize {
        let state = self.inner.lock();
        match state.read_script.get(module.pos) {
            Some(&n) => {
                module.pos += 1;
                n.min(out.len())
            }
            None => 0,
        }
    }

    fn seek(&self, module: &mut MockModule, position_ms: u32) {
        self.inner.lock().seeks.push(position_ms);
        // Any seek restarts the script; the scripted engine has no finer
        // notion of position.
        module.pos = 0;
    }

    fn length_ms(&self, module: &MockModule) -> u32 {
        let _ = module;
        self.inner.lock().length_ms
    }

    fn unload(&self, module: MockModule) {
        drop(module);
        self.inner.lock().unloads += 1;
    }
}
