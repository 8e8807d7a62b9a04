//! In-memory engine double for tests and dry runs
//!
//! The stub records every backend call it receives and can be told to fail
//! at each stage of the lifecycle, which makes the error paths of
//! [`Converter`](crate::Converter) testable without libwkhtmltox anywhere
//! near the build.

use std::sync::{Arc, Mutex};

use crate::engine::Engine;

/// Everything a [`StubEngine`] has recorded so far.
///
/// Obtained through [`StubEngine::recorded`]; counters cover the whole
/// engine, not a single conversion.
#[derive(Debug, Clone, Default)]
pub struct StubState {
    /// Calls to `ensure_initialized`
    pub init_calls: usize,
    /// Settings handles vended
    pub settings_created: usize,
    /// Settings handles released without reaching a converter
    pub settings_released: usize,
    /// Key/value pairs accepted, in application order
    pub applied: Vec<(String, String)>,
    /// Converter handles vended
    pub converters_created: usize,
    /// Converter handles destroyed
    pub converters_destroyed: usize,
    /// Calls to `convert`
    pub convert_calls: usize,
    /// Input documents handed to `create_converter`
    pub inputs: Vec<String>,
}

/// Settings handle vended by the stub
#[derive(Debug)]
pub struct StubSettings;

/// Converter handle vended by the stub
#[derive(Debug)]
pub struct StubConverter {
    converted: bool,
}

/// An engine that renders nothing and remembers everything.
///
/// Clones share the recorded state, so keep a clone around to inspect what
/// a converter did to the engine it consumed:
///
/// ```
/// use htmlshot::{Converter, RenderConfig, StubEngine};
///
/// let engine = StubEngine::new();
/// let probe = engine.clone();
/// let converter = Converter::with_engine(RenderConfig::default(), engine).unwrap();
///
/// let mut image = Vec::new();
/// converter.run("<html></html>", &mut image).unwrap();
/// assert_eq!(probe.recorded().converters_destroyed, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubEngine {
    state: Arc<Mutex<StubState>>,
    /// Report initialization failure
    pub fail_init: bool,
    /// Refuse to vend a settings handle
    pub fail_create_settings: bool,
    /// Reject this key with the paired code when it is applied
    pub reject_key: Option<(String, i32)>,
    /// Refuse to vend a converter handle
    pub fail_create_converter: bool,
    /// Report conversion failure
    pub fail_convert: bool,
    /// Bytes handed out after a successful conversion
    pub output: Option<Vec<u8>>,
}

impl StubEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded calls
    pub fn recorded(&self) -> StubState {
        self.state.lock().unwrap().clone()
    }

    fn bytes(&self) -> Vec<u8> {
        match &self.output {
            Some(bytes) => bytes.clone(),
            // PNG signature, enough to look like an image in tests
            None => b"\x89PNG\r\n\x1a\n".to_vec(),
        }
    }
}

impl Engine for StubEngine {
    type Settings = StubSettings;
    type Converter = StubConverter;

    fn ensure_initialized(&self) -> bool {
        self.state.lock().unwrap().init_calls += 1;
        !self.fail_init
    }

    fn version(&self) -> String {
        "stub-0.0.0".to_string()
    }

    fn create_settings(&self) -> Option<StubSettings> {
        if self.fail_create_settings {
            return None;
        }
        self.state.lock().unwrap().settings_created += 1;
        Some(StubSettings)
    }

    fn apply_setting(
        &self,
        _settings: &mut StubSettings,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), i32> {
        if let Some((rejected, code)) = &self.reject_key {
            if rejected == key {
                return Err(*code);
            }
        }
        self.state
            .lock()
            .unwrap()
            .applied
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn create_converter(
        &self,
        settings: StubSettings,
        input: &str,
    ) -> std::result::Result<StubConverter, StubSettings> {
        if self.fail_create_converter {
            return Err(settings);
        }
        let mut state = self.state.lock().unwrap();
        state.converters_created += 1;
        state.inputs.push(input.to_string());
        Ok(StubConverter { converted: false })
    }

    fn convert(&self, converter: &mut StubConverter) -> bool {
        self.state.lock().unwrap().convert_calls += 1;
        if self.fail_convert {
            return false;
        }
        converter.converted = true;
        true
    }

    fn output(&self, converter: &mut StubConverter) -> Vec<u8> {
        if !converter.converted {
            return Vec::new();
        }
        self.bytes()
    }

    fn destroy_converter(&self, _converter: StubConverter) {
        self.state.lock().unwrap().converters_destroyed += 1;
    }

    fn release_settings(&self, _settings: StubSettings) {
        self.state.lock().unwrap().settings_released += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_recorded_state() {
        let engine = StubEngine::new();
        let probe = engine.clone();

        assert!(engine.ensure_initialized());
        assert_eq!(probe.recorded().init_calls, 1);
    }

    #[test]
    fn output_is_empty_before_convert() {
        let engine = StubEngine::new();
        let settings = engine.create_settings().unwrap();
        let mut converter = match engine.create_converter(settings, "<html></html>") {
            Ok(converter) => converter,
            Err(_) => panic!("stub refused a converter"),
        };

        assert!(engine.output(&mut converter).is_empty());
        assert!(engine.convert(&mut converter));
        assert!(!engine.output(&mut converter).is_empty());
    }

    #[test]
    fn rejected_key_is_not_recorded() {
        let mut engine = StubEngine::new();
        engine.reject_key = Some(("quality".to_string(), 7));

        let mut settings = engine.create_settings().unwrap();
        assert_eq!(engine.apply_setting(&mut settings, "quality", "80"), Err(7));
        assert!(engine.recorded().applied.is_empty());
    }
}
