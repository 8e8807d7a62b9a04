//! Conversion driver: one call, one engine session

use std::io::Write;

use log::debug;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::fragment::normalize_fragment;
use crate::settings::apply_config;
use crate::RenderConfig;

/// Drives complete conversions against a rendering backend.
///
/// A converter owns its configuration and backend. Every call to [`run`] or
/// [`run_on_fragment`] opens an independent backend session and tears it
/// down before returning, so a single converter can serve any number of
/// sequential conversions.
///
/// [`run`]: Converter::run
/// [`run_on_fragment`]: Converter::run_on_fragment
#[derive(Debug)]
pub struct Converter<E: Engine> {
    config: RenderConfig,
    engine: E,
}

impl<E: Engine> Converter<E> {
    /// Create a converter on an explicit backend.
    ///
    /// Brings the backend up if this is the first converter in the process;
    /// fails with [`Error::LibraryInitFailed`] when that does not work.
    pub fn with_engine(config: RenderConfig, engine: E) -> Result<Self> {
        if !engine.ensure_initialized() {
            return Err(Error::LibraryInitFailed);
        }
        Ok(Self { config, engine })
    }

    /// Borrow the configuration this converter applies to every run
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Version string of the backend in use
    pub fn engine_version(&self) -> String {
        self.engine.version()
    }

    /// Convert a complete HTML document or a URL and write the image bytes
    /// to `sink`.
    ///
    /// The sink is only written after the whole output has been copied out
    /// of the engine; a failed conversion leaves it untouched.
    pub fn run(&self, input: &str, sink: &mut dyn Write) -> Result<()> {
        debug!("converting {} bytes of input", input.len());
        let engine = &self.engine;

        let mut settings = match engine.create_settings() {
            Some(settings) => settings,
            None => return Err(Error::EngineUnavailable),
        };

        if let Err(err) = apply_config(engine, &mut settings, &self.config) {
            engine.release_settings(settings);
            return Err(err);
        }

        // On success the converter takes over the settings handle and both
        // are released together when the guard drops.
        let converter = match engine.create_converter(settings, input) {
            Ok(converter) => converter,
            Err(settings) => {
                engine.release_settings(settings);
                return Err(Error::ConverterCreationFailed);
            }
        };
        let mut session = ConverterGuard::new(engine, converter);

        if !session.convert() {
            return Err(Error::ConversionFailed);
        }

        let output = session.output();
        if output.is_empty() {
            return Err(Error::EmptyOutput);
        }

        debug!("conversion produced {} bytes", output.len());
        sink.write_all(&output)?;
        Ok(())
    }

    /// Normalize fragment input into a complete document, then convert it.
    ///
    /// Empty input fails with [`Error::EmptyInput`] and bare plain text
    /// fails with [`Error::NotHtml`]; see [`normalize_fragment`].
    pub fn run_on_fragment(&self, input: &str, sink: &mut dyn Write) -> Result<()> {
        let document = normalize_fragment(input)?;
        self.run(document.as_str(), sink)
    }
}

/// Scopes a live converter handle to one conversion. The handle stays
/// `Some` until `Drop` takes it for destruction, so the engine teardown
/// runs on early returns and on unwinding alike.
struct ConverterGuard<'a, E: Engine> {
    engine: &'a E,
    converter: Option<E::Converter>,
}

impl<'a, E: Engine> ConverterGuard<'a, E> {
    fn new(engine: &'a E, converter: E::Converter) -> Self {
        Self {
            engine,
            converter: Some(converter),
        }
    }

    fn convert(&mut self) -> bool {
        match self.converter.as_mut() {
            Some(converter) => self.engine.convert(converter),
            None => false,
        }
    }

    fn output(&mut self) -> Vec<u8> {
        match self.converter.as_mut() {
            Some(converter) => self.engine.output(converter),
            None => Vec::new(),
        }
    }
}

impl<E: Engine> Drop for ConverterGuard<'_, E> {
    fn drop(&mut self) {
        if let Some(converter) = self.converter.take() {
            self.engine.destroy_converter(converter);
        }
    }
}
