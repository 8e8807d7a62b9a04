//! Error types for the conversion layer

use thiserror::Error;

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while marshalling settings or driving a conversion
#[derive(Error, Debug)]
pub enum Error {
    /// The fragment input was the empty string
    #[error("input is empty")]
    EmptyInput,

    /// The fragment input contains no HTML tag pair and cannot be rendered as-is
    #[error("input does not contain HTML tags")]
    NotHtml,

    /// The engine refused one of the marshalled settings
    #[error("could not set converter option `{key}` to `{value}`: code {code}")]
    SettingRejected {
        key: &'static str,
        value: String,
        code: i32,
    },

    /// The engine did not hand out a settings handle
    #[error("could not create converter settings")]
    EngineUnavailable,

    /// The engine did not hand out a converter handle
    #[error("could not create converter")]
    ConverterCreationFailed,

    /// The convert call did not signal success
    #[error("could not convert the given input")]
    ConversionFailed,

    /// Conversion reported success but produced zero output bytes
    #[error("could not retrieve the converted output")]
    EmptyOutput,

    /// Process-wide engine initialization failed
    #[error("could not initialize the rendering engine")]
    LibraryInitFailed,

    /// Writing the output to the caller's sink failed
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}
