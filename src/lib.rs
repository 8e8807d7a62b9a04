//! HTML to Image Conversion
//!
//! A typed settings and conversion-lifecycle layer over the wkhtmltox
//! rendering engine, for producing raster images from HTML documents, URLs,
//! and loose markup fragments.
//!
//! # Features
//!
//! - **Native Backend** (`native` feature): links against libwkhtmltox for
//!   real conversions
//! - **Typed Settings**: a flat [`RenderConfig`] marshalled into the
//!   engine's string-keyed settings, with default values omitted
//! - **Fragment Input**: loose markup is wrapped into a complete document
//!   before conversion; bare plain text is rejected instead of mis-rendered
//!
//! # Example
//!
//! ```no_run
//! use htmlshot::RenderConfig;
//!
//! # #[cfg(feature = "native")]
//! # fn main() -> htmlshot::Result<()> {
//! let config = RenderConfig {
//!     format: "png".to_string(),
//!     screen_width: 1024,
//!     ..Default::default()
//! };
//!
//! let converter = htmlshot::new_converter(config)?;
//! let mut image = Vec::new();
//! converter.run_on_fragment("<p>Hello</p>", &mut image)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "native"))]
//! # fn main() {}
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod engine;
pub use engine::Engine;

// In-memory double, available to downstream test suites as well
pub mod stub;
pub use stub::StubEngine;

// Real backend; needs libwkhtmltox to link
#[cfg(feature = "native")]
pub mod native;

mod converter;
mod fragment;
mod settings;

pub use converter::Converter;
pub use fragment::{normalize_fragment, NormalizedDocument};
pub use settings::SettingValue;

/// Configuration for a conversion
///
/// Every field maps to exactly one engine setting, named in the field's
/// documentation. A field left at its zero value is not sent at all, so a
/// default `RenderConfig` lets the engine run entirely on its own
/// defaults. The struct is read-only to the conversion; build one per
/// converter and reuse it across calls.
///
/// # Examples
///
/// ```
/// let config = htmlshot::RenderConfig {
///     format: "jpeg".to_string(),
///     quality: 80,
///     ..Default::default()
/// };
/// assert!(!config.transparent);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Paint the page background (`web.background`)
    pub background: bool,
    /// Load referenced images (`web.loadImages`)
    pub load_images: bool,
    /// Run JavaScript on the page (`web.enableJavascript`)
    pub enable_javascript: bool,
    /// Smallest allowed font size, in points (`web.minimumFontSize`)
    pub minimum_font_size: u64,
    /// Path or URL of a stylesheet to inject (`web.userStyleSheet`)
    pub user_style_sheet: String,

    /// Left edge of the crop area, in pixels (`crop.left`)
    pub crop_left: u64,
    /// Top edge of the crop area, in pixels (`crop.top`)
    pub crop_top: u64,
    /// Width of the crop area, in pixels (`crop.width`)
    pub crop_width: u64,
    /// Height of the crop area, in pixels (`crop.height`)
    pub crop_height: u64,
    /// Use a transparent background (`transparent`)
    pub transparent: bool,
    /// Output image format such as `png` or `jpeg` (`fmt`)
    pub format: String,
    /// Width of the virtual screen, in pixels (`screenWidth`)
    pub screen_width: u64,
    /// Grow `screenWidth` until the content fits, when nonzero (`smartWidth`)
    pub smart_width: u64,
    /// Output compression quality, 0 to 100 (`quality`)
    pub quality: u64,

    /// HTTP basic auth username (`load.username`)
    pub username: String,
    /// HTTP basic auth password (`load.password`)
    pub password: String,
    /// Zoom applied to the page before rendering (`load.zoomFactor`)
    pub zoom_factor: f64,
    /// Deny `file://` access to the loaded page (`load.blockLocalFileAccess`)
    pub block_local_file_access: bool,
    /// Abort scripts that run for too long (`load.stopSlowScript`)
    pub stop_slow_script: bool,
    /// One of `abort`, `skip` or `ignore` (`load.loadErrorHandling`)
    pub load_error_handling: String,
    /// Proxy server to route outgoing requests through (`load.proxy`)
    pub proxy: String,
}

/// Create a converter on the native wkhtmltox backend.
///
/// Brings the engine up on first use; every converter created afterwards
/// shares that one initialization.
#[cfg(feature = "native")]
pub fn new_converter(config: RenderConfig) -> Result<Converter<native::NativeEngine>> {
    Converter::with_engine(config, native::NativeEngine)
}
