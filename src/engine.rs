//! Backend abstraction over the rendering engine
//!
//! The conversion layer never touches engine handles directly; everything
//! goes through this trait so the same lifecycle code drives both the
//! native library and the in-memory test double.

/// Handle-level operations a rendering backend must provide.
///
/// The associated types stand in for the backend's opaque settings and
/// converter handles. A real backend wraps foreign pointers; the
/// [`StubEngine`](crate::stub::StubEngine) double keeps everything in
/// memory so lifecycle and failure paths can be exercised without the
/// native library present.
pub trait Engine {
    /// Opaque settings handle
    type Settings;
    /// Opaque converter handle
    type Converter;

    /// Bring the backend up, once per process. Later calls are no-ops and
    /// report the outcome of the first. Returns false when the backend
    /// cannot be initialized.
    fn ensure_initialized(&self) -> bool;

    /// Version string reported by the backend
    fn version(&self) -> String;

    /// Allocate a fresh settings handle, or `None` when the backend
    /// refuses to hand one out
    fn create_settings(&self) -> Option<Self::Settings>;

    /// Apply one string-keyed setting. `Err` carries the backend's
    /// non-success return code.
    fn apply_setting(
        &self,
        settings: &mut Self::Settings,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), i32>;

    /// Build a converter bound to the settings handle and the input
    /// document. On success the settings handle belongs to the converter
    /// and is released with it; on failure the handle is given back so the
    /// caller can release it.
    fn create_converter(
        &self,
        settings: Self::Settings,
        input: &str,
    ) -> std::result::Result<Self::Converter, Self::Settings>;

    /// Run the conversion. Blocks until the backend finishes; true on
    /// success.
    fn convert(&self, converter: &mut Self::Converter) -> bool;

    /// Copy the converted bytes out of backend-owned memory. Empty when
    /// the backend produced nothing.
    fn output(&self, converter: &mut Self::Converter) -> Vec<u8>;

    /// Release a converter handle, along with any settings handle attached
    /// at construction time. Must be called exactly once per converter.
    fn destroy_converter(&self, converter: Self::Converter);

    /// Release a settings handle that never made it into a converter
    fn release_settings(&self, settings: Self::Settings);
}
