//! Native backend bound to libwkhtmltox
//!
//! Everything in this module talks to the engine through the raw C
//! interface declared in `sys`. The engine is initialized at most once per
//! process and handles are never shared between sessions, which keeps the
//! unsafe blocks small and their preconditions local.

use std::ffi::{CStr, CString};
use std::os::raw::c_uchar;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use log::debug;

use crate::engine::Engine;

mod sys {
    //! Raw declarations from wkhtmltox/image.h

    #![allow(non_camel_case_types)]

    use std::os::raw::{c_char, c_int, c_long, c_uchar};

    #[repr(C)]
    pub struct wkhtmltoimage_global_settings {
        _private: [u8; 0],
    }

    #[repr(C)]
    pub struct wkhtmltoimage_converter {
        _private: [u8; 0],
    }

    #[link(name = "wkhtmltox")]
    extern "C" {
        pub fn wkhtmltoimage_init(use_graphics: c_int) -> c_int;
        pub fn wkhtmltoimage_deinit() -> c_int;
        pub fn wkhtmltoimage_version() -> *const c_char;
        pub fn wkhtmltoimage_create_global_settings() -> *mut wkhtmltoimage_global_settings;
        pub fn wkhtmltoimage_set_global_setting(
            settings: *mut wkhtmltoimage_global_settings,
            name: *const c_char,
            value: *const c_char,
        ) -> c_int;
        pub fn wkhtmltoimage_create_converter(
            settings: *mut wkhtmltoimage_global_settings,
            data: *const c_char,
        ) -> *mut wkhtmltoimage_converter;
        pub fn wkhtmltoimage_destroy_converter(converter: *mut wkhtmltoimage_converter);
        pub fn wkhtmltoimage_convert(converter: *mut wkhtmltoimage_converter) -> c_int;
        pub fn wkhtmltoimage_get_output(
            converter: *mut wkhtmltoimage_converter,
            data: *mut *const c_uchar,
        ) -> c_long;
    }
}

/// Settings handle backed by a live `wkhtmltoimage_global_settings`
pub struct NativeSettings {
    raw: NonNull<sys::wkhtmltoimage_global_settings>,
}

/// Converter handle backed by a live `wkhtmltoimage_converter`.
///
/// Keeps the input buffer alive alongside the raw handle because the
/// engine reads it during `convert`, not at construction time.
pub struct NativeConverter {
    raw: NonNull<sys::wkhtmltoimage_converter>,
    _input: CString,
}

/// Backend that performs real conversions through libwkhtmltox.
///
/// Hand one to [`Converter::with_engine`](crate::Converter::with_engine)
/// or use [`new_converter`](crate::new_converter). Requires the wkhtmltox
/// shared library at link and load time.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

static INIT: Once = Once::new();
static INIT_OK: AtomicBool = AtomicBool::new(false);

impl Engine for NativeEngine {
    type Settings = NativeSettings;
    type Converter = NativeConverter;

    fn ensure_initialized(&self) -> bool {
        INIT.call_once(|| {
            // 0: run without the separate graphics system
            let ok = unsafe { sys::wkhtmltoimage_init(0) } == 1;
            INIT_OK.store(ok, Ordering::SeqCst);
            if ok {
                debug!("initialized wkhtmltox {}", self.version());
            }
        });
        INIT_OK.load(Ordering::SeqCst)
    }

    fn version(&self) -> String {
        // SAFETY: the engine hands back a pointer to a static string.
        let raw = unsafe { sys::wkhtmltoimage_version() };
        if raw.is_null() {
            return String::new();
        }
        unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned()
    }

    fn create_settings(&self) -> Option<NativeSettings> {
        // SAFETY: no preconditions; a null return means the engine refused.
        let raw = unsafe { sys::wkhtmltoimage_create_global_settings() };
        NonNull::new(raw).map(|raw| NativeSettings { raw })
    }

    fn apply_setting(
        &self,
        settings: &mut NativeSettings,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), i32> {
        // An interior NUL can never reach the engine; report it as code 0,
        // which is never a success code.
        let name = CString::new(key).map_err(|_| 0)?;
        let value = CString::new(value).map_err(|_| 0)?;

        // SAFETY: the handle is live and both strings outlive the call.
        let code = unsafe {
            sys::wkhtmltoimage_set_global_setting(
                settings.raw.as_ptr(),
                name.as_ptr(),
                value.as_ptr(),
            )
        };
        if code == 1 {
            Ok(())
        } else {
            Err(code)
        }
    }

    fn create_converter(
        &self,
        settings: NativeSettings,
        input: &str,
    ) -> std::result::Result<NativeConverter, NativeSettings> {
        let data = match CString::new(input) {
            Ok(data) => data,
            Err(_) => return Err(settings),
        };

        // SAFETY: the settings handle is live and the input buffer is kept
        // alive inside the returned wrapper. On success the engine owns the
        // settings through the converter.
        let raw = unsafe {
            sys::wkhtmltoimage_create_converter(settings.raw.as_ptr(), data.as_ptr())
        };
        match NonNull::new(raw) {
            Some(raw) => Ok(NativeConverter { raw, _input: data }),
            None => Err(settings),
        }
    }

    fn convert(&self, converter: &mut NativeConverter) -> bool {
        // SAFETY: the handle is live. Blocks until the engine finishes.
        unsafe { sys::wkhtmltoimage_convert(converter.raw.as_ptr()) == 1 }
    }

    fn output(&self, converter: &mut NativeConverter) -> Vec<u8> {
        let mut data: *const c_uchar = std::ptr::null();
        // SAFETY: the engine owns the buffer `data` ends up pointing into;
        // it stays valid until the converter is destroyed, so the bytes are
        // copied out before this function returns.
        let size = unsafe { sys::wkhtmltoimage_get_output(converter.raw.as_ptr(), &mut data) };
        if size <= 0 || data.is_null() {
            return Vec::new();
        }
        unsafe { std::slice::from_raw_parts(data, size as usize) }.to_vec()
    }

    fn destroy_converter(&self, converter: NativeConverter) {
        // SAFETY: the handle is live and this is its only release point.
        unsafe { sys::wkhtmltoimage_destroy_converter(converter.raw.as_ptr()) };
    }

    fn release_settings(&self, settings: NativeSettings) {
        // The C interface has no destructor for a settings object that never
        // reached a converter; dropping the wrapper forgets the pointer
        // without touching engine memory.
        drop(settings);
    }
}

/// Tear the engine down and release everything it holds.
///
/// Nothing may convert after this returns, and initialization cannot be
/// repeated within the same process.
pub fn shutdown() {
    if INIT_OK.swap(false, Ordering::SeqCst) {
        // SAFETY: the engine was initialized and no conversions are
        // permitted past this point.
        unsafe { sys::wkhtmltoimage_deinit() };
    }
}
