//! Typed settings and their string-keyed engine form

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::RenderConfig;

/// One setting value, tagged by kind.
///
/// The engine accepts every setting as a string; the tag decides both the
/// string form and which values mean "leave the engine default alone".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingValue<'a> {
    Bool(bool),
    Uint(u64),
    Float(f64),
    Text(&'a str),
}

impl SettingValue<'_> {
    /// True when the value is the field's zero value and must be omitted
    pub fn is_default(&self) -> bool {
        match *self {
            SettingValue::Bool(value) => !value,
            SettingValue::Uint(value) => value == 0,
            SettingValue::Float(value) => value == 0.0,
            SettingValue::Text(value) => value.is_empty(),
        }
    }

    /// The string form handed to the engine
    pub fn render(&self) -> String {
        match *self {
            SettingValue::Bool(value) => value.to_string(),
            SettingValue::Uint(value) => value.to_string(),
            SettingValue::Float(value) => value.to_string(),
            SettingValue::Text(value) => value.to_string(),
        }
    }
}

/// The full key list in declared order. The engine does not care about
/// ordering, but failure reporting and tests do.
pub(crate) fn setting_specs(config: &RenderConfig) -> [(&'static str, SettingValue<'_>); 21] {
    [
        // web settings
        ("web.background", SettingValue::Bool(config.background)),
        ("web.loadImages", SettingValue::Bool(config.load_images)),
        (
            "web.enableJavascript",
            SettingValue::Bool(config.enable_javascript),
        ),
        (
            "web.minimumFontSize",
            SettingValue::Uint(config.minimum_font_size),
        ),
        (
            "web.userStyleSheet",
            SettingValue::Text(&config.user_style_sheet),
        ),
        // image settings
        ("crop.left", SettingValue::Uint(config.crop_left)),
        ("crop.top", SettingValue::Uint(config.crop_top)),
        ("crop.width", SettingValue::Uint(config.crop_width)),
        ("crop.height", SettingValue::Uint(config.crop_height)),
        ("transparent", SettingValue::Bool(config.transparent)),
        ("screenWidth", SettingValue::Uint(config.screen_width)),
        ("smartWidth", SettingValue::Uint(config.smart_width)),
        ("fmt", SettingValue::Text(&config.format)),
        ("quality", SettingValue::Uint(config.quality)),
        // load settings
        ("load.username", SettingValue::Text(&config.username)),
        ("load.password", SettingValue::Text(&config.password)),
        ("load.zoomFactor", SettingValue::Float(config.zoom_factor)),
        (
            "load.blockLocalFileAccess",
            SettingValue::Bool(config.block_local_file_access),
        ),
        (
            "load.stopSlowScript",
            SettingValue::Bool(config.stop_slow_script),
        ),
        (
            "load.loadErrorHandling",
            SettingValue::Text(&config.load_error_handling),
        ),
        ("load.proxy", SettingValue::Text(&config.proxy)),
    ]
}

/// Apply every non-default field of `config` to the settings handle, in
/// declared order, stopping at the first value the engine refuses.
pub(crate) fn apply_config<E: Engine>(
    engine: &E,
    settings: &mut E::Settings,
    config: &RenderConfig,
) -> Result<()> {
    for (key, value) in setting_specs(config) {
        if value.is_default() {
            continue;
        }
        let rendered = value.render();
        if let Err(code) = engine.apply_setting(settings, key, &rendered) {
            return Err(Error::SettingRejected {
                key,
                value: rendered,
                code,
            });
        }
    }
    Ok(())
}
