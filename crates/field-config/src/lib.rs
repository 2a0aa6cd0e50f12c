//! Editor configuration: constructor-time settings and `codefield.toml`
//! loading.
//!
//! The configuration is immutable once the control is constructed. Every
//! field has a default matching the original control, so `EditorConfig::default()`
//! is a fully usable setup. An optional TOML file can override any subset of
//! fields; unknown fields are ignored and a parse error falls back to
//! defaults so a broken config never prevents the control from coming up.

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::info;

/// Table translating an unshifted key label to its shifted character, for
/// keyboard layouts the host toolkit does not model. Each control constructs
/// its own copy; the default table is never shared between instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftMap {
    entries: HashMap<String, String>,
}

impl ShiftMap {
    /// The UK physical layout table: top-row digits plus common punctuation.
    pub fn uk_default() -> Self {
        let pairs = [
            ("1", "!"),
            ("2", "\""),
            ("3", "£"),
            ("4", "$"),
            ("5", "%"),
            ("6", "^"),
            ("7", "&"),
            ("8", "*"),
            ("9", "("),
            ("0", ")"),
            ("-", "_"),
            ("=", "+"),
            ("[", "{"),
            ("]", "}"),
            (";", ":"),
            ("'", "@"),
            ("#", "~"),
            (",", "<"),
            (".", ">"),
            ("/", "?"),
            ("`", "¬"),
            ("\\", "|"),
        ];
        Self::from_pairs(pairs.iter().map(|&(k, v)| (k.to_string(), v.to_string())))
    }

    /// Build a map from explicit pairs; later duplicates of a key replace
    /// earlier ones (keys stay unique).
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Shifted form of a key label, if the table has one.
    pub fn shifted(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ShiftMap {
    fn default() -> Self {
        Self::uk_default()
    }
}

/// Settings the control reads for its whole lifetime. Supplied at
/// construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Initial buffer contents.
    pub text: String,
    /// Highlight theme identifier understood by the rendering primitive.
    pub code_theme: String,
    pub show_language_text: bool,
    pub language_text_color: String,
    pub show_line_numbers: bool,
    pub line_number_text_color: String,
    /// Gate for Ctrl+V clipboard insertion.
    pub allow_pasting: bool,
    pub show_focus_border: bool,
    pub focus_border_color: String,
    /// Spaces inserted per Tab press.
    pub tab_spacing: usize,
    pub font_size: u16,
    pub font: String,
    pub letter_spacing: f32,
    /// Language identifier used for the fence tag and (uppercased) the label.
    pub language: String,
    pub shift_map: ShiftMap,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            text: "print('hello world')".to_string(),
            code_theme: "obsidian".to_string(),
            show_language_text: true,
            language_text_color: "grey".to_string(),
            show_line_numbers: true,
            line_number_text_color: "white".to_string(),
            allow_pasting: true,
            show_focus_border: true,
            focus_border_color: "blue400".to_string(),
            tab_spacing: 4,
            font_size: 10,
            font: "Roboto Mono".to_string(),
            letter_spacing: 0.0,
            language: "python".to_string(),
            shift_map: ShiftMap::uk_default(),
        }
    }
}

/// On-disk representation. Every field optional; omitted fields keep the
/// control's defaults, unknown fields are ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    pub text: Option<String>,
    pub code_theme: Option<String>,
    pub show_language_text: Option<bool>,
    pub language_text_color: Option<String>,
    pub show_line_numbers: Option<bool>,
    pub line_number_text_color: Option<String>,
    pub allow_pasting: Option<bool>,
    pub show_focus_border: Option<bool>,
    pub focus_border_color: Option<String>,
    pub tab_spacing: Option<usize>,
    pub font_size: Option<u16>,
    pub font: Option<String>,
    pub letter_spacing: Option<f32>,
    pub language: Option<String>,
    /// Full replacement for the shift table, e.g. `shift_map = { "1" = "!" }`.
    pub shift_map: Option<HashMap<String, String>>,
}

impl ConfigFile {
    /// Merge the file over the built-in defaults.
    pub fn into_config(self) -> EditorConfig {
        let mut cfg = EditorConfig::default();
        if let Some(v) = self.text {
            cfg.text = v;
        }
        if let Some(v) = self.code_theme {
            cfg.code_theme = v;
        }
        if let Some(v) = self.show_language_text {
            cfg.show_language_text = v;
        }
        if let Some(v) = self.language_text_color {
            cfg.language_text_color = v;
        }
        if let Some(v) = self.show_line_numbers {
            cfg.show_line_numbers = v;
        }
        if let Some(v) = self.line_number_text_color {
            cfg.line_number_text_color = v;
        }
        if let Some(v) = self.allow_pasting {
            cfg.allow_pasting = v;
        }
        if let Some(v) = self.show_focus_border {
            cfg.show_focus_border = v;
        }
        if let Some(v) = self.focus_border_color {
            cfg.focus_border_color = v;
        }
        if let Some(v) = self.tab_spacing {
            cfg.tab_spacing = v;
        }
        if let Some(v) = self.font_size {
            cfg.font_size = v;
        }
        if let Some(v) = self.font {
            cfg.font = v;
        }
        if let Some(v) = self.letter_spacing {
            cfg.letter_spacing = v;
        }
        if let Some(v) = self.language {
            cfg.language = v;
        }
        if let Some(v) = self.shift_map {
            cfg.shift_map = ShiftMap::from_pairs(v);
        }
        cfg
    }
}

/// Best-effort config path following platform conventions: a local
/// `codefield.toml` wins over the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("codefield.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("codefield").join("codefield.toml");
    }
    PathBuf::from("codefield.toml")
}

/// Load configuration from `path` (or the discovered location). A missing
/// file or a parse error yields the defaults rather than failing startup.
pub fn load_from(path: Option<PathBuf>) -> Result<EditorConfig> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                info!(target: "config", path = %path.display(), "config_loaded");
                Ok(file.into_config())
            }
            Err(_e) => {
                info!(target: "config", path = %path.display(), "config_parse_failed_using_defaults");
                Ok(EditorConfig::default())
            }
        }
    } else {
        Ok(EditorConfig::default())
    }
}
