// SPDX-License-Identifier: MIT

//! Configuration loaded from TOML files in the XDG directories.
//!
//! Order (later overrides earlier):
//! 1. System Data: /usr/share/jacui/config.toml (and XDG_DATA_DIRS)
//! 2. System Config: /etc/xdg/jacui/config.toml (and XDG_CONFIG_DIRS)
//! 3. User Config: ~/.config/jacui/config.toml (XDG_CONFIG_HOME)
//!
//! The present mode can be overridden with the `JACUI_PRESENT_MODE` environment variable.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use xdg::BaseDirectories;

use crate::color::Color;
use crate::error::Error;
use crate::types::Size2d;
use crate::Result;

/// Configuration of a jacui application.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JacuiConfig {
    /// Window settings
    #[serde(default)]
    pub window: WindowConfig,
    /// Rendering settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Settings of the main window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// The window title.
    pub title: String,
    /// Initial width. 0 leaves the width to the platform.
    pub width: u32,
    /// Initial height. 0 leaves the height to the platform.
    pub height: u32,
    /// Whether the user can resize the window.
    pub resizable: bool,
    /// Whether the window has a frame.
    pub decorations: bool,
    /// Whether the window covers the whole screen.
    pub fullscreen: bool,
    /// Whether the mouse cursor is shown over the window.
    pub cursor_visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("jacui"),
            width: 0,
            height: 0,
            resizable: true,
            decorations: true,
            fullscreen: false,
            cursor_visible: true,
        }
    }
}

impl WindowConfig {
    /// The configured size.
    pub fn size(&self) -> Size2d {
        Size2d::new(self.width, self.height)
    }
}

/// How frames are synchronized with the display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum PresentMode {
    /// VSync if available, otherwise whatever the platform offers.
    AutoVsync,
    /// No VSync if available.
    #[default]
    AutoNoVsync,
    /// Classic VSync.
    Fifo,
    /// No synchronization, may tear.
    Immediate,
    /// Low-latency VSync.
    Mailbox,
}

impl FromStr for PresentMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(PresentMode::AutoNoVsync),
            "auto_vsync" | "vsync" => Ok(PresentMode::AutoVsync),
            "fifo" => Ok(PresentMode::Fifo),
            "immediate" => Ok(PresentMode::Immediate),
            "mailbox" => Ok(PresentMode::Mailbox),
            _ => Err(Error::Config(format!("unknown present mode: {}", s))),
        }
    }
}

impl TryFrom<String> for PresentMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame synchronization.
    pub present_mode: PresentMode,
    /// Color the screen is cleared to when the window is created.
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            present_mode: PresentMode::default(),
            background: Color::rgb(0, 0, 0),
        }
    }
}

/// One configuration file. Settings it leaves out keep the value of the earlier layers.
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    #[serde(default)]
    window: WindowLayer,
    #[serde(default)]
    render: RenderLayer,
}

#[derive(Debug, Default, Deserialize)]
struct WindowLayer {
    title: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    resizable: Option<bool>,
    decorations: Option<bool>,
    fullscreen: Option<bool>,
    cursor_visible: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RenderLayer {
    present_mode: Option<PresentMode>,
    background: Option<Color>,
}

impl JacuiConfig {
    /// Parse a configuration file. Settings it leaves out get their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config = Self::default();
        config.merge_toml_str(content)?;
        Ok(config)
    }

    /// Parse a configuration file and override the settings it contains.
    ///
    /// On error the configuration is left unchanged.
    pub fn merge_toml_str(&mut self, content: &str) -> Result<()> {
        let layer: ConfigLayer = toml::from_str(content).map_err(|err| Error::Config(err.to_string()))?;
        self.merge(layer);
        Ok(())
    }

    fn merge(&mut self, other: ConfigLayer) {
        // Window
        let window = other.window;
        if let Some(title) = window.title {
            self.window.title = title;
        }
        if let Some(width) = window.width {
            self.window.width = width;
        }
        if let Some(height) = window.height {
            self.window.height = height;
        }
        if let Some(resizable) = window.resizable {
            self.window.resizable = resizable;
        }
        if let Some(decorations) = window.decorations {
            self.window.decorations = decorations;
        }
        if let Some(fullscreen) = window.fullscreen {
            self.window.fullscreen = fullscreen;
        }
        if let Some(visible) = window.cursor_visible {
            self.window.cursor_visible = visible;
        }

        // Render
        if let Some(mode) = other.render.present_mode {
            self.render.present_mode = mode;
        }
        if let Some(background) = other.render.background {
            self.render.background = background;
        }
    }

    /// Load the configuration from the standard locations, then apply environment overrides.
    ///
    /// Missing files are skipped; files that fail to parse are logged and skipped.
    pub fn load() -> Self {
        let mut config = Self::default();

        match BaseDirectories::with_prefix("jacui") {
            Ok(xdg_dirs) => config.load_files(&xdg_dirs, "config.toml"),
            Err(err) => log::warn!("Cannot locate XDG directories: {}", err),
        }

        config.apply_env();
        config
    }

    fn load_files(&mut self, xdg_dirs: &BaseDirectories, filename: &str) {
        // 1. Load from system data directories
        for path in xdg_dirs.find_data_files(filename).collect::<Vec<_>>().into_iter().rev() {
            self.load_file(&path);
        }

        // 2. Load from system and user config directories
        for path in xdg_dirs.find_config_files(filename).collect::<Vec<_>>().into_iter().rev() {
            self.load_file(&path);
        }
    }

    fn load_file(&mut self, path: &Path) {
        log::debug!("Loading config from: {:?}", path);
        match std::fs::read_to_string(path) {
            Ok(content) => {
                if let Err(err) = self.merge_toml_str(&content) {
                    log::warn!("Failed to parse {:?}: {}", path, err);
                }
            }
            Err(err) => log::warn!("Failed to read {:?}: {}", path, err),
        }
    }

    /// Apply `JACUI_PRESENT_MODE`.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("JACUI_PRESENT_MODE") {
            match val.parse() {
                Ok(mode) => {
                    log::info!("JACUI_PRESENT_MODE={} detected", val);
                    self.render.present_mode = mode;
                }
                Err(_) => log::warn!("Unknown present mode: {}, keeping {:?}", val, self.render.present_mode),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::colors;

    #[test]
    fn test_defaults() {
        let config = JacuiConfig::from_toml_str("").unwrap();
        assert_eq!(config, JacuiConfig::default());
        assert_eq!(config.window.title, "jacui");
        assert!(config.window.resizable);
        assert!(config.window.size().is_empty());
        assert_eq!(config.render.present_mode, PresentMode::AutoNoVsync);
    }

    #[test]
    fn test_parse_sections() {
        let config = JacuiConfig::from_toml_str(
            r##"
            [window]
            title = "viewer"
            width = 640
            height = 480
            decorations = false

            [render]
            present_mode = "vsync"
            background = "#ff0000"
            "##,
        )
        .unwrap();

        assert_eq!(config.window.title, "viewer");
        assert_eq!(config.window.size(), Size2d::new(640, 480));
        assert!(!config.window.decorations);
        assert!(config.window.cursor_visible);
        assert_eq!(config.render.present_mode, PresentMode::AutoVsync);
        assert_eq!(config.render.background, colors::RED);
    }

    #[test]
    fn test_invalid_values() {
        let err = JacuiConfig::from_toml_str("[render]\npresent_mode = \"sometimes\"").unwrap_err();
        assert!(err.to_string().contains("unknown present mode"));

        assert!(JacuiConfig::from_toml_str("[render]\nbackground = \"chartreuse-ish\"").is_err());
        assert!(JacuiConfig::from_toml_str("[window]\nwidth = -1").is_err());
    }

    #[test]
    fn test_layers_merge() {
        let mut config = JacuiConfig::default();
        config
            .merge_toml_str("[render]\npresent_mode = \"mailbox\"\nbackground = \"navy\"")
            .unwrap();
        config.merge_toml_str("[window]\ntitle = \"mine\"").unwrap();

        assert_eq!(config.window.title, "mine");
        assert_eq!(config.render.present_mode, PresentMode::Mailbox);
        assert_eq!(config.render.background, colors::NAVY);

        config.merge_toml_str("[render]\npresent_mode = \"fifo\"").unwrap();
        assert_eq!(config.render.present_mode, PresentMode::Fifo);
        assert_eq!(config.render.background, colors::NAVY);
        assert_eq!(config.window.title, "mine");
    }

    #[test]
    fn test_bad_layer_keeps_config() {
        let mut config = JacuiConfig::from_toml_str("[window]\nwidth = 320").unwrap();
        assert!(config.merge_toml_str("[window]\nwidth = 640\nheight = \"tall\"").is_err());
        assert_eq!(config.window.size(), Size2d::new(320, 0));
    }

    #[test]
    fn test_load_file_layers() {
        let dir = std::env::temp_dir().join(format!("jacui-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let system = dir.join("system.toml");
        let user = dir.join("user.toml");
        std::fs::write(&system, "[render]\npresent_mode = \"mailbox\"\n").unwrap();
        std::fs::write(&user, "[window]\ntitle = \"mine\"\n").unwrap();

        let mut config = JacuiConfig::default();
        config.load_file(&system);
        config.load_file(&user);
        config.load_file(&dir.join("missing.toml"));
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.window.title, "mine");
        assert_eq!(config.render.present_mode, PresentMode::Mailbox);
    }

    #[test]
    fn test_present_mode_names() {
        assert_eq!("Mailbox".parse::<PresentMode>().unwrap(), PresentMode::Mailbox);
        assert_eq!("auto".parse::<PresentMode>().unwrap(), PresentMode::AutoNoVsync);
        assert_eq!("fifo".parse::<PresentMode>().unwrap(), PresentMode::Fifo);
        assert!("".parse::<PresentMode>().is_err());
    }
}
