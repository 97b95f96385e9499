//! Configuration loading from buttons.toml

use std::path::{Path, PathBuf};

use buttonkit_ui::{Color, IconError, InputEvent, Key, Point};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Icon '{path}': {source}")]
    Icon {
        path: PathBuf,
        #[source]
        source: IconError,
    },
    #[error("Bad script step '{step}': {reason}")]
    Script { step: String, reason: String },
}

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub buttons: Vec<ButtonConfig>,
    /// Directory icon paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Output options for the render command
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Empty space around each button in pixels
    #[serde(default = "default_margin")]
    pub margin: f32,
    /// Canvas color behind the button
    #[serde(default = "default_canvas")]
    pub background: Color,
    /// Display scale factor applied to icons
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            background: default_canvas(),
            scale: default_scale(),
        }
    }
}

fn default_margin() -> f32 {
    8.0
}

fn default_canvas() -> Color {
    Color::rgb(0xF0, 0xF0, 0xF0)
}

fn default_scale() -> f32 {
    1.0
}

/// Button configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ButtonConfig {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_button_style")]
    pub style: String,
    #[serde(rename = "type", default = "default_button_type")]
    pub button_type: String,
    /// Icon shown while hovered or selected
    pub icon: Option<String>,
    /// Icon shown otherwise
    pub icon_inactive: Option<String>,
    /// Logical icon size in pixels (default: image size)
    pub icon_size: Option<u32>,
    /// [horizontal, vertical], overrides the type preset
    pub padding: Option<[f32; 2]>,
    /// [width, height], overrides the type preset
    pub min_size: Option<[f32; 2]>,
    /// Fixed [width, height] instead of the measured size
    pub size: Option<[f32; 2]>,
    pub corner_radius: Option<f32>,
    pub border_width: Option<f32>,
    #[serde(default = "default_true")]
    pub center: bool,
    #[serde(default)]
    pub checked: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub selected: bool,
    pub text_color: Option<Color>,
    pub background: Option<Color>,
    pub border_color: Option<Color>,
    /// Input steps for the replay command
    #[serde(default)]
    pub script: Vec<String>,
}

fn default_button_style() -> String {
    "Regular".to_string()
}

fn default_button_type() -> String {
    "Default".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::from_toml_str(&content, base_dir)
    }

    pub fn from_toml_str(content: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.base_dir = base_dir.into();
        log::info!(
            "Loaded {} button(s) from config (base dir {:?})",
            config.buttons.len(),
            config.base_dir
        );
        Ok(config)
    }

    /// Resolve a path from the config relative to the config file
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Parse one script step such as `press 10 12`, `key-down space` or `capture-lost`
pub fn parse_step(step: &str) -> Result<InputEvent, ConfigError> {
    let bad = |reason: &str| ConfigError::Script {
        step: step.to_string(),
        reason: reason.to_string(),
    };
    let mut parts = step.split_whitespace();
    let verb = parts.next().ok_or_else(|| bad("empty step"))?.to_lowercase();
    let args: Vec<&str> = parts.collect();

    let point = |args: &[&str]| -> Result<Point, ConfigError> {
        match args {
            [x, y] => {
                let x = x.parse::<f32>().map_err(|_| bad("x is not a number"))?;
                let y = y.parse::<f32>().map_err(|_| bad("y is not a number"))?;
                Ok(Point::new(x, y))
            }
            _ => Err(bad("expected two coordinates")),
        }
    };
    let key = |args: &[&str]| -> Result<Key, ConfigError> {
        match args {
            [name] => Key::from_name(name).ok_or_else(|| bad("unknown key")),
            _ => Err(bad("expected one key name")),
        }
    };
    let no_args = |event: InputEvent| -> Result<InputEvent, ConfigError> {
        if args.is_empty() {
            Ok(event)
        } else {
            Err(bad("takes no arguments"))
        }
    };

    match verb.as_str() {
        "press" => Ok(InputEvent::PointerPress(point(&args[..])?)),
        "release" => Ok(InputEvent::PointerRelease(point(&args[..])?)),
        "move" => Ok(InputEvent::PointerMove(point(&args[..])?)),
        "key-down" => Ok(InputEvent::KeyDown(key(&args[..])?)),
        "key-up" => Ok(InputEvent::KeyUp(key(&args[..])?)),
        "enter" => no_args(InputEvent::PointerEnter),
        "leave" => no_args(InputEvent::PointerLeave),
        "capture-lost" => no_args(InputEvent::CaptureLost),
        "focus" => no_args(InputEvent::FocusGained),
        "blur" => no_args(InputEvent::FocusLost),
        _ => Err(bad("unknown step")),
    }
}
