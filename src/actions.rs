//! Business logic - what each command does with the configured buttons

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use buttonkit_ui::{
    Button, ButtonEvent, ButtonType, InputEvent, Point, RasterSurface, StyleName, StylePalette,
    StyleRegistry, SurfaceError, TypeMetrics, Widget,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{parse_step, Config, ConfigError};
use crate::ui::{create_button, create_buttons_from_config};

#[derive(Error, Debug)]
pub enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to save '{path}': {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: SurfaceError,
    },
    #[error("Failed to serialize styles: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Interaction states rendered by the `render` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Normal,
    Hovered,
    Pressed,
    Disabled,
    Checked,
}

impl RenderState {
    pub const ALL: [RenderState; 5] = [
        Self::Normal,
        Self::Hovered,
        Self::Pressed,
        Self::Disabled,
        Self::Checked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hovered => "hovered",
            Self::Pressed => "pressed",
            Self::Disabled => "disabled",
            Self::Checked => "checked",
        }
    }

    /// Drive `button` into this state the way a host would
    pub fn apply(&self, button: &mut Button) {
        match self {
            Self::Normal => {}
            Self::Hovered => {
                button.handle_event(&InputEvent::PointerEnter);
            }
            Self::Pressed => {
                button.handle_event(&InputEvent::PointerEnter);
                button.handle_event(&InputEvent::PointerPress(button.bounds().center()));
            }
            Self::Disabled => {
                button.enable(false);
            }
            Self::Checked => {
                button.set_value(true);
            }
        }
        button.take_events();
    }
}

/// Render every configured button in every state to `<out>/<id>-<state>.png`.
///
/// Returns the written paths.
pub fn cmd_render(config: &Config, out: &Path) -> Result<Vec<PathBuf>, ActionError> {
    let margin = config.render.margin.max(0.0);
    let mut surface = RasterSurface::new(1, 1);
    let mut written = Vec::new();

    let buttons = create_buttons_from_config(config)?;
    for (cfg, base) in config.buttons.iter().zip(buttons) {
        for state in RenderState::ALL {
            let mut button = base.clone();
            button.measure(&mut surface);
            button.set_position(Point::new(margin, margin));
            state.apply(&mut button);

            let size = button.size();
            surface.resize(
                (size.width + margin * 2.0).ceil() as u32,
                (size.height + margin * 2.0).ceil() as u32,
            );
            surface.clear(config.render.background);
            button.render(&mut surface);

            let path = out.join(format!("{}-{}.png", cfg.id, state.as_str()));
            surface.save_png(&path).map_err(|source| ActionError::Save {
                path: path.clone(),
                source,
            })?;
            log::info!("Rendered {} ({}x{})", path.display(), size.width, size.height);
            written.push(path);
        }
    }

    Ok(written)
}

/// Feed each button's script through it and report what the host would see
pub fn cmd_replay(config: &Config) -> Result<Vec<String>, ActionError> {
    let mut surface = RasterSurface::new(1, 1);
    let mut lines = Vec::new();

    for cfg in &config.buttons {
        if cfg.script.is_empty() {
            continue;
        }
        let mut button = create_button(config, cfg)?;
        button.measure(&mut surface);
        let bounds = button.bounds();
        lines.push(format!(
            "[{}] bounds {},{} {}x{}",
            cfg.id, bounds.x, bounds.y, bounds.width, bounds.height
        ));

        for step in &cfg.script {
            let event = parse_step(step)?;
            let response = button.handle_event(&event);
            let mut line = format!("  {:<16} ->", step.trim());
            if response.consumed {
                line.push_str(" consumed");
            }
            if let Some(capture) = response.capture {
                line.push_str(&format!(" capture={:?}", capture));
            }
            for event in button.take_events() {
                match event {
                    ButtonEvent::Activated(_) => {
                        log::info!("Action: '{}' activated", cfg.id);
                        line.push_str(" ACTIVATED");
                    }
                    ButtonEvent::EnabledChanged { enabled, .. } => {
                        line.push_str(&format!(" enabled={}", enabled));
                    }
                }
            }
            line.push_str(&format!(" [{:?}]", button.states()));
            lines.push(line);
        }
    }

    Ok(lines)
}

#[derive(Serialize)]
struct StylesDump<'a> {
    styles: BTreeMap<&'static str, &'a StylePalette>,
    types: BTreeMap<&'static str, &'a TypeMetrics>,
}

/// Dump the built-in style and type presets as TOML
pub fn cmd_styles() -> Result<String, ActionError> {
    let registry = StyleRegistry::builtin();
    let dump = StylesDump {
        styles: StyleName::ALL
            .iter()
            .map(|&name| (name.as_str(), registry.palette(name)))
            .collect(),
        types: ButtonType::ALL
            .iter()
            .map(|&ty| (ty.as_str(), registry.metrics(ty)))
            .collect(),
    };
    Ok(toml::to_string_pretty(&dump)?)
}
