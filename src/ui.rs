//! UI layer - builds buttons from the scene configuration

use buttonkit_ui::{icon, Button, ButtonId, Icon, Size};

use crate::config::{ButtonConfig, Config, ConfigError};

/// Button identifiers (dynamic based on config)
pub fn button_id_from_string(s: &str) -> ButtonId {
    // Simple hash for string -> u32
    let hash = s.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    ButtonId::new(hash)
}

fn load_icon(config: &Config, path: &str, px: Option<u32>) -> Result<Icon, ConfigError> {
    let path = config.resolve_path(path);
    let loaded = icon(&path).map_err(|source| ConfigError::Icon {
        path: path.clone(),
        source,
    })?;
    log::debug!("Loaded icon {:?}", path);
    Ok(match px {
        Some(px) => loaded.with_px(px),
        None => loaded,
    })
}

/// Create one button. Explicit fields override the style and type presets.
pub fn create_button(config: &Config, cfg: &ButtonConfig) -> Result<Button, ConfigError> {
    let id = button_id_from_string(&cfg.id);
    let mut button = Button::new(id, &cfg.label).with_style(&cfg.style, &cfg.button_type);

    let active = cfg
        .icon
        .as_deref()
        .map(|p| load_icon(config, p, cfg.icon_size))
        .transpose()?;
    let inactive = cfg
        .icon_inactive
        .as_deref()
        .map(|p| load_icon(config, p, cfg.icon_size))
        .transpose()?;
    button.set_icon(active, inactive);

    if let Some([w, h]) = cfg.padding {
        button.set_padding(Size::new(w, h));
    }
    if let Some([w, h]) = cfg.min_size {
        button.set_min_size(Size::new(w, h));
    }
    if let Some(radius) = cfg.corner_radius {
        button.set_corner_radius(radius);
    }
    if let Some(width) = cfg.border_width {
        button.set_border_width(width);
    }
    if let Some(color) = cfg.text_color {
        button.set_text_color(color);
    }
    if let Some(color) = cfg.background {
        button.set_background_color(color);
    }
    if let Some(color) = cfg.border_color {
        button.set_border_color(color);
    }
    if let Some([w, h]) = cfg.size {
        button.set_size(Size::new(w, h));
    }

    button.set_center(cfg.center);
    button.set_selected(cfg.selected);
    button.set_value(cfg.checked);
    button.enable(cfg.enabled);
    if config.render.scale != 1.0 {
        button.rescale(config.render.scale);
    }
    // Construction notifications are not interesting to the host
    button.take_events();

    Ok(button)
}

/// Create buttons from configuration
pub fn create_buttons_from_config(config: &Config) -> Result<Vec<Button>, ConfigError> {
    config
        .buttons
        .iter()
        .map(|cfg| create_button(config, cfg))
        .collect()
}
