//! Named style and type presets for buttons
//!
//! A style picks the colors, a type picks the metrics (font size, padding,
//! minimum and pinned size, corner radius, border width). Both live in a
//! registry built once.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use crate::color::{Color, StateColor};
use crate::geometry::Size;
use crate::state::InteractionState;

/// Color preset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum StyleName {
    #[default]
    Regular,
    Confirm,
    Alert,
    Disabled,
}

impl StyleName {
    pub const ALL: [StyleName; 4] = [Self::Regular, Self::Confirm, Self::Alert, Self::Disabled];

    /// Parse a style name, falling back to `Regular` for anything unknown
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "regular" | "" => Self::Regular,
            "confirm" => Self::Confirm,
            "alert" => Self::Alert,
            "disabled" => Self::Disabled,
            _ => {
                log::warn!("Unknown button style '{}', defaulting to Regular", s);
                Self::Regular
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "Regular",
            Self::Confirm => "Confirm",
            Self::Alert => "Alert",
            Self::Disabled => "Disabled",
        }
    }
}

/// Metrics preset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ButtonType {
    Compact,
    Window,
    Choice,
    Parameter,
    #[default]
    Default,
}

impl ButtonType {
    pub const ALL: [ButtonType; 5] = [
        Self::Compact,
        Self::Window,
        Self::Choice,
        Self::Parameter,
        Self::Default,
    ];

    /// Parse a type name, falling back to `Default` for anything unknown
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "compact" => Self::Compact,
            "window" => Self::Window,
            "choice" => Self::Choice,
            "parameter" => Self::Parameter,
            "default" | "" => Self::Default,
            _ => {
                log::warn!("Unknown button type '{}', defaulting to Default", s);
                Self::Default
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compact => "Compact",
            Self::Window => "Window",
            Self::Choice => "Choice",
            Self::Parameter => "Parameter",
            Self::Default => "Default",
        }
    }
}

/// The nine colors every style provides
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StylePalette {
    pub background_disabled: Color,
    pub background_pressed: Color,
    pub background_hovered: Color,
    pub background_normal: Color,
    pub background_enabled: Color,
    pub foreground_disabled: Color,
    pub foreground_normal: Color,
    pub foreground_hovered: Color,
    /// Brighter border while hovered, to highlight focus
    pub border_hovered: Color,
}

impl StylePalette {
    /// Build from `[bg disabled, bg pressed, bg hovered, bg normal, bg enabled,
    /// fg disabled, fg normal, fg hovered, border hovered]`
    const fn from_table(t: [u32; 9]) -> Self {
        Self {
            background_disabled: Color::from_u32(t[0]),
            background_pressed: Color::from_u32(t[1]),
            background_hovered: Color::from_u32(t[2]),
            background_normal: Color::from_u32(t[3]),
            background_enabled: Color::from_u32(t[4]),
            foreground_disabled: Color::from_u32(t[5]),
            foreground_normal: Color::from_u32(t[6]),
            foreground_hovered: Color::from_u32(t[7]),
            border_hovered: Color::from_u32(t[8]),
        }
    }

    /// Background mapping, in priority order disabled > pressed > hovered > normal > enabled
    pub fn background(&self) -> StateColor {
        StateColor::new([
            (self.background_disabled, InteractionState::DISABLED),
            (self.background_pressed, InteractionState::PRESSED),
            (self.background_hovered, InteractionState::HOVERED),
            (self.background_normal, InteractionState::NORMAL),
            (self.background_enabled, InteractionState::ENABLED),
        ])
    }

    /// Border mapping: like the background but with its own hover color
    pub fn border(&self) -> StateColor {
        StateColor::new([
            (self.background_disabled, InteractionState::DISABLED),
            (self.background_pressed, InteractionState::PRESSED),
            (self.border_hovered, InteractionState::HOVERED),
            (self.background_normal, InteractionState::NORMAL),
        ])
    }

    pub fn foreground(&self) -> StateColor {
        StateColor::new([
            (self.foreground_disabled, InteractionState::DISABLED),
            (self.foreground_hovered, InteractionState::HOVERED),
            (self.foreground_normal, InteractionState::NORMAL),
        ])
    }
}

/// Layout metrics fixed by a button type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeMetrics {
    pub font_size: f32,
    /// [horizontal, vertical] padding on each side
    pub padding: [f32; 2],
    /// [width, height]; zero means unconstrained
    pub min_size: [f32; 2],
    /// [width, height] the button is pinned to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 2]>,
    pub corner_radius: f32,
    pub border_width: f32,
}

impl TypeMetrics {
    pub fn padding_size(&self) -> Size {
        Size::from_array(self.padding)
    }

    pub fn min_size(&self) -> Size {
        Size::from_array(self.min_size)
    }

    pub fn fixed_size(&self) -> Option<Size> {
        self.size.map(Size::from_array)
    }
}

/// Registry of the built-in styles and types
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    styles: HashMap<StyleName, StylePalette>,
    types: HashMap<ButtonType, TypeMetrics>,
}

const REGULAR: [u32; 9] = [
    0xDFDFDF, 0xDFDFDF, 0xD4D4D4, 0xDFDFDF, 0xDFDFDF, 0x6B6A6A, 0x262E30, 0x262E30, 0x009688,
];
const CONFIRM: [u32; 9] = [
    0xDFDFDF, 0x009688, 0x26A69A, 0x009688, 0x009688, 0x6B6A6A, 0xFEFEFE, 0x262E30, 0x3EE0D8,
];
const ALERT: [u32; 9] = [
    0xDFDFDF, 0xDFDFDF, 0xCD1F00, 0xDFDFDF, 0xDFDFDF, 0x6B6A6A, 0xCD1F00, 0xFFFFFD, 0xF43200,
];
const DISABLED: [u32; 9] = [
    0xDFDFDF, 0xDFDFDF, 0xDFDFDF, 0xDFDFDF, 0xDFDFDF, 0x6B6A6A, 0x6B6A6A, 0x262E30, 0xDFDFDF,
];

/// Padding a button keeps when its type does not set one
pub const DEFAULT_PADDING: [f32; 2] = [10.0, 8.0];

impl StyleRegistry {
    /// The shared registry, constructed on first use
    pub fn builtin() -> &'static StyleRegistry {
        static REGISTRY: OnceLock<StyleRegistry> = OnceLock::new();
        REGISTRY.get_or_init(StyleRegistry::new)
    }

    fn new() -> Self {
        let styles = HashMap::from([
            (StyleName::Regular, StylePalette::from_table(REGULAR)),
            (StyleName::Confirm, StylePalette::from_table(CONFIRM)),
            (StyleName::Alert, StylePalette::from_table(ALERT)),
            (StyleName::Disabled, StylePalette::from_table(DISABLED)),
        ]);

        let metrics = |font_size: f32,
                       padding: [f32; 2],
                       min_size: [f32; 2],
                       size: Option<[f32; 2]>,
                       corner_radius: f32| TypeMetrics {
            font_size,
            padding,
            min_size,
            size,
            corner_radius,
            border_width: 1.0,
        };
        let types = HashMap::from([
            (
                ButtonType::Compact,
                metrics(10.0, [8.0, 3.0], [0.0, 0.0], None, 8.0),
            ),
            (
                ButtonType::Window,
                metrics(12.0, DEFAULT_PADDING, [58.0, 24.0], Some([58.0, 24.0]), 12.0),
            ),
            (
                ButtonType::Choice,
                metrics(14.0, [12.0, 8.0], [100.0, 32.0], None, 4.0),
            ),
            (
                ButtonType::Parameter,
                metrics(14.0, DEFAULT_PADDING, [120.0, 26.0], Some([120.0, 26.0]), 4.0),
            ),
            (
                ButtonType::Default,
                metrics(14.0, DEFAULT_PADDING, [0.0, 0.0], None, 4.0),
            ),
        ]);

        Self { styles, types }
    }

    pub fn palette(&self, style: StyleName) -> &StylePalette {
        // Every StyleName is registered in new()
        &self.styles[&style]
    }

    pub fn metrics(&self, ty: ButtonType) -> &TypeMetrics {
        &self.types[&ty]
    }

    /// Look up presets by name with the usual fallbacks
    pub fn resolve(&self, style: &str, ty: &str) -> (&StylePalette, &TypeMetrics) {
        (
            self.palette(StyleName::from_name(style)),
            self.metrics(ButtonType::from_name(ty)),
        )
    }
}
