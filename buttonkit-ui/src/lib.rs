//! # buttonkit-ui
//!
//! A custom-drawn button widget that does not depend on any GUI toolkit.
//!
//! ## Features
//! - State-dependent colors (normal, hovered, pressed, disabled, checked)
//! - Active and inactive icons, rescaled for the display scale factor
//! - Named style (colors) and type (metrics) presets
//! - Content measurement with padding and minimum size
//! - Press/release/capture handling that yields a single activation event
//! - Keyboard activation with Space and Enter
//! - A CPU raster surface for rendering into RGBA images
//!
//! ## Example
//!
//! ```no_run
//! use buttonkit_ui::{Button, ButtonEvent, ButtonId, InputEvent, Point, RasterSurface, Widget};
//!
//! let mut surface = RasterSurface::new(120, 40);
//! let mut button = Button::new(ButtonId::new(1), "Print").with_style("Confirm", "Window");
//! button.measure(&mut surface);
//! button.render(&mut surface);
//!
//! button.handle_event(&InputEvent::PointerPress(Point::new(4.0, 4.0)));
//! button.handle_event(&InputEvent::PointerRelease(Point::new(4.0, 4.0)));
//! assert_eq!(button.take_events(), vec![ButtonEvent::Activated(ButtonId::new(1))]);
//!
//! surface.save_png("print.png").expect("Failed to save");
//! ```

pub mod color;
pub mod elements;
pub mod geometry;
pub mod icon;
pub mod state;
pub mod style;
pub mod surface;

// Colors
pub use color::{Color, ColorParseError, StateColor};

// Geometry
pub use geometry::{Point, Rect, Size};

// Icon helpers
pub use icon::{icon, icon_bytes, Icon, IconError};

// State tracking
pub use state::{InteractionState, StateHandler};

// Presets
pub use style::{ButtonType, StyleName, StylePalette, StyleRegistry, TypeMetrics};

// Surfaces
pub use surface::{ellipsize_end, DrawSurface, Font, FontStyle, RasterSurface, SurfaceError, ELLIPSIS};

// Elements system
pub use elements::{
    Button, ButtonEvent, ButtonId, CaptureRequest, EventResponse, InputEvent, Key, Widget, ICON_GAP,
};
