//! Elements system for buttonkit-ui
//!
//! Interactive elements are plain structs driven by the host: it forwards
//! input through [`Widget::handle_event`], draws them with
//! [`Widget::render`], and acts on the returned [`EventResponse`].

pub mod button;

pub use button::{Button, ButtonEvent, ButtonId, ICON_GAP};

use crate::geometry::{Point, Rect, Size};
use crate::surface::DrawSurface;

/// Keys a widget may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Enter,
    Tab,
    Left,
    Right,
    Up,
    Down,
    Escape,
    Char(char),
}

impl Key {
    /// Keys the host uses to move focus between widgets
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Key::Tab | Key::Left | Key::Right | Key::Up | Key::Down
        )
    }

    /// Keys that act like a click
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }

    /// Parse a key name (`space`, `enter`/`return`, `tab`, arrows, `esc`, or one char)
    pub fn from_name(s: &str) -> Option<Self> {
        let key = match s.to_lowercase().as_str() {
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "left" => Key::Left,
            "right" => Key::Right,
            "up" => Key::Up,
            "down" => Key::Down,
            "esc" | "escape" => Key::Escape,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

/// Raw input delivered by the host, in host coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerEnter,
    PointerLeave,
    PointerMove(Point),
    PointerPress(Point),
    PointerRelease(Point),
    /// The host took pointer capture away (focus stolen, window hidden, ...)
    CaptureLost,
    KeyDown(Key),
    KeyUp(Key),
    FocusGained,
    FocusLost,
}

/// What the host should do with pointer capture after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRequest {
    Acquire,
    Release,
}

/// Result of handling one input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    /// `false` means the host should keep processing the event (e.g. focus navigation)
    pub consumed: bool,
    pub capture: Option<CaptureRequest>,
}

impl EventResponse {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            capture: None,
        }
    }

    pub fn with_capture(mut self, capture: CaptureRequest) -> Self {
        self.capture = Some(capture);
        self
    }
}

/// Trait for custom-drawn widgets
pub trait Widget {
    /// Compute the best size from the current content
    fn measure(&mut self, surface: &mut dyn DrawSurface) -> Size;

    /// Draw the widget at its bounds
    fn render(&mut self, surface: &mut dyn DrawSurface);

    /// Handle one input event
    fn handle_event(&mut self, event: &InputEvent) -> EventResponse;

    /// Widget bounds in host coordinates
    fn bounds(&self) -> Rect;
}
