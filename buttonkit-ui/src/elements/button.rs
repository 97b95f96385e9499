//! Button widget for buttonkit-ui

use super::{CaptureRequest, EventResponse, InputEvent, Key, Widget};
use crate::color::{Color, StateColor};
use crate::geometry::{Point, Rect, Size};
use crate::icon::Icon;
use crate::state::{InteractionState, StateHandler};
use crate::style::{ButtonType, StyleName, StyleRegistry};
use crate::surface::{ellipsize_end, DrawSurface, Font};

/// Space between the icon and the label
pub const ICON_GAP: f32 = 5.0;

/// Unique identifier for a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub u32);

impl ButtonId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Notifications a button publishes to its host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    /// A press-release cycle started and ended inside the button
    Activated(ButtonId),
    /// The enabled state flipped
    EnabledChanged { id: ButtonId, enabled: bool },
}

/// A custom-drawn push button with optional icons and state-dependent colors
#[derive(Debug, Clone)]
pub struct Button {
    /// Unique identifier
    id: ButtonId,
    /// Top-left corner in host coordinates
    position: Point,
    /// Current size; follows the measured size unless fixed by the host
    size: Size,
    fixed_size: bool,
    /// Button label
    label: String,
    font: Font,
    /// Shown while hovered or selected
    active_icon: Option<Icon>,
    /// Shown otherwise
    inactive_icon: Option<Icon>,
    /// Padding on each side [horizontal, vertical]
    padding: Size,
    /// Zero components are unconstrained
    min_size: Size,
    corner_radius: f32,
    border_width: f32,
    /// Center the content box inside the button
    center: bool,
    background: StateColor,
    border_color: StateColor,
    text_color: StateColor,
    style: StyleName,
    button_type: ButtonType,
    state: StateHandler,
    /// Externally selected, shows the active icon
    selected: bool,
    can_focus: bool,
    /// Pointer capture is held between press and release
    capturing: bool,
    text_size: Size,
    best_size: Size,
    needs_measure: bool,
    /// Notifications not yet taken by the host
    events: Vec<ButtonEvent>,
}

impl Button {
    /// Create a new button with the Regular style and default type
    pub fn new(id: ButtonId, label: impl Into<String>) -> Self {
        let mut button = Self {
            id,
            position: Point::default(),
            size: Size::ZERO,
            fixed_size: false,
            label: label.into(),
            font: Font::default(),
            active_icon: None,
            inactive_icon: None,
            padding: Size::ZERO,
            min_size: Size::ZERO,
            corner_radius: 0.0,
            border_width: 0.0,
            center: true,
            background: StateColor::default(),
            border_color: StateColor::default(),
            text_color: StateColor::default(),
            style: StyleName::Regular,
            button_type: ButtonType::Default,
            state: StateHandler::new(),
            selected: false,
            can_focus: true,
            capturing: false,
            text_size: Size::ZERO,
            best_size: Size::ZERO,
            needs_measure: true,
            events: Vec::new(),
        };
        button.apply_style(StyleName::Regular, ButtonType::Default);
        button
    }

    /// Set the button position
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.set_position(Point::new(x, y));
        self
    }

    /// Fix the button size instead of following the measured size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.set_size(Size::new(width, height));
        self
    }

    /// Apply a named style and type
    pub fn with_style(mut self, style: &str, button_type: &str) -> Self {
        self.set_style(style, button_type);
        self
    }

    pub fn with_icon(mut self, active: Option<Icon>, inactive: Option<Icon>) -> Self {
        self.set_icon(active, inactive);
        self
    }

    // ── Accessors ─────────────────────────────────────────────────

    pub fn id(&self) -> ButtonId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Size from the last measurement
    pub fn best_size(&self) -> Size {
        self.best_size
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn padding(&self) -> Size {
        self.padding
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn border_width(&self) -> f32 {
        self.border_width
    }

    pub fn is_center(&self) -> bool {
        self.center
    }

    pub fn style_name(&self) -> StyleName {
        self.style
    }

    pub fn button_type(&self) -> ButtonType {
        self.button_type
    }

    pub fn states(&self) -> InteractionState {
        self.state.states()
    }

    pub fn is_enabled(&self) -> bool {
        !self.state.is(InteractionState::DISABLED)
    }

    pub fn is_pressed(&self) -> bool {
        self.state.is(InteractionState::PRESSED)
    }

    pub fn is_hovered(&self) -> bool {
        self.state.is(InteractionState::HOVERED)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn has_capture(&self) -> bool {
        self.capturing
    }

    pub fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    pub fn background_color(&self) -> &StateColor {
        &self.background
    }

    pub fn border_color(&self) -> &StateColor {
        &self.border_color
    }

    pub fn text_color(&self) -> &StateColor {
        &self.text_color
    }

    /// Background for the current state, resolved on every call
    pub fn current_background(&self) -> Color {
        self.background.resolve(self.state.states())
    }

    pub fn current_text_color(&self) -> Color {
        self.text_color.resolve(self.state.states())
    }

    /// Take and clear the pending redraw request
    pub fn take_redraw(&mut self) -> bool {
        self.state.take_redraw()
    }

    /// Drain queued notifications in the order they happened
    pub fn take_events(&mut self) -> Vec<ButtonEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Configuration ─────────────────────────────────────────────

    /// Content changed: measure again before the next draw
    fn invalidate(&mut self) {
        self.needs_measure = true;
        self.state.request_redraw();
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.state.request_redraw();
    }

    /// Fix the size; the measured size no longer overrides it
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.fixed_size = true;
        self.state.request_redraw();
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.invalidate();
    }

    /// Set the icons. A missing inactive icon reuses the active one and vice versa.
    pub fn set_icon(&mut self, active: Option<Icon>, inactive: Option<Icon>) {
        self.active_icon = active;
        self.inactive_icon = inactive;
        self.invalidate();
    }

    pub fn set_padding(&mut self, padding: Size) {
        self.padding = padding;
        self.invalidate();
    }

    pub fn set_min_size(&mut self, min_size: Size) {
        self.min_size = min_size;
        self.invalidate();
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
        self.invalidate();
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.corner_radius = radius.max(0.0);
        self.state.request_redraw();
    }

    pub fn set_border_width(&mut self, width: f32) {
        self.border_width = width.max(0.0);
        self.state.request_redraw();
    }

    pub fn set_center(&mut self, center: bool) {
        self.center = center;
        self.state.request_redraw();
    }

    pub fn set_text_color(&mut self, color: impl Into<StateColor>) {
        self.text_color = color.into();
        self.state.request_redraw();
    }

    pub fn set_background_color(&mut self, color: impl Into<StateColor>) {
        self.background = color.into();
        self.state.request_redraw();
    }

    pub fn set_border_color(&mut self, color: impl Into<StateColor>) {
        self.border_color = color.into();
        self.state.request_redraw();
    }

    /// Mark as externally selected (shows the active icon)
    pub fn set_selected(&mut self, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            self.state.request_redraw();
        }
    }

    pub fn set_can_focus(&mut self, can_focus: bool) {
        self.can_focus = can_focus;
        if !can_focus {
            self.state.toggle(InteractionState::FOCUSED, false);
        }
    }

    /// Apply a style and type by name. Unknown names fall back to Regular / Default.
    pub fn set_style(&mut self, style: &str, button_type: &str) {
        self.apply_style(StyleName::from_name(style), ButtonType::from_name(button_type));
    }

    /// Apply a type by name, keeping the current colors
    pub fn set_type(&mut self, button_type: &str) {
        self.apply_type(ButtonType::from_name(button_type));
    }

    pub fn apply_style(&mut self, style: StyleName, button_type: ButtonType) {
        let palette = StyleRegistry::builtin().palette(style);
        self.background = palette.background();
        self.border_color = palette.border();
        self.text_color = palette.foreground();
        self.style = style;
        log::debug!("Button {:?}: style {}", self.id, style.as_str());
        self.apply_type(button_type);
    }

    pub fn apply_type(&mut self, button_type: ButtonType) {
        let metrics = StyleRegistry::builtin().metrics(button_type);
        self.font.size = metrics.font_size;
        self.padding = metrics.padding_size();
        self.min_size = metrics.min_size();
        self.corner_radius = metrics.corner_radius;
        self.border_width = metrics.border_width;
        if let Some(size) = metrics.fixed_size() {
            self.size = size;
            self.fixed_size = true;
        }
        self.button_type = button_type;
        log::debug!("Button {:?}: type {}", self.id, button_type.as_str());
        self.invalidate();
    }

    /// Re-render icons for a new display scale and measure again
    pub fn rescale(&mut self, scale: f32) {
        for icon in [&mut self.active_icon, &mut self.inactive_icon]
            .into_iter()
            .flatten()
        {
            icon.rescale(scale);
        }
        self.invalidate();
    }

    // ── Value and enabled state ───────────────────────────────────

    /// Set the checked value. Returns `true` if it changed.
    pub fn set_value(&mut self, value: bool) -> bool {
        if self.get_value() == value {
            return false;
        }
        self.state.toggle(InteractionState::CHECKED, value)
    }

    pub fn get_value(&self) -> bool {
        self.state.is(InteractionState::CHECKED)
    }

    /// Enable or disable the button.
    ///
    /// Emits [`ButtonEvent::EnabledChanged`] and reports the event as
    /// consumed only when the enabled state flips. Disabling drops any press
    /// in progress; if capture was held the response asks the host to
    /// release it.
    pub fn enable(&mut self, enabled: bool) -> EventResponse {
        if self.is_enabled() == enabled {
            return EventResponse::ignored();
        }

        let mut response = EventResponse::consumed();
        let mut mask = InteractionState::DISABLED;
        if !enabled {
            mask |= InteractionState::PRESSED | InteractionState::HOVERED | InteractionState::FOCUSED;
            if self.capturing {
                log::debug!("Button {:?}: capture dropped on disable", self.id);
                self.capturing = false;
                response = response.with_capture(CaptureRequest::Release);
            }
        }
        let bits = if enabled {
            InteractionState::empty()
        } else {
            InteractionState::DISABLED
        };
        self.state.set_state(bits, mask);

        self.events.push(ButtonEvent::EnabledChanged {
            id: self.id,
            enabled,
        });
        response
    }

    // ── Input ─────────────────────────────────────────────────────

    /// Pointer button pressed at `at`
    pub fn on_press(&mut self, at: Point) -> EventResponse {
        if !self.is_enabled() || !self.bounds().contains(at) {
            return EventResponse::ignored();
        }

        let mut flags = InteractionState::PRESSED;
        if self.can_focus {
            flags |= InteractionState::FOCUSED;
        }
        self.state.set_state(flags, flags);
        self.capturing = true;

        EventResponse::consumed().with_capture(CaptureRequest::Acquire)
    }

    /// Pointer button released at `at`
    pub fn on_release(&mut self, at: Point) -> EventResponse {
        if !self.capturing {
            return EventResponse::ignored();
        }

        let inside = self.bounds().contains(at);
        self.state.toggle(InteractionState::HOVERED, inside);
        self.finish_press(inside)
    }

    /// The host took capture away: the press ends without activating
    pub fn on_capture_lost(&mut self) -> EventResponse {
        if !self.capturing {
            return EventResponse::ignored();
        }

        log::debug!("Button {:?}: capture lost", self.id);
        self.capturing = false;
        self.state.toggle(InteractionState::PRESSED, false);
        EventResponse::consumed()
    }

    /// Key pressed (`down`) or released.
    ///
    /// Space and Enter act as a press at the button origin followed by a
    /// release there. Every other key is left to the host, which handles Tab
    /// and the arrows as focus navigation.
    pub fn on_key(&mut self, key: Key, down: bool) -> EventResponse {
        if !self.is_enabled() {
            return EventResponse::ignored();
        }

        if key.is_activation() {
            return match (down, self.capturing) {
                // Auto-repeat while held
                (true, true) => EventResponse::consumed(),
                (true, false) => self.on_press(self.position),
                (false, true) => self.finish_press(self.bounds().contains(self.position)),
                (false, false) => EventResponse::ignored(),
            };
        }

        if down && key.is_navigation() {
            log::debug!("Button {:?}: {:?} left to focus navigation", self.id, key);
        }
        EventResponse::ignored()
    }

    pub fn on_pointer_move(&mut self, at: Point) -> EventResponse {
        if self.is_enabled() {
            let inside = self.bounds().contains(at);
            self.state.toggle(InteractionState::HOVERED, inside);
        }
        EventResponse::ignored()
    }

    pub fn on_hover(&mut self, hovered: bool) -> EventResponse {
        if self.is_enabled() {
            self.state.toggle(InteractionState::HOVERED, hovered);
        }
        EventResponse::ignored()
    }

    pub fn on_focus(&mut self, focused: bool) -> EventResponse {
        if focused && !(self.can_focus && self.is_enabled()) {
            return EventResponse::ignored();
        }
        self.state.toggle(InteractionState::FOCUSED, focused);
        EventResponse::ignored()
    }

    /// Common end of a press: drop capture, clear Pressed, maybe activate
    fn finish_press(&mut self, inside: bool) -> EventResponse {
        self.capturing = false;
        self.state.toggle(InteractionState::PRESSED, false);
        if inside {
            log::debug!("Button {:?}: activated", self.id);
            self.events.push(ButtonEvent::Activated(self.id));
        }
        EventResponse::consumed().with_capture(CaptureRequest::Release)
    }

    // ── Layout helpers ────────────────────────────────────────────

    /// Icon used for measuring: the active one, else the inactive one
    fn measure_icon(&self) -> Option<&Icon> {
        self.active_icon.as_ref().or(self.inactive_icon.as_ref())
    }

    /// Icon for the current state
    fn current_icon(&self) -> Option<&Icon> {
        if self.selected || self.state.is(InteractionState::HOVERED) {
            self.active_icon.as_ref().or(self.inactive_icon.as_ref())
        } else {
            self.inactive_icon.as_ref().or(self.active_icon.as_ref())
        }
    }
}

impl Widget for Button {
    fn measure(&mut self, surface: &mut dyn DrawSurface) -> Size {
        self.text_size = if self.label.is_empty() {
            Size::ZERO
        } else {
            surface.text_extent(&self.label, &self.font)
        };

        let mut content = self.text_size;
        if let Some(icon) = self.measure_icon() {
            let icon_size = icon.size();
            content.width += ICON_GAP + icon_size.width;
            content.height = content.height.max(icon_size.height);
        }

        let mut size = content + self.padding * 2.0;
        if self.min_size.height > 0.0 {
            size.height = self.min_size.height;
        }
        if self.min_size.width > size.width {
            size.width = self.min_size.width;
        }

        self.best_size = size;
        if !self.fixed_size {
            self.size = size;
        }
        self.needs_measure = false;
        log::debug!(
            "Button {:?}: measured {}x{} (text {}x{})",
            self.id, size.width, size.height, self.text_size.width, self.text_size.height
        );
        size
    }

    fn render(&mut self, surface: &mut dyn DrawSurface) {
        if self.needs_measure {
            self.measure(surface);
        }

        let states = self.state.states();
        let bounds = self.bounds();
        surface.fill_rounded_rect(
            bounds,
            self.corner_radius,
            self.background.resolve(states),
            self.border_color.resolve(states),
            self.border_width,
        );

        let icon = self.current_icon();
        let mut gap = ICON_GAP;
        let mut content = self.text_size;
        let mut icon_size = Size::ZERO;
        if let Some(icon) = icon {
            icon_size = icon.size();
            content.width += gap + icon_size.width;
            content.height = content.height.max(icon_size.height);
            // Give up the gap before anything else when too wide
            if content.width > bounds.width {
                let shrink = gap.min(content.width - bounds.width);
                gap -= shrink;
                content.width -= shrink;
            }
        }

        let (content_rect, right_limit) = if self.center {
            let dx = ((bounds.width - content.width) / 2.0).max(0.0);
            let dy = ((bounds.height - content.height) / 2.0).max(0.0);
            (bounds.deflate(dx, dy), bounds.right())
        } else {
            (bounds, bounds.right())
        };

        let mut x = content_rect.x;
        if let Some(icon) = icon {
            let y = content_rect.y + (content_rect.height - icon_size.height) / 2.0;
            surface.draw_bitmap(icon.bitmap(), Point::new(x, y));
            x += icon_size.width + gap;
        }

        if !self.label.is_empty() {
            let text = if x + self.text_size.width > right_limit {
                ellipsize_end(&mut *surface, &self.label, &self.font, right_limit - x)
            } else {
                self.label.clone()
            };
            let y = content_rect.y + (content_rect.height - self.text_size.height) / 2.0;
            surface.draw_text(&text, Point::new(x, y), &self.font, self.text_color.resolve(states));
        }
    }

    fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        match *event {
            InputEvent::PointerEnter => self.on_hover(true),
            InputEvent::PointerLeave => self.on_hover(false),
            InputEvent::PointerMove(at) => self.on_pointer_move(at),
            InputEvent::PointerPress(at) => self.on_press(at),
            InputEvent::PointerRelease(at) => self.on_release(at),
            InputEvent::CaptureLost => self.on_capture_lost(),
            InputEvent::KeyDown(key) => self.on_key(key, true),
            InputEvent::KeyUp(key) => self.on_key(key, false),
            InputEvent::FocusGained => self.on_focus(true),
            InputEvent::FocusLost => self.on_focus(false),
        }
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StylePalette;
    use crate::surface::testing::{DrawOp, RecordingSurface};
    use image::RgbaImage;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn square_icon(px: u32) -> Icon {
        Icon::from_image(RgbaImage::new(px, px))
    }

    /// Default type: font 14 (7 per char, line 16.8), padding 10x8
    fn measured(label: &str) -> (Button, RecordingSurface) {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), label);
        button.measure(&mut surface);
        (button, surface)
    }

    fn palette(style: StyleName) -> &'static StylePalette {
        StyleRegistry::builtin().palette(style)
    }

    #[test]
    fn test_measure_label_only() {
        let (button, _) = measured("Print");
        assert!(approx(button.size().width, 35.0 + 20.0));
        assert!(approx(button.size().height, 16.8 + 16.0));
        assert!(!button.needs_measure());
    }

    #[test]
    fn test_measure_with_icon_adds_gap() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print").with_icon(Some(square_icon(16)), None);
        let size = button.measure(&mut surface);
        assert!(approx(size.width, 35.0 + ICON_GAP + 16.0 + 20.0));
        assert!(approx(size.height, 16.8 + 16.0));

        let mut tall = Button::new(ButtonId(2), "Print").with_icon(Some(square_icon(24)), None);
        let size = tall.measure(&mut surface);
        assert!(approx(size.height, 24.0 + 16.0));
    }

    #[test]
    fn test_measure_width_grows_with_label() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "").with_icon(Some(square_icon(16)), None);
        let mut last = 0.0;
        for n in 0..24 {
            button.set_label("w".repeat(n));
            let width = button.measure(&mut surface).width;
            assert!(width >= last, "width shrank at {} chars", n);
            last = width;
        }
    }

    #[test]
    fn test_min_size_rules() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print");

        button.set_min_size(Size::new(100.0, 40.0));
        assert_eq!(button.measure(&mut surface), Size::new(100.0, 40.0));

        // Smaller minimum width loses, minimum height still applies
        button.set_min_size(Size::new(10.0, 20.0));
        let size = button.measure(&mut surface);
        assert!(approx(size.width, 55.0));
        assert_eq!(size.height, 20.0);

        button.set_min_size(Size::new(100.0, 0.0));
        let size = button.measure(&mut surface);
        assert_eq!(size.width, 100.0);
        assert!(approx(size.height, 32.8));
    }

    #[test]
    fn test_fixed_size_survives_measure() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print").with_size(200.0, 40.0);
        button.measure(&mut surface);
        assert_eq!(button.size(), Size::new(200.0, 40.0));
        assert!(approx(button.best_size().width, 55.0));
    }

    #[test]
    fn test_render_centers_icon_and_label() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print")
            .with_position(10.0, 20.0)
            .with_size(200.0, 40.0)
            .with_icon(Some(square_icon(16)), None);
        button.render(&mut surface);

        // content 56 x 16.8 centred in 200 x 40
        let bitmaps = surface.bitmaps();
        assert_eq!(bitmaps.len(), 1);
        let (icon_at, icon_size) = bitmaps[0];
        assert!(approx(icon_at.x, 82.0));
        assert!(approx(icon_at.y, 32.0));
        assert_eq!(icon_size, Size::new(16.0, 16.0));

        let texts = surface.texts();
        assert_eq!(texts.len(), 1);
        let (text, at, color) = &texts[0];
        assert_eq!(text, "Print");
        assert!(approx(at.x, 82.0 + 16.0 + ICON_GAP));
        assert!(approx(at.y, 31.6));
        assert_eq!(*color, palette(StyleName::Regular).foreground_normal);
    }

    #[test]
    fn test_render_without_centering_starts_at_left_edge() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print")
            .with_position(10.0, 0.0)
            .with_size(200.0, 40.0);
        button.set_center(false);
        button.render(&mut surface);

        let (_, at, _) = &surface.texts()[0];
        assert!(approx(at.x, 10.0));
        assert!(approx(at.y, (40.0 - 16.8) / 2.0));
    }

    #[test]
    fn test_render_without_centering_cuts_label_at_right_edge() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print plate")
            .with_size(63.0, 30.0)
            .with_icon(Some(square_icon(16)), None);
        button.set_center(false);
        button.render(&mut surface);

        let (icon_at, _) = surface.bitmaps()[0];
        assert_eq!(icon_at.x, 0.0);
        // Gap shrinks to nothing, 47 units left for the label
        let (text, at, _) = &surface.texts()[0];
        assert!(approx(at.x, 16.0));
        assert_eq!(text, "Pri...");
    }

    #[test]
    fn test_render_shrinks_gap_before_ellipsizing() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print")
            .with_size(54.0, 30.0)
            .with_icon(Some(square_icon(16)), None);
        button.render(&mut surface);

        let (text, at, _) = &surface.texts()[0];
        assert_eq!(text, "Print");
        assert!(approx(at.x, 16.0 + 3.0));
    }

    #[test]
    fn test_render_ellipsizes_overflowing_label() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print plate")
            .with_size(60.0, 30.0)
            .with_icon(Some(square_icon(16)), None);
        button.render(&mut surface);

        let (icon_at, _) = surface.bitmaps()[0];
        assert_eq!(icon_at.x, 0.0);
        let (text, at, _) = &surface.texts()[0];
        assert!(approx(at.x, 16.0));
        // 44 units left, "..." takes 21
        assert_eq!(text, "Pri...");
    }

    #[test]
    fn test_render_picks_icon_by_hover_and_selection() {
        let mut button = Button::new(ButtonId(1), "Print")
            .with_size(200.0, 40.0)
            .with_icon(Some(square_icon(16)), Some(square_icon(12)));

        let mut surface = RecordingSurface::new();
        button.render(&mut surface);
        assert_eq!(surface.bitmaps()[0].1, Size::new(12.0, 12.0));

        button.handle_event(&InputEvent::PointerEnter);
        let mut surface = RecordingSurface::new();
        button.render(&mut surface);
        assert_eq!(surface.bitmaps()[0].1, Size::new(16.0, 16.0));

        button.handle_event(&InputEvent::PointerLeave);
        button.set_selected(true);
        let mut surface = RecordingSurface::new();
        button.render(&mut surface);
        assert_eq!(surface.bitmaps()[0].1, Size::new(16.0, 16.0));
    }

    #[test]
    fn test_render_resolves_colors_each_time() {
        let (mut button, _) = measured("Print");
        let regular = palette(StyleName::Regular);

        let mut surface = RecordingSurface::new();
        button.render(&mut surface);
        assert_eq!(surface.fills(), vec![regular.background_normal]);

        button.enable(false);
        let mut surface = RecordingSurface::new();
        button.render(&mut surface);
        assert_eq!(surface.fills(), vec![regular.background_disabled]);
        assert_eq!(surface.texts()[0].2, regular.foreground_disabled);
    }

    #[test]
    fn test_press_release_inside_activates_once() {
        let (mut button, _) = measured("Print");

        let press = button.handle_event(&InputEvent::PointerPress(Point::new(5.0, 5.0)));
        assert!(press.consumed);
        assert_eq!(press.capture, Some(CaptureRequest::Acquire));
        assert!(button.is_pressed());

        let release = button.handle_event(&InputEvent::PointerRelease(Point::new(6.0, 6.0)));
        assert_eq!(release.capture, Some(CaptureRequest::Release));
        assert!(!button.is_pressed());
        assert!(!button.has_capture());
        assert_eq!(button.take_events(), vec![ButtonEvent::Activated(ButtonId(1))]);

        // A stray second release does nothing
        let again = button.handle_event(&InputEvent::PointerRelease(Point::new(6.0, 6.0)));
        assert!(!again.consumed);
        assert!(button.take_events().is_empty());
    }

    #[test]
    fn test_drag_outside_does_not_activate() {
        let (mut button, _) = measured("Print");
        button.handle_event(&InputEvent::PointerPress(Point::new(5.0, 5.0)));
        button.handle_event(&InputEvent::PointerMove(Point::new(500.0, 5.0)));
        assert!(button.is_pressed());
        assert!(!button.is_hovered());

        let release = button.handle_event(&InputEvent::PointerRelease(Point::new(500.0, 5.0)));
        assert_eq!(release.capture, Some(CaptureRequest::Release));
        assert!(button.take_events().is_empty());
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_capture_lost_cancels_press() {
        let (mut button, _) = measured("Print");
        button.handle_event(&InputEvent::PointerPress(Point::new(5.0, 5.0)));

        let lost = button.handle_event(&InputEvent::CaptureLost);
        assert!(lost.consumed);
        assert_eq!(lost.capture, None);
        assert!(!button.is_pressed());
        assert!(!button.has_capture());
        assert!(button.take_events().is_empty());

        // The release that follows belongs to nobody
        button.handle_event(&InputEvent::PointerRelease(Point::new(5.0, 5.0)));
        assert!(button.take_events().is_empty());
    }

    #[test]
    fn test_press_outside_is_ignored() {
        let (mut button, _) = measured("Print");
        let response = button.handle_event(&InputEvent::PointerPress(Point::new(-3.0, 5.0)));
        assert!(!response.consumed);
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_keyboard_activation() {
        let (mut button, _) = measured("Print");

        let down = button.handle_event(&InputEvent::KeyDown(Key::Space));
        assert_eq!(down.capture, Some(CaptureRequest::Acquire));
        assert!(button.is_pressed());

        // Auto-repeat keeps the press
        let repeat = button.handle_event(&InputEvent::KeyDown(Key::Space));
        assert!(repeat.consumed);
        assert_eq!(repeat.capture, None);

        button.handle_event(&InputEvent::KeyUp(Key::Space));
        assert!(!button.is_pressed());
        assert_eq!(button.take_events(), vec![ButtonEvent::Activated(ButtonId(1))]);

        button.handle_event(&InputEvent::KeyDown(Key::Enter));
        button.handle_event(&InputEvent::KeyUp(Key::Enter));
        assert_eq!(button.take_events().len(), 1);
    }

    #[test]
    fn test_navigation_keys_are_not_consumed() {
        let (mut button, _) = measured("Print");
        for key in [Key::Tab, Key::Left, Key::Right, Key::Up, Key::Down, Key::Char('x')] {
            let response = button.handle_event(&InputEvent::KeyDown(key));
            assert!(!response.consumed, "{:?} was consumed", key);
        }
        assert!(!button.is_pressed());
        assert!(button.take_events().is_empty());
    }

    #[test]
    fn test_disabled_ignores_input() {
        let (mut button, _) = measured("Print");
        button.enable(false);
        button.take_events();

        assert!(!button.handle_event(&InputEvent::PointerPress(Point::new(5.0, 5.0))).consumed);
        assert!(!button.handle_event(&InputEvent::KeyDown(Key::Space)).consumed);
        button.handle_event(&InputEvent::PointerEnter);
        assert!(!button.is_hovered());
        assert!(button.take_events().is_empty());
    }

    #[test]
    fn test_disable_drops_capture() {
        let (mut button, _) = measured("Print");
        button.handle_event(&InputEvent::PointerPress(Point::new(5.0, 5.0)));
        let response = button.enable(false);
        assert!(response.consumed);
        assert_eq!(response.capture, Some(CaptureRequest::Release));
        assert!(!button.has_capture());
        assert!(!button.is_pressed());

        button.handle_event(&InputEvent::PointerRelease(Point::new(5.0, 5.0)));
        assert_eq!(
            button.take_events(),
            vec![ButtonEvent::EnabledChanged { id: ButtonId(1), enabled: false }]
        );
    }

    #[test]
    fn test_enable_notifies_only_on_flip() {
        let (mut button, _) = measured("Print");
        assert!(!button.enable(true).consumed);
        let disabled = button.enable(false);
        assert!(disabled.consumed);
        // Nothing was captured, so nothing to release
        assert_eq!(disabled.capture, None);
        assert!(!button.enable(false).consumed);
        assert!(button.enable(true).consumed);
        assert_eq!(
            button.take_events(),
            vec![
                ButtonEvent::EnabledChanged { id: ButtonId(1), enabled: false },
                ButtonEvent::EnabledChanged { id: ButtonId(1), enabled: true },
            ]
        );
    }

    #[test]
    fn test_set_value_round_trip_and_idempotence() {
        let (mut button, _) = measured("Print");
        button.take_redraw();

        assert!(button.set_value(true));
        assert!(button.get_value());
        assert!(button.take_redraw());

        assert!(!button.set_value(true));
        assert!(!button.take_redraw());

        assert!(button.set_value(false));
        assert!(!button.get_value());
        assert!(button.take_events().is_empty());
    }

    #[test]
    fn test_configuration_requests_redraw_and_measure() {
        let (mut button, _) = measured("Print");
        button.take_redraw();

        button.set_label("Print plate");
        assert!(button.needs_measure());
        assert!(button.take_redraw());

        button.set_padding(Size::new(2.0, 2.0));
        assert!(button.take_redraw());
    }

    #[test]
    fn test_confirm_window_preset() {
        let (mut button, _) = measured("OK");
        button.set_style("Confirm", "Window");

        let confirm = palette(StyleName::Confirm);
        assert_eq!(button.style_name(), StyleName::Confirm);
        assert_eq!(
            button.background_color().resolve(InteractionState::HOVERED),
            confirm.background_hovered
        );
        assert_eq!(button.min_size(), Size::new(58.0, 24.0));
        assert_eq!(button.corner_radius(), 12.0);
        assert_eq!(button.font().size, 12.0);
        assert_eq!(button.border_width(), 1.0);
        assert_eq!(button.background_color().resolve(InteractionState::HOVERED).to_hex(), "#26A69A");

        // Window buttons are pinned to their preset size
        let mut surface = RecordingSurface::new();
        button.measure(&mut surface);
        assert_eq!(button.size(), Size::new(58.0, 24.0));

        button.handle_event(&InputEvent::PointerEnter);
        assert_eq!(button.current_background(), confirm.background_hovered);
    }

    #[test]
    fn test_unknown_style_uses_regular_colors() {
        let (mut button, _) = measured("OK");
        button.set_style("Confirm", "Window");
        button.set_style("Shiny", "Gigantic");

        let regular = palette(StyleName::Regular);
        assert_eq!(button.style_name(), StyleName::Regular);
        assert_eq!(button.button_type(), ButtonType::Default);
        for (states, expected) in [
            (InteractionState::HOVERED, regular.background_hovered),
            (InteractionState::PRESSED, regular.background_pressed),
            (InteractionState::DISABLED, regular.background_disabled),
            (InteractionState::NORMAL, regular.background_normal),
            (InteractionState::ENABLED, regular.background_enabled),
        ] {
            assert_eq!(button.background_color().resolve(states), expected);
        }
    }

    #[test]
    fn test_set_type_keeps_colors() {
        let (mut button, _) = measured("OK");
        button.set_style("Alert", "");
        button.set_type("Compact");
        assert_eq!(button.style_name(), StyleName::Alert);
        assert_eq!(button.font().size, 10.0);
        assert_eq!(button.padding(), Size::new(8.0, 3.0));
        assert_eq!(button.corner_radius(), 8.0);
    }

    #[test]
    fn test_checked_at_rest_uses_enabled_background() {
        let (mut button, _) = measured("Choice");
        button.set_value(true);
        assert_eq!(
            button.current_background(),
            palette(StyleName::Regular).background_enabled
        );
    }

    #[test]
    fn test_focus_follows_press_and_events() {
        let (mut button, _) = measured("Print");
        button.handle_event(&InputEvent::FocusGained);
        assert!(button.states().contains(InteractionState::FOCUSED));
        button.handle_event(&InputEvent::FocusLost);
        assert!(!button.states().contains(InteractionState::FOCUSED));

        button.set_can_focus(false);
        button.handle_event(&InputEvent::FocusGained);
        button.handle_event(&InputEvent::PointerPress(Point::new(5.0, 5.0)));
        assert!(!button.states().contains(InteractionState::FOCUSED));
    }

    #[test]
    fn test_rescale_remeasures_icons() {
        let mut surface = RecordingSurface::new();
        let mut button = Button::new(ButtonId(1), "Print")
            .with_icon(Some(Icon::from_image(RgbaImage::new(32, 32)).with_px(16)), None);
        let before = button.measure(&mut surface).width;

        button.rescale(2.0);
        assert!(button.needs_measure());
        let after = button.measure(&mut surface).width;
        assert!(approx(after - before, 16.0));
    }

    #[test]
    fn test_hover_switches_text_and_border_colors() {
        let (mut button, _) = measured("Delete");
        button.set_style("Alert", "Choice");
        let alert = palette(StyleName::Alert);
        assert_eq!(button.border_width(), 1.0);

        let mut surface = RecordingSurface::new();
        button.render(&mut surface);
        assert_eq!(surface.texts()[0].2, alert.foreground_normal);

        button.handle_event(&InputEvent::PointerEnter);
        let mut surface = RecordingSurface::new();
        button.render(&mut surface);
        let text_color = surface.texts()[0].2;
        assert_eq!(text_color, alert.foreground_hovered);
        assert_ne!(text_color, button.current_background());
        assert!(matches!(
            surface.ops[0],
            DrawOp::RoundedRect { border, border_width, .. }
                if border == alert.border_hovered && border_width == 1.0
        ));
    }
}
