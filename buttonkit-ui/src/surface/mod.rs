//! Drawing surfaces
//!
//! Widgets never talk to a graphics backend directly. They measure and draw
//! through [`DrawSurface`], which the host implements (or uses
//! [`RasterSurface`] for CPU rendering into an RGBA image).

mod raster;

pub use raster::{RasterSurface, SurfaceError};

use cosmic_text::{Attrs, Family, Style as CosmicStyle, Weight};
use image::RgbaImage;

use crate::color::Color;
use crate::geometry::{Point, Rect, Size};

/// Marker appended when text is cut to fit
pub const ELLIPSIS: &str = "...";

/// Font style for widget text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Font used to measure and draw text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Size in pixels
    pub size: f32,
    pub style: FontStyle,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 14.0,
            style: FontStyle::Normal,
        }
    }
}

impl Font {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }

    pub(crate) fn attrs(&self) -> Attrs<'static> {
        let attrs = Attrs::new().family(Family::SansSerif);
        match self.style {
            FontStyle::Bold => attrs.weight(Weight::BOLD),
            FontStyle::Italic => attrs.style(CosmicStyle::Italic),
            FontStyle::Normal => attrs,
        }
    }
}

/// Everything a widget needs from the rendering backend
pub trait DrawSurface {
    /// Extent of a single line of text. Empty text measures as zero.
    fn text_extent(&mut self, text: &str, font: &Font) -> Size;

    /// Fill a rounded rectangle, with an inner border of `border_width` when positive
    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Color,
        border: Color,
        border_width: f32,
    );

    /// Draw a bitmap with its top-left corner at `at`
    fn draw_bitmap(&mut self, bitmap: &RgbaImage, at: Point);

    /// Draw a single line of text with its top-left corner at `at`
    fn draw_text(&mut self, text: &str, at: Point, font: &Font, color: Color);
}

/// Cut `text` from the end so that it plus [`ELLIPSIS`] fits in `max_width`.
///
/// Text that already fits is returned unchanged; when not even the ellipsis
/// fits the result is empty.
pub fn ellipsize_end<S: DrawSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    font: &Font,
    max_width: f32,
) -> String {
    if surface.text_extent(text, font).width <= max_width {
        return text.to_string();
    }
    if surface.text_extent(ELLIPSIS, font).width > max_width {
        return String::new();
    }

    // Longest prefix (in chars) that still fits with the marker
    let ends: Vec<usize> = text.char_indices().map(|(i, c)| i + c.len_utf8()).collect();
    let prefix = |chars: usize| if chars == 0 { "" } else { &text[..ends[chars - 1]] };
    let (mut lo, mut hi) = (0usize, ends.len());
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let candidate = format!("{}{}", prefix(mid), ELLIPSIS);
        if surface.text_extent(&candidate, font).width <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    format!("{}{}", prefix(lo).trim_end(), ELLIPSIS)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixed-metric surface that records draw calls

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawOp {
        RoundedRect {
            rect: Rect,
            radius: f32,
            fill: Color,
            border: Color,
            border_width: f32,
        },
        Bitmap {
            at: Point,
            size: Size,
        },
        Text {
            text: String,
            at: Point,
            color: Color,
        },
    }

    /// Every char is `font.size / 2` wide, every line `font.line_height()` tall
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub ops: Vec<DrawOp>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn texts(&self) -> Vec<(String, Point, Color)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text { text, at, color } => Some((text.clone(), *at, *color)),
                    _ => None,
                })
                .collect()
        }

        pub fn bitmaps(&self) -> Vec<(Point, Size)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Bitmap { at, size } => Some((*at, *size)),
                    _ => None,
                })
                .collect()
        }

        pub fn fills(&self) -> Vec<Color> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::RoundedRect { fill, .. } => Some(*fill),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn text_extent(&mut self, text: &str, font: &Font) -> Size {
            if text.is_empty() {
                return Size::ZERO;
            }
            Size::new(text.chars().count() as f32 * font.size / 2.0, font.line_height())
        }

        fn fill_rounded_rect(
            &mut self,
            rect: Rect,
            radius: f32,
            fill: Color,
            border: Color,
            border_width: f32,
        ) {
            self.ops.push(DrawOp::RoundedRect {
                rect,
                radius,
                fill,
                border,
                border_width,
            });
        }

        fn draw_bitmap(&mut self, bitmap: &RgbaImage, at: Point) {
            let (w, h) = bitmap.dimensions();
            self.ops.push(DrawOp::Bitmap {
                at,
                size: Size::new(w as f32, h as f32),
            });
        }

        fn draw_text(&mut self, text: &str, at: Point, _font: &Font, color: Color) {
            self.ops.push(DrawOp::Text {
                text: text.to_string(),
                at,
                color,
            });
        }
    }
}
