//! CPU raster surface over an RGBA image

use std::path::Path;

use cosmic_text::{Buffer, FontSystem, Metrics, Shaping, SwashCache};
use image::{imageops, Rgba, RgbaImage};
use thiserror::Error;

use super::{DrawSurface, Font};
use crate::color::Color;
use crate::geometry::{Point, Rect, Size};

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Failed to encode image: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Draws into an in-memory RGBA canvas.
///
/// Text is shaped with cosmic-text using the system fonts; rounded
/// rectangles are rasterized with a signed distance field so edges are
/// anti-aliased.
pub struct RasterSurface {
    canvas: RgbaImage,
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_font_system(width, height, FontSystem::new())
    }

    /// Reuse an existing font database (loading system fonts is slow)
    pub fn with_font_system(width: u32, height: u32, font_system: FontSystem) -> Self {
        Self {
            canvas: RgbaImage::new(width.max(1), height.max(1)),
            font_system,
            swash_cache: SwashCache::new(),
        }
    }

    /// Replace the canvas with a cleared one of a new size, keeping the fonts
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas = RgbaImage::new(width.max(1), height.max(1));
    }

    pub fn clear(&mut self, color: Color) {
        let pixel = Rgba([color.r, color.g, color.b, color.a]);
        for p in self.canvas.pixels_mut() {
            *p = pixel;
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        self.canvas.save(path.as_ref())?;
        Ok(())
    }

    fn shape(&mut self, text: &str, font: &Font) -> Buffer {
        let metrics = Metrics::new(font.size, font.line_height());
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, font.attrs(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

/// Source-over blend of `color` scaled by `coverage` into one pixel
fn blend(canvas: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    let alpha = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let dst_alpha = dst.0[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    let channel = |src: u8, dst: u8| -> u8 {
        if out_alpha <= 0.0 {
            return 0;
        }
        let value = (src as f32 * alpha + dst as f32 * dst_alpha * (1.0 - alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        channel(color.r, dst.0[0]),
        channel(color.g, dst.0[1]),
        channel(color.b, dst.0[2]),
        (out_alpha * 255.0).round() as u8,
    ]);
}

/// Signed distance from `p` to a rounded box centred at the origin
fn rounded_box_sdf(px: f32, py: f32, half_w: f32, half_h: f32, radius: f32) -> f32 {
    let qx = px.abs() - half_w + radius;
    let qy = py.abs() - half_h + radius;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}

impl DrawSurface for RasterSurface {
    fn text_extent(&mut self, text: &str, font: &Font) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let buffer = self.shape(text, font);
        let width = buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max);
        Size::new(width.ceil(), font.line_height().ceil())
    }

    fn fill_rounded_rect(
        &mut self,
        rect: Rect,
        radius: f32,
        fill: Color,
        border: Color,
        border_width: f32,
    ) {
        if rect.size().is_empty() {
            return;
        }
        let half_w = rect.width / 2.0;
        let half_h = rect.height / 2.0;
        let radius = radius.clamp(0.0, half_w.min(half_h));
        let center = rect.center();

        let x0 = rect.x.floor() as i32;
        let y0 = rect.y.floor() as i32;
        let x1 = rect.right().ceil() as i32;
        let y1 = rect.bottom().ceil() as i32;

        for y in y0..y1 {
            for x in x0..x1 {
                let px = x as f32 + 0.5 - center.x;
                let py = y as f32 + 0.5 - center.y;
                let d = rounded_box_sdf(px, py, half_w, half_h, radius);
                let coverage = (0.5 - d).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                if border_width > 0.0 {
                    // Inside the border band the fill fades out towards the edge
                    let inner = (0.5 - (d + border_width)).clamp(0.0, 1.0);
                    blend(&mut self.canvas, x, y, border, coverage * (1.0 - inner));
                    blend(&mut self.canvas, x, y, fill, inner);
                } else {
                    blend(&mut self.canvas, x, y, fill, coverage);
                }
            }
        }
    }

    fn draw_bitmap(&mut self, bitmap: &RgbaImage, at: Point) {
        imageops::overlay(
            &mut self.canvas,
            bitmap,
            at.x.round() as i64,
            at.y.round() as i64,
        );
    }

    fn draw_text(&mut self, text: &str, at: Point, font: &Font, color: Color) {
        if text.is_empty() {
            return;
        }
        let mut buffer = self.shape(text, font);
        let origin_x = at.x.round() as i32;
        let origin_y = at.y.round() as i32;
        let text_color = cosmic_text::Color::rgba(color.r, color.g, color.b, color.a);
        let canvas = &mut self.canvas;

        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            text_color,
            |x, y, w, h, glyph_color| {
                let coverage = glyph_color.a() as f32 / 255.0;
                let pixel_color = Color::rgb(glyph_color.r(), glyph_color.g(), glyph_color.b());
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        blend(canvas, origin_x + x + dx, origin_y + y + dy, pixel_color, coverage);
                    }
                }
            },
        );
    }
}
