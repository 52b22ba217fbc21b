//! Drawing surface for the hero frames.
//!
//! Callers work in CSS pixels; the surface keeps a device-pixel backing
//! store sized `css × dpr` and applies the scale on every draw call.

use image::{imageops, Rgba, RgbaImage};

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rrggbb` or `rrggbb`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Linear mix: `t = 0` → `self`, `t = 1` → `other`.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb(lerp(self.0, other.0), lerp(self.1, other.1), lerp(self.2, other.2))
    }
}

/// Placement of an image inside a surface, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Centre an `img_w × img_h` image in the surface, uniformly scaled by
/// `min(surface_w / img_w, surface_h / img_h)`.
pub fn contain(surface_w: f64, surface_h: f64, img_w: f64, img_h: f64) -> Option<DrawRect> {
    if !(surface_w > 0.0 && surface_h > 0.0 && img_w > 0.0 && img_h > 0.0) {
        return None;
    }
    let scale = (surface_w / img_w).min(surface_h / img_h);
    let width = img_w * scale;
    let height = img_h * scale;
    Some(DrawRect {
        x: (surface_w - width) / 2.0,
        y: (surface_h - height) / 2.0,
        width,
        height,
    })
}

/// Minimal 2D drawing context the animator paints through.
pub trait Surface {
    /// Resize the backing store to `css × dpr` device pixels and reset the
    /// transform so later calls take CSS pixels.  Discards contents.
    fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64);
    fn css_size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill(&mut self, color: Rgb);
    fn draw_image(&mut self, image: &RgbaImage, rect: DrawRect);
}

/// In-memory RGBA surface.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    pixels: RgbaImage,
    css_width: f64,
    css_height: f64,
    dpr: f64,
}

impl Default for PixelSurface {
    fn default() -> Self {
        Self {
            pixels: RgbaImage::new(0, 0),
            css_width: 0.0,
            css_height: 0.0,
            dpr: 1.0,
        }
    }
}

impl PixelSurface {
    pub fn new(css_width: f64, css_height: f64, dpr: f64) -> Self {
        let mut s = Self::default();
        s.resize(css_width, css_height, dpr);
        s
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn to_device(&self, v: f64) -> i64 {
        (v * self.dpr).round() as i64
    }
}

impl Surface for PixelSurface {
    fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let css_width = css_width.max(0.0);
        let css_height = css_height.max(0.0);
        let w = (css_width * dpr).round() as u32;
        let h = (css_height * dpr).round() as u32;
        self.pixels = RgbaImage::new(w, h);
        self.css_width = css_width;
        self.css_height = css_height;
        self.dpr = dpr;
    }

    fn css_size(&self) -> (f64, f64) {
        (self.css_width, self.css_height)
    }

    fn clear(&mut self) {
        for px in self.pixels.pixels_mut() {
            *px = Rgba([0, 0, 0, 0]);
        }
    }

    fn fill(&mut self, color: Rgb) {
        let Rgb(r, g, b) = color;
        for px in self.pixels.pixels_mut() {
            *px = Rgba([r, g, b, 255]);
        }
    }

    fn draw_image(&mut self, image: &RgbaImage, rect: DrawRect) {
        let w = self.to_device(rect.width);
        let h = self.to_device(rect.height);
        if w <= 0 || h <= 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let (w, h) = (w as u32, h as u32);
        let x = self.to_device(rect.x);
        let y = self.to_device(rect.y);
        if (w, h) == image.dimensions() {
            imageops::overlay(&mut self.pixels, image, x, y);
        } else {
            let scaled = imageops::resize(image, w, h, imageops::FilterType::Triangle);
            imageops::overlay(&mut self.pixels, &scaled, x, y);
        }
    }
}
