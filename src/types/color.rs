//! Colors for strokes, fills and scene materials

use std::fmt;

/// An opaque sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from RGB values
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Gray with equal channels
    pub const fn gray(level: u8) -> Self {
        Color::from_rgb(level, level, level)
    }

    /// Create a color from hue (degrees), saturation and brightness (0..=1)
    pub fn from_hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = brightness.clamp(0.0, 1.0);

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Color::from_rgb(channel(r + m), channel(g + m), channel(b + m))
    }

    /// Same hue and saturation at 70% brightness (used for label text)
    pub fn darker(&self) -> Self {
        let dim = |c: u8| channel(f64::from(c) / 255.0 * 0.7);
        Color::from_rgb(dim(self.r), dim(self.g), dim(self.b))
    }

    /// `#rrggbb` notation
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 128, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    pub const ORANGE: Color = Color::from_rgb(255, 165, 0);
    pub const DARK_ORANGE: Color = Color::from_rgb(255, 140, 0);
    pub const DODGER_BLUE: Color = Color::from_rgb(30, 144, 255);
    pub const MEDIUM_PURPLE: Color = Color::from_rgb(147, 112, 219);
    pub const GRAY: Color = Color::gray(128);
    pub const DARK_GRAY: Color = Color::gray(169);
    pub const LIGHT_GRAY: Color = Color::gray(211);
    /// Faint 2D grid lines (#f0f0f0)
    pub const GRID: Color = Color::gray(240);
    /// 3D grid lattice material
    pub const GRID_3D: Color = Color::gray(180);
}

fn channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Color of the `index`-th vector in the 2D projection
pub fn palette_2d(index: usize) -> Color {
    match index {
        0 => Color::RED,
        1 => Color::BLUE,
        2 => Color::ORANGE,
        _ => Color::from_hsb(((index * 45) % 360) as f64, 0.8, 0.8),
    }
}

/// Color of the `index`-th vector in the 3D scene
pub fn palette_3d(index: usize) -> Color {
    match index {
        0 => Color::RED,
        1 => Color::DODGER_BLUE,
        _ => Color::from_hsb(((index * 40) % 360) as f64, 0.8, 0.9),
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}
