use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Series colours
// ---------------------------------------------------------------------------

pub const TWS_COLOR: Color32 = Color32::BLUE;
pub const GUST_COLOR: Color32 = Color32::LIGHT_BLUE;
pub const TWD_COLOR: Color32 = Color32::RED;

/// Hue of the cold end of the speed scale (blue).
const HUE_LOW: f32 = 240.0;
/// Hue of the hot end of the speed scale (red).
const HUE_HIGH: f32 = 0.0;

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Speed colour scale: value → Color32
// ---------------------------------------------------------------------------

/// Blue → green → red gradient over `[min, max]` of the displayed speeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedScale {
    min: f64,
    max: f64,
}

impl SpeedScale {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` in the range, clamped to `[0, 1]`.
    /// A degenerate range puts every value in the middle.
    pub fn fraction(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if !range.is_finite() || range.abs() < f64::EPSILON {
            return 0.5;
        }
        ((value - self.min) / range).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.fraction(value);
        let hue = HUE_LOW + (HUE_HIGH - HUE_LOW) * t;
        hsl_to_color32(hue, 0.75, 0.55)
    }
}
