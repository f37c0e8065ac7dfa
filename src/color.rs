use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Fixed series colours
// ---------------------------------------------------------------------------

pub const ACTUAL_COLOR: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
pub const PREDICTED_COLOR: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
pub const IMPORTANCE_COLOR: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);
pub const ANOMALY_COLOR: Color32 = Color32::from_rgb(0xd6, 0x27, 0x28);

// ---------------------------------------------------------------------------
// Importance shading
// ---------------------------------------------------------------------------

/// `n` shades of the importance green, light to dark, so the bar order
/// (ascending importance) reads as a ramp.
pub fn importance_ramp(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    let base: Srgb = Srgb::new(
        IMPORTANCE_COLOR.r() as f32 / 255.0,
        IMPORTANCE_COLOR.g() as f32 / 255.0,
        IMPORTANCE_COLOR.b() as f32 / 255.0,
    );
    let base_hsl: Hsl = base.into_color();

    (0..n)
        .map(|i| {
            let t = if n == 1 { 1.0 } else { i as f32 / (n - 1) as f32 };
            // 0.70 (lightest) down to the base lightness.
            let lightness = 0.70 + (base_hsl.lightness - 0.70) * t;
            let hsl = Hsl::new(base_hsl.hue, base_hsl.saturation, lightness);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma(c: Color32) -> u32 {
        c.r() as u32 * 299 + c.g() as u32 * 587 + c.b() as u32 * 114
    }

    #[test]
    fn ramp_darkens_towards_base_colour() {
        assert!(importance_ramp(0).is_empty());

        let ramp = importance_ramp(5);
        assert_eq!(ramp.len(), 5);
        assert!(ramp.windows(2).all(|w| luma(w[0]) >= luma(w[1])));

        let last = ramp[4];
        assert!(last.r().abs_diff(IMPORTANCE_COLOR.r()) <= 1);
        assert!(last.g().abs_diff(IMPORTANCE_COLOR.g()) <= 1);
        assert!(last.b().abs_diff(IMPORTANCE_COLOR.b()) <= 1);
    }
}
