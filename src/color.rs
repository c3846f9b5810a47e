use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: swimmer → Color32
// ---------------------------------------------------------------------------

/// Maps each swimmer to a distinct colour so the same swimmer keeps the same
/// colour across every chart on screen.
#[derive(Debug, Clone, Default)]
pub struct SwimmerColors {
    mapping: BTreeMap<String, Color32>,
}

impl SwimmerColors {
    /// Build a colour map from the dataset's swimmer domain.
    pub fn new(swimmers: &BTreeSet<String>) -> Self {
        let palette = generate_palette(swimmers.len());
        let mapping = swimmers
            .iter()
            .zip(palette)
            .map(|(name, color)| (name.clone(), color))
            .collect();
        SwimmerColors { mapping }
    }

    /// Look up a swimmer's colour.
    pub fn color_for(&self, swimmer: &str) -> Color32 {
        self.mapping
            .get(swimmer)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        let unique: BTreeSet<_> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 8);
    }

    #[test]
    fn unknown_swimmers_fall_back_to_gray() {
        let colors = SwimmerColors::new(&BTreeSet::new());
        assert_eq!(colors.color_for("nobody"), Color32::GRAY);
    }
}
