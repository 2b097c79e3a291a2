use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::CellValue;

/// Series colour for employees who stayed.
pub const STAYED: Color32 = Color32::from_rgb(46, 160, 67);
/// Series colour for employees who left.
pub const LEFT: Color32 = Color32::from_rgb(214, 39, 40);

pub fn outcome_color(left: bool) -> Color32 {
    if left { LEFT } else { STAYED }
}

pub fn outcome_label(left: bool) -> &'static str {
    if left { "Left (1)" } else { "Stayed (0)" }
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

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
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging ramp for correlation heatmaps
// ---------------------------------------------------------------------------

/// Blue (−1) through light grey (0) to red (+1), blended in linear RGB.
/// `NaN` maps to plain grey.
pub fn diverging(value: f64) -> Color32 {
    if value.is_nan() {
        return Color32::GRAY;
    }
    let t = ((value.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32;
    let cold: LinSrgb = Srgb::new(0.23f32, 0.30, 0.75).into_linear();
    let neutral: LinSrgb = Srgb::new(0.87f32, 0.87, 0.87).into_linear();
    let warm: LinSrgb = Srgb::new(0.71f32, 0.02, 0.15).into_linear();
    let mixed = if t < 0.5 {
        cold.mix(neutral, t * 2.0)
    } else {
        neutral.mix(warm, (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(mixed))
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of a column to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(categories: &[CellValue]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories.iter().cloned().zip(palette).collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn diverging_ends_are_blue_and_red() {
        let cold = diverging(-1.0);
        let warm = diverging(1.0);
        assert!(cold.b() > cold.r());
        assert!(warm.r() > warm.b());
        assert_eq!(diverging(f64::NAN), Color32::GRAY);
        assert_eq!(diverging(5.0), warm);
    }

    #[test]
    fn unknown_values_fall_back_to_grey() {
        let cats = vec![CellValue::String("Single".into()), CellValue::String("Married".into())];
        let map = ColorMap::new(&cats);
        assert_ne!(map.color_for(&cats[0]), map.color_for(&cats[1]));
        assert_eq!(map.color_for(&CellValue::Null), Color32::GRAY);
    }
}
