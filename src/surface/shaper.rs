use crate::oracle::property::{FontStyle, FontWeight};

/// Font selection for one piece of text.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub families: Vec<String>,
    pub size_px: f64,
    pub style: FontStyle,
    pub weight: FontWeight,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            families: vec!["monospace".to_string()],
            size_px: 16.0,
            style: FontStyle::Normal,
            weight: FontWeight::Normal,
        }
    }
}

/// Measured extent of a run of text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub advance: f64,
    pub ascent: f64,
    pub descent: f64,
}

/// Text measurement used by [`crate::surface::LayoutSurface`].
pub trait TextShaper {
    /// Measure `text` on a single line. Empty text still reports the font's ascent and descent.
    fn measure(&mut self, text: &str, font: &FontSpec) -> TextExtent;
}

/// Fixed-pitch metrics derived from the font size alone.
///
/// Every character advances by `advance_em` times the font size. Layout with this shaper is
/// fully deterministic and needs no font data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceShaper {
    pub advance_em: f64,
    pub ascent_em: f64,
    pub descent_em: f64,
}

impl Default for MonospaceShaper {
    fn default() -> Self {
        Self {
            advance_em: 0.5,
            ascent_em: 0.8,
            descent_em: 0.2,
        }
    }
}

impl TextShaper for MonospaceShaper {
    fn measure(&mut self, text: &str, font: &FontSpec) -> TextExtent {
        let size = font.size_px;
        TextExtent {
            advance: text.chars().count() as f64 * self.advance_em * size,
            ascent: self.ascent_em * size,
            descent: self.descent_em * size,
        }
    }
}
