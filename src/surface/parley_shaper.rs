use crate::{
    foundation::error::{RenderError, RenderResult},
    surface::shaper::{FontSpec, TextExtent, TextShaper},
};

/// Measures text with Parley against a single registered font.
///
/// Family lists are not resolved against system fonts; everything is shaped with the font the
/// shaper was built from, which keeps measurements reproducible across machines.
pub struct ParleyShaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    family_name: String,
}

impl std::fmt::Debug for ParleyShaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyShaper")
            .field("family_name", &self.family_name)
            .finish()
    }
}

impl ParleyShaper {
    pub fn from_font_bytes(font_bytes: &[u8]) -> RenderResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| RenderError::font("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| RenderError::font("registered font family has no name"))?
            .to_string();

        tracing::debug!(family = family_name.as_str(), "registered shaper font");
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    fn layout(&mut self, text: &str, size_px: f32) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

impl TextShaper for ParleyShaper {
    fn measure(&mut self, text: &str, font: &FontSpec) -> TextExtent {
        let size_px = font.size_px as f32;
        if !size_px.is_finite() || size_px <= 0.0 {
            return TextExtent::default();
        }
        // An empty layout has no lines to read metrics from.
        let probe = if text.is_empty() { " " } else { text };
        let layout = self.layout(probe, size_px);

        let mut ext = TextExtent::default();
        for line in layout.lines() {
            let m = line.metrics();
            ext.advance += f64::from(m.advance);
            ext.ascent = ext.ascent.max(f64::from(m.ascent));
            ext.descent = ext.descent.max(f64::from(m.descent));
        }
        if text.is_empty() {
            ext.advance = 0.0;
        }
        ext
    }
}
