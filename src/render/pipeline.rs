use crate::{
    foundation::{
        core::Size,
        error::{RenderError, RenderResult},
    },
    isd::model::IsdDocument,
    oracle::{
        BoxId, BoxKind, GeometryOracle, Property,
        property::{Overflow, Positioning},
    },
    render::{
        builder::build_node,
        context::{
            ErrorHandler, IgnoreErrors, ImageResolver, PassthroughImages, RenderContext,
            RenderOptions,
        },
        rollup::SceneState,
    },
};

#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutput {
    /// Root container created under the oracle's root.
    pub root: BoxId,
    /// State to pass as `previous` to the next render.
    pub state: SceneState,
}

/// Shrink `size` along one axis so it matches `aspect_ratio` (width / height).
pub fn fit_aspect_ratio(size: Size, aspect_ratio: Option<f64>) -> Size {
    match aspect_ratio {
        Some(ar) if ar > 0.0 && ar.is_finite() => {
            if size.width / size.height > ar {
                Size::new(size.height * ar, size.height)
            } else {
                Size::new(size.width, size.width / ar)
            }
        }
        _ => size,
    }
}

/// Render with pass-through image references and an error handler that always continues.
pub fn render_isd(
    doc: &IsdDocument,
    oracle: &mut dyn GeometryOracle,
    previous: Option<&SceneState>,
    options: &RenderOptions,
) -> RenderResult<RenderOutput> {
    render_isd_with(
        doc,
        oracle,
        previous,
        options,
        &mut PassthroughImages,
        &mut IgnoreErrors,
    )
}

/// Build the visual tree of one ISD under a fresh root container.
#[tracing::instrument(skip(doc, oracle, previous, images, errors))]
pub fn render_isd_with(
    doc: &IsdDocument,
    oracle: &mut dyn GeometryOracle,
    previous: Option<&SceneState>,
    options: &RenderOptions,
    images: &mut dyn ImageResolver,
    errors: &mut dyn ErrorHandler,
) -> RenderResult<RenderOutput> {
    let surface = options.dimensions.unwrap_or_else(|| oracle.surface_size());
    if !(surface.width > 0.0 && surface.height > 0.0)
        || !surface.width.is_finite()
        || !surface.height.is_finite()
    {
        return Err(RenderError::validation(format!(
            "render dimensions must be positive, got {}x{}",
            surface.width, surface.height
        )));
    }
    let size = fit_aspect_ratio(surface, doc.aspect_ratio);

    let root = oracle.create_box(BoxKind::Block);
    let surface_root = oracle.root();
    oracle.append_child(surface_root, root);
    oracle.set_property(root, Property::Position(Positioning::Relative));
    oracle.set_property(root, Property::Size(size));
    oracle.set_property(root, Property::Overflow(Overflow::Hidden));

    let mut ctx = RenderContext::new(size, options, previous, images, errors);
    for node in &doc.contents {
        build_node(&mut ctx, oracle, root, node)?;
    }

    tracing::debug!(
        generation = ctx.current.generation,
        regions = ctx.current.regions.len(),
        "render complete"
    );
    Ok(RenderOutput {
        root,
        state: ctx.current,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
