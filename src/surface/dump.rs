use crate::{
    foundation::core::Rect,
    oracle::{BoxId, BoxKind, GeometryOracle, Property, PropertyKey},
};

/// Serializable snapshot of a laid-out box subtree.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BoxDump {
    pub id: BoxId,
    pub kind: BoxKind,
    /// `[x0, y0, x1, y1]` in surface pixels.
    pub rect: [f64; 4],
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoxDump>,
}

/// Every property key, in slot order.
fn all_keys() -> impl Iterator<Item = PropertyKey> {
    use PropertyKey as K;
    [
        K::Position,
        K::Offset,
        K::Size,
        K::BackgroundColor,
        K::BackgroundImage,
        K::Color,
        K::Direction,
        K::Display,
        K::DisplayAlign,
        K::FontFamily,
        K::FontSize,
        K::FontStyle,
        K::FontWeight,
        K::LineHeight,
        K::Opacity,
        K::Overflow,
        K::TextAlign,
        K::TextDecoration,
        K::TextOutline,
        K::TextShadow,
        K::UnicodeBidi,
        K::Visibility,
        K::WhiteSpace,
        K::WritingMode,
        K::ZIndex,
        K::Translate,
        K::Transition,
    ]
    .into_iter()
    .chain(PropertyKey::box_edges())
}

/// Snapshot `id` and its descendants. Zero margins are left out to keep dumps readable.
pub fn dump_tree(oracle: &mut dyn GeometryOracle, id: BoxId) -> BoxDump {
    let rect: Rect = oracle.rect(id);
    let properties = all_keys()
        .filter_map(|k| oracle.property(id, k).cloned())
        .filter(|p| !matches!(p, Property::Margin(_, m) if *m == 0.0))
        .collect();
    let children = oracle
        .children(id)
        .into_iter()
        .map(|c| dump_tree(oracle, c))
        .collect();
    BoxDump {
        id,
        kind: oracle.kind(id),
        rect: [rect.x0, rect.y0, rect.x1, rect.y1],
        text: oracle.text(id).to_string(),
        properties,
        children,
    }
}
