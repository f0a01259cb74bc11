use std::collections::BTreeMap;

use crate::foundation::core::{Length, Rgba8};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// One time-sliced caption scene: the regions active at a given instant.
pub struct IsdDocument {
    /// Root regions in document order.
    #[serde(default)]
    pub contents: Vec<IsdNode>,
    /// Optional display aspect ratio (width / height) of the root container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
/// Element kind of an ISD node.
pub enum NodeKind {
    Region,
    Body,
    Div,
    P,
    Span,
    Br,
    /// Anything else; rejected by the builder.
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Region => "region",
            Self::Body => "body",
            Self::Div => "div",
            Self::P => "p",
            Self::Span => "span",
            Self::Br => "br",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "region" => Self::Region,
            "body" => Self::Body,
            "div" => Self::Div,
            "p" => Self::P,
            "span" => Self::Span,
            "br" => Self::Br,
            _ => Self::Other(s),
        }
    }
}

impl From<NodeKind> for String {
    fn from(k: NodeKind) -> Self {
        k.as_str().to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// `xml:space` handling carried by the node.
pub enum Space {
    #[default]
    Default,
    Preserve,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A fully resolved ISD element.
pub struct IsdNode {
    pub kind: NodeKind,
    #[serde(default)]
    pub id: String,
    /// Resolved styles keyed by qualified name (see [`crate::isd::names`]).
    #[serde(default)]
    pub style_attrs: BTreeMap<String, StyleValue>,
    #[serde(default)]
    pub contents: Vec<IsdNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub space: Space,
}

impl IsdNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: String::new(),
            style_attrs: BTreeMap::new(),
            contents: Vec::new(),
            text: None,
            space: Space::Default,
        }
    }

    pub fn span_text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Span).with_text(text)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_style(mut self, name: &str, value: StyleValue) -> Self {
        self.style_attrs.insert(name.to_string(), value);
        self
    }

    pub fn with_child(mut self, child: IsdNode) -> Self {
        self.contents.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_space(mut self, space: Space) -> Self {
        self.space = space;
        self
    }

    pub fn style(&self, name: &str) -> Option<&StyleValue> {
        self.style_attrs.get(name)
    }

    pub fn keyword(&self, name: &str) -> Option<&str> {
        self.style(name).and_then(StyleValue::as_keyword)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExtentValue {
    pub width: Length,
    pub height: Length,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OriginValue {
    pub x: Length,
    pub y: Length,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Padding in writing-mode relative order.
pub struct PaddingValue {
    pub before: Length,
    pub end: Length,
    pub after: Length,
    pub start: Length,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowValue {
    pub x: Length,
    pub y: Length,
    #[serde(default = "zero_length")]
    pub blur: Length,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OutlineValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    pub thickness: Length,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecorationValue {
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub line_through: bool,
    #[serde(default)]
    pub overline: bool,
}

fn zero_length() -> Length {
    Length::ZERO
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
/// A resolved style value.
pub enum StyleValue {
    Color(Rgba8),
    Length(Length),
    Extent(ExtentValue),
    Origin(OriginValue),
    Padding(PaddingValue),
    Keyword(String),
    Number(f64),
    Bool(bool),
    Families(Vec<String>),
    Shadows(Vec<ShadowValue>),
    Outline(OutlineValue),
    Decoration(DecorationValue),
    Uri(String),
}

impl StyleValue {
    pub fn keyword(s: impl Into<String>) -> Self {
        Self::Keyword(s.into())
    }

    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba8> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_length(&self) -> Option<Length> {
        match self {
            Self::Length(l) => Some(*l),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Color(_) => "color",
            Self::Length(_) => "length",
            Self::Extent(_) => "extent",
            Self::Origin(_) => "origin",
            Self::Padding(_) => "padding",
            Self::Keyword(_) => "keyword",
            Self::Number(_) => "number",
            Self::Bool(_) => "bool",
            Self::Families(_) => "families",
            Self::Shadows(_) => "shadows",
            Self::Outline(_) => "outline",
            Self::Decoration(_) => "decoration",
            Self::Uri(_) => "uri",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/isd/model.rs"]
mod tests;
