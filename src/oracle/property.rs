use crate::{
    animation::transition::TranslateTransition,
    foundation::{
        axes::{Edge, WritingMode},
        core::{Rgba8, Size, Vec2},
    },
};

macro_rules! keyword_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $kw:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn from_keyword(s: &str) -> Option<Self> {
                match s {
                    $($kw => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn keyword(self) -> &'static str {
                match self {
                    $(Self::$variant => $kw),+
                }
            }
        }
    };
}

keyword_enum!(Positioning {
    Absolute = "absolute",
    Relative = "relative",
});
keyword_enum!(TextDirection {
    Ltr = "ltr",
    Rtl = "rtl",
});
keyword_enum!(DisplayMode {
    Auto = "auto",
    None = "none",
});
keyword_enum!(
    /// Placement of a region's content along its block axis.
    BlockAlign {
        Before = "before",
        Center = "center",
        After = "after",
    }
);
keyword_enum!(FontStyle {
    Normal = "normal",
    Italic = "italic",
    Oblique = "oblique",
});
keyword_enum!(FontWeight {
    Normal = "normal",
    Bold = "bold",
});
keyword_enum!(Overflow {
    Visible = "visible",
    Hidden = "hidden",
});
keyword_enum!(TextAlign {
    Left = "left",
    Center = "center",
    Right = "right",
    Start = "start",
    End = "end",
    Justify = "justify",
});
keyword_enum!(UnicodeBidi {
    Normal = "normal",
    Embed = "embed",
    BidiOverride = "bidiOverride",
    Isolate = "isolate",
});
keyword_enum!(Visibility {
    Visible = "visible",
    Hidden = "hidden",
});
keyword_enum!(WhiteSpace {
    Normal = "normal",
    NoWrap = "nowrap",
    Pre = "pre",
    PreWrap = "pre-wrap",
});

impl WhiteSpace {
    pub fn collapses(self) -> bool {
        matches!(self, Self::Normal | Self::NoWrap)
    }

    pub fn wraps(self) -> bool {
        matches!(self, Self::Normal | Self::PreWrap)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum LineHeight {
    #[default]
    Normal,
    Px(f64),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextDecoration {
    pub underline: bool,
    pub line_through: bool,
    pub overline: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextOutline {
    pub color: Option<Rgba8>,
    pub thickness_px: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextShadow {
    pub x_px: f64,
    pub y_px: f64,
    pub blur_px: f64,
    pub color: Option<Rgba8>,
}

/// A solid border edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BorderSide {
    pub width: f64,
    pub color: Rgba8,
}

/// A presentation property written onto a visual box.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Property {
    Position(Positioning),
    /// Top-left offset relative to the parent's padding box.
    Offset(Vec2),
    Size(Size),
    Padding(Edge, f64),
    Margin(Edge, f64),
    Border(Edge, BorderSide),
    BackgroundColor(Rgba8),
    /// Image stretched to `size`, the extent of the enclosing region when known.
    BackgroundImage { url: String, size: Option<Size> },
    Color(Rgba8),
    Direction(TextDirection),
    Display(DisplayMode),
    DisplayAlign(BlockAlign),
    FontFamily(Vec<String>),
    FontSize(f64),
    FontStyle(FontStyle),
    FontWeight(FontWeight),
    LineHeight(LineHeight),
    Opacity(f64),
    Overflow(Overflow),
    TextAlign(TextAlign),
    TextDecoration(TextDecoration),
    TextOutline(TextOutline),
    TextShadow(Vec<TextShadow>),
    UnicodeBidi(UnicodeBidi),
    Visibility(Visibility),
    WhiteSpace(WhiteSpace),
    WritingMode(WritingMode),
    ZIndex(i32),
    Translate(Vec2),
    Transition(TranslateTransition),
}

/// Identity of a property slot; writing a property replaces the one with the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum PropertyKey {
    Position,
    Offset,
    Size,
    Padding(Edge),
    Margin(Edge),
    Border(Edge),
    BackgroundColor,
    BackgroundImage,
    Color,
    Direction,
    Display,
    DisplayAlign,
    FontFamily,
    FontSize,
    FontStyle,
    FontWeight,
    LineHeight,
    Opacity,
    Overflow,
    TextAlign,
    TextDecoration,
    TextOutline,
    TextShadow,
    UnicodeBidi,
    Visibility,
    WhiteSpace,
    WritingMode,
    ZIndex,
    Translate,
    Transition,
}

impl PropertyKey {
    /// Border, padding and margin slots of all four edges.
    pub fn box_edges() -> impl Iterator<Item = PropertyKey> {
        Edge::ALL
            .into_iter()
            .flat_map(|e| [Self::Border(e), Self::Padding(e), Self::Margin(e)])
    }
}

impl Property {
    pub fn key(&self) -> PropertyKey {
        match self {
            Self::Position(_) => PropertyKey::Position,
            Self::Offset(_) => PropertyKey::Offset,
            Self::Size(_) => PropertyKey::Size,
            Self::Padding(e, _) => PropertyKey::Padding(*e),
            Self::Margin(e, _) => PropertyKey::Margin(*e),
            Self::Border(e, _) => PropertyKey::Border(*e),
            Self::BackgroundColor(_) => PropertyKey::BackgroundColor,
            Self::BackgroundImage { .. } => PropertyKey::BackgroundImage,
            Self::Color(_) => PropertyKey::Color,
            Self::Direction(_) => PropertyKey::Direction,
            Self::Display(_) => PropertyKey::Display,
            Self::DisplayAlign(_) => PropertyKey::DisplayAlign,
            Self::FontFamily(_) => PropertyKey::FontFamily,
            Self::FontSize(_) => PropertyKey::FontSize,
            Self::FontStyle(_) => PropertyKey::FontStyle,
            Self::FontWeight(_) => PropertyKey::FontWeight,
            Self::LineHeight(_) => PropertyKey::LineHeight,
            Self::Opacity(_) => PropertyKey::Opacity,
            Self::Overflow(_) => PropertyKey::Overflow,
            Self::TextAlign(_) => PropertyKey::TextAlign,
            Self::TextDecoration(_) => PropertyKey::TextDecoration,
            Self::TextOutline(_) => PropertyKey::TextOutline,
            Self::TextShadow(_) => PropertyKey::TextShadow,
            Self::UnicodeBidi(_) => PropertyKey::UnicodeBidi,
            Self::Visibility(_) => PropertyKey::Visibility,
            Self::WhiteSpace(_) => PropertyKey::WhiteSpace,
            Self::WritingMode(_) => PropertyKey::WritingMode,
            Self::ZIndex(_) => PropertyKey::ZIndex,
            Self::Translate(_) => PropertyKey::Translate,
            Self::Transition(_) => PropertyKey::Transition,
        }
    }
}
