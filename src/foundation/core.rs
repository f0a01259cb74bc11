pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight-alpha RGBA8 color, serialized as `[r, g, b, a]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Device pixels.
    Px,
    /// Percentage of the root container width.
    Rw,
    /// Percentage of the root container height.
    Rh,
}

/// A resolved ISD length.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub const ZERO: Self = Self::px(0.0);

    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    pub const fn rw(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Rw,
        }
    }

    pub const fn rh(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Rh,
        }
    }

    /// Convert to pixels against the root container dimensions.
    pub fn to_px(self, width: f64, height: f64) -> f64 {
        match self.unit {
            LengthUnit::Px => self.value,
            LengthUnit::Rw => self.value * width / 100.0,
            LengthUnit::Rh => self.value * height / 100.0,
        }
    }
}
