use crate::foundation::{
    core::Rect,
    error::{RenderError, RenderResult},
};

/// Direction in which text advances along a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlineProgression {
    Lr,
    Rl,
    Tb,
}

/// Direction in which successive lines stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockProgression {
    Tb,
    Lr,
    Rl,
}

/// Physical box edge.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum WritingMode {
    #[default]
    LrTb,
    RlTb,
    TbRl,
    TbLr,
}

impl WritingMode {
    /// Accepts the four canonical spellings plus the `lr`/`rl`/`tb` shorthands.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lrtb" | "lr" => Some(Self::LrTb),
            "rltb" | "rl" => Some(Self::RlTb),
            "tbrl" | "tb" => Some(Self::TbRl),
            "tblr" => Some(Self::TbLr),
            _ => None,
        }
    }

    pub fn axes(self) -> Axes {
        let (ipd, bpd) = match self {
            Self::LrTb => (InlineProgression::Lr, BlockProgression::Tb),
            Self::RlTb => (InlineProgression::Rl, BlockProgression::Tb),
            Self::TbRl => (InlineProgression::Tb, BlockProgression::Rl),
            Self::TbLr => (InlineProgression::Tb, BlockProgression::Lr),
        };
        Axes { ipd, bpd }
    }
}

/// Block/inline edges of a rectangle, in progression order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineEdges {
    pub before: f64,
    pub after: f64,
    pub start: f64,
    pub end: f64,
}

/// A legal (ipd, bpd) pair. Exactly one of the two axes is vertical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Axes {
    ipd: InlineProgression,
    bpd: BlockProgression,
}

impl Default for Axes {
    fn default() -> Self {
        WritingMode::LrTb.axes()
    }
}

impl Axes {
    pub fn new(ipd: InlineProgression, bpd: BlockProgression) -> RenderResult<Self> {
        let inline_vertical = ipd == InlineProgression::Tb;
        let block_vertical = bpd == BlockProgression::Tb;
        if inline_vertical == block_vertical {
            return Err(RenderError::validation(format!(
                "illegal progression pair ipd={ipd:?} bpd={bpd:?}"
            )));
        }
        Ok(Self { ipd, bpd })
    }

    pub fn ipd(self) -> InlineProgression {
        self.ipd
    }

    pub fn bpd(self) -> BlockProgression {
        self.bpd
    }

    pub fn is_horizontal(self) -> bool {
        self.bpd == BlockProgression::Tb
    }

    /// Project a physical rectangle onto (before, after, start, end).
    pub fn project(self, r: Rect) -> LineEdges {
        match self.bpd {
            BlockProgression::Tb => {
                let (start, end) = match self.ipd {
                    InlineProgression::Lr => (r.x0, r.x1),
                    _ => (r.x1, r.x0),
                };
                LineEdges {
                    before: r.y0,
                    after: r.y1,
                    start,
                    end,
                }
            }
            BlockProgression::Lr => LineEdges {
                before: r.x0,
                after: r.x1,
                start: r.y0,
                end: r.y1,
            },
            BlockProgression::Rl => LineEdges {
                before: r.x1,
                after: r.x0,
                start: r.y0,
                end: r.y1,
            },
        }
    }

    pub fn inline_start_edge(self) -> Edge {
        match self.ipd {
            InlineProgression::Lr => Edge::Left,
            InlineProgression::Rl => Edge::Right,
            InlineProgression::Tb => Edge::Top,
        }
    }

    pub fn inline_end_edge(self) -> Edge {
        match self.ipd {
            InlineProgression::Lr => Edge::Right,
            InlineProgression::Rl => Edge::Left,
            InlineProgression::Tb => Edge::Bottom,
        }
    }

    pub fn block_start_edge(self) -> Edge {
        match self.bpd {
            BlockProgression::Tb => Edge::Top,
            BlockProgression::Lr => Edge::Left,
            BlockProgression::Rl => Edge::Right,
        }
    }

    pub fn block_end_edge(self) -> Edge {
        match self.bpd {
            BlockProgression::Tb => Edge::Bottom,
            BlockProgression::Lr => Edge::Right,
            BlockProgression::Rl => Edge::Left,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/axes.rs"]
mod tests;
