//! Detection of roll-up captioning across consecutive renders.
//!
//! Each render records the line list of every eligible region. When the next
//! render of the same region shows the previous bottom line moved up by one, the new content
//! starts shifted down by one line height and animates back into place.

use std::collections::BTreeMap;

use crate::{
    animation::{ease::Ease, transition::TranslateTransition},
    foundation::{axes::BlockProgression, core::Vec2, error::RenderResult},
    isd::{model::IsdNode, names},
    oracle::{BoxId, GeometryOracle, Property},
    render::lines::Line,
};

/// Key used for regions without an identifier.
pub const DEFAULT_REGION_ID: &str = "_";

pub const ROLL_UP_DURATION_S: f64 = 0.4;

pub fn normalize_region_id(id: &str) -> &str {
    if id.is_empty() { DEFAULT_REGION_ID } else { id }
}

/// Lines rendered in one region, across all of its paragraphs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionLineBuffer {
    pub region_id: String,
    pub lines: Vec<Line>,
}

impl RegionLineBuffer {
    pub fn new(region_id: &str, lines: Vec<Line>) -> Self {
        Self {
            region_id: normalize_region_id(region_id).to_string(),
            lines,
        }
    }

    pub fn last_text(&self) -> Option<&str> {
        self.lines.last().map(|l| l.text.as_str())
    }
}

/// Per-render memory handed from one render call to the next.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneState {
    /// Incremented on every render that produced this state.
    pub generation: u64,
    pub regions: BTreeMap<String, RegionLineBuffer>,
}

impl SceneState {
    /// Empty state following `previous`.
    pub fn next(previous: Option<&SceneState>) -> Self {
        Self {
            generation: previous.map_or(0, |p| p.generation + 1),
            regions: BTreeMap::new(),
        }
    }

    pub fn region(&self, id: &str) -> Option<&RegionLineBuffer> {
        self.regions.get(normalize_region_id(id))
    }

    pub fn record(&mut self, buffer: RegionLineBuffer) {
        self.regions.insert(buffer.region_id.clone(), buffer);
    }

    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Whether a region can take part in roll-up at all.
pub fn is_roll_up_candidate(region: &IsdNode, bpd: BlockProgression, enabled: bool) -> bool {
    enabled
        && bpd == BlockProgression::Tb
        && !region.contents.is_empty()
        && region.keyword(names::DISPLAY_ALIGN) == Some("after")
}

/// Block offset to start a roll-up from, if `current` continues `previous`.
///
/// The current buffer must have at least two lines and its second-to-last line must repeat the
/// previous buffer's last line.
pub fn detect_roll_up(
    previous: Option<&RegionLineBuffer>,
    current: &RegionLineBuffer,
) -> Option<f64> {
    let prev_last = previous?.lines.last()?;
    let n = current.lines.len();
    if n < 2 || current.lines[n - 2].text != prev_last.text {
        return None;
    }
    Some(current.lines[n - 1].block_size())
}

/// Shift `content` down by `offset` and let it transition back to rest.
pub fn start_roll_up(oracle: &mut dyn GeometryOracle, content: BoxId, offset: f64) {
    oracle.set_property(content, Property::Translate(Vec2::new(0.0, offset)));
    oracle.set_property(
        content,
        Property::Transition(TranslateTransition {
            to: Vec2::ZERO,
            duration_s: ROLL_UP_DURATION_S,
            ease: Ease::CSS_EASE,
        }),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/rollup.rs"]
mod tests;
