use crate::{animation::ease::Ease, foundation::core::Vec2};

/// Animates a box's translate offset from its current value towards `to`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TranslateTransition {
    pub to: Vec2,
    pub duration_s: f64,
    pub ease: Ease,
}

impl TranslateTransition {
    pub fn progress(&self, elapsed_s: f64) -> f64 {
        if self.duration_s <= 0.0 {
            return 1.0;
        }
        self.ease.apply(elapsed_s / self.duration_s)
    }

    pub fn offset_at(&self, from: Vec2, elapsed_s: f64) -> Vec2 {
        from.lerp(self.to, self.progress(elapsed_s))
    }

    pub fn is_finished(&self, elapsed_s: f64) -> bool {
        elapsed_s >= self.duration_s
    }
}
