use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientMsg {
    /// Start a transition to the swapped pair.
    Cycle,
    AnimationFrame,
    /// Color-picker values as typed; invalid input is rejected by the state.
    SaveColors { start: String, end: String },
}

impl GradientMsg {
    pub fn is_frequent(&self) -> bool {
        matches!(self, GradientMsg::AnimationFrame)
    }
}
