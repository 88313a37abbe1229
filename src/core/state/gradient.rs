use crate::{
    core::{
        cmd::{Cmd, TimerId},
        msg::gradient::GradientMsg,
    },
    domain::color::{GradientPair, HexColor},
    infrastructure::storage::StorageKey,
};

pub const DEFAULT_CYCLE_MS: u64 = 8000;
pub const DEFAULT_TRANSITION_MS: u64 = 2000;
pub const DEFAULT_FRAME_MS: u64 = 50;

/// An in-flight interpolation between two pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: GradientPair,
    pub to: GradientPair,
    pub frame: u32,
    pub frames: u32,
}

impl Transition {
    pub fn progress(&self) -> f64 {
        if self.frames == 0 {
            return 1.0;
        }
        f64::from(self.frame) / f64::from(self.frames)
    }

    pub fn current(&self) -> GradientPair {
        self.from.mix(self.to, self.progress())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientState {
    /// Last committed pair; mirrors the persisted `bgColors`.
    pub pair: GradientPair,
    pub transition: Option<Transition>,
    pub frame_ms: u64,
    pub frames_per_transition: u32,
}

impl Default for GradientState {
    fn default() -> Self {
        Self::new(GradientPair::default(), DEFAULT_TRANSITION_MS, DEFAULT_FRAME_MS)
    }
}

impl GradientState {
    pub fn new(pair: GradientPair, transition_ms: u64, frame_ms: u64) -> Self {
        let frame_ms = frame_ms.max(1);
        let frames = (transition_ms / frame_ms).clamp(1, u64::from(u32::MAX)) as u32;
        Self {
            pair,
            transition: None,
            frame_ms,
            frames_per_transition: frames,
        }
    }

    /// Pair currently on screen.
    pub fn displayed(&self) -> GradientPair {
        self.transition.map(|t| t.current()).unwrap_or(self.pair)
    }

    /// Pair the gradient is heading to.
    pub fn target(&self) -> GradientPair {
        self.transition.map(|t| t.to).unwrap_or(self.pair)
    }

    pub fn update(&mut self, msg: GradientMsg) -> Vec<Cmd> {
        match msg {
            GradientMsg::Cycle => {
                let to = self.target().swapped();
                self.animate_to(to)
            }

            GradientMsg::SaveColors { start, end } => {
                let (Some(start), Some(end)) = (HexColor::parse(&start), HexColor::parse(&end))
                else {
                    return vec![];
                };
                let pair = GradientPair::from_picker(start, end);
                let mut cmds = vec![self.commit(pair)];
                cmds.extend(self.animate_to(pair));
                cmds
            }

            GradientMsg::AnimationFrame => {
                let Some(mut transition) = self.transition else {
                    return vec![Cmd::StopTimer {
                        id: TimerId::GradientAnimation,
                    }];
                };

                transition.frame += 1;
                if transition.frame < transition.frames {
                    self.transition = Some(transition);
                    return vec![];
                }

                self.transition = None;
                vec![
                    self.commit(transition.to),
                    Cmd::StopTimer {
                        id: TimerId::GradientAnimation,
                    },
                ]
            }
        }
    }

    fn animate_to(&mut self, to: GradientPair) -> Vec<Cmd> {
        self.transition = Some(Transition {
            from: self.displayed(),
            to,
            frame: 0,
            frames: self.frames_per_transition,
        });
        vec![Cmd::start_timer(TimerId::GradientAnimation, self.frame_ms)]
    }

    /// Replace the committed pair and return the command persisting it.
    fn commit(&mut self, pair: GradientPair) -> Cmd {
        self.pair = pair;
        match serde_json::to_string(&[pair.start(), pair.end()]) {
            Ok(json) => Cmd::set(StorageKey::BgColors, json),
            Err(e) => Cmd::LogError {
                message: format!("Failed to serialize colors: {e}"),
            },
        }
    }
}
