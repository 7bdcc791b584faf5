use serde::{Deserialize, Serialize};

/// Delay between a winning reply and the celebration overlay.
pub const CELEBRATION_DELAY_MS: u32 = 1_000;

/// How long the celebration stays up unless dismissed earlier.
pub const CELEBRATION_DURATION_MS: u32 = 5_000;

/// Length of the status line shake after an error.
pub const STATUS_SHAKE_MS: u32 = 500;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    RevealCelebration,
    DismissCelebration,
    /// Ends the shake of the error status line stamped with `shake`.
    SettleStatus { shake: u32 },
}

impl TimerKind {
    pub const fn delay_ms(self) -> u32 {
        use TimerKind::*;
        match self {
            RevealCelebration => CELEBRATION_DELAY_MS,
            DismissCelebration => CELEBRATION_DURATION_MS,
            SettleStatus { .. } => STATUS_SHAKE_MS,
        }
    }
}

/// A delayed task stamped with the epoch it was scheduled in.
///
/// The controller moves to a new epoch on every transition that invalidates pending visuals, a timer from an older
/// epoch is dropped when it fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub kind: TimerKind,
    pub epoch: u32,
}
