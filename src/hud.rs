//! HUD values
//!
//! Primitive, read-only values the page renders: survival time as `MM:SS`,
//! heart count and phase. Styling is left to the page.

use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Format seconds as zero-padded `MM:SS` (minutes keep growing past 99)
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Snapshot of everything the HUD shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    pub time_text: String,
    pub hearts: u8,
    pub phase: GamePhase,
    /// Result of the finished session, only while the game-over panel is up
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_text: Option<String>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            time_text: format_time(state.survival_secs),
            hearts: state.hearts,
            phase: state.phase,
            final_text: state
                .final_secs
                .filter(|_| state.phase == GamePhase::GameOver)
                .map(format_time),
        }
    }

    /// Survival time shown on the game-over panel, if the game is over
    pub fn final_time(&self) -> Option<&str> {
        self.final_text.as_deref()
    }
}
