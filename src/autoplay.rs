//! Automated play as an explicit state machine.
//!
//! The loop alternates between [`Phase::Paced`] (waiting so the last move stays visible)
//! and [`Phase::Requesting`] (one `/api/move` in flight) until the server reports the game
//! over or hands the turn to a human. Transitions are pure so they can be checked without
//! any network or timer.

use std::time::Duration;

use crate::state::GameViewState;

/// Waits between automated moves. The browser build sleeps on a timer; tests record.
#[allow(async_fn_in_trait)]
pub trait Pacer {
    async fn pause(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Requesting,
    Paced,
    HumanHandoff,
    Finished,
    Failed,
}

/// The parts of a snapshot the loop decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outlook {
    pub game_over: bool,
    pub show_human: bool,
}

impl From<&GameViewState> for Outlook {
    fn from(state: &GameViewState) -> Self {
        Self {
            game_over: state.game_over,
            show_human: state.show_human,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Start the loop. `None` means no game has been loaded yet, so the first request
    /// creates one.
    Begin(Option<Outlook>),
    /// The pacing delay ran out.
    Elapsed,
    /// A request completed and its state was applied.
    Reply(Outlook),
    Failure,
}

impl Phase {
    /// True while the loop owns the controls.
    pub fn is_running(self) -> bool {
        matches!(self, Phase::Requesting | Phase::Paced)
    }

    pub fn step(self, signal: Signal) -> Phase {
        match (self, signal) {
            (phase, Signal::Begin(_)) if phase.is_running() => phase,
            (_, Signal::Begin(None)) => Phase::Requesting,
            (_, Signal::Begin(Some(o))) if o.game_over => Phase::Finished,
            (_, Signal::Begin(Some(_))) => Phase::Paced,

            (Phase::Paced, Signal::Elapsed) => Phase::Requesting,

            (Phase::Requesting, Signal::Reply(o)) if o.game_over => Phase::Finished,
            (Phase::Requesting, Signal::Reply(o)) if o.show_human => Phase::HumanHandoff,
            (Phase::Requesting, Signal::Reply(_)) => Phase::Paced,
            (Phase::Requesting, Signal::Failure) => Phase::Failed,

            (phase, signal) => {
                tracing::debug!(?phase, ?signal, "ignoring out-of-order autoplay signal");
                phase
            }
        }
    }
}
