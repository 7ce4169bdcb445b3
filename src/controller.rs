//! The view controller: mirrors server snapshots into a [`Surface`] and turns user
//! gestures into requests.
//!
//! Operations take `&self` so one controller can be shared by every event handler of the
//! page. State lives in `Cell`/`RefCell` fields and no borrow is held across an `.await`.

use std::cell::{Cell, RefCell};

use crate::api::{Api, Transport};
use crate::autoplay::{Outlook, Pacer, Phase, Signal};
use crate::config::ClientConfig;
use crate::error::{ApiError, Error};
use crate::markup;
use crate::state::{GameViewState, Player, Setup};
use crate::surface::{Control, Region, Selector, Surface, Table};
use crate::ui_model;

pub struct ViewController<S, T, P> {
    surface: S,
    api: Api<T>,
    pacer: P,
    config: ClientConfig,
    snapshot: RefCell<Option<GameViewState>>,
    phase: Cell<Phase>,
}

impl<S, T, P> ViewController<S, T, P>
where
    S: Surface,
    T: Transport,
    P: Pacer,
{
    pub fn new(surface: S, transport: T, pacer: P, config: ClientConfig) -> Self {
        Self {
            surface,
            api: Api::new(transport, &config),
            pacer,
            config,
            snapshot: RefCell::new(None),
            phase: Cell::new(Phase::Idle),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn is_running(&self) -> bool {
        self.phase.get().is_running()
    }

    /// Most recent snapshot received from the server.
    pub fn snapshot(&self) -> Option<GameViewState> {
        self.snapshot.borrow().clone()
    }

    /// Current selector values, with configured defaults for empty ones.
    pub fn setup(&self) -> Setup {
        Setup {
            red_model: self.surface.selection(Selector::RedModel),
            blue_model: self.surface.selection(Selector::BlueModel),
            variant: self.surface.selection(Selector::Variant),
        }
        .or(&self.config.defaults)
    }

    pub async fn initialize(&self) -> Result<(), Error> {
        self.ensure_idle()?;
        let setup = self.setup();
        tracing::info!(red = %setup.red_model, blue = %setup.blue_model, variant = %setup.variant, "loading game");
        let outcome = self.api.init(&setup).await;
        self.settle(outcome)
    }

    pub async fn request_single_move(&self) -> Result<(), Error> {
        self.ensure_idle()?;
        self.surface.set_disabled(Control::Move, true);
        self.show_thinking();
        let outcome = self.api.advance().await;
        self.settle(outcome)
    }

    /// Play automated turns, one paced request at a time, until the game ends or a human
    /// has to move.
    pub async fn run_automatically(&self) -> Result<(), Error> {
        self.ensure_idle()?;
        self.hold_controls();
        let begin = self.snapshot.borrow().as_ref().map(Outlook::from);
        self.signal(Signal::Begin(begin));
        tracing::info!(phase = ?self.phase.get(), "automated play started");

        let outcome = self.drive().await;
        self.surface.set_disabled(Control::Reset, false);
        tracing::info!(phase = ?self.phase.get(), "automated play stopped");
        outcome
    }

    async fn drive(&self) -> Result<(), Error> {
        loop {
            match self.phase.get() {
                Phase::Paced => {
                    self.hold_controls();
                    self.show_thinking();
                    self.pacer.pause(self.config.pace()).await;
                    self.signal(Signal::Elapsed);
                }
                Phase::Requesting => {
                    let bootstrap = self.snapshot.borrow().is_none();
                    let outcome = if bootstrap {
                        self.api.init(&self.setup()).await
                    } else {
                        self.api.advance().await
                    };
                    match outcome {
                        Ok(state) => {
                            self.apply_state(&state);
                            self.signal(Signal::Reply(Outlook::from(&state)));
                        }
                        Err(e) => {
                            self.signal(Signal::Failure);
                            return Err(self.fail(e));
                        }
                    }
                }
                Phase::Idle | Phase::HumanHandoff | Phase::Finished | Phase::Failed => {
                    return Ok(());
                }
            }
        }
    }

    /// Send the move exactly as the button encodes it; the server decides legality.
    pub async fn submit_human_move(&self, choice: u32) -> Result<(), Error> {
        self.ensure_idle()?;
        tracing::info!(choice, "submitting human move");
        let outcome = self.api.human_move(choice).await;
        self.settle(outcome)
    }

    pub async fn reset(&self) -> Result<(), Error> {
        self.ensure_idle()?;
        let outcome = self.api.reset(&self.setup()).await;
        self.settle(outcome)
    }

    pub async fn change_agent(&self, player: Player, model: &str) -> Result<(), Error> {
        self.ensure_idle()?;
        tracing::info!(player = player.label(), model, "changing agent");
        let outcome = self.api.change_model(player, model).await;
        self.settle(outcome)
    }

    pub async fn change_variant(&self, variant: &str) -> Result<(), Error> {
        self.ensure_idle()?;
        tracing::info!(variant, "changing variant");
        let outcome = self.api.change_variant(variant).await;
        self.settle(outcome)
    }

    /// Replace both leaderboard tables. Read-only, so allowed during automated play.
    pub async fn load_leaderboard(&self) -> Result<(), Error> {
        match self.api.leaderboard().await {
            Ok(board) => {
                self.surface.replace_rows(Table::Ratings, &board.ratings);
                self.surface.replace_rows(Table::Results, &board.results);
                tracing::debug!(
                    ratings = board.ratings.len(),
                    results = board.results.len(),
                    generated_at = board.generated_at.as_deref().unwrap_or("unknown"),
                    "leaderboard rendered"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(endpoint = e.endpoint(), error = %e, "leaderboard unavailable");
                Err(e.into())
            }
        }
    }

    pub async fn select_tab(&self, tab: &str) -> Result<(), Error> {
        self.surface.activate_tab(tab);
        if ui_model::opens_leaderboard(tab) {
            self.load_leaderboard().await
        } else {
            Ok(())
        }
    }

    /// Render `state` and keep it as the current snapshot. Every payload-driven page
    /// change goes through here.
    pub fn apply_state(&self, state: &GameViewState) {
        *self.snapshot.borrow_mut() = Some(state.clone());

        self.surface.set_html(Region::Board, &state.board_html);
        self.surface.set_html(Region::Message, &state.message_html);
        self.surface.set_html(Region::RedThoughts, &state.red_thoughts);
        self.surface.set_html(Region::BlueThoughts, &state.blue_thoughts);
        self.apply_controls(state);
    }

    fn apply_controls(&self, state: &GameViewState) {
        self.surface.set_human_row_hidden(!state.show_human);
        for (index, choice) in self.surface.human_moves().into_iter().enumerate() {
            let allowed = choice.is_some_and(|m| state.valid_moves.contains(&m));
            self.surface.set_human_move_hidden(index, !allowed);
        }

        self.surface.set_disabled(Control::Move, !state.can_move);
        self.surface.set_disabled(Control::Run, !state.can_run);

        for player in Player::all() {
            if let Some(model) = state.model(*player) {
                self.surface.set_selection(Selector::for_player(*player), model);
            }
        }
        if let Some(variant) = state.variant() {
            self.surface.set_selection(Selector::Variant, variant);
        }
        for selector in Selector::all() {
            self.surface
                .set_disabled(selector.control(), !state.dropdowns_enabled);
        }
    }

    fn settle(&self, outcome: Result<GameViewState, ApiError>) -> Result<(), Error> {
        match outcome {
            Ok(state) => {
                self.apply_state(&state);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Report a failed request and hand the controls back to the user.
    fn fail(&self, error: ApiError) -> Error {
        let endpoint = error.endpoint();
        let error = Error::from(error);
        tracing::warn!(endpoint, %error, "request failed");
        self.surface
            .set_html(Region::Message, &markup::failure(&error));
        if let Some(state) = self.snapshot.borrow().as_ref() {
            self.apply_controls(state);
        }
        self.surface.set_disabled(Control::Reset, false);
        error
    }

    fn show_thinking(&self) {
        let player = self
            .snapshot
            .borrow()
            .as_ref()
            .and_then(|s| s.current_player);
        self.surface
            .set_html(Region::Message, &markup::thinking(player));
    }

    fn hold_controls(&self) {
        for control in [Control::Move, Control::Run, Control::Reset] {
            self.surface.set_disabled(control, true);
        }
    }

    fn ensure_idle(&self) -> Result<(), Error> {
        if self.is_running() {
            tracing::debug!("refusing request while automated play runs");
            return Err(Error::Busy);
        }
        Ok(())
    }

    fn signal(&self, signal: Signal) {
        self.phase.set(self.phase.get().step(signal));
    }
}
