//! Tab navigation model, kept out of the wasm-only `web` module so it is testable on the host.
//!
//! Tabs are named by the page (`data-tab`), so they stay strings here; only the leaderboard
//! tab has behaviour attached.

pub const LEADERBOARD_TAB: &str = "leaderboard";
pub const TAB_BUTTON_SELECTOR: &str = ".tab-button";
pub const TAB_PANEL_SELECTOR: &str = ".tab-panel";
pub const TAB_ATTRIBUTE: &str = "data-tab";
pub const ACTIVE_CLASS: &str = "is-active";

/// Id of the panel shown for `tab`.
pub fn panel_id(tab: &str) -> String {
    format!("tab-{tab}")
}

/// Whether showing `tab` should refresh the leaderboard tables.
pub fn opens_leaderboard(tab: &str) -> bool {
    tab == LEADERBOARD_TAB
}
