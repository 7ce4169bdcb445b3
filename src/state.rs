//! Wire types exchanged with the arena server.
//!
//! Every payload is decoded leniently: the server omits fields freely (for example
//! `current_player` is only sent by some builds) and may send `null`, so each field falls
//! back to its empty value instead of failing the whole response.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Variant the server assumes when none is given.
pub const DEFAULT_VARIANT: &str = "normal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    pub fn label(self) -> &'static str {
        match self {
            Player::Red => "red",
            Player::Blue => "blue",
        }
    }

    pub fn all() -> &'static [Player] {
        &[Player::Red, Player::Blue]
    }
}

/// Snapshot of the game as rendered by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameViewState {
    #[serde(deserialize_with = "null_as_default")]
    pub board_html: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message_html: String,
    #[serde(deserialize_with = "null_as_default")]
    pub red_thoughts: String,
    #[serde(deserialize_with = "null_as_default")]
    pub blue_thoughts: String,
    #[serde(deserialize_with = "null_as_default")]
    pub show_human: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub valid_moves: BTreeSet<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub can_move: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub can_run: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub red_model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub blue_model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub variant: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dropdowns_enabled: bool,
    #[serde(deserialize_with = "lenient_player")]
    pub current_player: Option<Player>,
    #[serde(deserialize_with = "null_as_default")]
    pub game_over: bool,
}

impl GameViewState {
    /// Agent identifier shown for `player`, if the server sent one.
    pub fn model(&self, player: Player) -> Option<&str> {
        let id = match player {
            Player::Red => self.red_model.as_str(),
            Player::Blue => self.blue_model.as_str(),
        };
        (!id.is_empty()).then_some(id)
    }

    pub fn variant(&self) -> Option<&str> {
        (!self.variant.is_empty()).then_some(self.variant.as_str())
    }
}

// An explicit `null` reads like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_player<'de, D>(deserializer: D) -> Result<Option<Player>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("red") => Some(Player::Red),
        Some("blue") => Some(Player::Blue),
        _ => None,
    })
}

/// Read-only ranking and history tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Leaderboard {
    #[serde(deserialize_with = "cell_rows")]
    pub ratings: Vec<Vec<String>>,
    #[serde(deserialize_with = "cell_rows")]
    pub results: Vec<Vec<String>>,
    pub generated_at: Option<String>,
}

// Ratings arrive as numbers, history cells as strings; both render as text.
fn cell_rows<'de, D>(deserializer: D) -> Result<Vec<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Vec<serde_json::Value>>>::deserialize(deserializer)?;
    Ok(rows
        .unwrap_or_default()
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Game configuration sent with `init` and `reset`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Setup {
    pub red_model: String,
    pub blue_model: String,
    pub variant: String,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            red_model: String::new(),
            blue_model: String::new(),
            variant: DEFAULT_VARIANT.to_string(),
        }
    }
}

impl Setup {
    /// Fill empty fields from `fallback`.
    pub fn or(self, fallback: &Setup) -> Setup {
        let pick = |value: String, default: &str| {
            if value.trim().is_empty() {
                default.to_string()
            } else {
                value
            }
        };
        Setup {
            red_model: pick(self.red_model, &fallback.red_model),
            blue_model: pick(self.blue_model, &fallback.blue_model),
            variant: pick(self.variant, &fallback.variant),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HumanMove {
    #[serde(rename = "move")]
    pub choice: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelChange<'a> {
    pub player: Player,
    pub model: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantChange<'a> {
    pub variant: &'a str,
}

/// Body for endpoints that take no arguments.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Empty {}
