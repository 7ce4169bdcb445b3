//! The UI surface the controller renders into.
//!
//! The controller never touches the DOM directly: the browser build implements
//! [`Surface`] over real elements, tests implement it in memory.

use crate::state::Player;

/// Regions that receive server-rendered markup verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    Board,
    Message,
    RedThoughts,
    BlueThoughts,
}

impl Region {
    pub fn element_id(self) -> &'static str {
        match self {
            Region::Board => "board",
            Region::Message => "message",
            Region::RedThoughts => "red-thoughts",
            Region::BlueThoughts => "blue-thoughts",
        }
    }

    #[cfg(test)]
    pub(crate) fn all() -> &'static [Region] {
        &[
            Region::Board,
            Region::Message,
            Region::RedThoughts,
            Region::BlueThoughts,
        ]
    }
}

/// Anything that can be enabled or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Control {
    Move,
    Run,
    Reset,
    RedModel,
    BlueModel,
    Variant,
}

impl Control {
    pub fn element_id(self) -> &'static str {
        match self {
            Control::Move => "move-btn",
            Control::Run => "run-btn",
            Control::Reset => "reset-btn",
            Control::RedModel => Selector::RedModel.element_id(),
            Control::BlueModel => Selector::BlueModel.element_id(),
            Control::Variant => Selector::Variant.element_id(),
        }
    }

    #[cfg(test)]
    pub(crate) fn all() -> &'static [Control] {
        &[
            Control::Move,
            Control::Run,
            Control::Reset,
            Control::RedModel,
            Control::BlueModel,
            Control::Variant,
        ]
    }
}

/// Configuration drop-downs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Selector {
    RedModel,
    BlueModel,
    Variant,
}

impl Selector {
    pub fn element_id(self) -> &'static str {
        match self {
            Selector::RedModel => "red-model",
            Selector::BlueModel => "blue-model",
            Selector::Variant => "variant",
        }
    }

    pub fn control(self) -> Control {
        match self {
            Selector::RedModel => Control::RedModel,
            Selector::BlueModel => Control::BlueModel,
            Selector::Variant => Control::Variant,
        }
    }

    pub fn for_player(player: Player) -> Selector {
        match player {
            Player::Red => Selector::RedModel,
            Player::Blue => Selector::BlueModel,
        }
    }

    pub fn all() -> &'static [Selector] {
        &[Selector::RedModel, Selector::BlueModel, Selector::Variant]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Ratings,
    Results,
}

impl Table {
    /// Id of the `<tbody>` the rows go into.
    pub fn element_id(self) -> &'static str {
        match self {
            Table::Ratings => "ratings-body",
            Table::Results => "results-body",
        }
    }
}

pub const HUMAN_ROW_ID: &str = "human-row";
pub const HUMAN_BUTTON_SELECTOR: &str = ".btn-human";
pub const MOVE_ATTRIBUTE: &str = "data-move";

/// Parse the integer a human-move button submits.
pub fn parse_move(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

pub trait Surface {
    fn set_html(&self, region: Region, html: &str);

    fn set_disabled(&self, control: Control, disabled: bool);

    fn set_human_row_hidden(&self, hidden: bool);

    /// Moves encoded on the human-move buttons, in page order.
    /// `None` marks a button whose move attribute is missing or not an integer.
    fn human_moves(&self) -> Vec<Option<u32>>;

    fn set_human_move_hidden(&self, index: usize, hidden: bool);

    fn selection(&self, selector: Selector) -> String;

    fn set_selection(&self, selector: Selector, value: &str);

    /// Drop every existing row of `table` and render `rows` as plain text cells.
    fn replace_rows(&self, table: Table, rows: &[Vec<String>]);

    fn activate_tab(&self, tab: &str);
}
