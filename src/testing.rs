//! In-memory stand-ins for the page, the network and the pacing timer.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use crate::api::{Outgoing, Reply, Transport};
use crate::autoplay::Pacer;
use crate::surface::{parse_move, Control, Region, Selector, Surface, Table};

/// Everything the fakes observed, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Request(Outgoing),
    Pause(Duration),
}

pub(crate) type Trace = Rc<RefCell<Vec<Step>>>;

pub(crate) fn trace() -> Trace {
    Rc::new(RefCell::new(Vec::new()))
}

/// Page views captured by a watching fake, one per request or pause.
pub(crate) type Frames = Rc<RefCell<Vec<PageView>>>;

#[derive(Clone, Default)]
struct Watch {
    page: Option<MemorySurface>,
    frames: Frames,
}

impl Watch {
    fn capture(&self) {
        if let Some(page) = &self.page {
            self.frames.borrow_mut().push(page.view());
        }
    }
}

pub(crate) fn requests_to(trace: &Trace, path: &str) -> usize {
    trace
        .borrow()
        .iter()
        .filter(|s| matches!(s, Step::Request(r) if r.url.ends_with(path)))
        .count()
}

#[derive(Clone)]
pub(crate) struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<Reply, String>>>>,
    trace: Trace,
    watch: Watch,
}

impl ScriptedTransport {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            replies: Rc::default(),
            trace: trace.clone(),
            watch: Watch::default(),
        }
    }

    /// Capture `page` into `frames` each time a request goes out.
    pub(crate) fn watching(mut self, page: &MemorySurface, frames: &Frames) -> Self {
        self.watch = Watch {
            page: Some(page.clone()),
            frames: frames.clone(),
        };
        self
    }

    pub(crate) fn reply_json(&self, value: serde_json::Value) {
        self.reply_raw(200, &value.to_string());
    }

    pub(crate) fn reply_raw(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(Reply {
            status,
            body: body.to_string(),
        }));
    }

    pub(crate) fn fail(&self, reason: &str) {
        self.replies
            .borrow_mut()
            .push_back(Err(reason.to_string()));
    }
}

impl Transport for ScriptedTransport {
    async fn exchange(&self, request: Outgoing) -> Result<Reply, String> {
        self.watch.capture();
        self.trace.borrow_mut().push(Step::Request(request));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply left".to_string()))
    }
}

/// Records requested pauses instead of sleeping. Each pause still suspends once, like a
/// real timer, so other futures on the same task get polled meanwhile.
pub(crate) struct RecordingPacer {
    trace: Trace,
    watch: Watch,
}

impl RecordingPacer {
    pub(crate) fn new(trace: &Trace) -> Self {
        Self {
            trace: trace.clone(),
            watch: Watch::default(),
        }
    }

    pub(crate) fn watching(mut self, page: &MemorySurface, frames: &Frames) -> Self {
        self.watch = Watch {
            page: Some(page.clone()),
            frames: frames.clone(),
        };
        self
    }
}

impl Pacer for RecordingPacer {
    async fn pause(&self, duration: Duration) {
        self.watch.capture();
        self.trace.borrow_mut().push(Step::Pause(duration));
        tokio::task::yield_now().await;
    }
}

/// What a user could see on the page: fragments, toggles, selector values and tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PageView {
    pub(crate) html: BTreeMap<Region, String>,
    pub(crate) disabled: BTreeMap<Control, bool>,
    pub(crate) human_row_hidden: bool,
    pub(crate) human_buttons: Vec<(Option<u32>, bool)>,
    pub(crate) selections: BTreeMap<Selector, String>,
    pub(crate) tables: BTreeMap<Table, Vec<Vec<String>>>,
    pub(crate) active_tab: Option<String>,
}

/// Clones share the same page.
#[derive(Clone, Default)]
pub(crate) struct MemorySurface {
    view: Rc<RefCell<PageView>>,
    writes: Rc<Cell<usize>>,
}

impl MemorySurface {
    /// A page whose human-move buttons carry the given `data-move` texts.
    pub(crate) fn with_buttons(moves: &[&str]) -> Self {
        let surface = Self::default();
        surface.view.borrow_mut().human_buttons = moves
            .iter()
            .map(|m| (parse_move(m), false))
            .collect();
        surface
    }

    pub(crate) fn view(&self) -> PageView {
        self.view.borrow().clone()
    }

    pub(crate) fn html(&self, region: Region) -> String {
        self.view.borrow().html.get(&region).cloned().unwrap_or_default()
    }

    pub(crate) fn is_disabled(&self, control: Control) -> bool {
        self.view
            .borrow()
            .disabled
            .get(&control)
            .copied()
            .unwrap_or(false)
    }

    /// Moves whose buttons are currently visible.
    pub(crate) fn visible_moves(&self) -> Vec<u32> {
        self.view
            .borrow()
            .human_buttons
            .iter()
            .filter(|(_, hidden)| !hidden)
            .filter_map(|(m, _)| *m)
            .collect()
    }

    pub(crate) fn rows(&self, table: Table) -> Vec<Vec<String>> {
        self.view.borrow().tables.get(&table).cloned().unwrap_or_default()
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }

    fn touch(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl Surface for MemorySurface {
    fn set_html(&self, region: Region, html: &str) {
        self.touch();
        self.view.borrow_mut().html.insert(region, html.to_string());
    }

    fn set_disabled(&self, control: Control, disabled: bool) {
        self.touch();
        self.view.borrow_mut().disabled.insert(control, disabled);
    }

    fn set_human_row_hidden(&self, hidden: bool) {
        self.touch();
        self.view.borrow_mut().human_row_hidden = hidden;
    }

    fn human_moves(&self) -> Vec<Option<u32>> {
        self.view
            .borrow()
            .human_buttons
            .iter()
            .map(|(m, _)| *m)
            .collect()
    }

    fn set_human_move_hidden(&self, index: usize, hidden: bool) {
        self.touch();
        if let Some(button) = self.view.borrow_mut().human_buttons.get_mut(index) {
            button.1 = hidden;
        }
    }

    fn selection(&self, selector: Selector) -> String {
        self.view
            .borrow()
            .selections
            .get(&selector)
            .cloned()
            .unwrap_or_default()
    }

    fn set_selection(&self, selector: Selector, value: &str) {
        self.touch();
        self.view
            .borrow_mut()
            .selections
            .insert(selector, value.to_string());
    }

    fn replace_rows(&self, table: Table, rows: &[Vec<String>]) {
        self.touch();
        self.view.borrow_mut().tables.insert(table, rows.to_vec());
    }

    fn activate_tab(&self, tab: &str) {
        self.touch();
        self.view.borrow_mut().active_tab = Some(tab.to_string());
    }
}
