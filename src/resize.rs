//! Height notices for the page hosting this one in an iframe.

use std::cell::Cell;

use serde::Serialize;

pub const RESIZE_MESSAGE_TYPE: &str = "nim-resize";

/// Posted to the parent window as `{type: "nim-resize", height}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResizeNotice {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub height: i32,
}

impl ResizeNotice {
    pub fn new(height: i32) -> Self {
        Self {
            kind: RESIZE_MESSAGE_TYPE,
            height,
        }
    }
}

/// Remembers the last height sent so unchanged layouts are not re-posted.
#[derive(Debug, Default)]
pub struct HeightTracker {
    last: Cell<Option<i32>>,
}

impl HeightTracker {
    pub fn observe(&self, height: i32) -> Option<ResizeNotice> {
        if self.last.get() == Some(height) {
            return None;
        }
        self.last.set(Some(height));
        Some(ResizeNotice::new(height))
    }
}
