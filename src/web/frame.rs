//! Keeps a hosting parent frame informed of the page height.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, ResizeObserver, Window};

use crate::resize::HeightTracker;

/// Post the current height once, then again whenever the body's layout changes it.
pub(super) fn watch_height(window: &Window, document: &Document) -> Result<(), JsValue> {
    let tracker = Rc::new(HeightTracker::default());
    post_height(window, document, &tracker);

    let Some(body) = document.body() else {
        tracing::warn!("no <body>; height notices limited to the initial one");
        return Ok(());
    };

    let (w, d, t) = (window.clone(), document.clone(), Rc::clone(&tracker));
    let on_resize = Closure::<dyn FnMut()>::new(move || post_height(&w, &d, &t));
    let callback: &js_sys::Function = on_resize.as_ref().unchecked_ref();
    let observer = ResizeObserver::new(callback)?;
    observer.observe(&body);
    on_resize.forget();
    // The observer lives for the lifetime of the page.
    std::mem::forget(observer);
    Ok(())
}

fn post_height(window: &Window, document: &Document, tracker: &HeightTracker) {
    let Some(root) = document.document_element() else {
        return;
    };
    let Some(notice) = tracker.observe(root.scroll_height()) else {
        return;
    };
    let parent = match window.parent() {
        Ok(Some(parent)) => parent,
        _ => return,
    };
    match serde_wasm_bindgen::to_value(&notice) {
        Ok(message) => {
            if let Err(e) = parent.post_message(&message, "*") {
                tracing::debug!(error = ?e, "height notice not delivered");
            }
        }
        Err(e) => tracing::debug!(error = %e, "height notice not encodable"),
    }
}
