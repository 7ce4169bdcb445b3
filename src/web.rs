//! Browser bindings: binds the controller to the live page and wires its events.

mod dom;
mod frame;
mod http;
mod logging;
mod timer;

use std::future::Future;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::{ClientConfig, CONFIG_ELEMENT_ID};
use crate::controller::ViewController;
use crate::error::Error;
use crate::state::Player;
use crate::surface::{Control, Selector, Surface};
use crate::ui_model::TAB_ATTRIBUTE;

use dom::DomSurface;
use http::FetchTransport;
use timer::TimeoutPacer;

type PageController = ViewController<DomSurface, FetchTransport, TimeoutPacer>;

#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::install();

    if let Err(e) = boot() {
        tracing::error!(error = %e, "nim arena controller failed to start");
    }
}

fn boot() -> Result<(), Error> {
    let window = web_sys::window().ok_or_else(|| Error::Page("window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::Page("document".into()))?;

    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    let config = ClientConfig::from_page_text(raw.as_deref());
    tracing::info!(api_base = %config.api_base, pace_ms = config.pace_ms, "starting nim arena controller");

    let surface = DomSurface::bind(&document)?;
    let ctl = Rc::new(ViewController::new(
        surface,
        FetchTransport,
        TimeoutPacer,
        config,
    ));

    wire_controls(&ctl);
    wire_selectors(&ctl);
    wire_human_moves(&ctl);
    wire_tabs(&ctl);

    if let Err(e) = frame::watch_height(&window, &document) {
        tracing::warn!(error = ?e, "height notices disabled");
    }

    run(&ctl, "initialize", |c| async move { c.initialize().await });
    Ok(())
}

fn wire_controls(ctl: &Rc<PageController>) {
    let surface = ctl.surface();

    let c = Rc::clone(ctl);
    EventListener::new(surface.target(Control::Move), "click", move |_| {
        run(&c, "move", |c| async move { c.request_single_move().await });
    })
    .forget();

    let c = Rc::clone(ctl);
    EventListener::new(surface.target(Control::Run), "click", move |_| {
        run(&c, "run", |c| async move { c.run_automatically().await });
    })
    .forget();

    let c = Rc::clone(ctl);
    EventListener::new(surface.target(Control::Reset), "click", move |_| {
        run(&c, "reset", |c| async move { c.reset().await });
    })
    .forget();
}

fn wire_selectors(ctl: &Rc<PageController>) {
    for player in Player::all().iter().copied() {
        let selector = Selector::for_player(player);
        let c = Rc::clone(ctl);
        EventListener::new(ctl.surface().target(selector.control()), "change", move |_| {
            let model = c.surface().selection(selector);
            run(&c, "change agent", move |c| async move {
                c.change_agent(player, &model).await
            });
        })
        .forget();
    }

    let c = Rc::clone(ctl);
    EventListener::new(ctl.surface().target(Control::Variant), "change", move |_| {
        let variant = c.surface().selection(Selector::Variant);
        run(&c, "change variant", move |c| async move {
            c.change_variant(&variant).await
        });
    })
    .forget();
}

fn wire_human_moves(ctl: &Rc<PageController>) {
    for (index, button) in ctl.surface().human_buttons().iter().enumerate() {
        let c = Rc::clone(ctl);
        EventListener::new(button, "click", move |_| {
            let Some(choice) = c.surface().human_moves().get(index).copied().flatten() else {
                tracing::warn!(index, "human move button without a valid move");
                return;
            };
            run(&c, "human move", move |c| async move {
                c.submit_human_move(choice).await
            });
        })
        .forget();
    }
}

fn wire_tabs(ctl: &Rc<PageController>) {
    for button in ctl.surface().tab_buttons() {
        let Some(tab) = button.get_attribute(TAB_ATTRIBUTE) else {
            continue;
        };
        let c = Rc::clone(ctl);
        EventListener::new(button, "click", move |_| {
            let tab = tab.clone();
            run(&c, "select tab", move |c| async move { c.select_tab(&tab).await });
        })
        .forget();
    }
}

/// Spawn one controller operation on the UI thread. Failures are already on the page and
/// in the log, so only the outcome is traced here.
fn run<F, Fut>(ctl: &Rc<PageController>, action: &'static str, op: F)
where
    F: FnOnce(Rc<PageController>) -> Fut,
    Fut: Future<Output = Result<(), Error>> + 'static,
{
    let fut = op(Rc::clone(ctl));
    spawn_local(async move {
        match fut.await {
            Ok(()) => {}
            Err(Error::Busy) => tracing::debug!(action, "ignored while automated play runs"),
            Err(e) => tracing::debug!(action, error = %e, "action failed"),
        }
    });
}
