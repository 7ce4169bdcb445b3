//! Browser controller for the Nim arena page.
//!
//! The server renders every visual fragment; this crate mirrors its JSON snapshots into the
//! page, turns clicks into requests and paces automated play. The controller is written
//! against small traits ([`surface::Surface`], [`api::Transport`], [`autoplay::Pacer`]) so it
//! builds and tests on the host.
//!
//! Enable the real browser bindings with: `--features web` (and a wasm32 target).

pub mod api;
pub mod autoplay;
pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod resize;
pub mod state;
pub mod surface;
pub mod ui_model;

#[cfg(test)]
mod testing;

pub use controller::ViewController;
pub use error::{ApiError, Error};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;
