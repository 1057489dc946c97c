//! Terminal UI: an Elm-style event loop over the `core` pipeline.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod tasks;
pub mod theme;
pub mod views;
pub mod widgets;
