//! Tracker dashboard - terminal controller for a solar tracker
//!
//! This library talks to the tracker's control UI over HTTP: it monitors
//! connectivity, polls sensor readings, sends motor and auto-mode commands,
//! and relays a chat with the tracker's assistant. Rendering goes through
//! the [`view::View`] trait so the controller runs headless in tests.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod view;
