//! Fun run registration: a five-step form wizard for the terminal.
//!
//! [`registration`] holds the draft, the step sequence and the per-step
//! validator with no terminal dependencies. [`ui`] and [`app`] drive it
//! interactively.

pub mod app;
pub mod check;
pub mod config;
pub mod registration;
pub mod ui;
