//! Constants shared by every gemi crate.

pub mod app;
pub mod defaults;
pub mod env;
