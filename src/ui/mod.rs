//! Terminal rendering of the context menu.
//!
//! [`App`] wraps a [`ContextMenu`](crate::menu::ContextMenu) with a search
//! field, a selectable option list and a fade animation; [`run`] drives it
//! from terminal input and host events.

mod actions;
mod fade;
mod render;
mod runtime;
mod state;
mod theme;


pub use actions::Flow;
pub use fade::DEFAULT_FADE;
pub use runtime::{RunOptions, run};
pub use state::App;
pub use theme::Theme;
