//! The context menu core: payload model, search filtering and the visibility
//! state machine.

pub mod controller;
pub mod filter;
mod payload;

pub use controller::{ContextMenu, MenuTimings, Visibility};
pub use filter::SearchFilter;
pub use payload::{ContextMenuPayload, ContextOption, MenuOptions, MetadataEntry};
