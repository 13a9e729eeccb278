//! A headless virtual list for rows whose heights are only known after they are painted.
//!
//! For host-side helpers (per-frame event coalescing, scroll anchoring, read caching), see the
//! `vlist-adapter` crate.
//!
//! The crate keeps a flat position table (one `top`/`height`/`bottom` record per item), maps a
//! scroll offset to the first visible row with a binary search, mounts that row plus a buffer
//! of rows above and below it, and folds real row heights back into the table after each paint.
//!
//! It is UI-agnostic. A DOM/TUI/GUI layer is expected to provide:
//! - the ordered item keys
//! - viewport height and scroll offsets
//! - measured row heights once a frame has been painted
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod key;
mod locate;
mod options;
mod reconcile;
mod table;
mod types;
mod window;


pub use controller::ScrollController;
pub use key::ListKey;
pub use locate::locate;
pub use options::{DEFAULT_ESTIMATED_ITEM_HEIGHT, ListOptions, OnWindowChange};
pub use reconcile::reconcile;
pub use table::PositionTable;
pub use types::{
    ItemKey, Phase, PositionEntry, ReconcileReport, RenderFrame, RenderedItem, ScrollState,
    WindowState,
};
pub use window::{select_window, visible_count};
