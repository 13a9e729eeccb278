//! Adapter utilities for the `vlist` crate.
//!
//! The `vlist` crate is UI-agnostic and focuses on layout math and state. This crate provides
//! small, framework-neutral helpers commonly needed by hosts:
//!
//! - A frame driver that coalesces scroll/resize events into one window update per animation
//!   frame, pairs each render with its post-paint measurement, and debounces `is_scrolling`
//! - Scroll anchoring (e.g. prepending older rows without visual jumps)
//! - An explicit TTL cache for row data backed by slow reads
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod cache;
mod driver;

#[cfg(test)]
mod tests;

pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use cache::TtlCache;
pub use driver::{DEFAULT_SCROLL_RESET_DELAY_MS, FrameDriver};
