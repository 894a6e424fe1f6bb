//! `ratatui-select-core` provides the headless building blocks behind the
//! `ratatui-select` widgets: item registry, containment filtering, selection
//! ownership, keyboard navigation, hover intent, and overlay positioning.
//!
//! This crate is designed for **widget library authors** and apps that want
//! fine-grained control. The batteries-included trigger + floating-list
//! widgets live in the facade crate `ratatui-select`.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: you drive input, time, and rendering from your app.
//! - No async runtime, no timers: the hover-close debounce is a deadline you
//!   poll with an `Instant` you supply.
//! - Selection ownership is explicit: construct the machine as controlled
//!   (host owns the key) or uncontrolled (widget owns it), once.
//! - No panics on bad input: stale selected keys, duplicate registrations,
//!   and empty visible sets all degrade to no-ops or fallbacks.
//!
//! Useful entry points:
//! - [`select::SelectCore`]: the composed open/filter/navigate/commit machine.
//! - [`registry::ItemRegistry`] / [`registry::SelectItem`]: the live item set.
//! - [`navigator::KeyboardNavigator`]: focus over the visible subset.
//! - [`overlay::OverlayPositioner`]: anchor-relative floating placement.
pub mod theme;

#[cfg(feature = "crossterm")]
pub mod crossterm_input;

pub mod filter;
pub mod hover;
pub mod input;
pub mod keymap;
pub mod navigator;
pub mod overlay;
pub mod registry;
pub mod render;
pub mod select;
pub mod selection;
pub mod viewport;
