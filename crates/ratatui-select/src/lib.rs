//! `ratatui-select` is a searchable single-select control for ratatui: a
//! trigger that opens a floating, anchor-positioned list with keyboard
//! navigation, live text filtering, and click or hover triggering.
//!
//! Two widgets are provided:
//! - [`select_view::SelectView`]: navigation only; typed characters are
//!   ignored.
//! - [`searchable::SearchableSelectView`]: a query line filters the list as
//!   you type.
//!
//! Both are event-loop agnostic: feed them [`input::InputEvent`]s plus an
//! `Instant`, call `tick` once per frame in hover mode, render the trigger
//! in place, and call `render_overlay` after the rest of the frame so the
//! floating list paints on top. The headless machinery lives in
//! `ratatui-select-core` (re-exported below) for building custom variants.
pub mod searchable;
pub mod select_view;

pub use ratatui_select_core::filter;
pub use ratatui_select_core::hover;
pub use ratatui_select_core::input;
pub use ratatui_select_core::keymap;
pub use ratatui_select_core::navigator;
pub use ratatui_select_core::overlay;
pub use ratatui_select_core::registry;
pub use ratatui_select_core::render;
pub use ratatui_select_core::select;
pub use ratatui_select_core::selection;
pub use ratatui_select_core::theme;
pub use ratatui_select_core::viewport;

#[cfg(feature = "crossterm")]
pub use ratatui_select_core::crossterm_input;
