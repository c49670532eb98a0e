//! Terminal presentation for blockfall.
//!
//! Rendering is split in two steps:
//! - [`GameView`] paints a [`core::GameSnapshot`] into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] flushes the framebuffer through crossterm, only
//!   rewriting rows that changed since the previous frame
//!
//! Board cells are drawn two columns wide to compensate for glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, ViewFlags, Viewport};
pub use renderer::{dirty_rows, encode_full_into, encode_rows_into, TerminalRenderer};
