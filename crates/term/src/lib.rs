//! Terminal renderer for the falling-block game.
//!
//! Renders a `core::GameSnapshot` into a plain framebuffer of styled
//! characters and flushes that framebuffer to the terminal with crossterm.
//! No widget toolkit is involved, so the aspect ratio stays under control
//! (2 terminal columns per board cell by default).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{BoardRect, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
