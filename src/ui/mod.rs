//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame rendering, layout, and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Theme-aware color schemes and text styling
//! - `pages`: Per-page content rendering

pub mod input;
pub mod pages;
pub mod render;
pub mod styles;
