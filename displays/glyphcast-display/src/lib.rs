//! Panel drivers for Glyphcast
//!
//! This crate provides:
//! - `FrameBuffer`, a page-organized monochrome buffer that is both a
//!   glyph [`Canvas`](glyphcast_core::Canvas) and an `embedded-graphics`
//!   draw target
//! - `Sh1106`, a blocking I2C driver for 128x64 SH1106 OLED panels
//! - `VirtualDisplay`, an in-memory panel for host runs
//! - Status text rendering in a built-in ASCII font

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod framebuffer;
pub mod sh1106;
pub mod text;
pub mod virtual_display;

pub use framebuffer::FrameBuffer;
pub use sh1106::{Sh1106, SH1106_ADDR};
pub use text::{draw_status_text, status_text_width, STATUS_FONT};
pub use virtual_display::VirtualDisplay;
