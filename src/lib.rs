//! A CHIP-8 virtual machine backend.
//!
//! This crate implements only the interpreter core: memory, registers, the
//! fetch-execute cycle, the framebuffer and sprite blitter, the keypad, and
//! the delay/sound timer pair. It owns no window, no audio device, and no
//! event loop - the host drives [`Chip8::tick`] at whatever cadence it
//! chooses and reacts to the `on_sound`/`on_graphics` callbacks.
pub mod chip8;
pub mod definitions;
pub mod devices;
mod error;
pub mod opcode;
pub mod quirks;
pub mod resources;
pub mod timer;

pub use chip8::{Chip8, Tick};
pub use error::*;
