//! The full implementation of the CHIP-8 virtual machine, from memory and
//! register state through to the fetch-execute cycle.
mod chipset;
mod opcodes;
mod print;

/// reexport the chipset struct and its public surface for simpler usage
pub use chipset::*;
