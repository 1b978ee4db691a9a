//! The error types surfaced by the crate's public interface.
use thiserror::Error;

/// Errors returned while decoding a fetched opcode into a typed instruction.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("an unsupported opcode was used {0:#06X}")]
    NotImplemented(u16),
}

/// Errors produced by the call stack.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("stack is full")]
    Full,
    #[error("stack is empty")]
    Empty,
}

/// A fatal error raised from [`tick`](crate::Chip8::tick). Once returned the
/// host is expected to stop driving the virtual machine.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum VmError {
    #[error("program counter out of bounds at {0:#06X}")]
    ProgramCounterOutOfBounds(usize),
    #[error("key index out of bounds: {0:#04X}")]
    KeyIndexOutOfBounds(u8),
    #[error(transparent)]
    Stack(#[from] StackError),
    #[error(transparent)]
    Opcode(#[from] OpcodeError),
}

/// Errors produced while loading a program image into RAM. Loader errors are
/// non-fatal: on `Err` the virtual machine's state is left untouched.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum LoadError {
    #[error("program image is empty")]
    Empty,
    #[error("program image is too big, only {available} bytes available, image is {len} bytes")]
    TooBig { available: usize, len: usize },
}
