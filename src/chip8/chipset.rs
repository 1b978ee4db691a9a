//! The main chip8 implementation module.
//! The given implementation is based primarily on the [wikipedia
//! page](https://en.wikipedia.org/wiki/CHIP-8) definitions, refined against
//! the historical COSMAC VIP interpreter's literal C++ source.

use std::convert::TryFrom;

use rand::RngCore;

use crate::{
    definitions::{cpu, display, memory},
    devices::{Keypad, WaitForKey},
    error::{StackError, VmError},
    opcode::{build_opcode, Instruction},
    quirks::Quirks,
    resources::Rom,
    timer::TimerPair,
};

/// A fixed-capacity LIFO of return addresses. The stack pointer always
/// equals the number of filled slots, matching the historical source's
/// `stack_pointer` field exactly.
#[derive(Debug, Default)]
pub(super) struct Stack {
    slots: [usize; cpu::stack::SIZE],
    len: usize,
}

impl Stack {
    pub(super) fn push(&mut self, address: usize) -> Result<(), StackError> {
        if self.len == self.slots.len() {
            return Err(StackError::Full);
        }
        self.slots[self.len] = address;
        self.len += 1;
        Ok(())
    }

    pub(super) fn pop(&mut self) -> Result<usize, StackError> {
        if self.len == 0 {
            return Err(StackError::Empty);
        }
        self.len -= 1;
        Ok(self.slots[self.len])
    }

    pub(super) fn len(&self) -> usize {
        self.len
    }
}

/// The outcome of a single [`Chip8::tick`] call, reported to the host so it
/// knows whether a redraw is due or whether the VM is still suspended
/// waiting on a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// An instruction executed; no particular host action is required.
    Advanced,
    /// An instruction executed and the framebuffer changed - the graphics
    /// callback has already fired, this variant is purely informational.
    Drew,
    /// `tick()` was a no-op because the VM is suspended in `FX0A`.
    Waiting,
}

/// The CHIP-8 virtual machine. Owns all interpreter state; the host drives
/// it by calling [`Chip8::tick`] at whatever cadence it chooses and reading
/// [`Chip8::framebuffer`] in response to the graphics callback.
pub struct Chip8 {
    /// - `0x000-0x04F` - the built-in 4x5 pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: [u8; memory::SIZE],
    /// `8-bit` data registers named `V0` to `VF`. `VF` doubles as a flag for
    /// some instructions and should otherwise be avoided by programs.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index register `I`. Only the low 12 bits are ever meaningful.
    pub(super) index_register: usize,
    /// Address of the next instruction to fetch.
    pub(super) program_counter: usize,
    /// Return addresses pushed by `CALL`, popped by `RET`.
    pub(super) stack: Stack,
    /// Delay and sound countdown timers.
    pub(super) timers: TimerPair,
    /// 64x32 monochrome framebuffer, packed 8 pixels per byte.
    pub(super) framebuffer: [u8; display::FRAMEBUFFER_SIZE],
    /// The 16-key hex keypad.
    pub(super) keypad: Keypad,
    /// The `FX0A` suspension latch.
    pub(super) wait: WaitForKey,
    /// The source of randomness for `CXNN`, injectable for deterministic
    /// tests.
    pub(super) rng: Box<dyn RngCore + Send>,
    /// The historically ambiguous behavior switches from the design notes.
    pub(super) quirks: Quirks,
    pub(super) on_sound: Option<Box<dyn FnMut() + Send>>,
    pub(super) on_graphics: Option<Box<dyn FnMut() + Send>>,
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new(Quirks::default())
    }
}

impl Chip8 {
    /// Creates a fresh, unloaded virtual machine using the given quirk
    /// configuration and the system's default randomness source.
    pub fn new(quirks: Quirks) -> Self {
        Self::with_rng(quirks, Box::new(rand::rngs::OsRng))
    }

    /// Creates a fresh virtual machine with an injected random number
    /// generator, so that `CXNN` can be driven deterministically in tests.
    pub fn with_rng(quirks: Quirks, rng: Box<dyn RngCore + Send>) -> Self {
        let mut memory = [0u8; memory::SIZE];
        let font = display::fontset::FONTSET;
        memory[display::fontset::LOCATION..display::fontset::LOCATION + font.len()]
            .copy_from_slice(&font);

        Self {
            memory,
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: Stack::default(),
            timers: TimerPair::default(),
            framebuffer: [0; display::FRAMEBUFFER_SIZE],
            keypad: Keypad::new(),
            wait: WaitForKey::default(),
            rng,
            quirks,
            on_sound: None,
            on_graphics: None,
        }
    }

    /// Resets all VM state (font preserved, installed callbacks and quirk
    /// configuration preserved) then copies `image` into RAM starting at
    /// [`cpu::PROGRAM_COUNTER`].
    ///
    /// On failure the virtual machine is left completely untouched.
    pub fn load(&mut self, image: &[u8]) -> Result<(), crate::error::LoadError> {
        let rom = Rom::new(image)?;

        self.memory = [0; memory::SIZE];
        let font = display::fontset::FONTSET;
        self.memory[display::fontset::LOCATION..display::fontset::LOCATION + font.len()]
            .copy_from_slice(&font);

        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack = Stack::default();
        self.timers = TimerPair::default();
        self.framebuffer = [0; display::FRAMEBUFFER_SIZE];
        self.keypad = Keypad::new();
        self.wait = WaitForKey::default();

        let data = rom.data();
        self.memory[cpu::PROGRAM_COUNTER..cpu::PROGRAM_COUNTER + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Installs (or removes, with `None`) the callback fired on the sound
    /// timer's `1 -> 0` transition.
    pub fn set_on_sound(&mut self, callback: Option<Box<dyn FnMut() + Send>>) {
        self.on_sound = callback;
    }

    /// Installs (or removes, with `None`) the callback fired after the
    /// framebuffer changes (`00E0`, `DXYN`).
    pub fn set_on_graphics(&mut self, callback: Option<Box<dyn FnMut() + Send>>) {
        self.on_graphics = callback;
    }

    /// Sets the pressed-state of `key` (`0..16`).
    ///
    /// # Panics
    /// Panics if `key >= 16`, via ordinary slice-index bounds checking -
    /// an out-of-range key is a programmer error, not a recoverable one.
    pub fn set_key(&mut self, key: usize, pressed: bool) {
        self.keypad.set_key(key, pressed);
        if let Some((target, value)) = self.wait.try_resolve(&mut self.keypad) {
            self.registers[target] = value;
        }
    }

    /// Returns whether `key` is currently pressed.
    pub fn is_key_pressed(&self, key: usize) -> bool {
        self.keypad.is_pressed(key)
    }

    /// A read-only view of the 256-byte packed framebuffer.
    pub fn framebuffer(&self) -> &[u8; display::FRAMEBUFFER_SIZE] {
        &self.framebuffer
    }

    /// The current delay timer value.
    pub fn delay_timer(&self) -> u8 {
        self.timers.delay.get()
    }

    /// The current sound timer value.
    pub fn sound_timer(&self) -> u8 {
        self.timers.sound.get()
    }

    /// Whether the VM is currently suspended awaiting a key press.
    pub fn is_waiting_for_key(&self) -> bool {
        self.wait.is_waiting()
    }

    /// Advances the virtual machine by a single instruction.
    ///
    /// Returns [`Tick::Waiting`] without touching any state if the VM is
    /// suspended in `FX0A`. `&mut self` makes a second, overlapping call
    /// impossible on one thread - there is no runtime re-entrancy check to
    /// bypass.
    pub fn tick(&mut self) -> Result<Tick, VmError> {
        if self.wait.is_waiting() {
            return Ok(Tick::Waiting);
        }

        let opcode = self.fetch()?;
        let instruction = Instruction::try_from(opcode)?;

        log::trace!("pc={:#05X} opcode={:#06X}", self.program_counter, opcode);

        let drew = self.execute(instruction)?;

        if drew {
            if let Some(cb) = &mut self.on_graphics {
                cb();
            }
        }

        let on_sound = &mut self.on_sound;
        self.timers.tick(|| {
            log::debug!("sound timer elapsed");
            if let Some(cb) = on_sound {
                cb();
            }
        });

        Ok(if drew { Tick::Drew } else { Tick::Advanced })
    }

    /// Fetches the opcode at the program counter and advances it by two,
    /// modulo the size of RAM.
    fn fetch(&mut self) -> Result<u16, VmError> {
        if self.program_counter >= memory::SIZE - 1 {
            log::warn!("program counter out of bounds at {:#05X}", self.program_counter);
            return Err(VmError::ProgramCounterOutOfBounds(self.program_counter));
        }
        let opcode = build_opcode(&self.memory, self.program_counter);
        self.program_counter = (self.program_counter + memory::opcodes::SIZE) % memory::SIZE;
        Ok(opcode)
    }

    /// Advances the program counter by one instruction step, used to
    /// implement the `skip next instruction` family. Computed directly
    /// rather than by re-invoking `fetch`, so no memory read happens for a
    /// value that would only be discarded.
    pub(super) fn skip_next(&mut self) {
        self.program_counter = (self.program_counter + memory::opcodes::SIZE) % memory::SIZE;
    }

    pub(super) fn jump(&mut self, address: usize) {
        self.program_counter = address % memory::SIZE;
    }

    pub(super) fn push_return_address(&mut self) -> Result<(), VmError> {
        Ok(self.stack.push(self.program_counter)?)
    }

    pub(super) fn pop_return_address(&mut self) -> Result<usize, VmError> {
        Ok(self.stack.pop()?)
    }

    #[cfg(test)]
    pub(super) fn stack_len(&self) -> usize {
        self.stack.len()
    }
}
