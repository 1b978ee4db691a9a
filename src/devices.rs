//! Abstractions over the keypad and the wait-for-key latch.

use crate::definitions::keyboard;

/// Records the last key whose pressed-state actually changed, so that the
/// wait-for-key latch can tell a fresh press from a held key.
#[derive(Debug, Clone, Copy)]
struct KeyEvent {
    index: usize,
    pressed: bool,
}

/// The 16-key hex keypad. Input is done with a hex keyboard that has 16
/// keys ranging `0-F`. Three opcodes are used to detect input: one skips an
/// instruction if a specific key is pressed, one does the same if a
/// specific key is not pressed, and the third waits for a key press before
/// storing it in a data register.
#[derive(Debug, Default)]
pub struct Keypad {
    keys: [bool; keyboard::SIZE],
    last: Option<KeyEvent>,
}

impl Keypad {
    /// Will instantiate a fresh, all-released keypad.
    pub fn new() -> Self {
        Self::default()
    }

    /// Will set the given key to a state. No-ops if the state doesn't
    /// change, matching the source's "only the transition matters"
    /// contract used by the wait-for-key latch.
    pub fn set_key(&mut self, key: usize, pressed: bool) {
        log::debug!("key {:#X} state {}", key, pressed);

        if self.keys[key] == pressed {
            return;
        }
        self.last = Some(KeyEvent { index: key, pressed });
        self.keys[key] = pressed;
    }

    /// Will return whether the given key is currently pressed.
    ///
    /// # Panics
    /// Panics if `key >= 16` - the host is expected to only ever pass a
    /// validated `0..16` key index, the same contract as [`Chip8::set_key`](crate::Chip8::set_key).
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys[key]
    }

    /// Will return whether the given key is currently pressed, or `None` if
    /// `key` is out of range.
    ///
    /// Unlike [`Keypad::is_pressed`], this is for key indices that originate
    /// from a register value rather than a host-supplied, pre-validated
    /// index - `EX9E`/`EXA1` read `V[x]`, a full byte that a program can
    /// legally set to anything, so an out-of-range value must be reported
    /// rather than panic.
    pub fn try_is_pressed(&self, key: usize) -> Option<bool> {
        self.keys.get(key).copied()
    }

    /// Will return the most recently resolved key press, if any, and
    /// consume it so a single press is never applied twice.
    fn take_last_press(&mut self) -> Option<usize> {
        match self.last.take() {
            Some(KeyEvent { index, pressed: true }) => Some(index),
            _ => None,
        }
    }

    /// Discards any pending key event, so that keys already held (or
    /// released) before a new wait-for-key latch is armed cannot resolve
    /// it retroactively.
    fn clear_last(&mut self) {
        self.last = None;
    }
}

/// A one-shot latch for the `FX0A` "await keypress" instruction. While
/// armed, the fetch-execute cycle must not advance; the first fresh key
/// press observed through [`Keypad::set_key`] resolves it.
#[derive(Debug, Default)]
pub struct WaitForKey {
    target: Option<usize>,
}

impl WaitForKey {
    /// Arms the latch, naming the register that should receive the key.
    /// Any key event recorded before arming is discarded, so a key already
    /// held (or released) cannot retroactively resolve the new wait.
    pub fn arm(&mut self, target_register: usize, keypad: &mut Keypad) {
        keypad.clear_last();
        self.target = Some(target_register);
    }

    /// Whether the latch is currently armed.
    pub fn is_waiting(&self) -> bool {
        self.target.is_some()
    }

    /// If a fresh key press has been recorded on `keypad` since the latch
    /// was armed, disarm the latch and return the destination register and
    /// the key value it should receive.
    pub fn try_resolve(&mut self, keypad: &mut Keypad) -> Option<(usize, u8)> {
        let target = self.target?;
        let key = keypad.take_last_press()?;
        self.target = None;
        Some((target, key as u8))
    }
}
