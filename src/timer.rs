//! The two countdown timers required by the CHIP-8 specification.
//!
//! Unlike the historical implementation this crate is descended from, these
//! timers do not run on a background thread: the host owns the clock rate
//! entirely, and a timer only ever changes state from inside
//! [`crate::Chip8::tick`].

/// An 8-bit counter that saturates at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Sets the timer to the given value.
    pub fn set(&mut self, value: u8) {
        self.value = value;
    }

    /// Reads the current value.
    pub fn get(&self) -> u8 {
        self.value
    }

    /// Decrements the timer by one tick if nonzero. Returns `true` if this
    /// decrement made the timer transition from `1` to `0`.
    pub fn decrement(&mut self) -> bool {
        if self.value == 0 {
            return false;
        }
        self.value -= 1;
        self.value == 0
    }
}

/// The delay and sound timer pair. The sound timer additionally fires a
/// caller-supplied callback on its `1 -> 0` transition, representing the
/// end of an audible interval; actual tone generation is the host's job.
#[derive(Default)]
pub struct TimerPair {
    pub delay: Timer,
    pub sound: Timer,
}

impl TimerPair {
    /// Advances both timers by one tick. `on_sound_end` is invoked if the
    /// sound timer just reached zero.
    pub fn tick(&mut self, mut on_sound_end: impl FnMut()) {
        self.delay.decrement();
        if self.sound.decrement() {
            log::debug!("sound timer interval ended");
            on_sound_end();
        }
    }
}
