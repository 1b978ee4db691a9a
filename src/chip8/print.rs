//! A pretty-printer for [`Chip8`], useful for debugging and trace logging.
use std::fmt;

use super::Chip8;

impl fmt::Display for Chip8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PC: {:#06X}  I: {:#06X}", self.program_counter, self.index_register)?;
        writeln!(
            f,
            "delay: {:#04X}  sound: {:#04X}  stack depth: {}",
            self.timers.delay.get(),
            self.timers.sound.get(),
            self.stack.len()
        )?;

        for (row, regs) in self.registers.chunks(4).enumerate() {
            write!(f, "V{:X}-V{:X}: ", row * 4, row * 4 + 3)?;
            for (i, reg) in regs.iter().enumerate() {
                write!(f, "{:#04X}", reg)?;
                if i + 1 != regs.len() {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Chip8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chip8")
            .field("program_counter", &self.program_counter)
            .field("index_register", &self.index_register)
            .field("registers", &self.registers)
            .field("stack_depth", &self.stack.len())
            .field("delay_timer", &self.timers.delay.get())
            .field("sound_timer", &self.timers.sound.get())
            .field("waiting_for_key", &self.wait.is_waiting())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::quirks::Quirks;
    use crate::Chip8;

    #[test]
    fn display_mentions_program_counter() {
        let chip = Chip8::new(Quirks::default());
        let printed = format!("{}", chip);
        assert!(printed.contains("PC:"));
    }

    #[test]
    fn debug_does_not_panic() {
        let chip = Chip8::new(Quirks::default());
        let _ = format!("{:?}", chip);
    }
}
