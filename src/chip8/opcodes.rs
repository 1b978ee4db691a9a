//! Opcode execution.
use rand::RngCore;

use crate::definitions::{cpu, display};
use crate::error::VmError;
use crate::opcode::{Arithmetic, Instruction, KeyCondition, Misc};
use crate::quirks::{LoadStoreQuirk, ShiftQuirk};

use super::Chip8;

impl Chip8 {
    /// Executes a single decoded instruction. Returns whether the
    /// framebuffer changed, so [`Chip8::tick`] can report [`super::Tick::Drew`].
    pub(super) fn execute(&mut self, instruction: Instruction) -> Result<bool, VmError> {
        let mut drew = false;

        match instruction {
            Instruction::ClearDisplay => {
                self.framebuffer = [0; display::FRAMEBUFFER_SIZE];
                drew = true;
            }
            Instruction::Return => {
                self.jump(self.pop_return_address()?);
            }
            Instruction::Jump { nnn } => self.jump(nnn),
            Instruction::Call { nnn } => {
                self.push_return_address()?;
                self.jump(nnn);
            }
            Instruction::SkipIfEqualImmediate { x, nn } => {
                if self.registers[x] == nn {
                    self.skip_next();
                }
            }
            Instruction::SkipIfNotEqualImmediate { x, nn } => {
                if self.registers[x] != nn {
                    self.skip_next();
                }
            }
            Instruction::SkipIfEqual { x, y } => {
                if self.registers[x] == self.registers[y] {
                    self.skip_next();
                }
            }
            Instruction::SetImmediate { x, nn } => self.registers[x] = nn,
            Instruction::AddImmediate { x, nn } => {
                self.registers[x] = self.registers[x].wrapping_add(nn);
            }
            Instruction::Arithmetic { op, x, y } => self.arithmetic(op, x, y),
            Instruction::SkipIfNotEqual { x, y } => {
                if self.registers[x] != self.registers[y] {
                    self.skip_next();
                }
            }
            Instruction::SetIndex { nnn } => self.index_register = nnn,
            Instruction::JumpPlusV0 { nnn } => {
                self.jump(nnn + self.registers[0] as usize);
            }
            Instruction::Random { x, nn } => {
                let value = (self.rng.next_u32() & 0xFF) as u8;
                self.registers[x] = value & nn;
            }
            Instruction::Draw { x, y, n } => {
                self.draw_sprite(x, y, n);
                drew = true;
            }
            Instruction::SkipOnKey { op, x } => {
                let key = self.registers[x];
                let pressed = self
                    .keypad
                    .try_is_pressed(key as usize)
                    .ok_or(VmError::KeyIndexOutOfBounds(key))?;
                let skip = match op {
                    KeyCondition::Pressed => pressed,
                    KeyCondition::NotPressed => !pressed,
                };
                if skip {
                    self.skip_next();
                }
            }
            Instruction::Misc { op, x } => self.misc(op, x),
        }

        Ok(drew)
    }

    fn arithmetic(&mut self, op: Arithmetic, x: usize, y: usize) {
        let vx = self.registers[x];
        let vy = self.registers[y];

        match op {
            Arithmetic::Assign => self.registers[x] = vy,
            Arithmetic::Or => self.registers[x] = vx | vy,
            Arithmetic::And => self.registers[x] = vx & vy,
            Arithmetic::Xor => self.registers[x] = vx ^ vy,
            Arithmetic::Add => {
                let (sum, carry) = vx.overflowing_add(vy);
                self.registers[x] = sum;
                self.registers[cpu::register::LAST] = carry as u8;
            }
            Arithmetic::Sub => {
                let (diff, borrow) = vx.overflowing_sub(vy);
                self.registers[x] = diff;
                self.registers[cpu::register::LAST] = !borrow as u8;
            }
            Arithmetic::SubReverse => {
                let (diff, borrow) = vy.overflowing_sub(vx);
                self.registers[x] = diff;
                self.registers[cpu::register::LAST] = !borrow as u8;
            }
            Arithmetic::ShiftRight => {
                let source = match self.quirks.shift {
                    ShiftQuirk::Modern => vx,
                    ShiftQuirk::Classic => vy,
                };
                self.registers[x] = source >> 1;
                self.registers[cpu::register::LAST] = source & 0x1;
            }
            Arithmetic::ShiftLeft => {
                let source = match self.quirks.shift {
                    ShiftQuirk::Modern => vx,
                    ShiftQuirk::Classic => vy,
                };
                self.registers[x] = source << 1;
                self.registers[cpu::register::LAST] = (source & 0x80 != 0) as u8;
            }
        }
    }

    fn misc(&mut self, op: Misc, x: usize) {
        match op {
            Misc::GetDelayTimer => self.registers[x] = self.timers.delay.get(),
            Misc::AwaitKeyPress => {
                log::debug!("register V{:X} awaiting key press", x);
                self.wait.arm(x, &mut self.keypad);
            }
            Misc::SetDelayTimer => self.timers.delay.set(self.registers[x]),
            Misc::SetSoundTimer => self.timers.sound.set(self.registers[x]),
            Misc::AddToIndex => {
                let sum = self.index_register + self.registers[x] as usize;
                let overflow = sum >= crate::definitions::memory::SIZE;
                self.index_register = sum % crate::definitions::memory::SIZE;
                self.registers[cpu::register::LAST] = overflow as u8;
            }
            Misc::IndexToSprite => {
                self.index_register =
                    self.registers[x] as usize * display::fontset::GLYPH_SIZE;
            }
            Misc::StoreBcd => {
                let value = self.registers[x];
                self.memory[self.index_register] = value / 100;
                self.memory[self.index_register + 1] = value / 10 % 10;
                self.memory[self.index_register + 2] = value % 10;
            }
            Misc::StoreRegisters => {
                for i in 0..=x {
                    self.memory[self.index_register + i] = self.registers[i];
                }
                if self.quirks.load_store == LoadStoreQuirk::Incrementing {
                    self.index_register += x + 1;
                }
            }
            Misc::LoadRegisters => {
                for i in 0..=x {
                    self.registers[i] = self.memory[self.index_register + i];
                }
                if self.quirks.load_store == LoadStoreQuirk::Incrementing {
                    self.index_register += x + 1;
                }
            }
        }
    }

    /// The `DXYN` sprite blitter. `x`/`y` name the *registers* holding the
    /// screen coordinates, `n` is the row count.
    fn draw_sprite(&mut self, x: usize, y: usize, n: u8) {
        let sprite_x = self.registers[x] as usize;
        let sprite_y = self.registers[y] as usize;
        self.registers[cpu::register::LAST] = 0;

        let bx = sprite_x / 8;
        let bit = sprite_x % 8;

        for row in 0..n as usize {
            let screen_pos = bx + (sprite_y + row) * display::ROW_BYTES;
            let left_idx = screen_pos % display::FRAMEBUFFER_SIZE;
            let right_idx = screen_pos + 1;

            let left = self.framebuffer[left_idx];
            let right_in_bounds = right_idx < display::FRAMEBUFFER_SIZE;
            let right = if right_in_bounds {
                self.framebuffer[right_idx]
            } else {
                0
            };

            let win = ((left as u16) << 8) | right as u16;
            let gfx = (self.memory[self.index_register + row] as u16) << (8 - bit);

            if win & gfx != 0 {
                self.registers[cpu::register::LAST] = 1;
            }

            let result = win ^ gfx;
            self.framebuffer[left_idx] = (result >> 8) as u8;
            if right_in_bounds {
                self.framebuffer[right_idx] = (result & 0xFF) as u8;
            }
        }

        log::trace!("drew sprite at ({}, {}) rows={}", sprite_x, sprite_y, n);
    }
}
