use crate::{
    definitions::{display::fontset, keyboard, memory},
    opcode::{AluOp, ChipOpcodes, KeyOp, MiscOp, Operation, ProgramCounterStep},
    ProcessError,
};

use super::ChipSet;

/// Calculates `8XYT`, returns the new `VX` and the new `VF` if the
/// operation has a flag.
pub(super) fn alu(op: AluOp, vx: u8, vy: u8, shift_uses_vy: bool) -> (u8, Option<bool>) {
    let source = if shift_uses_vy { vy } else { vx };
    match op {
        AluOp::Assign => (vy, None),
        AluOp::Or => (vx | vy, None),
        AluOp::And => (vx & vy, None),
        AluOp::Xor => (vx ^ vy, None),
        AluOp::Add => {
            let (res, carry) = vx.overflowing_add(vy);
            (res, Some(carry))
        }
        // the flag is "no borrow"
        AluOp::Sub => (vx.wrapping_sub(vy), Some(vx >= vy)),
        AluOp::SubReverse => (vy.wrapping_sub(vx), Some(vy >= vx)),
        AluOp::ShiftRight => (source >> 1, Some(source & 0x01 == 0x01)),
        AluOp::ShiftLeft => (source << 1, Some(source & 0x80 == 0x80)),
    }
}

/// The hundreds, tens and ones of the value.
///
/// # Example
/// `246u8 => [2, 4, 6]`
#[inline]
pub(super) fn bcd(value: u8) -> [u8; 3] {
    [value / 100, value / 10 % 10, value % 10]
}

impl ChipOpcodes for ChipSet {
    fn clear(&mut self) -> ProgramCounterStep {
        self.display.clear();
        ProgramCounterStep::None
    }

    fn ret(&mut self) -> Result<ProgramCounterStep, ProcessError> {
        let pc = self.stack.pop()?;
        Ok(ProgramCounterStep::Jump(pc))
    }

    fn call(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError> {
        // the program counter already points to the instruction after the call
        self.stack.push(self.registers.get_pc())?;
        Ok(ProgramCounterStep::Jump(nnn))
    }

    fn skip_const(&self, x: usize, nn: u8, equal: bool) -> ProgramCounterStep {
        ProgramCounterStep::cond((self.registers.get(x) == nn) == equal)
    }

    fn skip_register(&self, x: usize, y: usize, equal: bool) -> ProgramCounterStep {
        ProgramCounterStep::cond((self.registers.get(x) == self.registers.get(y)) == equal)
    }

    fn load(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        self.registers.set(x, nn);
        ProgramCounterStep::None
    }

    fn add(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // let VX overflow, but ignore carry
        let res = self.registers.get(x).wrapping_add(nn);
        self.registers.set(x, res);
        ProgramCounterStep::None
    }

    fn alu(&mut self, op: AluOp, x: usize, y: usize) -> ProgramCounterStep {
        let (res, flag) = alu(
            op,
            self.registers.get(x),
            self.registers.get(y),
            self.quirks.shift_uses_vy,
        );
        self.registers.set(x, res);
        // VF is written last, so the flag wins when X is F
        if let Some(flag) = flag {
            self.registers.set_flag(flag);
        }
        ProgramCounterStep::None
    }

    fn set_index(&mut self, nnn: u16) -> ProgramCounterStep {
        self.registers.set_index(nnn);
        ProgramCounterStep::None
    }

    fn jump_offset(&self, nnn: u16, x: usize) -> ProgramCounterStep {
        let register = if self.quirks.jump_uses_vx { x } else { 0 };
        let offset = self.registers.get(register) as u16;
        ProgramCounterStep::Jump(nnn.wrapping_add(offset))
    }

    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep {
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers.set(x, rand[0] ^ nn);
        ProgramCounterStep::None
    }

    fn draw(&mut self, x: usize, y: usize, n: u8) -> ProgramCounterStep {
        let sprite = self.memory.read_range(self.registers.get_index(), n as usize);
        let collision = self.display.draw(self.registers.get(x), self.registers.get(y), &sprite);
        self.registers.set_flag(collision);
        ProgramCounterStep::None
    }

    fn key(&self, op: KeyOp, x: usize) -> ProgramCounterStep {
        let key = (self.registers.get(x) & keyboard::KEY_MASK) as usize;
        let pressed = self.keypad.is_pressed(key);
        ProgramCounterStep::cond(pressed == (op == KeyOp::Pressed))
    }

    fn misc(&mut self, op: MiscOp, x: usize) -> (ProgramCounterStep, Operation) {
        let vx = self.registers.get(x);
        let index = self.registers.get_index();

        match op {
            MiscOp::GetDelayTimer => self.registers.set(x, self.timers.get_delay()),
            MiscOp::AwaitKeyPress => match self.keypad.wait_for_key() {
                Some(key) => self.registers.set(x, key),
                None => {
                    log::debug!("key wait interrupted");
                    // point back at the wait, so it would run again
                    let pc = self.registers.get_pc().wrapping_sub(memory::opcodes::SIZE);
                    return (ProgramCounterStep::Jump(pc), Operation::Interrupted);
                }
            },
            MiscOp::SetDelayTimer => self.timers.set_delay(vx),
            MiscOp::SetSoundTimer => self.timers.set_sound(vx),
            MiscOp::AddVxToI => {
                let res = index.wrapping_add(vx as u16);
                self.registers.set_index(res);
                if self.quirks.index_overflow_flag {
                    self.registers.set_flag(res >= memory::SIZE as u16);
                }
            }
            MiscOp::SetIToSprite => {
                let glyph = (vx & keyboard::KEY_MASK) as u16;
                self.registers
                    .set_index(fontset::LOCATION + fontset::GLYPH_SIZE * glyph);
            }
            MiscOp::StoreBCD => {
                for (offset, digit) in bcd(vx).iter().enumerate() {
                    self.memory.write(index.wrapping_add(offset as u16), *digit);
                }
            }
            MiscOp::StoreV0ToVx => {
                for (offset, value) in self.registers.range(x).iter().enumerate() {
                    self.memory.write(index.wrapping_add(offset as u16), *value);
                }
                self.advance_index(index, x);
            }
            MiscOp::FillV0ToVx => {
                let data = self.memory.read_range(index, x + 1);
                self.registers.range_mut(x).copy_from_slice(&data);
                self.advance_index(index, x);
            }
        }

        (ProgramCounterStep::None, Operation::None)
    }
}

impl ChipSet {
    /// `FX55`/`FX65` move `I` behind the accessed block under the quirk.
    fn advance_index(&mut self, index: u16, x: usize) {
        if self.quirks.load_store_increments_index {
            self.registers.set_index(index.wrapping_add(x as u16 + 1));
        }
    }
}
