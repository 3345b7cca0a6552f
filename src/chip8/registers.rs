use crate::definitions::{
    cpu::{self, register},
    memory::ADDRESS_MASK,
};

/// `8-bit` data registers named `V0` to `VF`, the index register `I` and
/// the program counter.
///
/// The `VF` register doubles as a flag for some instructions. In an addition
/// operation, `VF` is the carry flag, while in subtraction, it is the "no
/// borrow" flag. In the draw instruction `VF` is set upon pixel collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    v: [u8; register::SIZE],
    /// Kept as the full 16 bits so that `FX1E` can tell an overflow past
    /// `0xFFF` apart, memory accesses mask it.
    i: u16,
    pc: u16,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// All registers zeroed and the program counter at the program start.
    pub fn new() -> Self {
        Self {
            v: [0; register::SIZE],
            i: 0,
            pc: cpu::PROGRAM_COUNTER,
        }
    }

    /// Panics if the index is not in `0x0..=0xF`.
    #[inline]
    pub fn get(&self, x: usize) -> u8 {
        assert!(x < register::SIZE, "There is no register V{:X}.", x);
        self.v[x]
    }

    /// Panics if the index is not in `0x0..=0xF`.
    #[inline]
    pub fn set(&mut self, x: usize, value: u8) {
        assert!(x < register::SIZE, "There is no register V{:X}.", x);
        self.v[x] = value;
    }

    /// Writes `1` or `0` into `VF`.
    #[inline]
    pub fn set_flag(&mut self, flag: bool) {
        self.v[register::LAST] = flag as u8;
    }

    pub fn get_flag(&self) -> u8 {
        self.v[register::LAST]
    }

    /// `V0` up to and including `VX`.
    pub fn range(&self, x: usize) -> &[u8] {
        assert!(x < register::SIZE, "There is no register V{:X}.", x);
        &self.v[..=x]
    }

    /// `V0` up to and including `VX`.
    pub fn range_mut(&mut self, x: usize) -> &mut [u8] {
        assert!(x < register::SIZE, "There is no register V{:X}.", x);
        &mut self.v[..=x]
    }

    pub fn get_index(&self) -> u16 {
        self.i
    }

    pub fn set_index(&mut self, value: u16) {
        self.i = value;
    }

    pub fn get_pc(&self) -> u16 {
        self.pc
    }

    /// The program counter always points into the ram.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value & ADDRESS_MASK;
    }

    /// All the data registers.
    pub fn as_slice(&self) -> &[u8] {
        &self.v[..]
    }
}
