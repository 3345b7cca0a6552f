//! The flat 4 KiB ram of the chip.
use crate::{
    definitions::{
        cpu,
        display::fontset,
        memory::{self, ADDRESS_MASK},
    },
    opcode::{self, Opcode},
    resources::{Font, Rom},
    ConfigError,
};

/// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
/// - `0x050-0x09F` - Used for the built in `4x5` pixel font set (`0-F`)
/// - `0x200-0xFFF` - Program ROM and work RAM
///
/// Every address is taken modulo `0x1000`, so there is no way to access
/// anything outside of the ram.
pub struct Memory {
    data: Box<[u8; memory::SIZE]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Will allocate the zero filled ram.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; memory::SIZE]),
        }
    }

    /// Reads the byte at the (wrapped) address.
    #[inline]
    pub fn read(&self, address: u16) -> u8 {
        self.data[(address & ADDRESS_MASK) as usize]
    }

    /// Writes the byte to the (wrapped) address.
    #[inline]
    pub fn write(&mut self, address: u16, value: u8) {
        self.data[(address & ADDRESS_MASK) as usize] = value;
    }

    /// Builds the big-endian opcode starting at the given pointer.
    ///
    /// # Example
    /// ```rust
    /// # use chip::memory::Memory;
    /// let mut memory = Memory::new();
    /// memory.write(0x200, 0x1E);
    /// memory.write(0x201, 0xDA);
    /// assert_eq!(memory.fetch(0x200), 0x1EDA);
    /// ```
    pub fn fetch(&self, pointer: u16) -> Opcode {
        opcode::build_opcode(self.read(pointer), self.read(pointer.wrapping_add(1)))
    }

    /// Copies `len` bytes starting at `from` (wrapping around the end of
    /// the ram) into a new buffer.
    pub fn read_range(&self, from: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read(from.wrapping_add(offset as u16)))
            .collect()
    }

    /// Copies the glyph table into the font region.
    pub fn load_font(&mut self, font: &Font) {
        let start = fontset::LOCATION as usize;
        self.data[start..(start + fontset::SIZE)].copy_from_slice(font.get_data());
    }

    /// Copies the program into the region starting at `0x200`.
    pub fn load_program(&mut self, rom: &Rom) -> Result<(), ConfigError> {
        let data = rom.get_data();
        if data.is_empty() {
            return Err(ConfigError::EmptyRom);
        }
        if data.len() > cpu::MAX_ROM_SIZE {
            return Err(ConfigError::RomTooLarge {
                len: data.len(),
                max: cpu::MAX_ROM_SIZE,
            });
        }
        let start = cpu::PROGRAM_COUNTER as usize;
        self.data[start..(start + data.len())].copy_from_slice(data);
        log::debug!("loaded {} program bytes at {:#06X}", data.len(), start);
        Ok(())
    }

    /// The whole ram.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}
