//! The definitions and the run-time configuration.

use crate::resources::Font;

/// The memory definitions
pub mod memory {
    /// The size of the chipset ram
    pub const SIZE: usize = 0x1000; // 4096

    /// Masks any address into the ram
    pub const ADDRESS_MASK: u16 = (SIZE - 1) as u16;

    /// opcode information
    pub mod opcodes {
        /// The step used for calculating the program counter increments
        pub const SIZE: u16 = 2;
    }
}

/// The definitions for the cpu
pub mod cpu {
    /// The starting point for the program
    pub const PROGRAM_COUNTER: u16 = 0x0200;
    /// The largest rom that fits behind the program counter start
    pub const MAX_ROM_SIZE: usize = super::memory::SIZE - PROGRAM_COUNTER as usize;
    /// The default amount of instructions executed per second.
    pub const HERTZ: u32 = 500;

    /// The definitions needed for the register
    pub mod register {
        /// The size of the chip set registers
        pub const SIZE: usize = 16;
        /// The last entry of the registers, doubles as the flag register
        pub const LAST: usize = SIZE - 1;
    }

    /// The stack definitions
    pub mod stack {
        /// The count of nesting entries
        pub const SIZE: usize = 16;
    }
}

/// The timer definitions
pub mod timer {
    use std::time::Duration;

    /// The amount of hertz the clocks run at
    pub const HERTZ: u64 = 60;
    /// The tick period of the timer clock
    pub const INTERVAL: Duration = Duration::from_micros(1_000_000 / HERTZ);
}

/// The display definitions
pub mod display {
    /// The amount of pixels per row
    pub const WIDTH: usize = 64;
    /// The amount of rows
    pub const HEIGHT: usize = 32;
    /// The amount of pixels the display has
    pub const RESOLUTION: usize = WIDTH * HEIGHT;
    /// The width of every sprite row in pixels
    pub const SPRITE_WIDTH: usize = 8;

    /// The color of a lit pixel as `0xRRGGBB`
    pub const FOREGROUND: u32 = 0x01_2F_4A;
    /// The color of an unlit pixel as `0xRRGGBB`
    pub const BACKGROUND: u32 = 0x81_BE_CE;

    /// The fontset information
    pub mod fontset {
        /// Is the location of the beginning to the font in memory
        pub const LOCATION: u16 = 0x50;
        /// The amount of bytes a single glyph takes up
        pub const GLYPH_SIZE: u16 = 5;
        /// The amount of bytes of the whole font
        pub const SIZE: usize = 16 * GLYPH_SIZE as usize;
        /// The font set character to be rendered on the screen
        pub const FONTSET: [u8; SIZE] = [
            0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
            0x20, 0x60, 0x20, 0x20, 0x70, // 1
            0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
            0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
            0x90, 0x90, 0xF0, 0x10, 0x10, // 4
            0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
            0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
            0xF0, 0x10, 0x20, 0x40, 0x40, // 7
            0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
            0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
            0xF0, 0x90, 0xF0, 0x90, 0x90, // A
            0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
            0xF0, 0x80, 0x80, 0x80, 0xF0, // C
            0xE0, 0x90, 0x90, 0x90, 0xE0, // D
            0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
            0xF0, 0x80, 0xF0, 0x80, 0x80, // F
        ];
    }
}

/// The definitions needed for correct keyboard definitions.
pub mod keyboard {
    /// all the different keyboard entries
    pub const SIZE: usize = 16;
    /// Masks a register value into a valid key index
    pub const KEY_MASK: u8 = (SIZE - 1) as u8;
}

/// The historically divergent instruction behaviours. Both variants of each
/// are found in real programs, so they are picked once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6`/`8XYE` shift `VY` into `VX` instead of shifting `VX` in place.
    pub shift_uses_vy: bool,
    /// `BNNN` adds `VX` (with `X` the high nibble of `NNN`) instead of `V0`.
    pub jump_uses_vx: bool,
    /// `FX55`/`FX65` leave `I` pointing behind the last accessed byte.
    pub load_store_increments_index: bool,
    /// `FX1E` writes `VF` (`1` on overflow past `0xFFF`, else `0`). When
    /// disabled `VF` is left untouched.
    pub index_overflow_flag: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Self {
            shift_uses_vy: false,
            jump_uses_vx: false,
            load_store_increments_index: false,
            index_overflow_flag: true,
        }
    }
}

/// Everything fixed for the lifetime of a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// How many instructions the instruction loop executes per second.
    /// A runner refuses `0`.
    pub instructions_per_second: u32,
    /// The selected quirk behaviours.
    pub quirks: Quirks,
    /// The glyph table copied into the font region.
    pub font: Font,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_second: cpu::HERTZ,
            quirks: Quirks::default(),
            font: Font::default(),
        }
    }
}

impl Config {
    /// The period of a single instruction loop iteration, a rate of `0`
    /// is taken as `1`.
    pub fn cpu_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(1) / self.instructions_per_second.max(1)
    }
}
