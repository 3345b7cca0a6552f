use rand::RngCore;

use crate::{
    definitions::{memory, Config, Quirks},
    devices::{Framebuffer, Keypad},
    memory::Memory,
    opcode::{ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter, ProgramCounterStep},
    resources::Rom,
    timer::Timers,
    ConfigError, ProcessError,
};

use super::{Registers, Stack};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// The 4 KiB ram holding the font and the program.
    pub(super) memory: Memory,
    /// `V0` to `VF`, `I` and the program counter.
    pub(super) registers: Registers,
    /// The return addresses of the active subroutines.
    pub(super) stack: Stack,
    /// Delay and sound timer, shared with the timer clock.
    pub(super) timers: Timers,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`.
    pub(super) display: Framebuffer,
    /// The 16 keys, shared with the input source.
    pub(super) keypad: Keypad,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    /// The behaviours picked for this run.
    pub(super) quirks: Quirks,
}

impl ChipSet {
    /// will create a new chipset object with the font and the rom
    /// loaded into memory
    pub fn new(rom: &Rom, config: &Config) -> Result<Self, ConfigError> {
        let mut ram = Memory::new();
        ram.load_font(&config.font);
        ram.load_program(rom)?;

        log::info!(
            "loaded rom '{}' ({} bytes) with {:?}",
            rom.get_name(),
            rom.get_data().len(),
            config.quirks
        );

        Ok(Self {
            name: rom.get_name().to_string(),
            opcode: 0,
            memory: ram,
            registers: Registers::new(),
            stack: Stack::new(),
            timers: Timers::new(),
            display: Framebuffer::new(),
            keypad: Keypad::new(),
            rng: Box::new(rand::rngs::OsRng),
            quirks: config.quirks,
        })
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn with_rng<R>(mut self, rng: R) -> Self
    where
        R: RngCore + Send + 'static,
    {
        self.rng = Box::new(rng);
        self
    }

    /// will advance the program by a single fetch, decode and execute cycle
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        let pc = self.registers.get_pc();
        self.opcode = self.memory.fetch(pc);
        log::trace!("{:#06X}: {:#06X}", pc, self.opcode);

        // the program counter points past the instruction while it executes
        self.registers.set_pc(pc.wrapping_add(memory::opcodes::SIZE));

        self.calc(Instruction::from(self.opcode))
    }

    /// The name of the loaded rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// The most recently fetched opcode.
    pub fn get_opcode(&self) -> Opcode {
        self.opcode
    }

    /// Will return the current display configuration
    pub fn get_display(&self) -> &Framebuffer {
        &self.display
    }

    /// The general purpose registers, `I` and the program counter.
    pub fn get_registers(&self) -> &Registers {
        &self.registers
    }

    /// The whole ram of the chip.
    pub fn get_memory(&self) -> &Memory {
        &self.memory
    }

    /// The return addresses of the pending subroutine calls.
    pub fn get_stack(&self) -> &Stack {
        &self.stack
    }

    /// A handle onto the timers, for the timer clock.
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// A handle onto the keypad, for the input source.
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The quirk behaviours chosen for this run.
    pub fn get_quirks(&self) -> Quirks {
        self.quirks
    }
}

impl ProgramCounter for ChipSet {
    fn step_counter(&mut self, step: ProgramCounterStep) {
        let pc = step.apply(self.registers.get_pc());
        self.registers.set_pc(pc);
    }
}
