//! The full implementation of the chip8 emulator core, from the opcodes to an option to pretty
//! print the state.
mod chipset;
mod opcodes;
mod print;
mod registers;
mod stack;

/// reexport chipset structs and data for simpler usage
pub use chipset::*;
pub use registers::Registers;
pub use stack::Stack;
