//! A chip8 emulator core. The [`ChipSet`](chip8::ChipSet) holds the whole machine state and
//! executes one instruction per step, the [`Runner`](Runner) drives it at a fixed rate while a
//! worker thread ticks the timers at 60 hertz.
//!
//! Presenting the screen and playing the tone is left to the host through the
//! [`DisplayCommands`](devices::DisplayCommands) and [`AudioCommands`](devices::AudioCommands)
//! traits, the keys are fed in through the shared [`Keypad`](devices::Keypad).
pub mod chip8;
pub mod definitions;
pub mod devices;
pub mod memory;
pub mod opcode;
pub mod resources;
pub mod timer;
mod error;

// reexporting for convinience
mod runner;
pub use error::*;
pub use runner::*;
