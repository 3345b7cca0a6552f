use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can go wrong before the run starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The rom is empty, there is nothing to execute.")]
    EmptyRom,
    #[error("The rom is {len} bytes long, but at most {max} bytes fit into memory.")]
    RomTooLarge { len: usize, max: usize },
    #[error("Unable to read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("A font needs exactly 80 glyph bytes, but {0} were found.")]
    FontLength(usize),
    #[error("The instruction rate has to be at least one per second.")]
    ZeroInstructionRate,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack overflow, the stack is full!")]
    Overflow,
    #[error("Stack underflow, the stack is empty!")]
    Underflow,
}

/// The fatal failures raised while stepping the chip.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Execution stopped: {0}")]
    Process(#[from] ProcessError),
}
