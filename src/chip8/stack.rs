use tinyvec::ArrayVec;

use crate::{definitions::cpu, StackError};

/// The stack is only used to store return addresses when subroutines are called. The original
/// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
/// `12` levels of nesting; modern implementations usually have more.
/// (here we are using `16`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    entries: ArrayVec<[u16; cpu::stack::SIZE]>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Will push the return address, fails if all the nesting levels are
    /// already in use.
    pub fn push(&mut self, pointer: u16) -> Result<(), StackError> {
        if self.entries.try_push(pointer).is_some() {
            return Err(StackError::Overflow);
        }
        log::debug!("pushed {:#06X} to the stack", pointer);
        Ok(())
    }

    /// Will pop the latest return address.
    pub fn pop(&mut self) -> Result<u16, StackError> {
        let pointer = self.entries.pop().ok_or(StackError::Underflow)?;
        log::debug!("popped {:#06X} from the stack", pointer);
        Ok(pointer)
    }

    /// The current nesting depth.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The return addresses from the bottom to the top.
    pub fn as_slice(&self) -> &[u16] {
        &self.entries[..]
    }
}
