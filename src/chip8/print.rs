//! The pretty print implementation of the [`ChipSet`](super::ChipSet).
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use std::fmt::{self, Write};

use super::ChipSet;
use crate::definitions::cpu;

/// The amount of entries per printed row.
const HEX_PRINT_STEP: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT_FILLAMENT: char = '\t';
const INDENT_SIZE: usize = 2;

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

/// Handles all the printing of the pointer values.
mod pointer_print {
    use std::fmt::{self, Write};

    /// will formatt the pointers according to definition
    pub(super) fn formatter(line: &mut String, from: usize, to: usize) -> fmt::Result {
        write!(line, "{:#06X} - {:#06X} :", from, to)
    }
}

/// handles printting of any and all of intergers.
mod integer_print {
    use super::{indent_helper, pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use std::fmt::{self, Write};

    /// will format all integer types
    pub(super) fn formatter<T>(line: &mut String, data: T) -> fmt::Result
    where
        T: fmt::UpperHex,
    {
        write!(line, "{:#06X}", data)
    }

    /// will pretty print all the integer data given
    pub(super) fn printer<T>(data: &[T], indent: usize) -> Result<String, fmt::Error>
    where
        T: fmt::UpperHex + Copy,
    {
        let mut res = String::new();
        for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
            let from = row * HEX_PRINT_STEP;
            indent_helper(&mut res, indent);
            pointer_print::formatter(&mut res, from, from + chunk.len() - 1)?;

            for entry in chunk {
                res.push(' ');
                formatter(&mut res, *entry)?;
            }
            res.push(END_OF_LINE);
        }

        // Remove unneded new line
        if res.ends_with(END_OF_LINE) {
            res.pop();
        }
        Ok(res)
    }
}

/// Handles all the opcode prints
mod opcode_print {
    use super::{indent_helper, integer_print, pointer_print, END_OF_LINE, HEX_PRINT_STEP};
    use crate::{
        definitions::{cpu, memory},
        memory::Memory,
        opcode::Opcode,
    };
    use once_cell::sync::Lazy;
    use std::fmt::{self, Write};

    /// The internal length of the given data
    /// as the data is stored as u8 and an opcode
    /// is u16 long
    const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE as usize;
    /// The values that are used when there are at lease two rows of zeros.
    const FILLER_BASE: &str = "...";

    /// Prepares the line that will be used, in the case that a row is only zeros.
    static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
        let mut formatted = String::new();
        // writing into a string can not fail
        let _ = integer_print::formatter(&mut formatted, 0u16);
        let length = formatted.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1)
            - FILLER_BASE.len();
        let filler = " ".repeat(length / 2);
        format!("{0}{1}{2}{1}{0}", formatted, filler, FILLER_BASE)
    });

    /// this struct will simulate a single row of opcodes (only in this context)
    struct Row {
        from: usize,
        to: usize,
        data: [Opcode; HEX_PRINT_STEP],
        only_null: bool,
    }

    /// using the fmt::Display` for simple printing of the data later on
    impl fmt::Display for Row {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let mut res = String::new();
            pointer_print::formatter(&mut res, self.from, self.to)?;
            res.push(' ');

            if self.only_null {
                res.push_str(&ZERO_FILLER);
            } else {
                let last = self.data.len() - 1;
                for (i, entry) in self.data.iter().enumerate() {
                    integer_print::formatter(&mut res, *entry)?;
                    if i != last {
                        res.push(' ');
                    }
                }
            }
            write!(f, "{}", res)
        }
    }

    /// will pretty print the program region of the memory, consecutive rows
    /// holding only zeros are merged into one
    pub(super) fn printer(ram: &Memory, indent: usize) -> Result<String, fmt::Error> {
        let mut rows: Vec<Row> = Vec::new();

        for from in (cpu::PROGRAM_COUNTER as usize..memory::SIZE).step_by(POINTER_INCREMENT) {
            let to = (from + POINTER_INCREMENT - 1).min(memory::SIZE - 1);

            let mut data = [0; HEX_PRINT_STEP];
            for (i, entry) in data.iter_mut().enumerate() {
                *entry = ram.fetch((from + i * memory::opcodes::SIZE as usize) as u16);
            }
            let only_null = data.iter().all(|&opcode| opcode == 0);

            let mut row = Row {
                from,
                to,
                data,
                only_null,
            };

            if only_null {
                if let Some(last_row) = rows.last() {
                    if last_row.only_null {
                        row.from = last_row.from;
                        rows.pop();
                    }
                }
            }
            rows.push(row)
        }

        let mut string = String::new();
        for row in rows {
            indent_helper(&mut string, indent);
            write!(string, "{}{}", row, END_OF_LINE)?;
        }
        if string.ends_with(END_OF_LINE) {
            string.pop();
        }
        Ok(string)
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // prepate the rom name
        let mut nam = String::with_capacity(INDENT_SIZE + self.name.len());
        indent_helper(&mut nam, INDENT_SIZE);
        nam.push_str(&self.name);

        let mut opc = String::new();
        indent_helper(&mut opc, INDENT_SIZE);
        integer_print::formatter(&mut opc, self.opcode)?;

        let mut prc = String::new();
        indent_helper(&mut prc, INDENT_SIZE);
        integer_print::formatter(&mut prc, self.registers.get_pc())?;

        let mut idx = String::new();
        indent_helper(&mut idx, INDENT_SIZE);
        integer_print::formatter(&mut idx, self.registers.get_index())?;

        let mut tim = String::new();
        indent_helper(&mut tim, INDENT_SIZE);
        write!(tim, "delay ")?;
        integer_print::formatter(&mut tim, self.timers.get_delay())?;
        write!(tim, " sound ")?;
        integer_print::formatter(&mut tim, self.timers.get_sound())?;

        let reg = integer_print::printer(self.registers.as_slice(), INDENT_SIZE)?;

        // handle stack specially as it needes to be filled up if empty
        let mut stack = [0u16; cpu::stack::SIZE];
        stack[..self.stack.len()].copy_from_slice(self.stack.as_slice());
        let sta = integer_print::printer(&stack, INDENT_SIZE)?;

        let mem = opcode_print::printer(&self.memory, INDENT_SIZE)?;

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}\n\
                \tOpcode :\n{}\n\
                \tProgram Counter :\n{}\n\
                \tIndex :\n{}\n\
                \tTimers :\n{}\n\
                \tRegister :\n{}\n\
                \tStack (depth {}) :\n{}\n\
                \tMemory :\n{}\n\
                }}",
            nam,
            opc,
            prc,
            idx,
            tim,
            reg,
            self.stack.len(),
            sta,
            mem
        )
    }
}
