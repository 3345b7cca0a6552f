//! Opcode abstractions, functionality and constants.
use crate::{definitions::memory, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from the two bytes making it up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// assert_eq!(build_opcode(0x1E, 0xDA), 0x1EDA);
/// ```
#[inline]
pub fn build_opcode(high: u8, low: u8) -> Opcode {
    Opcode::from_be_bytes([high, low])
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// The opcode family `T` of `TXYN`, shifted down into a nibble.
    fn t(&self) -> u8;

    /// The `NNN` of `TNNN`, a twelve bit address.
    fn nnn(&self) -> u16;

    /// The `X` and `NN` of `TXNN`, a register index and a constant.
    fn xnn(&self) -> (usize, u8);

    /// The `X`, `Y` and `N` of `TXYN`, two register indices and a nibble.
    fn xyn(&self) -> (usize, usize, u8);

    /// The `X` of `TXNN`, a register index.
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> u16 {
        self & OPCODE_MASK_0FFF
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        (self.x(), (self & OPCODE_MASK_00FF) as u8)
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, u8) {
        const MASK_0F00: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        let y = ((self & MASK_0F00) >> NIBBLE) as usize;
        let n = (self & OPCODE_MASK_000F) as u8;
        (self.x(), y, n)
    }

    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }
}

/// Generates the lookup from the sub opcode selector to the operation.
macro_rules! implSubOpcode {
    ($type_name:ident : $type_from:ty : $( $key:literal => $val:ident ),+ $(,)? ) => {
        impl $type_name {
            fn decode(value: $type_from) -> Option<Self> {
                match value {
                    $(
                        $key => Some($type_name::$val),
                    )+
                    _ => None,
                }
            }
        }
    };
}

/// The register to register operations of the `8XYT` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Assign,
    Or,
    And,
    Xor,
    Add,
    Sub,
    ShiftRight,
    SubReverse,
    ShiftLeft,
}

implSubOpcode!(AluOp : u8 :
    // 8XY0
    // Sets VX to the value of VY.
    0x0 => Assign,
    // 8XY1
    // Sets VX to VX or VY.
    0x1 => Or,
    // 8XY2
    // Sets VX to VX and VY.
    0x2 => And,
    // 8XY3
    // Sets VX to VX xor VY.
    0x3 => Xor,
    // 8XY4
    // Adds VY to VX. VF is set to 1 when there's a carry, and to 0 when there isn't.
    0x4 => Add,
    // 8XY5
    // VY is subtracted from VX. VF is set to 0 when there's a borrow, and 1 when there
    // isn't.
    0x5 => Sub,
    // 8XY6
    // Stores the least significant bit of the source in VF and shifts it right by 1.
    0x6 => ShiftRight,
    // 8XY7
    // Sets VX to VY minus VX. VF is set to 0 when there's a borrow, and 1 when there
    // isn't.
    0x7 => SubReverse,
    // 8XYE
    // Stores the most significant bit of the source in VF and shifts it left by 1.
    0xE => ShiftLeft,
);

/// The keypad conditions of the `EXTT` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    Pressed,
    NotPressed,
}

implSubOpcode!(KeyOp : u8 :
    // EX9E
    // Skips the next instruction if the key stored in VX is pressed.
    0x9E => Pressed,
    // EXA1
    // Skips the next instruction if the key stored in VX isn't pressed.
    0xA1 => NotPressed,
);

/// The timer, keypad and memory operations of the `FXTT` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOp {
    GetDelayTimer,
    AwaitKeyPress,
    SetDelayTimer,
    SetSoundTimer,
    AddVxToI,
    SetIToSprite,
    StoreBCD,
    StoreV0ToVx,
    FillV0ToVx,
}

implSubOpcode!(MiscOp : u8 :
    // FX07
    0x07 => GetDelayTimer,
    // FX0A
    0x0A => AwaitKeyPress,
    // FX15
    0x15 => SetDelayTimer,
    // FX18
    0x18 => SetSoundTimer,
    // FX1E
    0x1E => AddVxToI,
    // FX29
    0x29 => SetIToSprite,
    // FX33
    0x33 => StoreBCD,
    // FX55
    0x55 => StoreV0ToVx,
    // FX65
    0x65 => FillV0ToVx,
);

/// The decoded form of a single opcode, produced once per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { nnn: u16 },
    /// `2NNN`
    Call { nnn: u16 },
    /// `3XNN`
    SkipEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipNotEqual { x: usize, nn: u8 },
    /// `5XY0`
    SkipEqualRegister { x: usize, y: usize },
    /// `6XNN`
    Load { x: usize, nn: u8 },
    /// `7XNN`
    Add { x: usize, nn: u8 },
    /// `8XYT`
    Alu { op: AluOp, x: usize, y: usize },
    /// `9XY0`
    SkipNotEqualRegister { x: usize, y: usize },
    /// `ANNN`
    SetIndex { nnn: u16 },
    /// `BNNN`, `x` is only consulted by the jump quirk
    JumpOffset { nnn: u16, x: usize },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: u8 },
    /// `EXTT`
    Key { op: KeyOp, x: usize },
    /// `FXTT`
    Misc { op: MiscOp, x: usize },
    /// Anything else, executed as a no-op.
    Unknown(Opcode),
}

impl From<Opcode> for Instruction {
    fn from(value: Opcode) -> Self {
        let (x, y, n) = value.xyn();
        let (_, nn) = value.xnn();
        let nnn = value.nnn();

        let decoded = match value.t() {
            0x0 => match value {
                0x00E0 => Some(Instruction::Clear),
                0x00EE => Some(Instruction::Return),
                _ => None,
            },
            0x1 => Some(Instruction::Jump { nnn }),
            0x2 => Some(Instruction::Call { nnn }),
            0x3 => Some(Instruction::SkipEqual { x, nn }),
            0x4 => Some(Instruction::SkipNotEqual { x, nn }),
            0x5 if n == 0 => Some(Instruction::SkipEqualRegister { x, y }),
            0x6 => Some(Instruction::Load { x, nn }),
            0x7 => Some(Instruction::Add { x, nn }),
            0x8 => AluOp::decode(n).map(|op| Instruction::Alu { op, x, y }),
            0x9 if n == 0 => Some(Instruction::SkipNotEqualRegister { x, y }),
            0xA => Some(Instruction::SetIndex { nnn }),
            0xB => Some(Instruction::JumpOffset { nnn, x }),
            0xC => Some(Instruction::Random { x, nn }),
            0xD => Some(Instruction::Draw { x, y, n }),
            0xE => KeyOp::decode(nn).map(|op| Instruction::Key { op, x }),
            0xF => MiscOp::decode(nn).map(|op| Instruction::Misc { op, x }),
            _ => None,
        };

        decoded.unwrap_or(Instruction::Unknown(value))
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the additional program counter movement of an
/// instruction, on top of the step taken during the fetch.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will skip the following instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(u16),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::None, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::None
        }
    }

    /// Applies the step to the given (already advanced) program counter.
    #[inline]
    pub fn apply(&self, pc: u16) -> u16 {
        match *self {
            ProgramCounterStep::None => pc,
            ProgramCounterStep::Skip => pc.wrapping_add(memory::opcodes::SIZE),
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter by a step.
    fn step_counter(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the run loop.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The framebuffer changed and shall be presented.
    Draw,
    /// A key wait was cancelled, the run shall end.
    Interrupted,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter)
/// trait, as the movement decided by each family is applied by
/// [`calc`](ChipOpcodes::calc).
pub trait ChipOpcodes: ProgramCounter {
    /// will execute a single decoded instruction
    fn calc(&mut self, instruction: Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step = match instruction {
            Instruction::Clear => {
                operation = Operation::Draw;
                self.clear()
            }
            Instruction::Return => self.ret()?,
            Instruction::Jump { nnn } => ProgramCounterStep::Jump(nnn),
            Instruction::Call { nnn } => self.call(nnn)?,
            Instruction::SkipEqual { x, nn } => self.skip_const(x, nn, true),
            Instruction::SkipNotEqual { x, nn } => self.skip_const(x, nn, false),
            Instruction::SkipEqualRegister { x, y } => self.skip_register(x, y, true),
            Instruction::SkipNotEqualRegister { x, y } => self.skip_register(x, y, false),
            Instruction::Load { x, nn } => self.load(x, nn),
            Instruction::Add { x, nn } => self.add(x, nn),
            Instruction::Alu { op, x, y } => self.alu(op, x, y),
            Instruction::SetIndex { nnn } => self.set_index(nnn),
            Instruction::JumpOffset { nnn, x } => self.jump_offset(nnn, x),
            Instruction::Random { x, nn } => self.random(x, nn),
            Instruction::Draw { x, y, n } => {
                operation = Operation::Draw;
                self.draw(x, y, n)
            }
            Instruction::Key { op, x } => self.key(op, x),
            Instruction::Misc { op, x } => {
                let (step, op) = self.misc(op, x);
                operation = op;
                step
            }
            Instruction::Unknown(opcode) => {
                log::debug!("ignoring unknown opcode {:#06X}", opcode);
                ProgramCounterStep::None
            }
        };

        self.step_counter(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    fn clear(&mut self) -> ProgramCounterStep;

    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    ///
    /// Fails if there is no subroutine to return from.
    fn ret(&mut self) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    ///
    /// Fails if the maximal nesting depth is already reached.
    fn call(&mut self, nnn: u16) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_const(&self, x: usize, nn: u8, equal: bool) -> ProgramCounterStep;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_register(&self, x: usize, y: usize, equal: bool) -> ProgramCounterStep;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `8XYT` - Assign, BitOp and Math operations between `VX` and `VY`,
    ///   see [`AluOp`](AluOp).
    fn alu(&mut self, op: AluOp, x: usize, y: usize) -> ProgramCounterStep;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, nnn: u16) -> ProgramCounterStep;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`
    ///   (or `VX` under the jump quirk).
    fn jump_offset(&self, nnn: u16, x: usize) -> ProgramCounterStep;

    /// - `CXNN` - Rand     - `Vx=rand()^NN`        - Sets `VX` to a random byte xor `NN`.
    fn random(&mut self, x: usize, nn: u8) -> ProgramCounterStep;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws an `8 x N` sprite read from `I` at
    ///   `(VX, VY)`; `VF` is set to `1` if any lit pixel was erased, else `0`.
    fn draw(&mut self, x: usize, y: usize, n: u8) -> ProgramCounterStep;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, op: KeyOp, x: usize) -> ProgramCounterStep;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`, flagging a range overflow past `0xFFF`.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the glyph of the character in `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the hundreds, tens and ones of `VX` at `I`, `I+1`, `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) from memory starting at `I`.
    fn misc(&mut self, op: MiscOp, x: usize) -> (ProgramCounterStep, Operation);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple() {
        let opcode: Opcode = 0x00E0;
        assert_eq!(Instruction::from(opcode), Instruction::Clear);
        let opcode: Opcode = 0x00E1;
        assert_eq!(Instruction::from(opcode), Instruction::Unknown(0x00E1));
    }

    #[test]
    fn test_decode_multiple() {
        let tests = [
            (0x00E0 as Opcode, Instruction::Clear),
            (0x00EE, Instruction::Return),
            (0x0123, Instruction::Unknown(0x0123)),
            (0x1919, Instruction::Jump { nnn: 0x919 }),
            (0x2222, Instruction::Call { nnn: 0x222 }),
            (0x3123, Instruction::SkipEqual { x: 0x1, nn: 0x23 }),
            (0x4123, Instruction::SkipNotEqual { x: 0x1, nn: 0x23 }),
            (0x5120, Instruction::SkipEqualRegister { x: 0x1, y: 0x2 }),
            (0x5121, Instruction::Unknown(0x5121)),
            (0x6123, Instruction::Load { x: 0x1, nn: 0x23 }),
            (0x7123, Instruction::Add { x: 0x1, nn: 0x23 }),
            (
                0x8120,
                Instruction::Alu {
                    op: AluOp::Assign,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (
                0x8124,
                Instruction::Alu {
                    op: AluOp::Add,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (
                0x8127,
                Instruction::Alu {
                    op: AluOp::SubReverse,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (
                0x812E,
                Instruction::Alu {
                    op: AluOp::ShiftLeft,
                    x: 0x1,
                    y: 0x2,
                },
            ),
            (0x8128, Instruction::Unknown(0x8128)),
            (0x9120, Instruction::SkipNotEqualRegister { x: 0x1, y: 0x2 }),
            (0x9121, Instruction::Unknown(0x9121)),
            (0xA222, Instruction::SetIndex { nnn: 0x222 }),
            (0xB222, Instruction::JumpOffset { nnn: 0x222, x: 0x2 }),
            (0xC123, Instruction::Random { x: 0x1, nn: 0x23 }),
            (
                0xD123,
                Instruction::Draw {
                    x: 0x1,
                    y: 0x2,
                    n: 0x3,
                },
            ),
            (
                0xE19E,
                Instruction::Key {
                    op: KeyOp::Pressed,
                    x: 0x1,
                },
            ),
            (
                0xE1A1,
                Instruction::Key {
                    op: KeyOp::NotPressed,
                    x: 0x1,
                },
            ),
            (0xE111, Instruction::Unknown(0xE111)),
            (
                0xF307,
                Instruction::Misc {
                    op: MiscOp::GetDelayTimer,
                    x: 0x3,
                },
            ),
            (
                0xF00A,
                Instruction::Misc {
                    op: MiscOp::AwaitKeyPress,
                    x: 0x0,
                },
            ),
            (
                0xF01E,
                Instruction::Misc {
                    op: MiscOp::AddVxToI,
                    x: 0x0,
                },
            ),
            (
                0xFF65,
                Instruction::Misc {
                    op: MiscOp::FillV0ToVx,
                    x: 0xF,
                },
            ),
            (0xF0AA, Instruction::Unknown(0xF0AA)),
        ];
        for (value, res) in tests.iter() {
            assert_eq!(Instruction::from(*value), *res, "opcode {:#06X}", value);
        }
    }

    #[test]
    fn test_program_counter_step() {
        assert_eq!(ProgramCounterStep::None.apply(0x202), 0x202);
        assert_eq!(ProgramCounterStep::Skip.apply(0x202), 0x204);
        assert_eq!(ProgramCounterStep::Jump(0x300).apply(0x202), 0x300);
    }
}
