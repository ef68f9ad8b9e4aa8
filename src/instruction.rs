use std::fmt;

use crate::opcode::Opcode;

/// A decoded Chip-8 instruction.
///
/// `usize` operands are register indices 0x0..=0xF, `u16` operands are 12-bit
/// addresses and `u8` operands are immediates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 0nnn; a native machine routine, accepted but ignored
    Sys(u16),
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEqImm(usize, u8),
    /// 4xkk
    SkipNeImm(usize, u8),
    /// 5xy0
    SkipEqReg(usize, usize),
    /// 6xkk
    LoadImm(usize, u8),
    /// 7xkk
    AddImm(usize, u8),
    /// 8xy0
    Move(usize, usize),
    /// 8xy1
    Or(usize, usize),
    /// 8xy2
    And(usize, usize),
    /// 8xy3
    Xor(usize, usize),
    /// 8xy4
    AddReg(usize, usize),
    /// 8xy5
    Sub(usize, usize),
    /// 8xy6
    ShiftRight(usize, usize),
    /// 8xy7
    SubN(usize, usize),
    /// 8xyE
    ShiftLeft(usize, usize),
    /// 9xy0
    SkipNeReg(usize, usize),
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxkk
    Random(usize, u8),
    /// Dxyn
    Draw(usize, usize, u8),
    /// Ex9E
    SkipPressed(usize),
    /// ExA1
    SkipNotPressed(usize),
    /// Fx07
    ReadDelay(usize),
    /// Fx0A
    AwaitKey(usize),
    /// Fx15
    SetDelay(usize),
    /// Fx18
    SetSound(usize),
    /// Fx1E
    AddIndex(usize),
    /// Fx29
    LoadGlyph(usize),
    /// Fx33
    Bcd(usize),
    /// Fx55
    Store(usize),
    /// Fx65
    Load(usize),
}

impl Instruction {
    /// Selects the Instruction encoded by an opcode, if there is one
    pub fn decode(op: u16) -> Option<Self> {
        use Instruction::*;

        let (x, y) = (op.x(), op.y());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Cls,
            (0x0, 0x0, 0xE, 0xE) => Ret,
            (0x0, ..) => Sys(op.nnn()),
            (0x1, ..) => Jump(op.nnn()),
            (0x2, ..) => Call(op.nnn()),
            (0x3, ..) => SkipEqImm(x, op.kk()),
            (0x4, ..) => SkipNeImm(x, op.kk()),
            (0x5, .., 0x0) => SkipEqReg(x, y),
            (0x6, ..) => LoadImm(x, op.kk()),
            (0x7, ..) => AddImm(x, op.kk()),
            (0x8, .., 0x0) => Move(x, y),
            (0x8, .., 0x1) => Or(x, y),
            (0x8, .., 0x2) => And(x, y),
            (0x8, .., 0x3) => Xor(x, y),
            (0x8, .., 0x4) => AddReg(x, y),
            (0x8, .., 0x5) => Sub(x, y),
            (0x8, .., 0x6) => ShiftRight(x, y),
            (0x8, .., 0x7) => SubN(x, y),
            (0x8, .., 0xE) => ShiftLeft(x, y),
            (0x9, .., 0x0) => SkipNeReg(x, y),
            (0xA, ..) => LoadIndex(op.nnn()),
            (0xB, ..) => JumpOffset(op.nnn()),
            (0xC, ..) => Random(x, op.kk()),
            (0xD, ..) => Draw(x, y, op.n()),
            (0xE, _, 0x9, 0xE) => SkipPressed(x),
            (0xE, _, 0xA, 0x1) => SkipNotPressed(x),
            (0xF, _, 0x0, 0x7) => ReadDelay(x),
            (0xF, _, 0x0, 0xA) => AwaitKey(x),
            (0xF, _, 0x1, 0x5) => SetDelay(x),
            (0xF, _, 0x1, 0x8) => SetSound(x),
            (0xF, _, 0x1, 0xE) => AddIndex(x),
            (0xF, _, 0x2, 0x9) => LoadGlyph(x),
            (0xF, _, 0x3, 0x3) => Bcd(x),
            (0xF, _, 0x5, 0x5) => Store(x),
            (0xF, _, 0x6, 0x5) => Load(x),
            _ => return None,
        };
        Some(instruction)
    }

    /// Whether executing this may move the program counter somewhere other
    /// than the next instruction
    pub fn is_control_flow(&self) -> bool {
        use Instruction::*;

        matches!(
            self,
            Ret | Jump(_)
                | Call(_)
                | JumpOffset(_)
                | SkipEqImm(..)
                | SkipNeImm(..)
                | SkipEqReg(..)
                | SkipNeReg(..)
                | SkipPressed(_)
                | SkipNotPressed(_)
        )
    }
}

/// Assembler-style mnemonics, e.g. `ADD V1, 0x03` or `DRW V0, V1, 5`
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Sys(addr) => write!(f, "SYS {:#05X}", addr),
            Jump(addr) => write!(f, "JP {:#05X}", addr),
            Call(addr) => write!(f, "CALL {:#05X}", addr),
            SkipEqImm(x, kk) => write!(f, "SE V{:X}, {:#04X}", x, kk),
            SkipNeImm(x, kk) => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            SkipEqReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm(x, kk) => write!(f, "LD V{:X}, {:#04X}", x, kk),
            AddImm(x, kk) => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x, y) => write!(f, "SHR V{:X} {{, V{:X}}}", x, y),
            SubN(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x, y) => write!(f, "SHL V{:X} {{, V{:X}}}", x, y),
            SkipNeReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            JumpOffset(addr) => write!(f, "JP V0, {:#05X}", addr),
            Random(x, kk) => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipPressed(x) => write!(f, "SKP V{:X}", x),
            SkipNotPressed(x) => write!(f, "SKNP V{:X}", x),
            ReadDelay(x) => write!(f, "LD V{:X}, DT", x),
            AwaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            LoadGlyph(x) => write!(f, "LD F, V{:X}", x),
            Bcd(x) => write!(f, "LD B, V{:X}", x),
            Store(x) => write!(f, "LD [I], V{:X}", x),
            Load(x) => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
