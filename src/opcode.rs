/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian. Which instruction an
/// opcode encodes depends on some combination of:
/// - `(n, _, _, _)` the family; every opcode has one
/// - `(_, _, _, n)` the operation within the ALU family `8xyn`
/// - `(_, _, n, n)` the operation within the `Ex__` and `Fx__` families
/// - `(_, n, n, n)` the exact machine routines CLS and RET
///
/// The remaining nibbles are operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an 8-bit immediate
/// - `[_x__]` the register Vx, or the last register of the range V0..Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit immediate, the height of a sprite
pub trait Opcode {
    /// The opcode split into its four nibbles, most significant first
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[x___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x() as u8, self.y() as u8, self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        usize::from((self >> 8) & 0xF)
    }

    fn y(&self) -> usize {
        usize::from((self >> 4) & 0xF)
    }

    fn n(&self) -> u8 {
        (self & 0xF) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
