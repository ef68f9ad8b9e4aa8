use thiserror::Error;

/// Everything that can go wrong while loading or running a program.
#[derive(Debug, Error)]
pub enum VmError {
    /// The opcode fetched from `address` isn't part of the instruction set.
    /// The program counter has already moved past it.
    #[error("unknown instruction {opcode:#06X} at {address:#05X}")]
    UnknownInstruction { opcode: u16, address: u16 },

    #[error("address {address:#05X} is outside of memory")]
    OutOfRangeAddress { address: usize },

    /// The range starts in memory but runs past 0xFFF
    #[error("{len} bytes at {address:#05X} run past the end of memory")]
    OutOfRangeBlock { address: usize, len: usize },

    #[error("call stack overflow: more than {depth} nested calls")]
    StackOverflow { depth: usize },

    #[error("call stack underflow: return without a matching call")]
    StackUnderflow,

    #[error("key {0:#04X} is not on the keypad")]
    InvalidKey(u8),

    #[error("program is {size} bytes but only {capacity} fit in memory")]
    ProgramTooLarge { size: usize, capacity: usize },

    #[error("unable to read program")]
    Io(#[from] std::io::Error),
}

impl VmError {
    /// Whether the machine can keep stepping after this error.
    ///
    /// Unknown instructions are skipped; everything raised while executing is
    /// a sign of a malformed program and the driver should halt or reset.
    pub fn is_fatal(&self) -> bool {
        match self {
            VmError::UnknownInstruction { .. } | VmError::InvalidKey(_) => false,
            _ => true,
        }
    }
}
