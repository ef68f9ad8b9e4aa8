use crate::constants::{FONT_START, MEMORY_SIZE, SPRITE_SHEET};
use crate::error::VmError;

/// # Memory
/// 4096 bytes, addressed 0x000..=0xFFF.
///
/// - 0x000..0x050 holds the font sprite sheet
/// - 0x200.. is where programs are loaded
///
/// Every access is bounds checked; an address past 0xFFF is an error rather
/// than wrapping around.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Memory as it looks at power on: zeroed apart from the font sprite sheet
    pub fn with_font() -> Self {
        let mut memory = Memory::new();
        let start = FONT_START as usize;
        memory.bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        memory
    }

    /// Read a single byte
    pub fn get(&self, address: usize) -> Result<u8, VmError> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(VmError::OutOfRangeAddress { address })
    }

    /// Read a big-endian word; the high byte lives at `address`.
    pub fn word(&self, address: usize) -> Result<u16, VmError> {
        let high = u16::from(self.get(address)?);
        let low = u16::from(self.get(address + 1)?);
        Ok(high << 8 | low)
    }

    /// Borrow `len` bytes starting at `address`
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], VmError> {
        self.check_range(address, len)?;
        Ok(&self.bytes[address..address + len])
    }

    /// Copy `data` into memory starting at `address`.
    /// Nothing is written unless all of it fits.
    pub fn load(&mut self, address: usize, data: &[u8]) -> Result<(), VmError> {
        self.check_range(address, data.len())?;
        self.bytes[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Errors unless all of `address..address + len` is in memory.
    /// An empty range may start at most one past the last byte.
    pub fn check_range(&self, address: usize, len: usize) -> Result<(), VmError> {
        if address > MEMORY_SIZE || (address == MEMORY_SIZE && len > 0) {
            Err(VmError::OutOfRangeAddress { address })
        } else if address + len > MEMORY_SIZE {
            Err(VmError::OutOfRangeBlock { address, len })
        } else {
            Ok(())
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
