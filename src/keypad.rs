use crate::constants::KEY_COUNT;
use crate::error::VmError;

/// Whether the machine is executing or parked on a key read (`Fx0A`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Waiting for a key press whose code will be written to this register
    AwaitingKey(usize),
}

impl Default for RunState {
    fn default() -> Self {
        RunState::Running
    }
}

/// # Keypad
/// Chip-8 input is a hexadecimal keypad with keys 0..F.
///
/// The latch only changes through `set`; instructions just read it.
#[derive(Copy, Clone, Default)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            keys: [false; KEY_COUNT],
        }
    }

    /// Latch the pressed status of a key
    pub fn set(&mut self, key: u8, pressed: bool) -> Result<(), VmError> {
        let slot = self
            .keys
            .get_mut(key as usize)
            .ok_or(VmError::InvalidKey(key))?;
        *slot = pressed;
        Ok(())
    }

    /// Keys outside the keypad are never pressed
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }
}
