use crate::constants::STACK_DEPTH;
use crate::error::VmError;

/// # Call Stack
/// Return addresses pushed by CALL and popped by RET.
///
/// The depth is fixed when the stack is created; going past it is an overflow
/// instead of silently growing.
#[derive(Copy, Clone)]
pub struct CallStack {
    frames: [u16; STACK_DEPTH],
    sp: usize,
    depth: usize,
}

impl CallStack {
    /// # Arguments
    /// * `depth` maximum nesting, capped at `STACK_DEPTH`
    pub fn new(depth: usize) -> Self {
        CallStack {
            frames: [0; STACK_DEPTH],
            sp: 0,
            depth: depth.min(STACK_DEPTH),
        }
    }

    pub fn push(&mut self, address: u16) -> Result<(), VmError> {
        if self.sp >= self.depth {
            return Err(VmError::StackOverflow { depth: self.depth });
        }
        self.frames[self.sp] = address;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, VmError> {
        if self.sp == 0 {
            return Err(VmError::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.frames[self.sp])
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.sp
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(STACK_DEPTH)
    }
}
