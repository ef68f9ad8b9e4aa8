use crate::constants::STACK_DEPTH;

/// Knobs for building a `Chip8`.
///
/// ```
/// use chipvm::{Chip8, Config};
///
/// let vm = Chip8::with_config(Config::default().with_rng_seed(7));
/// assert_eq!(vm.program_counter(), 0x200);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Seed for `Cxkk`; `None` seeds from the OS
    pub rng_seed: Option<u64>,
    /// Maximum call nesting before a stack overflow, at most 16
    pub stack_depth: usize,
    /// `Fx55`/`Fx65` copy V0..=Vx when true and V0..Vx when false
    pub inclusive_block_copy: bool,
}

impl Config {
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_stack_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    pub fn with_inclusive_block_copy(mut self, inclusive: bool) -> Self {
        self.inclusive_block_copy = inclusive;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rng_seed: None,
            stack_depth: STACK_DEPTH,
            inclusive_block_copy: true,
        }
    }
}
