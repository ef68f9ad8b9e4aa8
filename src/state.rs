use crate::constants::{PROGRAM_START, REGISTER_COUNT};
use crate::display::Display;
use crate::keypad::{Keypad, RunState};
use crate::memory::Memory;
use crate::stack::CallStack;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Stack
/// - return addresses for up to 16 nested calls
///
/// Timers
/// - 2 8-bit timers (delay & sound) that count down at 60Hz
///
/// ## Memory
/// - 4096 bytes of addressable memory with the font at 0x000
/// - a 64x32 display
///
/// ## Input
/// - the pressed status of keys 0..F
/// - whether execution is parked until a key is pressed
#[derive(Copy, Clone)]
pub struct State {
    pub memory: Memory,
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: CallStack,
    pub timers: Timers,
    pub display: Display,
    pub keypad: Keypad,
    pub run_state: RunState,
    /// Set whenever the display changes so hosts can skip redundant repaints
    pub draw_flag: bool,
}

impl State {
    pub fn new(stack_depth: usize) -> Self {
        State {
            memory: Memory::with_font(),
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: CallStack::new(stack_depth),
            timers: Timers::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            run_state: RunState::Running,
            draw_flag: false,
        }
    }

    /// if condition then pc += 2
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}
