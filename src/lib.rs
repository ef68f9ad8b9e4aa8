pub use chip8::{Chip8, Step};
pub use config::Config;
pub use constants::{CYCLES_PER_TICK, DISPLAY_HEIGHT, DISPLAY_WIDTH, TICK_DURATION};
pub use display::FrameBuffer;
pub use error::VmError;
pub use instruction::Instruction;
pub use keypad::RunState;

mod chip8;
mod config;
pub mod constants;
mod display;
mod error;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod stack;
mod state;
mod timers;
