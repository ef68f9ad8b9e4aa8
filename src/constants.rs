/// Bytes of addressable memory, 0x000..=0xFFF
pub const MEMORY_SIZE: usize = 4096;

/// Where programs are loaded and where the program counter starts
pub const PROGRAM_START: u16 = 0x200;

/// Where the font sprite sheet is loaded
pub const FONT_START: u16 = 0x000;

/// Every font glyph is 5 rows tall
pub const GLYPH_HEIGHT: u16 = 5;

pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag
pub const FLAG_REGISTER: usize = 0xF;

pub const KEY_COUNT: usize = 16;

/// Conventional call depth of the COSMAC VIP interpreter
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// The timers count down at 60Hz
pub const TIMER_FREQUENCY: u32 = 60;

/// Instructions per timer tick that approximate a ~540Hz CPU
pub const CYCLES_PER_TICK: u32 = 9;

/// Nanoseconds between timer ticks
pub const TICK_DURATION: u32 = 1_000_000_000 / TIMER_FREQUENCY;

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
///
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
