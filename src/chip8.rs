use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::{MEMORY_SIZE, PROGRAM_START};
use crate::display::FrameBuffer;
use crate::error::VmError;
use crate::instruction::Instruction;
use crate::keypad::RunState;
use crate::operations;
use crate::state::State;

/// What a call to `Chip8::step` did
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing ran; the machine is waiting for a key press
    Suspended,
    /// The instruction fetched from `address` ran to completion
    Executed {
        address: u16,
        instruction: Instruction,
    },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Is interfaced with by the outside world via methods to:
/// - load programs
/// - press and release keys
/// - step the CPU one instruction at a time
/// - advance its timers
/// - inspect its registers, memory and frame buffer
///
/// The host decides the pacing: `step` as often as the clock speed calls for
/// and `tick` at 60Hz.
pub struct Chip8 {
    state: State,
    config: Config,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(config.stack_depth),
            config,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Back to power on: font reloaded, program area cleared, pc at 0x200
    pub fn reset(&mut self) {
        debug!("reset");
        self.state = State::new(self.config.stack_depth);
    }

    /// Copy a program into memory at 0x200.
    /// Nothing other than the program area is touched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), VmError> {
        let capacity = MEMORY_SIZE - usize::from(PROGRAM_START);
        if program.len() > capacity {
            return Err(VmError::ProgramTooLarge {
                size: program.len(),
                capacity,
            });
        }
        self.load_bytes(PROGRAM_START, program)?;
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from a source file
    pub fn load_rom(&mut self, file: &mut dyn Read) -> Result<(), VmError> {
        let mut program = Vec::new();
        file.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Copy raw bytes anywhere in memory, all or nothing
    pub fn load_bytes(&mut self, address: u16, bytes: &[u8]) -> Result<(), VmError> {
        self.state.memory.load(usize::from(address), bytes)
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while awaiting a keypress
    /// - fetches the opcode at pc and moves pc past it
    /// - decodes and executes it
    ///
    /// An unknown opcode still moves pc along, so the caller may log it and
    /// keep stepping. Every other error is fatal to the program.
    pub fn step(&mut self) -> Result<Step, VmError> {
        if let RunState::AwaitingKey(_) = self.state.run_state {
            return Ok(Step::Suspended);
        }

        let address = self.state.pc;
        let op = self.state.memory.word(usize::from(address))?;
        self.state.pc = address.wrapping_add(2);

        let instruction = match Instruction::decode(op) {
            Some(instruction) => instruction,
            None => {
                warn!("unknown instruction {:#06X} at {:#05X}", op, address);
                return Err(VmError::UnknownInstruction {
                    opcode: op,
                    address,
                });
            }
        };
        trace!("{:#05X}: {:04X} {}", address, op, instruction);

        operations::execute(instruction, &mut self.state, &self.config, &mut self.rng)?;
        Ok(Step::Executed {
            address,
            instruction,
        })
    }

    /// Decrements both timers once; returns true if the sound timer was running
    pub fn tick(&mut self) -> bool {
        self.state.timers.tick()
    }

    /// Latch the pressed status of a key.
    ///
    /// A press while awaiting a key writes its code into the waiting register
    /// and lets the next `step` run. Releases never resume execution.
    pub fn deliver_key(&mut self, key: u8, pressed: bool) -> Result<(), VmError> {
        self.state.keypad.set(key, pressed)?;
        if let (true, RunState::AwaitingKey(register)) = (pressed, self.state.run_state) {
            debug!("key {:X} resumes execution into V{:X}", key, register);
            self.state.v[register] = key;
            self.state.run_state = RunState::Running;
        }
        Ok(())
    }

    pub fn key_press(&mut self, key: u8) -> Result<(), VmError> {
        self.deliver_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<(), VmError> {
        self.deliver_key(key, false)
    }

    /// Vx, or `None` past VF
    pub fn register(&self, x: usize) -> Option<u8> {
        self.state.v.get(x).copied()
    }

    pub fn registers(&self) -> [u8; 16] {
        self.state.v
    }

    pub fn index(&self) -> u16 {
        self.state.i
    }

    pub fn program_counter(&self) -> u16 {
        self.state.pc
    }

    pub fn mem8(&self, address: u16) -> Result<u8, VmError> {
        self.state.memory.get(usize::from(address))
    }

    /// The big-endian word at `address`
    pub fn mem16(&self, address: u16) -> Result<u16, VmError> {
        self.state.memory.word(usize::from(address))
    }

    pub fn frame(&self) -> FrameBuffer {
        self.state.display.frame()
    }

    /// Returns the FrameBuffer if the display changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.display.frame())
        } else {
            None
        }
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.state.keypad.is_pressed(key)
    }

    pub fn run_state(&self) -> RunState {
        self.state.run_state
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm_with(program: &[u8]) -> Chip8 {
        let mut vm = Chip8::with_config(Config::default().with_rng_seed(0));
        vm.load_program(program).unwrap();
        vm
    }

    fn steps(vm: &mut Chip8, count: usize) {
        for _ in 0..count {
            vm.step().unwrap();
        }
    }

    #[test]
    fn test_jump() {
        let mut vm = vm_with(&[0x12, 0x04]);
        vm.step().unwrap();
        assert_eq!(vm.program_counter(), 0x204);
    }

    #[test]
    fn test_call_and_return() {
        let mut vm = vm_with(&[0x22, 0x04, 0x00, 0x00, 0x00, 0xEE]);
        vm.step().unwrap();
        assert_eq!(vm.program_counter(), 0x204);
        vm.step().unwrap();
        assert_eq!(vm.program_counter(), 0x202);
    }

    #[test]
    fn test_add_with_carry() {
        let mut vm = vm_with(&[0x61, 0xFF, 0x62, 0x02, 0x81, 0x24]);
        steps(&mut vm, 3);
        assert_eq!(vm.register(0x1), Some(0x01));
        assert_eq!(vm.register(0xF), Some(0x1));
    }

    #[test]
    fn test_shift_right() {
        let mut vm = vm_with(&[0x61, 0x02, 0x81, 0x06]);
        steps(&mut vm, 2);
        assert_eq!(vm.register(0x1), Some(0x01));
        assert_eq!(vm.register(0xF), Some(0x0));
    }

    #[test]
    fn test_sprite_drawn_twice_collides() {
        // I = 0x208; V0 = V1 = 0; draw twice; then two rows of 0xFF
        let mut vm = vm_with(&[
            0xA2, 0x08, 0xD0, 0x12, 0xD0, 0x12, 0x12, 0x06, 0xFF, 0xFF,
        ]);
        steps(&mut vm, 2);
        assert_eq!(vm.register(0xF), Some(0x0));
        let frame = vm.frame();
        for column in 0..8 {
            assert!(frame[column][0] && frame[column][1]);
        }
        assert!(!frame[8][0]);
        assert!(!frame[0][2]);

        vm.step().unwrap();
        assert_eq!(vm.register(0xF), Some(0x1));
        assert!(vm.frame().iter().flatten().all(|pixel| !pixel));
    }

    #[test]
    fn test_delay_timer_ticks() {
        let mut vm = vm_with(&[0x61, 0x02, 0xF1, 0x15]);
        steps(&mut vm, 2);
        assert_eq!(vm.delay_timer(), 2);
        assert!(!vm.tick());
        assert_eq!(vm.delay_timer(), 1);
    }

    #[test]
    fn test_tick_reports_sound() {
        let mut vm = vm_with(&[0x61, 0x01, 0xF1, 0x18]);
        steps(&mut vm, 2);
        assert!(vm.sound_active());
        assert!(vm.tick());
        assert_eq!(vm.sound_timer(), 0);
        assert!(!vm.tick());
    }

    #[test]
    fn test_skip_not_equal_registers() {
        let mut vm = vm_with(&[0x61, 0x23, 0x62, 0x23, 0x91, 0x20]);
        steps(&mut vm, 3);
        assert_eq!(vm.program_counter(), 0x206);

        let mut vm = vm_with(&[0x61, 0x23, 0x62, 0x24, 0x91, 0x20]);
        steps(&mut vm, 3);
        assert_eq!(vm.program_counter(), 0x208);
    }

    #[test]
    fn test_jump_with_offset() {
        let mut vm = vm_with(&[0x60, 0x11, 0xB1, 0x23]);
        steps(&mut vm, 2);
        assert_eq!(vm.program_counter(), 0x134);
    }

    #[test]
    fn test_step_reports_executed_instruction() {
        let mut vm = vm_with(&[0xA1, 0x23]);
        assert_eq!(
            vm.step().unwrap(),
            Step::Executed {
                address: 0x200,
                instruction: Instruction::LoadIndex(0x123),
            }
        );
        assert_eq!(vm.index(), 0x123);
    }

    #[test]
    fn test_straight_line_instructions_advance_pc_by_two() {
        let program = [
            0x00, 0xE0, 0x61, 0x05, 0x71, 0x01, 0x82, 0x10, 0xA3, 0x00, 0xC1, 0xFF, 0xF1, 0x29,
            0xF1, 0x33, 0xF1, 0x1E, 0x00, 0x00,
        ];
        let mut vm = vm_with(&program);
        for count in 1..=program.len() / 2 {
            vm.step().unwrap();
            assert_eq!(vm.program_counter(), 0x200 + 2 * count as u16);
        }
    }

    #[test]
    fn test_await_key_suspends_until_press() {
        let mut vm = vm_with(&[0xF3, 0x0A, 0x61, 0x01]);
        vm.step().unwrap();
        assert_eq!(vm.run_state(), RunState::AwaitingKey(0x3));
        assert_eq!(vm.program_counter(), 0x202);

        assert_eq!(vm.step().unwrap(), Step::Suspended);
        assert_eq!(vm.step().unwrap(), Step::Suspended);
        assert_eq!(vm.program_counter(), 0x202);

        // releases don't count
        vm.key_release(0x7).unwrap();
        assert_eq!(vm.step().unwrap(), Step::Suspended);

        vm.key_press(0x7).unwrap();
        assert_eq!(vm.register(0x3), Some(0x7));
        assert_eq!(vm.run_state(), RunState::Running);
        assert!(vm.is_key_pressed(0x7));

        vm.step().unwrap();
        assert_eq!(vm.register(0x1), Some(0x1));
        assert_eq!(vm.program_counter(), 0x204);
    }

    #[test]
    fn test_key_presses_outside_a_wait_only_latch() {
        let mut vm = vm_with(&[0x61, 0x0A, 0xE1, 0x9E]);
        vm.key_press(0xA).unwrap();
        assert_eq!(vm.register(0x0), Some(0x0));
        steps(&mut vm, 2);
        assert_eq!(vm.program_counter(), 0x206);
        vm.key_release(0xA).unwrap();
        assert!(!vm.is_key_pressed(0xA));
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let mut vm = vm_with(&[0xF0, 0x0A]);
        vm.step().unwrap();
        assert!(matches!(vm.key_press(0x10), Err(VmError::InvalidKey(0x10))));
        assert_eq!(vm.run_state(), RunState::AwaitingKey(0x0));
        assert!(!vm.is_key_pressed(0x10));
    }

    #[test]
    fn test_unknown_instruction_is_skipped() {
        let mut vm = vm_with(&[0x81, 0x28, 0x61, 0x01]);
        match vm.step() {
            Err(err @ VmError::UnknownInstruction { .. }) => {
                assert!(!err.is_fatal());
                assert_eq!(err.to_string(), "unknown instruction 0x8128 at 0x200");
            }
            other => panic!("expected an unknown instruction, got {:?}", other),
        }
        assert_eq!(vm.program_counter(), 0x202);
        vm.step().unwrap();
        assert_eq!(vm.register(0x1), Some(0x1));
    }

    #[test]
    fn test_fetch_past_end_of_memory() {
        let mut vm = vm_with(&[0x1F, 0xFF]);
        vm.step().unwrap();
        let err = vm.step().unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, VmError::OutOfRangeAddress { address: 0x1000 }));
        assert_eq!(vm.program_counter(), 0xFFF);
    }

    #[test]
    fn test_return_without_call_underflows() {
        let mut vm = vm_with(&[0x00, 0xEE]);
        assert!(matches!(vm.step(), Err(VmError::StackUnderflow)));
        assert_eq!(vm.program_counter(), 0x202);
    }

    #[test]
    fn test_recursion_overflows_the_configured_stack() {
        let mut vm = Chip8::with_config(Config::default().with_stack_depth(2));
        vm.load_program(&[0x22, 0x00]).unwrap();
        steps(&mut vm, 2);
        assert!(matches!(vm.step(), Err(VmError::StackOverflow { depth: 2 })));
    }

    #[test]
    fn test_program_too_large() {
        let mut vm = Chip8::new();
        assert!(vm.load_program(&[0x0; 0xE00]).is_ok());
        assert!(matches!(
            vm.load_program(&[0x0; 0xE01]),
            Err(VmError::ProgramTooLarge {
                size: 0xE01,
                capacity: 0xE00
            })
        ));
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut vm = Chip8::new();
        let mut rom: &[u8] = &[0x12, 0x04];
        vm.load_rom(&mut rom).unwrap();
        assert_eq!(vm.mem16(0x200).unwrap(), 0x1204);
    }

    #[test]
    fn test_load_bytes_is_bounds_checked() {
        let mut vm = Chip8::new();
        vm.load_bytes(0xFFE, &[0xAB, 0xCD]).unwrap();
        assert_eq!(vm.mem8(0xFFF).unwrap(), 0xCD);
        assert!(vm.load_bytes(0xFFF, &[0x1, 0x2]).is_err());
        assert!(vm.mem8(0x1000).is_err());
    }

    #[test]
    fn test_empty_accesses_past_memory_are_errors() {
        // I = 0xFFF + 0xFF, then an empty sprite or an empty register copy
        let mut vm = vm_with(&[0xAF, 0xFF, 0x60, 0xFF, 0xF0, 0x1E, 0xD0, 0x00]);
        steps(&mut vm, 3);
        assert_eq!(vm.index(), 0x10FE);
        assert!(matches!(
            vm.step(),
            Err(VmError::OutOfRangeAddress { address: 0x10FE })
        ));

        let mut vm = Chip8::with_config(Config::default().with_inclusive_block_copy(false));
        vm.load_program(&[0xAF, 0xFF, 0x60, 0xFF, 0xF0, 0x1E, 0xF0, 0x55])
            .unwrap();
        steps(&mut vm, 3);
        assert!(vm.step().unwrap_err().is_fatal());
        assert_eq!(vm.program_counter(), 0x208);

        assert!(vm.load_bytes(0x2000, &[]).is_err());
    }

    #[test]
    fn test_font_is_loaded_at_power_on() {
        let vm = Chip8::new();
        assert_eq!(vm.mem8(0x0).unwrap(), 0xF0);
        assert_eq!(vm.mem8(0x4F).unwrap(), 0x80);
    }

    #[test]
    fn test_take_frame_only_after_a_change() {
        let mut vm = vm_with(&[0x61, 0x01, 0x00, 0xE0]);
        assert!(vm.take_frame().is_none());
        vm.step().unwrap();
        assert!(vm.take_frame().is_none());
        vm.step().unwrap();
        assert!(vm.take_frame().is_some());
        assert!(vm.take_frame().is_none());
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let program = [0xC1, 0xFF, 0xC2, 0xFF, 0xC3, 0x0F];
        let mut first = vm_with(&program);
        let mut second = vm_with(&program);
        steps(&mut first, 3);
        steps(&mut second, 3);
        assert_eq!(first.registers(), second.registers());
        assert_eq!(first.register(0x3).unwrap() & 0xF0, 0);
    }

    #[test]
    fn test_reset() {
        let mut vm = vm_with(&[0x61, 0x01, 0xF0, 0x0A]);
        steps(&mut vm, 2);
        vm.reset();
        assert_eq!(vm.program_counter(), 0x200);
        assert_eq!(vm.registers(), [0; 16]);
        assert_eq!(vm.run_state(), RunState::Running);
        assert_eq!(vm.mem16(0x200).unwrap(), 0x0000);
        assert_eq!(vm.mem8(0x0).unwrap(), 0xF0);
    }

    #[test]
    fn test_register_out_of_range() {
        let vm = Chip8::new();
        assert_eq!(vm.register(0x10), None);
    }
}
