use rand::Rng;

use crate::config::Config;
use crate::constants::{FLAG_REGISTER, FONT_START, GLYPH_HEIGHT};
use crate::error::VmError;
use crate::instruction::Instruction;
use crate::keypad::RunState;
use crate::state::State;

/// Applies a single instruction to the state.
///
/// The program counter must already point past the instruction; jumps,
/// calls, returns and skips move it from there. Memory ranges are checked
/// before anything is written, so a failing instruction leaves the state as
/// it found it.
pub fn execute<R: Rng + ?Sized>(
    instruction: Instruction,
    state: &mut State,
    config: &Config,
    rng: &mut R,
) -> Result<(), VmError> {
    use Instruction::*;

    match instruction {
        Cls => clr(state),
        Ret => state.pc = state.stack.pop()?,
        Sys(_) => (),
        Jump(addr) => state.pc = addr,
        Call(addr) => call(state, addr)?,
        SkipEqImm(x, kk) => state.skip_if(state.v[x] == kk),
        SkipNeImm(x, kk) => state.skip_if(state.v[x] != kk),
        SkipEqReg(x, y) => state.skip_if(state.v[x] == state.v[y]),
        LoadImm(x, kk) => state.v[x] = kk,
        AddImm(x, kk) => state.v[x] = state.v[x].wrapping_add(kk),
        Move(x, y) => state.v[x] = state.v[y],
        Or(x, y) => state.v[x] |= state.v[y],
        And(x, y) => state.v[x] &= state.v[y],
        Xor(x, y) => state.v[x] ^= state.v[y],
        AddReg(x, y) => add(state, x, y),
        Sub(x, y) => sub(state, x, y),
        ShiftRight(x, _) => shr(state, x),
        SubN(x, y) => subn(state, x, y),
        ShiftLeft(x, _) => shl(state, x),
        SkipNeReg(x, y) => state.skip_if(state.v[x] != state.v[y]),
        LoadIndex(addr) => state.i = addr,
        JumpOffset(addr) => state.pc = addr + u16::from(state.v[0x0]),
        Random(x, kk) => state.v[x] = rng.gen::<u8>() & kk,
        Draw(x, y, n) => draw(state, x, y, n)?,
        SkipPressed(x) => state.skip_if(state.keypad.is_pressed(state.v[x])),
        SkipNotPressed(x) => state.skip_if(!state.keypad.is_pressed(state.v[x])),
        ReadDelay(x) => state.v[x] = state.timers.delay,
        AwaitKey(x) => await_key(state, x),
        SetDelay(x) => state.timers.delay = state.v[x],
        SetSound(x) => state.timers.sound = state.v[x],
        AddIndex(x) => state.i = state.i.wrapping_add(u16::from(state.v[x])),
        LoadGlyph(x) => state.i = FONT_START + GLYPH_HEIGHT * u16::from(state.v[x]),
        Bcd(x) => bcd(state, x)?,
        Store(x) => stor(state, block_len(config, x))?,
        Load(x) => read(state, block_len(config, x))?,
    }
    Ok(())
}

/// clear
fn clr(state: &mut State) {
    state.display.clear();
    state.draw_flag = true;
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<(), VmError> {
    state.stack.push(state.pc)?;
    state.pc = addr;
    Ok(())
}

/// Vx += Vy; VF = carry
fn add(state: &mut State, x: usize, y: usize) {
    let (res, carry) = state.v[x].overflowing_add(state.v[y]);
    state.v[FLAG_REGISTER] = carry as u8;
    state.v[x] = res;
}

/// Vx -= Vy; VF = Vx > Vy
fn sub(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[FLAG_REGISTER] = (vx > vy) as u8;
    state.v[x] = vx.wrapping_sub(vy);
}

/// Vx = Vy - Vx; VF = Vy > Vx
fn subn(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[FLAG_REGISTER] = (vy > vx) as u8;
    state.v[x] = vy.wrapping_sub(vx);
}

/// Vx >>= 1; VF = lost bit
fn shr(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[FLAG_REGISTER] = vx & 0x1;
    state.v[x] = vx >> 1;
}

/// Vx <<= 1; VF = lost bit
fn shl(state: &mut State, x: usize) {
    let vx = state.v[x];
    state.v[FLAG_REGISTER] = vx >> 7;
    state.v[x] = vx << 1;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in mem[I..I+n] onto the display at Vx, Vy with wrapping.
/// VF = whether any pixel was erased
fn draw(state: &mut State, x: usize, y: usize, n: u8) -> Result<(), VmError> {
    let sprite = state.memory.slice(usize::from(state.i), usize::from(n))?;
    let collision = state.display.draw(
        usize::from(state.v[x]),
        usize::from(state.v[y]),
        sprite,
    );
    state.v[FLAG_REGISTER] = collision as u8;
    state.draw_flag = true;
    Ok(())
}

/// await keypress for Vx
fn await_key(state: &mut State, x: usize) {
    log::debug!("awaiting key press for V{:X}", x);
    state.run_state = RunState::AwaitingKey(x);
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: usize) -> Result<(), VmError> {
    let vx = state.v[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory.load(usize::from(state.i), &digits)
}

/// Registers copied by `Fx55` and `Fx65`
fn block_len(config: &Config, x: usize) -> usize {
    if config.inclusive_block_copy {
        x + 1
    } else {
        x
    }
}

/// mem[I..I+len] = V0..V(len)
fn stor(state: &mut State, len: usize) -> Result<(), VmError> {
    state.memory.load(usize::from(state.i), &state.v[..len])
}

/// V0..V(len) = mem[I..I+len]
fn read(state: &mut State, len: usize) -> Result<(), VmError> {
    let bytes = state.memory.slice(usize::from(state.i), len)?;
    state.v[..len].copy_from_slice(bytes);
    Ok(())
}
