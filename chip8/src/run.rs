use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use chipvm::{
    Chip8, FrameBuffer, Instruction, Step, VmError, DISPLAY_HEIGHT, DISPLAY_WIDTH, TICK_DURATION,
};

use crate::keymap::keymap;
use crate::Args;

pub fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::with_config(args.config());

    // Load ROM
    let file = File::open(&args.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("successfully loaded {}", args.rom.display());

    let mut held = Vec::new();
    for key in args.hold.chars() {
        match keymap(key) {
            Some(code) => held.push(code),
            None => warn!("no keypad key is mapped to {:?}", key),
        }
    }
    press(&mut chip8, &held)?;

    // Set initial timing
    let frame_time = Duration::new(0, TICK_DURATION);
    let mut last_frame = Instant::now();

    let mut listing = BTreeMap::new();
    let mut redraws = 0u64;
    let mut halt = None;

    'frame: for frame in 0..args.frames {
        for _ in 0..args.cycles_per_frame {
            match chip8.step() {
                Ok(Step::Executed {
                    address,
                    instruction,
                }) => {
                    if args.listing {
                        listing.insert(address, instruction);
                    }
                }
                // Nothing more will run until a key is pressed
                Ok(Step::Suspended) if held.is_empty() => break,
                Ok(Step::Suspended) => repress(&mut chip8, &held)?,
                Err(e) if !e.is_fatal() => continue,
                Err(e) => {
                    error!("halted during frame {}: {}", frame, e);
                    halt = Some(e);
                    break 'frame;
                }
            }
        }

        if chip8.tick() {
            info!("beep");
        }
        if chip8.take_frame().is_some() {
            redraws += 1;
        }

        // Handle timing
        if args.realtime {
            let current_time = Instant::now();
            let elapsed = current_time - last_frame;
            if frame_time > elapsed {
                thread::sleep(frame_time - elapsed);
            }
            last_frame = Instant::now();
        }
    }
    debug!("screen changed on {} frames", redraws);

    print!("{}", frame_to_text(&chip8.frame()));
    if args.listing {
        print!("{}", listing_to_text(&listing));
    }

    match halt {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Latch every held key
fn press(chip8: &mut Chip8, held: &[u8]) -> Result<(), VmError> {
    for &code in held {
        chip8.key_press(code)?;
    }
    Ok(())
}

/// Let go of the held keys and press them again so a waiting `Fx0A` sees a
/// fresh press
fn repress(chip8: &mut Chip8, held: &[u8]) -> Result<(), VmError> {
    for &code in held {
        chip8.key_release(code)?;
    }
    press(chip8, held)
}

/// `address  mnemonic` per line, with a blank line after every jump, call,
/// return and skip
pub fn listing_to_text(listing: &BTreeMap<u16, Instruction>) -> String {
    let mut text = String::new();
    for (address, instruction) in listing {
        text.push_str(&format!("{:#05X}  {}\n", address, instruction));
        if instruction.is_control_flow() {
            text.push('\n');
        }
    }
    text
}

/// One line per row, `#` for pixels that are on and `.` for the rest
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    let mut text = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT);
    for row in 0..DISPLAY_HEIGHT {
        for column in frame.iter() {
            text.push(if column[row] { '#' } else { '.' });
        }
        text.push('\n');
    }
    text
}
