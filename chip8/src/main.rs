use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use chipvm::{CYCLES_PER_TICK, Config};

mod keymap;
mod run;

/// Runs a Chip-8 rom without a window and prints the final screen
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Path to the rom
    rom: PathBuf,

    /// Number of 60Hz frames to run for
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Instructions executed between timer ticks
    #[arg(short, long, default_value_t = CYCLES_PER_TICK)]
    cycles_per_frame: u32,

    /// Seed for the random number instruction
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keys held down for the whole run, e.g. `qe` (1234/qwer/asdf/zxcv layout)
    #[arg(long, default_value = "")]
    hold: String,

    /// Sleep between frames to run at 60Hz instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Print the mnemonic of every executed address
    #[arg(long)]
    listing: bool,

    /// Fx55/Fx65 copy V0..Vx instead of V0..=Vx
    #[arg(long)]
    exclusive_block_copy: bool,

    /// Maximum nesting of subroutine calls
    #[arg(long, default_value_t = 16)]
    stack_depth: usize,
}

impl Args {
    fn config(&self) -> Config {
        let config = Config::default()
            .with_stack_depth(self.stack_depth)
            .with_inclusive_block_copy(!self.exclusive_block_copy);
        match self.seed {
            Some(seed) => config.with_rng_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
    log::info!("env logger initialized");

    run::run(&args)
}
