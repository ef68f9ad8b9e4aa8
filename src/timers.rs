/// # Timers
/// The delay and sound timers count down independently at 60Hz until they hit 0.
///
/// They are only ever decremented by `tick`, which the host calls on its own
/// cadence; executing instructions never moves them.
#[derive(Copy, Clone, Default)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers { delay: 0, sound: 0 }
    }

    /// Decrements both timers by one, flooring at 0.
    /// Returns whether the sound timer was running during this tick.
    pub fn tick(&mut self) -> bool {
        let sounding = self.sound > 0;
        if sounding {
            self.sound -= 1;
        }
        if self.delay > 0 {
            self.delay -= 1;
        }
        sounding
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}
