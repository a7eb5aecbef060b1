/// Wall-clock fields cached for the renderer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Software clock driven by the 1 Hz timer
pub struct ClockState {
    pub hours: u8,
    pub mins: u8,
    pub secs: u8,
}

impl ClockState {
    /// Out-of-range fields wrap into range.
    pub fn new(hours: u8, mins: u8, secs: u8) -> Self {
        Self {
            hours: hours % 24,
            mins: mins % 60,
            secs: secs % 60,
        }
    }

    /// Increments the second, rolling over into the minute.
    pub fn tick(&mut self) {
        self.secs += 1;
        if self.secs >= 60 {
            self.secs = 0;
            self.add_minute();
        }
    }

    /// Increments the minute. Handles rollover to hours.
    pub fn add_minute(&mut self) {
        self.mins += 1;
        if self.mins >= 60 {
            self.mins = 0;
            self.hours = (self.hours + 1) % 24;
        }
        debug!("clock at {=u8}:{=u8}", self.hours, self.mins);
    }

    pub fn time(&self) -> TimeOfDay {
        TimeOfDay {
            hour: self.hours,
            minute: self.mins,
            second: self.secs,
        }
    }
}
