/// Elapsed-seconds counter for an active recording.
///
/// Advanced by an external one-second tick; frozen while halted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElapsedClock {
    elapsed_secs: u64,
    running: bool,
}

impl ElapsedClock {
    /// Reset to zero and start counting.
    pub fn restart(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
    }

    /// Freeze the counter at its current value.
    pub fn halt(&mut self) {
        self.running = false;
    }

    /// Advance by one second if running. Returns the current value.
    pub fn tick(&mut self) -> u64 {
        if self.running {
            self.elapsed_secs += 1;
        }
        self.elapsed_secs
    }

    /// Seconds counted since the last restart.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Whether ticks currently advance the counter.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Render seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
