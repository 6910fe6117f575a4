use std::time::Duration;

/// Renders a duration as `MM:SS.cc` for the timer readout and leaderboard rows.
pub trait FormatClock {
    fn format_clock(&self) -> String;
}

impl FormatClock for Duration {
    fn format_clock(&self) -> String {
        let total_seconds = self.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let centiseconds = self.subsec_millis() / 10;
        format!("{:02}:{:02}.{:02}", minutes, seconds, centiseconds)
    }
}
