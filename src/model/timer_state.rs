use std::time::Duration;

/// Elapsed-time accumulator driven by explicit ticks from the embedding
/// scheduler. The clock only advances between the first word selection and
/// the terminal transition; once ended the value is frozen for good.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    elapsed: Duration,
    started: bool,
    ended: bool,
}

impl TimerState {
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// True while the embedding should keep its periodic tick source alive.
    pub fn is_running(&self) -> bool {
        self.started && !self.ended
    }

    pub fn started_now(&self) -> TimerState {
        let mut new_state = self.clone();
        if !new_state.ended {
            new_state.started = true;
        }
        new_state
    }

    pub fn advanced(&self, delta: Duration) -> TimerState {
        let mut new_state = self.clone();
        if new_state.is_running() {
            new_state.elapsed = new_state.elapsed.saturating_add(delta);
        }
        new_state
    }

    pub fn ended_now(&self) -> TimerState {
        let mut new_state = self.clone();
        new_state.ended = true;
        new_state
    }
}
