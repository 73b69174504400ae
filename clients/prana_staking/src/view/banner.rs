use std::time::{Duration, Instant};

/// Error and success messages shown above a form.
///
/// Setting either message arms a reset deadline; once it passes, both
/// messages clear together. Time is passed in explicitly so the owner can
/// drive it from its own clock.
#[derive(Debug, Clone)]
pub struct StatusBanner {
    error: Option<String>,
    success: Option<String>,
    reset_after: Duration,
    reset_at: Option<Instant>,
}

impl StatusBanner {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            error: None,
            success: None,
            reset_after,
            reset_at: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>, now: Instant) {
        self.error = Some(message.into());
        self.arm(now);
    }

    pub fn set_success(&mut self, message: impl Into<String>, now: Instant) {
        self.success = Some(message.into());
        self.arm(now);
    }

    /// Drops the error, e.g. when a new attempt starts.
    pub fn clear_error(&mut self) {
        self.error = None;
        if self.success.is_none() {
            self.reset_at = None;
        }
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.success = None;
        self.reset_at = None;
    }

    /// Clears both messages if the deadline has passed. Returns true if
    /// anything was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.reset_at {
            Some(reset_at) if now >= reset_at => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    fn arm(&mut self, now: Instant) {
        self.reset_at = Some(now + self.reset_after);
    }
}
