//! Wait-and-retry wrapper for fallible calls
//!
//! Composes with [`Cached`](crate::cache::Cached) in either order. Wrapped
//! around a cached call, every attempt consults the cache; inside a cached
//! function, the cache only sees the final outcome. A failed attempt is never
//! stored either way.

use std::fmt::Display;
use std::thread;
use std::time::Duration;
use tracing::warn;

/// Retry policy: fixed number of attempts with a fixed pause between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retry {
    attempts: u32,
    delay: Duration,
}

impl Retry {
    /// Retry up to `attempts` times, sleeping `delay` between attempts
    ///
    /// Zero attempts is treated as one.
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `f` until it succeeds or attempts run out, returning the last error
    ///
    /// Every failure is logged at warn level, the last one included.
    pub fn run<T, E, F>(&self, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
        E: Display,
    {
        let mut attempt = 1;
        loop {
            match f() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Attempt {}/{} failed: {}", attempt, self.attempts, e);
                    if attempt >= self.attempts {
                        return Err(e);
                    }
                    thread::sleep(self.delay);
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for Retry {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}
