//! Stage timing for build banners.

use std::time::{Duration, Instant};

/// Measures one named stage and prints its duration on [`Timer::finish`].
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Print `  <label>: <duration>` and return the elapsed time.
    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        println!("  {}: {}", self.label, format_duration(elapsed));
        elapsed
    }
}

/// Seconds below a minute, minutes above.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        format!("{:.1}m", secs / 60.0)
    } else {
        format!("{:.1}s", secs)
    }
}
