use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterOptions {
    pub duration_ms: u32,
    /// Fraction of the viewport height the element's top must rise above.
    pub start_line: f64,
}

impl Default for CounterOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            start_line: 0.8,
        }
    }
}

/// power1.out
fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Parses a `data-target` attribute: an optional `+` then leading integer
/// digits. Counts only go up, so a negative target clamps to zero, as does
/// anything without leading digits.
pub fn parse_target(attr: Option<&str>) -> u64 {
    let Some(s) = attr else { return 0 };
    let s = s.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Number that counts up from zero the first time it scrolls into view.
#[derive(Debug, Clone)]
pub struct Counter {
    target: u64,
    duration: f64,
    elapsed: f64,
    started: bool,
}

impl Counter {
    pub fn new(target: u64, options: &CounterOptions) -> Self {
        Self {
            target,
            duration: f64::from(options.duration_ms) / 1000.0,
            elapsed: 0.0,
            started: false,
        }
    }

    /// Starts the count. Only the first call has an effect.
    pub fn trigger(&mut self) -> bool {
        let first = !self.started;
        self.started = true;
        first
    }

    pub fn is_running(&self) -> bool {
        self.started && self.elapsed < self.duration
    }

    /// Triggered and landed on the target; nothing left to animate.
    pub fn is_done(&self) -> bool {
        self.started && !self.is_running()
    }

    pub fn advance(&mut self, dt: f64) {
        if self.started {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    /// Value to display: the eased count, floored.
    pub fn value(&self) -> u64 {
        if !self.started {
            return 0;
        }
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return self.target;
        }
        let t = ease_out_quad(self.elapsed / self.duration);
        (self.target as f64 * t).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_once_and_lands_on_target() {
        let mut c = Counter::new(150, &CounterOptions::default());
        c.advance(1.0);
        assert_eq!(c.value(), 0);
        assert!(c.trigger());
        assert!(!c.trigger());
        c.advance(1.0);
        assert_eq!(c.value(), 112);
        assert!(c.is_running());
        c.advance(5.0);
        assert_eq!(c.value(), 150);
        assert!(!c.is_running());
    }

    #[test]
    fn values_never_decrease() {
        let mut c = Counter::new(999, &CounterOptions::default());
        c.trigger();
        let mut last = 0;
        for _ in 0..200 {
            c.advance(0.016);
            assert!(c.value() >= last);
            last = c.value();
        }
        assert_eq!(last, 999);
    }

    #[test]
    fn lenient_targets() {
        assert_eq!(parse_target(Some("42")), 42);
        assert_eq!(parse_target(Some(" 120+ ")), 120);
        assert_eq!(parse_target(Some("abc")), 0);
        assert_eq!(parse_target(None), 0);
    }

    #[test]
    fn signed_targets() {
        assert_eq!(parse_target(Some("+5")), 5);
        assert_eq!(parse_target(Some(" +75k")), 75);
        assert_eq!(parse_target(Some("-50")), 0);
        assert_eq!(parse_target(Some("+-5")), 0);
    }

    #[test]
    fn done_only_after_landing() {
        let mut c = Counter::new(10, &CounterOptions::default());
        assert!(!c.is_done());
        c.trigger();
        assert!(!c.is_done());
        c.advance(1.0);
        assert!(!c.is_done());
        c.advance(1.0);
        assert!(c.is_done());
        assert_eq!(c.value(), 10);

        let mut instant = Counter::new(10, &CounterOptions { duration_ms: 0, ..CounterOptions::default() });
        instant.trigger();
        assert!(instant.is_done());
    }
}
