//! Fade/slide-in of static content as it scrolls into view.

use serde::{Deserialize, Serialize};

/// power2.out as a CSS timing function.
pub const EASE_OUT: &str = "cubic-bezier(0.215, 0.61, 0.355, 1)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealRule {
    pub selector: String,
    /// Horizontal offset the element slides in from; alternates sign per
    /// element when `alternate` is set, starting from the left.
    pub x: f64,
    pub y: f64,
    pub alternate: bool,
    pub duration_ms: u32,
    /// Fraction of the viewport height the element's top must rise above.
    pub start: f64,
    /// Hide again when scrolled back above the start line.
    pub reverse: bool,
}

impl Default for RevealRule {
    fn default() -> Self {
        Self {
            selector: String::new(),
            x: 0.0,
            y: 40.0,
            alternate: false,
            duration_ms: 800,
            start: 0.85,
            reverse: true,
        }
    }
}

pub fn default_rules() -> Vec<RevealRule> {
    let rule = |selector: &str, y: f64, duration_ms: u32, start: f64| RevealRule {
        selector: selector.to_owned(),
        y,
        duration_ms,
        start,
        ..RevealRule::default()
    };
    vec![
        RevealRule { reverse: false, ..rule(".section-title", 60.0, 1200, 0.8) },
        rule(".skill-card, .project-card", 40.0, 800, 0.85),
        RevealRule { x: 80.0, alternate: true, ..rule(".timeline-item", 0.0, 1000, 0.85) },
        rule(".service-card", 60.0, 800, 0.9),
        rule(".testimonial-slide", 40.0, 1000, 0.9),
    ]
}

/// `rootMargin` that moves the observer's bottom edge up to `start` of the
/// viewport height.
pub fn start_line_margin(start: f64) -> String {
    let pct = ((1.0 - start.clamp(0.0, 1.0)) * 100.0).round();
    format!("0px 0px -{pct}% 0px")
}

impl RevealRule {
    /// Offset the `index`-th matched element starts from.
    pub fn from_offset(&self, index: usize) -> (f64, f64) {
        let x = if self.alternate && index % 2 == 0 { -self.x } else { self.x };
        (x, self.y)
    }

    pub fn hidden_transform(&self, index: usize) -> String {
        let (x, y) = self.from_offset(index);
        format!("translate({x}px, {y}px)")
    }

    pub fn transition(&self) -> String {
        format!(
            "opacity {ms}ms {EASE_OUT}, transform {ms}ms {EASE_OUT}",
            ms = self.duration_ms
        )
    }

    /// Whether an element should be shown after an observer report.
    /// `below` means it sits entirely under the start line.
    pub fn next_visible(&self, shown: bool, intersecting: bool, below: bool) -> bool {
        if intersecting {
            true
        } else if below && self.reverse {
            false
        } else {
            shown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_items_alternate_sides() {
        let rules = default_rules();
        let timeline = rules.iter().find(|r| r.selector == ".timeline-item").unwrap();
        assert_eq!(timeline.from_offset(0), (-80.0, 0.0));
        assert_eq!(timeline.from_offset(1), (80.0, 0.0));
        assert_eq!(timeline.hidden_transform(2), "translate(-80px, 0px)");
    }

    #[test]
    fn margins_follow_start_line() {
        assert_eq!(start_line_margin(0.8), "0px 0px -20% 0px");
        assert_eq!(start_line_margin(0.85), "0px 0px -15% 0px");
    }

    #[test]
    fn reverse_only_when_scrolled_back_up() {
        let rules = default_rules();
        let title = &rules[0];
        let card = &rules[1];
        assert!(card.next_visible(false, true, false));
        assert!(!card.next_visible(true, false, true));
        // Scrolled past the top: stays visible.
        assert!(card.next_visible(true, false, false));
        assert!(title.next_visible(true, false, true));
    }
}
