use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypedOptions {
    pub texts: Vec<String>,
    /// Delay between typed characters; deletion runs twice as fast.
    pub speed_ms: u32,
    /// Hold time once a phrase is complete.
    pub pause_ms: u32,
}

impl Default for TypedOptions {
    fn default() -> Self {
        Self {
            texts: [
                "I build futuristic digital experiences",
                "Blending cutting-edge design",
                "With next-generation technology",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            speed_ms: 80,
            pause_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Pausing,
    Deleting,
}

/// Types each phrase out, holds it, deletes it and moves on to the next one,
/// forever.
#[derive(Debug, Clone)]
pub struct TypedText {
    texts: Vec<String>,
    speed: f64,
    pause: f64,
    index: usize,
    cursor: usize,
    phase: Phase,
    wait: f64,
}

/// First `chars` characters of `s`.
fn prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

impl TypedText {
    /// `None` when there is nothing to type.
    pub fn new(options: TypedOptions) -> Option<Self> {
        if options.texts.is_empty() {
            return None;
        }
        Some(Self {
            texts: options.texts,
            speed: f64::from(options.speed_ms.max(1)) / 1000.0,
            pause: f64::from(options.pause_ms) / 1000.0,
            index: 0,
            cursor: 0,
            phase: Phase::Typing,
            wait: 0.0,
        })
    }

    pub fn text(&self) -> &str {
        prefix(&self.texts[self.index], self.cursor)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn current_len(&self) -> usize {
        self.texts[self.index].chars().count()
    }

    fn delete(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        if self.cursor == 0 {
            self.index = (self.index + 1) % self.texts.len();
            self.phase = Phase::Typing;
            self.wait += self.speed;
        } else {
            self.wait += self.speed / 2.0;
        }
    }

    fn step(&mut self) {
        match self.phase {
            Phase::Typing => {
                let len = self.current_len();
                self.cursor = (self.cursor + 1).min(len);
                if self.cursor >= len {
                    self.phase = Phase::Pausing;
                    self.wait += self.pause;
                } else {
                    self.wait += self.speed;
                }
            }
            Phase::Pausing => {
                self.phase = Phase::Deleting;
                self.delete();
            }
            Phase::Deleting => self.delete(),
        }
    }

    /// Runs every step that falls due within `dt` seconds. Returns whether
    /// the visible text changed.
    pub fn advance(&mut self, dt: f64) -> bool {
        let before = (self.index, self.cursor);
        self.wait -= dt;
        while self.wait <= 0.0 {
            self.step();
        }
        before != (self.index, self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_respects_char_boundaries() {
        assert_eq!(prefix("all’avanguardia", 4), "all’");
        assert_eq!(prefix("abc", 10), "abc");
        assert_eq!(prefix("abc", 0), "");
    }

    #[test]
    fn empty_list_is_rejected() {
        assert!(TypedText::new(TypedOptions { texts: vec![], ..TypedOptions::default() }).is_none());
    }

    #[test]
    fn empty_phrase_is_skipped() {
        let mut t = TypedText::new(TypedOptions {
            texts: vec![String::new(), "ok".into()],
            speed_ms: 10,
            pause_ms: 10,
        })
        .unwrap();
        t.advance(0.0);
        assert_eq!(t.phase(), Phase::Pausing);
        t.advance(0.010);
        assert_eq!(t.index(), 1);
        assert_eq!(t.phase(), Phase::Typing);
    }
}
