/// What the project modal shows, lifted from the clicked card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

/// URL inside a CSS `background-image` value such as `url("a.png")`.
/// Anything that is not a `url(...)` yields an empty string.
pub fn background_url(css: &str) -> String {
    let Some(inner) = css.trim().strip_prefix("url(").and_then(|s| s.strip_suffix(')')) else {
        return String::new();
    };
    let inner = inner.trim();
    for quote in ['"', '\''] {
        if let Some(unquoted) = inner.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return unquoted.to_owned();
        }
    }
    inner.to_owned()
}

/// Where a click inside the modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalClick {
    /// The dimmed area around the content.
    Backdrop,
    CloseButton,
    Content,
}

#[derive(Debug, Clone, Default)]
pub struct Modal {
    content: Option<ModalContent>,
}

impl Modal {
    pub fn open(&mut self, content: ModalContent) {
        self.content = Some(content);
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&ModalContent> {
        self.content.as_ref()
    }

    /// Returns whether the click closed the modal.
    pub fn click(&mut self, at: ModalClick) -> bool {
        match at {
            ModalClick::Backdrop | ModalClick::CloseButton if self.is_open() => {
                self.content = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_background_urls() {
        assert_eq!(background_url("url(\"img/city.jpg\")"), "img/city.jpg");
        assert_eq!(background_url("url('a.png')"), "a.png");
        assert_eq!(background_url("url(a.png)"), "a.png");
        assert_eq!(background_url("none"), "");
        assert_eq!(background_url(""), "");
    }

    #[test]
    fn closes_on_backdrop_or_button_only() {
        let mut m = Modal::default();
        assert!(!m.click(ModalClick::Backdrop));
        m.open(ModalContent { title: "City".into(), ..ModalContent::default() });
        assert!(!m.click(ModalClick::Content));
        assert_eq!(m.content().map(|c| c.title.as_str()), Some("City"));
        assert!(m.click(ModalClick::Backdrop));
        assert!(!m.is_open());
        m.open(ModalContent::default());
        assert!(m.click(ModalClick::CloseButton));
    }
}
