//! Horizontally scrolling now-playing text.

/// Blank cells between the end of the text and its next repetition.
pub const GAP: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct Marquee {
    text: String,
    offset: usize,
}

impl Marquee {
    /// Swap in new text; scrolling restarts only when it actually changed.
    pub fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
            self.offset = 0;
        }
    }

    /// Scroll one character.
    pub fn tick(&mut self) {
        let cycle = self.text.chars().count() + GAP;
        self.offset = (self.offset + 1) % cycle;
    }

    /// The `width` characters currently in view. Text that fits is returned as is.
    pub fn window(&self, width: usize) -> String {
        let len = self.text.chars().count();
        if len <= width {
            return self.text.clone();
        }
        self.text
            .chars()
            .chain(std::iter::repeat_n(' ', GAP))
            .cycle()
            .skip(self.offset)
            .take(width)
            .collect()
    }
}
