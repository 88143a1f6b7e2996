use console::Style;

/// Terminal styling for rendered metadata.
///
/// A disabled palette returns text unchanged, so callers never need to
/// branch on color support themselves. An enabled palette styles each
/// word on its own, so wrapping styled text never leaves a style open at
/// the end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Create a palette, emitting ANSI escapes only when `enabled`.
    pub fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    /// A palette that never styles.
    pub fn plain() -> Self {
        Palette::new(false)
    }

    /// USE flag labels such as `[ssl]`.
    pub fn flag(&self, text: &str) -> String {
        self.paint(Style::new().green().bold(), text)
    }

    /// `restrict` annotations on USE flags.
    pub fn restrict(&self, text: &str) -> String {
        self.paint(Style::new().yellow(), text)
    }

    /// Package references inside descriptions.
    pub fn package(&self, text: &str) -> String {
        self.paint(Style::new().cyan(), text)
    }

    /// Category references inside descriptions.
    pub fn category(&self, text: &str) -> String {
        self.paint(Style::new().blue(), text)
    }

    /// Report labels and package headers.
    pub fn label(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let style = style.force_styling(true);
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while !rest.is_empty() {
            let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            if word_len > 0 {
                out.push_str(&style.apply_to(&rest[..word_len]).to_string());
            }
            let gap = rest[word_len..]
                .find(|c: char| !c.is_whitespace())
                .map_or(rest.len(), |end| word_len + end);
            out.push_str(&rest[word_len..gap]);
            rest = &rest[gap..];
        }
        out
    }
}
