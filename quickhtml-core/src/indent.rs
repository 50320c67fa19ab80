//! Indentation configuration for rendered documents.

/// Indentation unit written once per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// Spaces with the specified width. A width of zero disables indentation.
    Spaces(usize),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 2-space indentation.
    pub const TWO: Self = Self::Spaces(2);

    /// 4-space indentation.
    pub const FOUR: Self = Self::Spaces(4);

    /// Tab indentation.
    pub const TAB: Self = Self::Tab;

    /// Whitespace prefix for a line at `depth`.
    pub fn prefix(&self, depth: usize) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(n * depth),
            Self::Tab => "\t".repeat(depth),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TWO
    }
}

impl From<usize> for Indent {
    fn from(width: usize) -> Self {
        Self::Spaces(width)
    }
}
