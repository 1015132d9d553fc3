//! Indentation unit for rendered code.

/// The text written once per nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(&'static str);

impl Indent {
    /// Two spaces, as in every emitted `.ts`/`.js` file.
    pub const TYPESCRIPT: Self = Self("  ");
    pub const TAB: Self = Self("\t");

    /// Up to eight spaces; wider requests are capped.
    pub fn spaces(width: usize) -> Self {
        const SPACES: &str = "        ";
        Self(&SPACES[..width.min(SPACES.len())])
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::TYPESCRIPT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(Indent::spaces(2), Indent::TYPESCRIPT);
        assert_eq!(Indent::spaces(4).as_str(), "    ");
        assert_eq!(Indent::spaces(20).as_str().len(), 8);
        assert_eq!(Indent::TAB.as_str(), "\t");
    }
}
