//! Extraction options and configuration.

/// Options for structural extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// What to do with text outside any block element
    pub loose_text: LooseText,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the loose text policy.
    pub fn with_loose_text(mut self, policy: LooseText) -> Self {
        self.loose_text = policy;
        self
    }

    /// Emit loose text as paragraphs even when nothing else is structural.
    pub fn loose_text_as_paragraphs(mut self) -> Self {
        self.loose_text = LooseText::Paragraph;
        self
    }
}

/// Policy for text that is not inside a heading, paragraph, list item or table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LooseText {
    /// Emit it as paragraphs when the fragment has structural blocks;
    /// a fragment of loose text only is left to the fallback extractor
    #[default]
    Fallback,
    /// Always emit it as a paragraph at the next block boundary
    Paragraph,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        assert_eq!(ExtractOptions::new().loose_text, LooseText::Fallback);

        let options = ExtractOptions::new().loose_text_as_paragraphs();
        assert_eq!(options.loose_text, LooseText::Paragraph);

        let options = options.with_loose_text(LooseText::Fallback);
        assert_eq!(options.loose_text, LooseText::Fallback);
    }
}
