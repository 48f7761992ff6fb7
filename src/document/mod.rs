//! Heading-delimited document model
//!
//! A prompt is treated as a preamble followed by a flat list of sections, one
//! per heading line (`#`, `##`, ... followed by a title). Nested headings are
//! not folded into their parents: every heading line starts a new section.
//! Segmenting and rebuilding an untouched document reproduces the input
//! byte for byte.

mod signature;

pub use signature::{HeadingSignature, STOP_WORDS};

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#+[ \t]+[^\n]+").expect("heading regex"));

static RE_HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#+\s*").expect("heading marker regex"));

static RE_EXAMPLE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)example").expect("example heading regex"));

static RE_EXAMPLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)##?\s*Example[^#]*").expect("example block regex"));

/// A heading line and the raw text that follows it up to the next heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Full heading line including the `#` marker, without the newline
    pub heading: String,
    /// Everything after the heading line, whitespace untouched
    pub content: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
        }
    }

    /// Heading text without the marker
    pub fn title(&self) -> &str {
        heading_title(&self.heading)
    }

    pub fn signature(&self) -> HeadingSignature {
        HeadingSignature::from_heading(&self.heading)
    }

    /// Whether the heading mentions an example (case-insensitive)
    pub fn is_example(&self) -> bool {
        RE_EXAMPLE_HEADING.is_match(&self.heading)
    }
}

/// Preamble plus ordered sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Text before the first heading (the whole text when there is none)
    pub preamble: String,
    pub sections: Vec<Section>,
}

impl Document {
    pub fn new(preamble: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            preamble: preamble.into(),
            sections,
        }
    }

    /// Split text on heading lines
    pub fn segment(text: &str) -> Self {
        let headings: Vec<Range<usize>> = RE_HEADING.find_iter(text).map(|m| m.range()).collect();

        let Some(first) = headings.first() else {
            return Self::new(text, Vec::new());
        };

        let sections = headings
            .iter()
            .enumerate()
            .map(|(idx, range)| {
                let end = headings
                    .get(idx + 1)
                    .map(|next| next.start)
                    .unwrap_or(text.len());
                Section::new(&text[range.clone()], &text[range.end..end])
            })
            .collect();

        Self::new(&text[..first.start], sections)
    }

    /// Concatenate preamble, then each heading and its content
    pub fn rebuild(&self) -> String {
        let capacity = self.preamble.len()
            + self
                .sections
                .iter()
                .map(|s| s.heading.len() + s.content.len())
                .sum::<usize>();

        let mut text = String::with_capacity(capacity);
        text.push_str(&self.preamble);
        for section in &self.sections {
            text.push_str(&section.heading);
            text.push_str(&section.content);
        }
        text
    }

    /// Indices of sections whose heading mentions an example, in order
    pub fn example_indices(&self) -> Vec<usize> {
        self.sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_example())
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Strip the leading `#` marker and surrounding whitespace from a heading
pub fn heading_title(heading: &str) -> &str {
    let marker_len = RE_HEADING_MARKER.find(heading).map(|m| m.end()).unwrap_or(0);
    heading[marker_len..].trim()
}

/// Byte ranges of "example blocks": a `#`/`##` marker directly followed by
/// "Example", running up to the next `#`, kept only when that run ends at a
/// `##` or at the end of the text.
///
/// This is a looser, textual notion than [`Section::is_example`]; it is what
/// the example-excess estimate and the aggressive pass operate on.
pub fn example_blocks(text: &str) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(m) = RE_EXAMPLE_BLOCK.find_at(text, pos) {
        let rest = &text[m.end()..];
        if rest.is_empty() || rest.starts_with("##") {
            blocks.push(m.range());
            pos = m.end();
        } else {
            // Every match starts on an ASCII '#', so +1 stays on a char boundary.
            pos = m.start() + 1;
        }
        if pos >= text.len() {
            break;
        }
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROMPT: &str = "Intro line.\n\n# Title\n\n## Role\nYou review code.\n\n### Details\n- be brief\n\n## Workflow\n1. Read.\n2. Reply.\n";

    #[test]
    fn test_segment_splits_on_every_heading() {
        let doc = Document::segment(PROMPT);
        assert_eq!(doc.preamble, "Intro line.\n\n");
        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["# Title", "## Role", "### Details", "## Workflow"]);
        assert_eq!(doc.sections[1].content, "\nYou review code.\n\n");
        assert_eq!(doc.sections[3].content, "\n1. Read.\n2. Reply.\n");
    }

    #[test]
    fn test_rebuild_is_inverse_of_segment() {
        for text in [
            PROMPT,
            "",
            "no headings at all\n",
            "## Only heading",
            "# A\n#not a heading\n## B\n\n\n",
            "  # indented is not a heading\n# Real\nbody",
        ] {
            assert_eq!(Document::segment(text).rebuild(), text);
        }
    }

    #[test]
    fn test_segment_without_headings_is_all_preamble() {
        let doc = Document::segment("just some text\n#hashtag\n");
        assert_eq!(doc.preamble, "just some text\n#hashtag\n");
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn test_heading_title() {
        assert_eq!(heading_title("## Goals Overview "), "Goals Overview");
        assert_eq!(heading_title("#Tight"), "Tight");
        assert_eq!(heading_title("Plain"), "Plain");
    }

    #[test]
    fn test_example_indices() {
        let doc = Document::segment("## Example 1\na\n## Notes\nb\n## More EXAMPLES\nc\n");
        assert_eq!(doc.example_indices(), vec![0, 2]);
    }

    #[test]
    fn test_example_blocks_run_to_next_double_marker() {
        let text = "## Example 1\none\n## Example 2\ntwo\n## Guidance\nthree\n";
        let blocks: Vec<&str> = example_blocks(text).into_iter().map(|r| &text[r]).collect();
        assert_eq!(blocks, vec!["## Example 1\none\n", "## Example 2\ntwo\n"]);
    }

    #[test]
    fn test_example_block_before_single_marker_is_skipped() {
        let text = "## Example\nbody\n# Next\n## Example B\nend";
        let blocks: Vec<&str> = example_blocks(text).into_iter().map(|r| &text[r]).collect();
        assert_eq!(blocks, vec!["## Example B\nend"]);
    }
}
