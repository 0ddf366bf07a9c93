//! Annotated source parsing.
//!
//! A demo source file tags each demo section with a marker call carrying a
//! hierarchical tag, for example:
//!
//! ```text
//! IMGUI_DEMO_MARKER("Widgets/Basic/Button");
//! demo_marker!(markers, ui, "Layout/Columns", |ui| { ... });
//! ```
//!
//! Scanning is pattern based: the marker token is located with a regex and
//! the first string literal inside its argument list becomes the tag. The
//! surrounding code is never interpreted.

use std::path::Path;

use regex::Regex;

use crate::error::{BrowserError, ParseWarning, Result};
use crate::options::BrowserOptions;

/// Compiled matcher for a marker call such as `IMGUI_DEMO_MARKER(`.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    marker: String,
    regex: Regex,
}

impl MarkerPattern {
    /// Builds the matcher for the given marker name.
    pub fn new(marker: &str) -> Result<Self> {
        let marker = marker.trim();
        if marker.is_empty() {
            return Err(BrowserError::InvalidMarker(marker.to_string()));
        }

        // Only anchor on a word boundary when the marker starts with a word char.
        let boundary = if marker.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            r"\b"
        } else {
            ""
        };
        let regex = Regex::new(&format!(r"{boundary}{}\s*\(", regex::escape(marker)))?;

        Ok(Self {
            marker: marker.to_string(),
            regex,
        })
    }

    /// Builds the matcher configured in `options`.
    pub fn from_options(options: &BrowserOptions) -> Result<Self> {
        Self::new(&options.marker)
    }

    /// Returns the marker name.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

/// A tag found in the source, with the 1-based line it occurs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWithTag {
    pub line_number: usize,
    pub tag: String,
}

impl LineWithTag {
    pub fn new(line_number: usize, tag: impl Into<String>) -> Self {
        Self {
            line_number,
            tag: tag.into(),
        }
    }
}

/// Source text together with the demo tags found in it.
///
/// Immutable once parsed. `source_code` is exactly the text that was parsed.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedSource {
    source_code: String,
    lines_with_tags: Vec<LineWithTag>,
    warnings: Vec<ParseWarning>,
}

/// Outcome of reading the argument list that follows a marker token.
enum TagScan {
    /// A closed string literal: its contents and the bytes consumed.
    Tag(String, usize),
    /// The argument list closes before any string literal starts.
    NotTagged,
    /// A string literal runs to the end of the line.
    Unterminated,
}

/// Reads the first string literal of an argument list, up to the end of `rest`.
fn scan_tag(rest: &str) -> TagScan {
    let mut chars = rest.char_indices();
    let mut depth = 0usize;

    // Skip leading non-string arguments.
    loop {
        match chars.next() {
            None => return TagScan::NotTagged,
            Some((_, '"')) => break,
            Some((_, '(')) => depth += 1,
            Some((_, ')')) => {
                if depth == 0 {
                    return TagScan::NotTagged;
                }
                depth -= 1;
            }
            Some(_) => {}
        }
    }

    let mut tag = String::new();
    while let Some((index, c)) = chars.next() {
        match c {
            '"' => return TagScan::Tag(tag, index + 1),
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => tag.push(escaped),
                Some((_, other)) => {
                    tag.push('\\');
                    tag.push(other);
                }
                None => return TagScan::Unterminated,
            },
            _ => tag.push(c),
        }
    }
    TagScan::Unterminated
}

impl AnnotatedSource {
    /// Scans `source_code` for marker calls.
    ///
    /// Never fails: a file without markers yields no tags, and malformed
    /// markers are recorded as warnings and skipped.
    pub fn parse(source_code: impl Into<String>, pattern: &MarkerPattern) -> Self {
        let source_code = source_code.into();
        let mut lines_with_tags = Vec::new();
        let mut warnings = Vec::new();

        for (index, line) in source_code.lines().enumerate() {
            let line_number = index + 1;
            let mut search_from = 0;

            while let Some(found) = pattern.regex.find_at(line, search_from) {
                match scan_tag(&line[found.end()..]) {
                    TagScan::Tag(tag, consumed) => {
                        if tag.trim().is_empty() {
                            warnings.push(ParseWarning::EmptyTag { line: line_number });
                        } else {
                            lines_with_tags.push(LineWithTag::new(line_number, tag));
                        }
                        search_from = found.end() + consumed;
                    }
                    TagScan::NotTagged => search_from = found.end(),
                    TagScan::Unterminated => {
                        warnings.push(ParseWarning::UnterminatedTag { line: line_number });
                        break;
                    }
                }
            }
        }

        for warning in &warnings {
            log::debug!("{}: {warning}", pattern.marker());
        }
        log::debug!(
            "found {} '{}' tags in {} bytes of source",
            lines_with_tags.len(),
            pattern.marker(),
            source_code.len()
        );

        Self {
            source_code,
            lines_with_tags,
            warnings,
        }
    }

    /// Reads and scans a UTF-8 source file.
    pub fn read(path: impl AsRef<Path>, pattern: &MarkerPattern) -> Result<Self> {
        let path = path.as_ref();
        let source_code = std::fs::read_to_string(path)?;
        let source = Self::parse(source_code, pattern);
        log::info!(
            "indexed {} demo tags from {}",
            source.lines_with_tags.len(),
            path.display()
        );
        Ok(source)
    }

    /// Returns the unmodified source text.
    #[must_use]
    pub fn source_code(&self) -> &str {
        &self.source_code
    }

    /// Returns the tags in order of appearance.
    #[must_use]
    pub fn lines_with_tags(&self) -> &[LineWithTag] {
        &self.lines_with_tags
    }

    /// Returns the warnings recorded while scanning.
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Returns the number of lines in the source.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.source_code.lines().count()
    }

    /// Returns the text of a 1-based line.
    #[must_use]
    pub fn line_text(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|index| self.source_code.lines().nth(index))
    }

    /// Returns whether a tag occurs on the given line.
    #[must_use]
    pub fn is_marker_line(&self, line: usize) -> bool {
        let index = self
            .lines_with_tags
            .partition_point(|tagged| tagged.line_number < line);
        self.lines_with_tags
            .get(index)
            .is_some_and(|tagged| tagged.line_number == line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imgui_pattern() -> MarkerPattern {
        MarkerPattern::new("IMGUI_DEMO_MARKER").unwrap()
    }

    fn tags(source: &AnnotatedSource) -> Vec<(usize, &str)> {
        source
            .lines_with_tags()
            .iter()
            .map(|t| (t.line_number, t.tag.as_str()))
            .collect()
    }

    #[test]
    fn test_finds_tags_with_line_numbers() {
        let text = "void f() {\n    IMGUI_DEMO_MARKER(\"Widgets\");\n\n    IMGUI_DEMO_MARKER(\"Widgets/Button\");\n}\n";
        let source = AnnotatedSource::parse(text, &imgui_pattern());
        assert_eq!(tags(&source), vec![(2, "Widgets"), (4, "Widgets/Button")]);
        assert!(source.warnings().is_empty());
    }

    #[test]
    fn test_no_markers_is_empty() {
        let source = AnnotatedSource::parse("int main() { return 0; }\n", &imgui_pattern());
        assert!(source.lines_with_tags().is_empty());
        assert_eq!(source.source_code(), "int main() { return 0; }\n");
    }

    #[test]
    fn test_macro_definition_is_not_a_tag() {
        let text = "#define IMGUI_DEMO_MARKER(section)  do { } while (0)\nIMGUI_DEMO_MARKER(\"Tables\");\n";
        let source = AnnotatedSource::parse(text, &imgui_pattern());
        assert_eq!(tags(&source), vec![(2, "Tables")]);
        assert!(source.warnings().is_empty());
    }

    #[test]
    fn test_unterminated_tag_is_skipped() {
        let text = "IMGUI_DEMO_MARKER(\"Broken);\nIMGUI_DEMO_MARKER(\"Fine\");\n";
        let source = AnnotatedSource::parse(text, &imgui_pattern());
        assert_eq!(tags(&source), vec![(2, "Fine")]);
        assert_eq!(
            source.warnings(),
            &[ParseWarning::UnterminatedTag { line: 1 }]
        );
    }

    #[test]
    fn test_empty_tag_warns() {
        let source = AnnotatedSource::parse("IMGUI_DEMO_MARKER(\"  \");\n", &imgui_pattern());
        assert!(source.lines_with_tags().is_empty());
        assert_eq!(source.warnings(), &[ParseWarning::EmptyTag { line: 1 }]);
    }

    #[test]
    fn test_leading_arguments_and_escapes() {
        let pattern = MarkerPattern::new("demo_marker!").unwrap();
        let text = "demo_marker!(markers, ui, \"Text/\\\"Quoted\\\"\", |ui| {});\n";
        let source = AnnotatedSource::parse(text, &pattern);
        assert_eq!(tags(&source), vec![(1, "Text/\"Quoted\"")]);
    }

    #[test]
    fn test_two_markers_on_one_line() {
        let text = "IMGUI_DEMO_MARKER(\"A\"); IMGUI_DEMO_MARKER(\"B\");\n";
        let source = AnnotatedSource::parse(text, &imgui_pattern());
        assert_eq!(tags(&source), vec![(1, "A"), (1, "B")]);
    }

    #[test]
    fn test_marker_needs_word_boundary() {
        let text = "MY_IMGUI_DEMO_MARKER(\"Nope\");\nIMGUI_DEMO_MARKER (\"Yes\");\n";
        let source = AnnotatedSource::parse(text, &imgui_pattern());
        assert_eq!(tags(&source), vec![(2, "Yes")]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "// header\r\nIMGUI_DEMO_MARKER(\"Layout\");\r\n";
        let source = AnnotatedSource::parse(text, &imgui_pattern());
        assert_eq!(tags(&source), vec![(2, "Layout")]);
        assert_eq!(source.source_code().len(), text.len());
    }

    #[test]
    fn test_line_queries() {
        let text = "first\nIMGUI_DEMO_MARKER(\"A\");\nthird\n";
        let source = AnnotatedSource::parse(text, &imgui_pattern());
        assert_eq!(source.line_count(), 3);
        assert_eq!(source.line_text(1), Some("first"));
        assert_eq!(source.line_text(0), None);
        assert_eq!(source.line_text(4), None);
        assert!(source.is_marker_line(2));
        assert!(!source.is_marker_line(3));
    }

    #[test]
    fn test_empty_marker_name_rejected() {
        assert!(matches!(
            MarkerPattern::new(" "),
            Err(BrowserError::InvalidMarker(_))
        ));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.cpp");
        std::fs::write(&path, "IMGUI_DEMO_MARKER(\"Popups\");\n").unwrap();

        let source = AnnotatedSource::read(&path, &imgui_pattern()).unwrap();
        assert_eq!(tags(&source), vec![(1, "Popups")]);

        let missing = AnnotatedSource::read(dir.path().join("nope.cpp"), &imgui_pattern());
        assert!(matches!(missing, Err(BrowserError::Io(_))));
    }
}
