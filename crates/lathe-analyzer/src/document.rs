use lathe_parser::{Item, Str};
use lsp_types::{Position, Range};

/// A mutable, line-indexed text buffer for one open IDL file.
///
/// The buffer is UTF-8; `line_starts` holds the byte offset of every line
/// start (`line_starts[0] == 0`, each other entry one past a `\n`).
/// Positions use the editor protocol convention (zero-based lines, UTF-16
/// code units for `character`); the document converts between the two
/// encodings by scanning within a line.
///
/// Out-of-bounds positional input is not an error: lookups return `None` so
/// hot query paths can short-circuit, and edit ranges clamp.
#[derive(Clone, Debug)]
pub struct Document {
    text: String,
    line_starts: Vec<usize>,
    revision: u64,
}

impl Document {
    pub fn of(text: impl Into<String>) -> Self {
        let text = text.into();
        let line_starts = compute_line_starts(&text);
        Self {
            text,
            line_starts,
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offsets of every line start; never empty.
    pub fn line_starts(&self) -> &[usize] {
        &self.line_starts
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Bumped on every edit. Parse results are tagged with the revision they
    /// were produced from so stale ones can be detected and discarded.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace `range` with `text`, or the whole buffer when `range` is
    /// `None`. Out-of-range positions clamp: a line past the last line
    /// appends at end of buffer. The line index is rebuilt and the revision
    /// bumped.
    pub fn apply_edit(&mut self, range: Option<Range>, text: &str) {
        match range {
            None => {
                self.text.clear();
                self.text.push_str(text);
            }
            Some(range) => {
                let start = self.clamped_offset(range.start);
                let end = self.clamped_offset(range.end).max(start);
                self.text.replace_range(start..end, text);
            }
        }
        self.line_starts = compute_line_starts(&self.text);
        self.revision += 1;
    }

    /// Translate a position to a byte offset, clamping instead of failing.
    fn clamped_offset(&self, position: Position) -> usize {
        let line = position.line as usize;
        if line >= self.line_starts.len() {
            return self.text.len();
        }
        let line_start = self.line_starts[line];
        let line_end = self.line_end(line);
        let mut offset = line_start;
        let mut units = position.character as usize;
        for c in self.text[line_start..line_end].chars() {
            if c == '\n' || units == 0 {
                break;
            }
            let width = c.len_utf16();
            if width > units {
                break;
            }
            units -= width;
            offset += c.len_utf8();
        }
        offset
    }

    /// Translate a position to a byte offset. `None` when the line is out of
    /// range, or the character lands on or past the next line's start (or
    /// past buffer end on the last line).
    pub fn index_of_position(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;
        if line >= self.line_starts.len() {
            return None;
        }
        let line_start = self.line_starts[line];
        let line_end = self.line_end(line);
        let last_line = line + 1 == self.line_starts.len();

        let mut offset = line_start;
        let mut units = position.character as usize;
        let mut chars = self.text[line_start..line_end].chars();
        while units > 0 {
            let c = chars.next()?;
            let width = c.len_utf16();
            if width > units {
                // inside a surrogate pair; not a valid boundary
                return None;
            }
            units -= width;
            offset += c.len_utf8();
        }
        if !last_line && offset >= line_end {
            return None;
        }
        Some(offset)
    }

    /// Translate a byte offset to a position by binary search of the line
    /// index. `None` past the end of the buffer or off a character boundary.
    pub fn position_at_index(&self, offset: usize) -> Option<Position> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character: usize = self.text[line_start..offset]
            .chars()
            .map(char::len_utf16)
            .sum();
        Some(Position::new(line as u32, character as u32))
    }

    /// The protocol range covering `[start, end)`. `end` may equal the
    /// buffer length (exclusive end of document).
    pub fn range_between(&self, start: usize, end: usize) -> Option<Range> {
        if start > end {
            return None;
        }
        Some(Range::new(
            self.position_at_index(start)?,
            self.position_at_index(end)?,
        ))
    }

    /// Bounds-checked copy of a span.
    pub fn copy_span(&self, start: usize, end: usize) -> Option<String> {
        self.borrow_span(start, end).map(str::to_string)
    }

    /// Zero-copy slice of a span. The borrow's validity ends at the next
    /// [`apply_edit`](Document::apply_edit).
    pub fn borrow_span(&self, start: usize, end: usize) -> Option<&str> {
        self.text.get(start..end)
    }

    fn line_end(&self, line: usize) -> usize {
        self.line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.text.len())
    }
}

fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut line_starts = vec![0];
    for (index, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            line_starts.push(index + 1);
        }
    }
    line_starts
}

/// The protocol range of any parsed item.
pub fn range_of(document: &Document, item: &impl Item) -> Option<Range> {
    document.range_between(item.start(), item.end())
}

/// The protocol range of a string value's contents, without the surrounding
/// quotes. Useful when a rename or hover should target only the text.
pub fn range_of_value_excluding_quotes(document: &Document, value: &Str) -> Option<Range> {
    let quote = if value.block { 3 } else { 1 };
    let start = value.start + quote;
    let end = value.end.saturating_sub(quote).max(start);
    document.range_between(start, end)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_starts_enumerate_newlines() {
        let document = Document::of("a\nb\nc\n");
        assert_eq!(document.line_starts(), [0, 2, 4, 6]);
        let document = Document::of("no trailing newline");
        assert_eq!(document.line_starts(), [0]);
        let document = Document::of("");
        assert_eq!(document.line_starts(), [0]);
    }

    #[test]
    fn edit_replaces_span_and_reindexes() {
        let mut document = Document::of("a\nb\nc\n");
        document.apply_edit(
            Some(Range::new(Position::new(1, 0), Position::new(1, 1))),
            "bb",
        );
        assert_eq!(document.text(), "a\nbb\nc\n");
        assert_eq!(document.line_starts(), [0, 2, 5, 7]);
        assert_eq!(document.revision(), 1);
    }

    #[test]
    fn full_replacement() {
        let mut document = Document::of("a\nb\n");
        document.apply_edit(None, "xyz");
        assert_eq!(document.text(), "xyz");
        assert_eq!(document.line_starts(), [0]);
    }

    #[test]
    fn edit_length_arithmetic() {
        let before = Document::of("structure Foo {\n  a: String\n}\n");
        let mut document = before.clone();
        let start = document
            .index_of_position(Position::new(1, 2))
            .unwrap();
        let end = document
            .index_of_position(Position::new(1, 3))
            .unwrap();
        document.apply_edit(
            Some(Range::new(Position::new(1, 2), Position::new(1, 3))),
            "abc",
        );
        assert_eq!(document.len(), before.len() - (end - start) + "abc".len());
    }

    #[test]
    fn edits_past_the_last_line_append() {
        let mut document = Document::of("a\n");
        document.apply_edit(
            Some(Range::new(Position::new(9, 0), Position::new(9, 0))),
            "b",
        );
        assert_eq!(document.text(), "a\nb");
    }

    #[test]
    fn out_of_range_positions_are_none() {
        let document = Document::of("ab\ncd\n");
        assert_eq!(document.index_of_position(Position::new(5, 0)), None);
        // character landing on the next line's start
        assert_eq!(document.index_of_position(Position::new(0, 3)), None);
        // but the newline itself is addressable
        assert_eq!(document.index_of_position(Position::new(0, 2)), Some(2));
    }

    #[test]
    fn end_of_document_is_addressable_on_the_last_line() {
        let document = Document::of("ab");
        assert_eq!(document.index_of_position(Position::new(0, 2)), Some(2));
        assert_eq!(document.index_of_position(Position::new(0, 3)), None);
        assert_eq!(document.position_at_index(2), Some(Position::new(0, 2)));
    }

    #[test]
    fn position_round_trip_over_every_boundary() {
        let text = "ab\ncdef\n\nx😀y\nend";
        let document = Document::of(text);
        for offset in 0..=text.len() {
            if !text.is_char_boundary(offset) {
                assert_eq!(document.position_at_index(offset), None);
                continue;
            }
            let position = document.position_at_index(offset).unwrap();
            assert_eq!(
                document.index_of_position(position),
                Some(offset),
                "round trip failed at {offset}"
            );
        }
    }

    #[test]
    fn utf16_characters_count_code_units() {
        // '😀' is two UTF-16 code units and four UTF-8 bytes
        let document = Document::of("x😀y\n");
        assert_eq!(document.index_of_position(Position::new(0, 1)), Some(1));
        assert_eq!(document.index_of_position(Position::new(0, 3)), Some(5));
        assert_eq!(document.position_at_index(5), Some(Position::new(0, 3)));
        // a position inside the surrogate pair is not a boundary
        assert_eq!(document.index_of_position(Position::new(0, 2)), None);
    }

    #[test]
    fn spans_are_bounds_checked() {
        let document = Document::of("hello");
        assert_eq!(document.copy_span(0, 5).as_deref(), Some("hello"));
        assert_eq!(document.borrow_span(1, 3), Some("el"));
        assert_eq!(document.borrow_span(3, 9), None);
        assert_eq!(document.range_between(9, 3), None);
    }

    #[test]
    fn range_between_spans_lines() {
        let document = Document::of("ab\ncd\n");
        let range = document.range_between(1, 4).unwrap();
        assert_eq!(range.start, Position::new(0, 1));
        assert_eq!(range.end, Position::new(1, 1));
        let whole = document.range_between(0, document.len()).unwrap();
        assert_eq!(whole.end, Position::new(2, 0));
    }
}
