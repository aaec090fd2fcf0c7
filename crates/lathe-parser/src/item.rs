use std::fmt;

/// Base carrier for anything the parser produced that occupies a span of the
/// source text. Offsets are byte offsets into the parsed input.
pub trait Item {
    fn start(&self) -> usize;
    fn end(&self) -> usize;

    /// Whether `pos` falls within this item (`start <= pos < end`).
    fn is_in(&self, pos: usize) -> bool {
        self.start() <= pos && pos < self.end()
    }
}

/// An identifier span with its text.
///
/// Identifier runs are deliberately permissive: after the leading letter or
/// underscore they may contain digits, `_`, `$`, `.` and `#`, so a whole
/// shape id like `example.weather#City$name` is one identifier. Whether the
/// id is *valid* is the semantic layer's concern; the parser only produces
/// spans.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Ident {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// The absent identifier. Any real identifier has `start < end`.
    pub fn empty() -> Self {
        Self {
            start: 0,
            end: 0,
            text: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Item for Ident {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.end
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
