use crate::Document;
use lathe_parser::is_ident_char;
use lsp_types::{Position, Range};

/// How a scanned identifier refers to a shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeIdKind {
    /// A root shape id, namespace, or bare name.
    Root,
    /// A member-qualified id (contains `$`).
    Member,
}

/// An identifier found under the cursor. `text` borrows from the document;
/// the borrow's validity ends at the next edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScannedId<'a> {
    pub kind: ShapeIdKind,
    pub text: &'a str,
    pub range: Range,
    pub start: usize,
    pub end: usize,
}

impl ScannedId<'_> {
    /// Whether the id carries a namespace (`#`).
    pub fn is_absolute(&self) -> bool {
        self.text.contains('#')
    }

    /// Whether the id contains dotted segments.
    pub fn has_dots(&self) -> bool {
        self.text.contains('.')
    }
}

/// The identifier under `position`, expanded left and right over identifier
/// characters. `None` when the position isn't on an identifier character.
///
/// Any position within the returned range scans to the same identifier.
pub fn identifier_at(document: &Document, position: Position) -> Option<ScannedId<'_>> {
    let offset = document.index_of_position(position)?;
    let text = document.text();
    let c = text[offset..].chars().next()?;
    if !is_ident_char(c) {
        return None;
    }

    let mut start = offset;
    while start > 0 {
        let Some(previous) = text[..start].chars().next_back() else {
            break;
        };
        if is_ident_char(previous) {
            start -= previous.len_utf8();
        } else {
            break;
        }
    }
    let mut end = offset;
    while end < text.len() {
        let Some(next) = text[end..].chars().next() else {
            break;
        };
        if is_ident_char(next) {
            end += next.len_utf8();
        } else {
            break;
        }
    }

    let slice = &text[start..end];
    let kind = if slice.contains('$') {
        ShapeIdKind::Member
    } else {
        ShapeIdKind::Root
    };
    Some(ScannedId {
        kind,
        text: slice,
        range: document.range_between(start, end)?,
        start,
        end,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn whole_shape_id_is_one_identifier() {
        let document = Document::of("use com.foo#Bar\n");
        let id = identifier_at(&document, Position::new(0, 8)).unwrap();
        assert_eq!(id.text, "com.foo#Bar");
        assert_eq!(id.kind, ShapeIdKind::Root);
        assert!(id.is_absolute());
        assert!(id.has_dots());
        assert_eq!((id.start, id.end), (4, 15));
        assert_eq!(id.range.start, Position::new(0, 4));
        assert_eq!(id.range.end, Position::new(0, 15));
    }

    #[test]
    fn member_qualified_id() {
        let document = Document::of("apply com.foo#Bar$baz @deprecated\n");
        let id = identifier_at(&document, Position::new(0, 19)).unwrap();
        assert_eq!(id.kind, ShapeIdKind::Member);
        assert_eq!(id.text, "com.foo#Bar$baz");
    }

    #[test]
    fn off_identifier_characters_is_none() {
        let document = Document::of("a b\n");
        assert_eq!(identifier_at(&document, Position::new(0, 1)), None);
        // out of range entirely
        assert_eq!(identifier_at(&document, Position::new(9, 0)), None);
        // end of buffer
        assert_eq!(identifier_at(&document, Position::new(1, 0)), None);
    }

    #[test]
    fn every_position_in_the_range_scans_the_same_identifier() {
        let document = Document::of("structure CityData {}\n");
        let first = identifier_at(&document, Position::new(0, 10)).unwrap();
        for character in 10..18 {
            let id = identifier_at(&document, Position::new(0, character)).unwrap();
            assert_eq!(id.text, first.text);
            assert_eq!((id.start, id.end), (first.start, first.end));
        }
    }
}
