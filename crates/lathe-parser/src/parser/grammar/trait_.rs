use crate::cursor::is_ident_start;
use crate::parser::grammar::value;
use crate::parser::{Eof, Parser};
use crate::statement::TraitApplication;
use crate::{Ident, Kvps, Node, NodeErr, Statement};

/// ```txt
/// TraitApplication
///     @ ShapeId
///     @ ShapeId ( NodeValue )
///     @ ShapeId ( Kvps )
/// ```
///
/// A trait applies to whatever statement follows it in the flat stream.
pub(crate) fn trait_application(p: &mut Parser) {
    let start = p.offset();
    p.bump(); // '@'
    let id = if p.at_ident_start() {
        p.ident()
    } else {
        p.push_error("expected trait name", start, p.offset());
        Ident::empty()
    };
    let mut end = p.offset();
    let mut value = None;
    if p.peek() == Some('(') {
        let (v, value_end) = trait_value(p);
        value = v;
        end = value_end;
    }
    p.push_statement(Statement::TraitApplication(TraitApplication {
        start,
        end,
        id,
        value,
    }));
}

/// The parenthesised part of a trait application.
///
/// A leading `{`, `[`, number or lone value parses as a plain node value. A
/// leading identifier or quoted string *followed by `:`* makes the whole
/// parenthesis an implicit key-value list; the cursor rewinds and re-parses
/// accordingly.
fn trait_value(p: &mut Parser) -> (Option<Node>, usize) {
    p.bump(); // '('
    p.skip_ignored();
    let value = match p.peek() {
        None => {
            let end = p.source_len();
            p.push_error("expected `)`", end, end);
            return (None, end);
        }
        Some(')') => {
            let at = p.offset();
            Some(Node::Kvps(Kvps {
                start: at,
                end: at,
                kvps: Vec::new(),
            }))
        }
        Some(c) if is_ident_start(c) || c == '"' => {
            if at_kvps(p) {
                let start = p.offset();
                match value::kvps(p, ')') {
                    Ok(kvps) => Some(Node::Kvps(kvps)),
                    Err(Eof) => {
                        let end = p.source_len();
                        p.push_error("unexpected end of file", start, end);
                        Some(Node::Err(NodeErr {
                            start,
                            end,
                            message: "unexpected end of file".into(),
                        }))
                    }
                }
            } else {
                Some(p.node_value_or_err())
            }
        }
        _ => Some(p.node_value_or_err()),
    };

    p.skip_ignored();
    if p.eat(')') {
        (value, p.offset())
    } else {
        let at = p.offset();
        p.push_error("expected `)`", at, at);
        (value, at)
    }
}

/// Peek past one string or identifier for a `:`, then rewind.
fn at_kvps(p: &mut Parser) -> bool {
    let saved = p.save();
    let key_ok = if p.peek() == Some('"') {
        value::string_value(p).is_ok()
    } else {
        !p.ident().is_empty()
    };
    let at_colon = key_ok && {
        p.skip_ignored();
        p.peek() == Some(':')
    };
    p.restore(saved);
    at_colon
}
