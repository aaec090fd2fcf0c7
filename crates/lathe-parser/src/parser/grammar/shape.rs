use crate::cursor::is_ident_start;
use crate::parser::grammar::{member, trait_};
use crate::parser::Parser;
use crate::statement::{Block, ForResource, Incomplete, Mixins, ShapeDef};
use crate::{Ident, Statement};

/// ```txt
/// ShapeStatement
///     ShapeType Ident [ForResource] [Mixins] [ShapeBody]
/// ```
///
/// Any unreserved identifier is treated as a shape-type token; whether the
/// type exists is the semantic layer's concern. The body parser is keyed off
/// the type token, so only the container types get a block.
pub(crate) fn shape_def(p: &mut Parser, shape_type: Ident) {
    p.skip_ignored();
    if !p.at_ident_start() {
        let at = p.offset();
        p.push_error("expected shape name", at, at);
        p.push_statement(Statement::Incomplete(Incomplete {
            start: shape_type.start,
            end: shape_type.end,
            ident: shape_type,
        }));
        return;
    }
    let name = p.ident();
    let type_text = shape_type.text.clone();
    p.push_statement(Statement::ShapeDef(ShapeDef {
        start: shape_type.start,
        end: name.end,
        shape_type,
        name,
    }));

    p.skip_ignored();
    if p.at_word("for") {
        for_resource(p);
        p.skip_ignored();
    }
    if p.at_word("with") {
        mixins(p);
        p.skip_ignored();
    }

    match type_text.as_str() {
        "enum" | "intEnum" => body(p, member::enum_member, false),
        "structure" | "list" | "map" | "union" => body(p, member::structural_member, true),
        "resource" | "service" => body(p, member::node_member, false),
        "operation" => body(p, member::operation_member, false),
        _ => {}
    }
}

/// ```txt
/// ForResource
///     for ShapeId
/// ```
fn for_resource(p: &mut Parser) {
    let start = p.offset();
    p.ident(); // `for`
    p.skip_ignored();
    let (resource, end) = p.expect_name("expected resource shape id");
    p.push_statement(Statement::ForResource(ForResource {
        start,
        end,
        resource,
    }));
}

/// ```txt
/// Mixins
///     with [ Ident* ]
/// ```
pub(crate) fn mixins(p: &mut Parser) {
    let start = p.offset();
    p.ident(); // `with`
    p.skip_ignored();
    let mut mixins = Vec::new();
    if !p.eat('[') {
        let at = p.offset();
        p.push_error("expected `[`", at, at);
        p.push_statement(Statement::Mixins(Mixins {
            start,
            end: at,
            mixins,
        }));
        return;
    }
    loop {
        p.skip_ignored();
        match p.peek() {
            None => {
                let end = p.source_len();
                p.push_error("expected `]`", end, end);
                break;
            }
            Some(']') => {
                p.bump();
                break;
            }
            Some(c) if is_ident_start(c) => mixins.push(p.ident()),
            Some(c) => {
                let at = p.offset();
                p.bump();
                p.push_error(format!("unexpected character `{c}`"), at, p.offset());
            }
        }
    }
    p.push_statement(Statement::Mixins(Mixins {
        start,
        end: p.offset(),
        mixins,
    }));
}

/// Parse a `{ … }` shape body: emit the block marker, then member
/// statements until the closing brace.
///
/// A missing `{` is reported but not fatal; parsing recovers at the next
/// member start (identifier, `@`, or `$`). A missing `}` closes the block at
/// end of input.
pub(crate) fn body(p: &mut Parser, member: fn(&mut Parser), elided_allowed: bool) {
    p.skip_ignored();
    if p.at_eof() {
        let end = p.source_len();
        p.push_error("expected `{`", end, end);
        return;
    }
    let block_start = p.offset();
    if !p.eat('{') {
        p.push_error("expected `{`", block_start, block_start);
    }
    let block_index = p.push_statement(Statement::Block(Block {
        start: block_start,
        end: block_start,
        last_statement_index: 0,
    }));
    loop {
        p.skip_ignored();
        match p.peek() {
            None => {
                let end = p.source_len();
                p.push_error("expected `}`", end, end);
                p.finish_block(block_index, end);
                return;
            }
            Some('}') => {
                p.bump();
                p.finish_block(block_index, p.offset());
                return;
            }
            Some('@') => trait_::trait_application(p),
            Some('$') if elided_allowed => member::elided_member(p),
            Some(c) if is_ident_start(c) => member(p),
            Some(c) => {
                let at = p.offset();
                p.bump();
                p.push_error(format!("unexpected character `{c}`"), at, p.offset());
            }
        }
    }
}
