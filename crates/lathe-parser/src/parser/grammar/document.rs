use crate::cursor::is_ident_start;
use crate::parser::grammar::{control, shape, trait_};
use crate::parser::Parser;
use crate::statement::{Apply, Block, Namespace, Use};
use crate::{Ident, Statement};

/// Top-level statement loop. Dispatches on a single-character peek; anything
/// unrecognisable skips one character and records an error, so the loop
/// always makes progress.
pub(crate) fn document(p: &mut Parser) {
    loop {
        p.skip_ignored();
        let Some(c) = p.peek() else { break };
        match c {
            '@' => trait_::trait_application(p),
            '$' => control::control(p),
            c if is_ident_start(c) => statement(p),
            c => {
                let start = p.offset();
                p.bump();
                p.push_error(format!("unexpected character `{c}`"), start, p.offset());
            }
        }
    }
}

fn statement(p: &mut Parser) {
    let ident = p.ident();
    match ident.text.as_str() {
        "namespace" => namespace(p, ident),
        "use" => use_(p, ident),
        "metadata" => control::metadata(p, ident),
        "apply" => apply(p, ident),
        _ => shape::shape_def(p, ident),
    }
}

/// ```txt
/// NamespaceStatement
///     namespace Ident
/// ```
fn namespace(p: &mut Parser, keyword: Ident) {
    p.skip_ignored();
    let (name, end) = p.expect_name("expected namespace name");
    p.push_statement(Statement::Namespace(Namespace {
        start: keyword.start,
        end,
        name,
    }));
}

/// ```txt
/// UseStatement
///     use AbsoluteShapeId
/// ```
fn use_(p: &mut Parser, keyword: Ident) {
    p.skip_ignored();
    let (name, end) = p.expect_name("expected shape id");
    p.push_statement(Statement::Use(Use {
        start: keyword.start,
        end,
        name,
    }));
}

/// ```txt
/// ApplyStatement
///     apply ShapeId TraitApplication
///     apply ShapeId { TraitApplication* }
/// ```
///
/// The trait applications parse as sibling statements; the braced form gets
/// a block around them.
fn apply(p: &mut Parser, keyword: Ident) {
    p.skip_ignored();
    let (id, end) = p.expect_name("expected shape id");
    p.push_statement(Statement::Apply(Apply {
        start: keyword.start,
        end,
        id,
    }));

    p.skip_ignored();
    if p.peek() != Some('{') {
        return;
    }
    let block_start = p.offset();
    p.bump();
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
            Some(c) => {
                let start = p.offset();
                p.bump();
                p.push_error(format!("unexpected character `{c}`"), start, p.offset());
            }
        }
    }
}
