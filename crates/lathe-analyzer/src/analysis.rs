use crate::node_cursor::{node_path, NodePath};
use crate::{context_at, Document, DocumentPositionContext, StatementView};
use lathe_parser::{Node, Parser, Statement, SyntaxTree};
use triomphe::Arc;

/// A parse of one document snapshot, tagged with the revision it was
/// produced from, plus the statement locator built over it.
///
/// An analysis is immutable; edits to the document make it stale rather
/// than changing it, and the caller re-runs the (cheap, linear) parse.
pub struct Analysis {
    view: StatementView,
    revision: u64,
}

impl Analysis {
    /// Parse a snapshot of `document`.
    pub fn of(document: &Document) -> Self {
        let tree = Arc::new(Parser::new(document.text()).parse_idl());
        Self {
            view: StatementView::new(tree),
            revision: document.revision(),
        }
    }

    pub fn tree(&self) -> &SyntaxTree {
        self.view.tree()
    }

    /// Share the immutable parse result.
    pub fn share_tree(&self) -> Arc<SyntaxTree> {
        self.view.share_tree()
    }

    pub fn view(&self) -> &StatementView {
        &self.view
    }

    /// The document revision this analysis was produced from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether `document` has been edited since this analysis was produced.
    /// Stale results must be discarded, not queried against new offsets.
    pub fn is_stale(&self, document: &Document) -> bool {
        self.revision != document.revision()
    }

    /// Index of the innermost statement containing `offset`.
    pub fn statement_index_at(&self, offset: usize) -> Option<usize> {
        self.view.statement_index_at(offset)
    }

    pub fn statement_at(&self, offset: usize) -> Option<&Statement> {
        self.view.statement_at(offset)
    }

    /// The semantic context at `offset`.
    pub fn context_at(&self, offset: usize) -> DocumentPositionContext {
        context_at(&self.view, offset)
    }

    /// The path into the node value of the statement enclosing `offset`,
    /// when that statement carries one.
    pub fn node_path_at(&self, offset: usize) -> Option<NodePath<'_>> {
        let statement = self.statement_at(offset)?;
        let value = statement_value(statement)?;
        Some(node_path(value, offset))
    }
}

/// The node value carried by a statement, if any.
fn statement_value(statement: &Statement) -> Option<&Node> {
    match statement {
        Statement::Control(s) => s.value.as_ref(),
        Statement::Metadata(s) => s.value.as_ref(),
        Statement::TraitApplication(s) => s.value.as_ref(),
        Statement::NodeMemberDef(s) => s.value.as_ref(),
        Statement::EnumMemberDef(s) => s.value.as_ref(),
        Statement::MemberDef(s) => s.default.as_ref(),
        _ => None,
    }
}
