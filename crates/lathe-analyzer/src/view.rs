use lathe_parser::{Item, Statement, SyntaxTree};
use triomphe::Arc;

/// Binary-search locator over the flat statement stream.
///
/// Construction walks the stream once to record each statement's enclosing
/// block, so a query is a binary search on `start` plus a walk up the
/// enclosing chain. The chain's length is the block nesting depth, which
/// only inline I/O definitions ever push past one.
pub struct StatementView {
    tree: Arc<SyntaxTree>,
    parents: Vec<Option<usize>>,
}

impl StatementView {
    pub fn new(tree: Arc<SyntaxTree>) -> Self {
        let statements = tree.statements();
        let mut parents = vec![None; statements.len()];
        let mut stack: Vec<(usize, usize)> = Vec::new();
        for index in 0..statements.len() {
            while let Some(&(_, last)) = stack.last() {
                if index > last {
                    stack.pop();
                } else {
                    break;
                }
            }
            parents[index] = stack.last().map(|&(block, _)| block);
            if let Statement::Block(block) = &statements[index] {
                if block.last_statement_index > index {
                    stack.push((index, block.last_statement_index));
                }
            }
        }
        Self { tree, parents }
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn share_tree(&self) -> Arc<SyntaxTree> {
        self.tree.clone()
    }

    pub fn statements(&self) -> &[Statement] {
        self.tree.statements()
    }

    /// Index of the innermost statement containing `offset`, or `None`.
    ///
    /// The candidate is the last statement starting at or before `offset`;
    /// if it doesn't contain the offset, the enclosing blocks are tried from
    /// the inside out, so an offset in the whitespace between two members
    /// resolves to their block.
    pub fn statement_index_at(&self, offset: usize) -> Option<usize> {
        let statements = self.tree.statements();
        let candidate = statements.partition_point(|s| s.start() <= offset);
        if candidate == 0 {
            return None;
        }
        let mut index = candidate - 1;
        loop {
            if statements[index].is_in(offset) {
                return Some(index);
            }
            index = self.parents[index]?;
        }
    }

    pub fn statement_at(&self, offset: usize) -> Option<&Statement> {
        self.statement_index_at(offset)
            .map(|index| &self.tree.statements()[index])
    }
}
