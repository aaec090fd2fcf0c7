use crate::{Error, Node, Statement};
use std::fmt;

/// The result of parsing an IDL document: a flat, file-ordered statement
/// stream plus the errors encountered along the way.
///
/// A tree is immutable once produced and can be shared freely between
/// queries.
pub struct SyntaxTree {
    pub(crate) statements: Vec<Statement>,
    pub(crate) errors: Vec<Error>,
}

impl SyntaxTree {
    /// Get a reference to the tree's statements, in file order.
    pub fn statements(&self) -> &[Statement] {
        self.statements.as_slice()
    }

    /// Get a reference to the tree's errors.
    pub fn errors(&self) -> &[Error] {
        self.errors.as_slice()
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "- {statement:?}")?;
        }
        for error in &self.errors {
            writeln!(f, "- {error:?}")?;
        }
        Ok(())
    }
}

/// The result of parsing a single node value.
pub struct NodeTree {
    pub(crate) value: Node,
    pub(crate) errors: Vec<Error>,
}

impl NodeTree {
    pub fn value(&self) -> &Node {
        &self.value
    }

    pub fn errors(&self) -> &[Error] {
        self.errors.as_slice()
    }

    pub fn into_value(self) -> Node {
        self.value
    }
}

impl fmt::Debug for NodeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {:?}", self.value)?;
        for error in &self.errors {
            writeln!(f, "- {error:?}")?;
        }
        Ok(())
    }
}
