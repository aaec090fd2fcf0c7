pub(crate) mod grammar;

use crate::cursor::{self, Cursor};
use crate::node::{Node, NodeErr};
use crate::{Error, Ident, LimitTracker, NodeTree, Statement, SyntaxTree};

/// Internal unwinder for end-of-input reached deep in node recursion. Never
/// escapes the parser: the statement layer catches it and substitutes an
/// error node for the unfinished value.
#[derive(Debug, thiserror::Error)]
#[error("unexpected end of file")]
pub(crate) struct Eof;

pub(crate) type ParseResult<T> = Result<T, Eof>;

/// Default cap on node value nesting, the parser's only recursion. Real
/// models stay in single digits; 500 leaves room for generated input while
/// keeping the parse well inside a test thread's 2 MiB stack.
const DEFAULT_RECURSION_LIMIT: usize = 500;

/// Parse IDL documents into a flat statement stream, or single node values
/// into a value tree.
///
/// The parser is lenient: it consumes any input to the end and reports
/// problems as [`Error`]s alongside the result, so editor features keep
/// working while the user types.
///
/// ## Example
///
/// ```rust
/// use lathe_parser::Parser;
///
/// let idl = "
/// namespace example.weather
///
/// structure City {
///     name: String
/// }
/// ";
/// let tree = Parser::new(idl).parse_idl();
/// assert!(tree.errors().is_empty());
/// assert_eq!(4, tree.statements().len());
/// ```
#[derive(Debug)]
pub struct Parser<'input> {
    cursor: Cursor<'input>,
    /// Statements produced so far, in file order.
    statements: Vec<Statement>,
    /// The list of syntax errors we've accumulated so far.
    errors: Vec<Error>,
    /// The limit to apply to node value nesting.
    recursion_limit: LimitTracker,
}

impl<'input> Parser<'input> {
    /// Create a new instance of a parser given an input string.
    pub fn new(input: &'input str) -> Self {
        Self {
            cursor: Cursor::new(input),
            statements: Vec::new(),
            errors: Vec::new(),
            recursion_limit: LimitTracker::new(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Configure the recursion limit to use while parsing node values.
    pub fn recursion_limit(mut self, recursion_limit: usize) -> Self {
        self.recursion_limit = LimitTracker::new(recursion_limit);
        self
    }

    /// Parse the input as an IDL document.
    pub fn parse_idl(mut self) -> SyntaxTree {
        grammar::document::document(&mut self);

        SyntaxTree {
            statements: self.statements,
            errors: self.errors,
        }
    }

    /// Parse the input as a single node value.
    pub fn parse_node(mut self) -> NodeTree {
        self.skip_ignored();
        let value = self.node_value_or_err();
        self.skip_ignored();
        if !self.at_eof() {
            let offset = self.offset();
            self.push_error("expected end of input", offset, self.source_len());
        }

        NodeTree {
            value,
            errors: self.errors,
        }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.cursor.peek()
    }

    pub(crate) fn second(&self) -> Option<char> {
        self.cursor.second()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        self.cursor.bump()
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        self.cursor.eatc(c)
    }

    pub(crate) fn offset(&self) -> usize {
        self.cursor.offset()
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    pub(crate) fn source_len(&self) -> usize {
        self.cursor.source_len()
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> &'input str {
        self.cursor.slice(start, end)
    }

    /// Skip whitespace, commas, and `//` line comments.
    pub(crate) fn skip_ignored(&mut self) {
        loop {
            match self.peek() {
                Some(c) if cursor::is_whitespace(c) => {
                    self.bump();
                }
                Some('/') if self.second() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    pub(crate) fn at_ident_start(&self) -> bool {
        self.peek().is_some_and(cursor::is_ident_start)
    }

    /// Read an identifier run. Returns the empty identifier when the cursor
    /// is not on an identifier character.
    pub(crate) fn ident(&mut self) -> Ident {
        let start = self.offset();
        while let Some(c) = self.peek() {
            if cursor::is_ident_char(c) {
                self.bump();
            } else {
                break;
            }
        }
        let end = self.offset();
        Ident::new(start, end, self.slice(start, end))
    }

    /// Whether the cursor sits on exactly `word` as a whole identifier.
    pub(crate) fn at_word(&self, word: &str) -> bool {
        let rest = self.cursor.slice(self.offset(), self.source_len());
        rest.starts_with(word)
            && rest[word.len()..]
                .chars()
                .next()
                .map_or(true, |c| !cursor::is_ident_char(c))
    }

    /// Read a name after a keyword, or report `message` and return the empty
    /// identifier. The returned end offset extends to the cursor so the
    /// unfinished statement still covers the position being typed at.
    pub(crate) fn expect_name(&mut self, message: &str) -> (Ident, usize) {
        if self.at_ident_start() {
            let name = self.ident();
            let end = name.end;
            (name, end)
        } else {
            let at = self.offset();
            self.push_error(message, at, at);
            (Ident::empty(), at)
        }
    }

    pub(crate) fn save(&self) -> Cursor<'input> {
        self.cursor.clone()
    }

    pub(crate) fn restore(&mut self, cursor: Cursor<'input>) {
        self.cursor = cursor;
    }

    pub(crate) fn push_error<S: Into<String>>(&mut self, message: S, start: usize, end: usize) {
        self.errors.push(Error::new(message, start, end));
    }

    /// Append a statement and return its index.
    pub(crate) fn push_statement(&mut self, statement: Statement) -> usize {
        self.statements.push(statement);
        self.statements.len() - 1
    }

    /// Close the block at `index`: record its end offset and the index of the
    /// last statement parsed inside it.
    pub(crate) fn finish_block(&mut self, index: usize, end: usize) {
        let last = self.statements.len() - 1;
        if let Some(Statement::Block(block)) = self.statements.get_mut(index) {
            block.end = end;
            block.last_statement_index = last;
        }
    }

    /// Parse a node value, turning an EOF unwind into an error node so the
    /// enclosing statement still gets produced.
    pub(crate) fn node_value_or_err(&mut self) -> Node {
        let start = self.offset();
        match grammar::value::node_value(self) {
            Ok(node) => node,
            Err(Eof) => {
                let end = self.source_len();
                self.push_error("unexpected end of file", start, end);
                Node::Err(NodeErr {
                    start,
                    end,
                    message: "unexpected end of file".into(),
                })
            }
        }
    }

    pub(crate) fn enter_node(&mut self) -> bool {
        self.recursion_limit.descend();
        !self.recursion_limit.exceeded()
    }

    pub(crate) fn exit_node(&mut self) {
        self.recursion_limit.ascend();
    }
}
