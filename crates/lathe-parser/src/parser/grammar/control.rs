use crate::cursor::is_ident_start;
use crate::parser::grammar::value;
use crate::parser::{Eof, Parser};
use crate::statement::{Control, Metadata};
use crate::{Ident, Item, Key, Statement};

/// ```txt
/// ControlStatement
///     $ Ident : NodeValue
/// ```
pub(crate) fn control(p: &mut Parser) {
    let start = p.offset();
    p.bump(); // '$'
    let key = if p.at_ident_start() {
        p.ident()
    } else {
        p.push_error("expected control key", start, p.offset());
        Ident::empty()
    };
    let mut statement = Control {
        start,
        end: p.offset(),
        key,
        value: None,
    };

    p.skip_ignored();
    if p.eat(':') {
        statement.end = p.offset();
        p.skip_ignored();
        if p.at_eof() {
            let end = p.source_len();
            p.push_error("expected node value", end, end);
            statement.end = end;
        } else {
            let value = p.node_value_or_err();
            statement.end = value.end();
            statement.value = Some(value);
        }
    } else {
        let at = p.offset();
        p.push_error("expected `:`", at, at);
    }
    p.push_statement(Statement::Control(statement));
}

/// ```txt
/// MetadataStatement
///     metadata (Ident | StringValue) = NodeValue
/// ```
pub(crate) fn metadata(p: &mut Parser, keyword: Ident) {
    p.skip_ignored();
    let mut statement = Metadata {
        start: keyword.start,
        end: keyword.end,
        key: None,
        value: None,
    };

    match p.peek() {
        Some('"') => match value::string_value(p) {
            Ok(key) => {
                statement.end = key.end;
                statement.key = Some(Key::Str(key));
            }
            Err(Eof) => {
                let end = p.source_len();
                p.push_error("unexpected end of file", keyword.end, end);
                statement.end = end;
                p.push_statement(Statement::Metadata(statement));
                return;
            }
        },
        Some(c) if is_ident_start(c) => {
            let key = p.ident();
            statement.end = key.end;
            statement.key = Some(Key::Ident(key));
        }
        _ => {
            let at = p.offset();
            p.push_error("expected metadata key", at, at);
            statement.end = at;
        }
    }

    p.skip_ignored();
    if p.eat('=') {
        statement.end = p.offset();
        p.skip_ignored();
        if p.at_eof() {
            let end = p.source_len();
            p.push_error("expected node value", end, end);
            statement.end = end;
        } else {
            let value = p.node_value_or_err();
            statement.end = value.end();
            statement.value = Some(value);
        }
    } else if statement.key.is_some() {
        let at = p.offset();
        p.push_error("expected `=`", at, at);
    }
    p.push_statement(Statement::Metadata(statement));
}

#[cfg(test)]
mod test {
    use crate::{Node, Parser, Statement};
    use pretty_assertions::assert_eq;

    #[test]
    fn version_control_statement() {
        let tree = Parser::new("$version: \"2\"\n").parse_idl();
        assert!(tree.errors().is_empty());
        let [Statement::Control(control)] = tree.statements() else {
            panic!("expected a control statement, got {tree:?}");
        };
        assert_eq!(control.key.text, "version");
        assert_eq!((control.start, control.end), (0, 13));
        let Some(Node::Str(value)) = &control.value else {
            panic!("expected a string value");
        };
        assert_eq!(value.value, "2");
    }

    #[test]
    fn control_without_value() {
        let tree = Parser::new("$version:").parse_idl();
        assert_eq!(tree.errors().len(), 1);
        let [Statement::Control(control)] = tree.statements() else {
            panic!("expected a control statement, got {tree:?}");
        };
        assert_eq!(control.value, None);
        assert_eq!(control.end, 9);
    }

    #[test]
    fn metadata_with_ident_key() {
        let tree = Parser::new("metadata validators = []\n").parse_idl();
        assert!(tree.errors().is_empty());
        let [Statement::Metadata(metadata)] = tree.statements() else {
            panic!("expected a metadata statement, got {tree:?}");
        };
        assert_eq!(metadata.key.as_ref().unwrap().text(), "validators");
        assert!(matches!(metadata.value, Some(Node::Arr(_))));
    }

    #[test]
    fn metadata_with_quoted_key() {
        let tree = Parser::new("metadata \"suppressions\" = [{ id: \"a\" }]\n").parse_idl();
        assert!(tree.errors().is_empty());
        let [Statement::Metadata(metadata)] = tree.statements() else {
            panic!("expected a metadata statement, got {tree:?}");
        };
        assert_eq!(metadata.key.as_ref().unwrap().text(), "suppressions");
    }

    #[test]
    fn metadata_missing_equals() {
        let tree = Parser::new("metadata foo\n").parse_idl();
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.errors()[0].message(), "expected `=`");
    }
}
