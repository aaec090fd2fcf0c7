use crate::cursor::{
    is_digit_char, is_ident_start, is_node_structural_breakpoint, is_structural_breakpoint,
    is_whitespace,
};
use crate::node::{Arr, Key, Kvp, Kvps, Node, NodeErr, Num, Obj, Str};
use crate::parser::{Eof, ParseResult, Parser};
use crate::Item;

/// ```txt
/// NodeValue
///     { Kvps }
///     [ NodeValue* ]
///     StringValue
///     Number
///     Ident
/// ```
pub(crate) fn node_value(p: &mut Parser) -> ParseResult<Node> {
    if !p.enter_node() {
        let start = p.offset();
        p.bump();
        let message = String::from("node value nesting too deep");
        p.push_error(message.clone(), start, p.offset());
        p.exit_node();
        return Ok(Node::Err(NodeErr {
            start,
            end: p.offset(),
            message,
        }));
    }
    let value = node_value_inner(p);
    p.exit_node();
    value
}

fn node_value_inner(p: &mut Parser) -> ParseResult<Node> {
    match p.peek() {
        None => Err(Eof),
        Some('{') => obj(p),
        Some('[') => arr(p),
        Some('"') => Ok(Node::Str(string_value(p)?)),
        Some(c) if is_digit_char(c) || c == '-' || c == '+' => Ok(number(p)),
        Some(c) if is_ident_start(c) => Ok(Node::Ident(p.ident())),
        Some(c) => {
            let start = p.offset();
            p.bump();
            let message = format!("unexpected character `{c}` in node value");
            p.push_error(message.clone(), start, p.offset());
            Ok(Node::Err(NodeErr {
                start,
                end: p.offset(),
                message,
            }))
        }
    }
}

/// ```txt
/// ObjectValue
///     { Kvps }
/// ```
fn obj(p: &mut Parser) -> ParseResult<Node> {
    let start = p.offset();
    p.bump(); // '{'
    let kvps = kvps(p, '}')?;
    p.bump(); // '}'
    Ok(Node::Obj(Obj {
        start,
        end: p.offset(),
        kvps,
    }))
}

/// ```txt
/// ArrayValue
///     [ NodeValue* ]
/// ```
fn arr(p: &mut Parser) -> ParseResult<Node> {
    let start = p.offset();
    p.bump(); // '['
    let mut elements = Vec::new();
    loop {
        p.skip_ignored();
        match p.peek() {
            None => return Err(Eof),
            Some(']') => {
                p.bump();
                break;
            }
            _ => elements.push(node_value(p)?),
        }
    }
    Ok(Node::Arr(Arr {
        start,
        end: p.offset(),
        elements,
    }))
}

/// Parse `key: value` pairs until `terminator`, which is left unconsumed.
/// The span covers the pairs, not the enclosing delimiters.
pub(crate) fn kvps(p: &mut Parser, terminator: char) -> ParseResult<Kvps> {
    p.skip_ignored();
    let mut start = p.offset();
    let mut items: Vec<Kvp> = Vec::new();
    loop {
        p.skip_ignored();
        match p.peek() {
            None => return Err(Eof),
            Some(c) if c == terminator => break,
            Some(c) if c == '"' || is_ident_start(c) => items.push(kvp(p)?),
            Some(c) => {
                let at = p.offset();
                p.bump();
                p.push_error(format!("unexpected character `{c}`"), at, p.offset());
            }
        }
    }
    if let Some(first) = items.first() {
        start = first.start;
    }
    let end = items.last().map(|kvp| kvp.end).unwrap_or(start);
    Ok(Kvps {
        start,
        end,
        kvps: items,
    })
}

/// ```txt
/// Kvp
///     (Ident | StringValue) : NodeValue
/// ```
fn kvp(p: &mut Parser) -> ParseResult<Kvp> {
    let key = if p.peek() == Some('"') {
        Key::Str(string_value(p)?)
    } else {
        Key::Ident(p.ident())
    };
    let mut kvp = Kvp {
        start: key.start(),
        end: key.end(),
        key,
        value: None,
    };

    p.skip_ignored();
    if p.eat(':') {
        kvp.end = p.offset();
        p.skip_ignored();
        match p.peek() {
            None => return Err(Eof),
            Some(c) if matches!(c, '}' | ']' | ')') => {
                // empty value slot: completion triggers here
                let at = p.offset();
                p.push_error("expected node value", at, at);
                kvp.end = at;
            }
            _ => {
                let value = node_value(p)?;
                kvp.end = value.end();
                kvp.value = Some(value);
            }
        }
    } else {
        let at = p.offset();
        p.push_error("expected `:`", at, at);
    }
    Ok(kvp)
}

/// A `"…"` string or `"""` text block. The span includes the quotes; the
/// value does not.
pub(crate) fn string_value(p: &mut Parser) -> ParseResult<Str> {
    let start = p.offset();
    p.bump(); // '"'
    if p.peek() == Some('"') {
        p.bump();
        if p.peek() == Some('"') {
            p.bump();
            return text_block(p, start);
        }
        return Ok(Str {
            start,
            end: p.offset(),
            value: String::new(),
            block: false,
        });
    }

    let mut value = String::new();
    loop {
        match p.bump() {
            None => return Err(Eof),
            Some('"') => break,
            Some('\\') => match p.bump() {
                None => return Err(Eof),
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some('r') => value.push('\r'),
                Some(c @ ('"' | '\\' | '/')) => value.push(c),
                Some(c) => {
                    // unknown escapes pass through; validity is the semantic
                    // layer's concern
                    value.push('\\');
                    value.push(c);
                }
            },
            Some(c) => value.push(c),
        }
    }
    Ok(Str {
        start,
        end: p.offset(),
        value,
        block: false,
    })
}

fn text_block(p: &mut Parser, start: usize) -> ParseResult<Str> {
    let mut value = String::new();
    loop {
        match p.bump() {
            None => return Err(Eof),
            Some('"') if p.peek() == Some('"') && p.second() == Some('"') => {
                p.bump();
                p.bump();
                return Ok(Str {
                    start,
                    end: p.offset(),
                    value,
                    block: true,
                });
            }
            Some(c) => value.push(c),
        }
    }
}

/// Number runs advance until whitespace or a break character; the lexeme is
/// validated as a decimal afterwards.
fn number(p: &mut Parser) -> Node {
    let start = p.offset();
    while let Some(c) = p.peek() {
        if is_whitespace(c) || is_node_structural_breakpoint(c) || is_structural_breakpoint(c) {
            break;
        }
        p.bump();
    }
    let end = p.offset();
    let text = p.slice(start, end).to_string();
    match text.parse::<f64>() {
        Ok(value) => Node::Num(Num {
            start,
            end,
            text,
            value: value.into(),
        }),
        Err(_) => {
            let message = format!("invalid number `{text}`");
            p.push_error(message.clone(), start, end);
            Node::Err(NodeErr {
                start,
                end,
                message,
            })
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{Item, Key, Node, Parser};
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Node {
        let tree = Parser::new(input).parse_node();
        assert!(tree.errors().is_empty(), "{tree:?}");
        tree.into_value()
    }

    #[test]
    fn object_with_nested_values() {
        let value = parse("{ code: 429, retryable: { throttling: true } }");
        let Node::Obj(obj) = value else {
            panic!("expected an object, got {value:?}");
        };
        assert_eq!(obj.kvps.kvps.len(), 2);
        assert_eq!(obj.kvps.kvps[0].key.text(), "code");
        let Some(Node::Obj(nested)) = &obj.kvps.kvps[1].value else {
            panic!("expected a nested object");
        };
        let Some(Node::Ident(flag)) = &nested.kvps.kvps[0].value else {
            panic!("expected an ident value");
        };
        assert_eq!(flag.text, "true");
    }

    #[test]
    fn array_spans_include_the_brackets() {
        let value = parse("[1, 2, 3]");
        let Node::Arr(arr) = value else {
            panic!("expected an array, got {value:?}");
        };
        assert_eq!((arr.start, arr.end), (0, 9));
        assert_eq!(arr.elements.len(), 3);
    }

    #[test]
    fn numbers_keep_their_lexeme() {
        let value = parse("1.5e-3");
        let Node::Num(num) = value else {
            panic!("expected a number, got {value:?}");
        };
        assert_eq!(num.text, "1.5e-3");
        assert_eq!(num.value.into_inner(), 1.5e-3);
    }

    #[test]
    fn invalid_number_is_an_error_node() {
        let tree = Parser::new("1.2.3").parse_node();
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.errors()[0].message(), "invalid number `1.2.3`");
        assert!(matches!(tree.value(), Node::Err(_)));
    }

    #[test]
    fn string_escapes() {
        let value = parse(r#""a\n\"b\"""#);
        let Node::Str(s) = value else {
            panic!("expected a string, got {value:?}");
        };
        assert_eq!(s.value, "a\n\"b\"");
        assert!(!s.block);
    }

    #[test]
    fn text_block() {
        let value = parse("\"\"\"\nhello\nthere\"\"\"");
        let Node::Str(s) = value else {
            panic!("expected a text block, got {value:?}");
        };
        assert!(s.block);
        assert_eq!(s.value, "\nhello\nthere");
        assert_eq!((s.start, s.end), (0, 18));
    }

    #[test]
    fn empty_string() {
        let value = parse(r#""""#);
        let Node::Str(s) = value else {
            panic!("expected a string, got {value:?}");
        };
        assert_eq!(s.value, "");
        assert_eq!((s.start, s.end), (0, 2));
    }

    #[test]
    fn quoted_keys() {
        let value = parse(r#"{ "a key": 1 }"#);
        let Node::Obj(obj) = value else {
            panic!("expected an object, got {value:?}");
        };
        assert!(matches!(obj.kvps.kvps[0].key, Key::Str(_)));
        assert_eq!(obj.kvps.kvps[0].key.text(), "a key");
    }

    #[test]
    fn unterminated_object_is_an_error_value() {
        let tree = Parser::new("{ a: 1").parse_node();
        assert!(!tree.errors().is_empty());
        let Node::Err(err) = tree.value() else {
            panic!("expected an error value, got {:?}", tree.value());
        };
        assert_eq!(err.start, 0);
        assert_eq!(err.end, 6);
    }

    #[test]
    fn commas_are_whitespace() {
        let value = parse("[,,1,,2,,]");
        let Node::Arr(arr) = value else {
            panic!("expected an array, got {value:?}");
        };
        assert_eq!(arr.elements.len(), 2);
    }

    #[test]
    fn deep_nesting_is_limited() {
        let input = "[".repeat(600);
        let tree = Parser::new(&input).parse_node();
        assert!(tree
            .errors()
            .iter()
            .any(|e| e.message() == "node value nesting too deep"));
    }

    #[test]
    fn kvp_spans_cover_key_through_value() {
        let value = parse("{ method: \"GET\" }");
        let Node::Obj(obj) = value else {
            panic!("expected an object, got {value:?}");
        };
        let kvp = &obj.kvps.kvps[0];
        assert_eq!((kvp.start, kvp.end), (2, 15));
        assert_eq!((kvp.key.start(), kvp.key.end()), (2, 8));
    }
}
