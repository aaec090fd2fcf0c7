use crate::cursor::is_ident_start;
use crate::parser::grammar::{shape, trait_};
use crate::parser::Parser;
use crate::statement::{ElidedMemberDef, EnumMemberDef, InlineMemberDef, MemberDef, NodeMemberDef};
use crate::{Ident, Item, Statement};

/// ```txt
/// StructuralMember
///     Ident : Ident [= NodeValue]
/// ```
///
/// Traits on members are not nested here; they parse as sibling
/// [`TraitApplication`](crate::TraitApplication) statements before the
/// member.
pub(crate) fn structural_member(p: &mut Parser) {
    let name = p.ident();
    let mut statement = MemberDef {
        start: name.start,
        end: name.end,
        name,
        colon: None,
        target: None,
        default: None,
    };

    p.skip_ignored();
    if p.peek() == Some(':') {
        statement.colon = Some(p.offset());
        p.bump();
        statement.end = p.offset();
        p.skip_ignored();
        if p.at_ident_start() {
            let target = p.ident();
            statement.end = target.end;
            statement.target = Some(target);
            p.skip_ignored();
            if p.eat('=') {
                statement.end = p.offset();
                p.skip_ignored();
                match p.peek() {
                    None => {
                        let end = p.source_len();
                        p.push_error("expected node value", end, end);
                        statement.end = end;
                    }
                    Some('}') => {
                        let at = p.offset();
                        p.push_error("expected node value", at, at);
                        statement.end = at;
                    }
                    _ => {
                        let value = p.node_value_or_err();
                        statement.end = value.end();
                        statement.default = Some(value);
                    }
                }
            }
        } else {
            // leave the span open over the empty target slot
            let at = p.offset();
            p.push_error("expected member target", at, at);
            statement.end = at;
        }
    } else {
        let at = p.offset();
        p.push_error("expected `:`", at, at);
    }
    p.push_statement(Statement::MemberDef(statement));
}

/// ```txt
/// EnumMember
///     Ident [= NodeValue]
/// ```
pub(crate) fn enum_member(p: &mut Parser) {
    let name = p.ident();
    let mut statement = EnumMemberDef {
        start: name.start,
        end: name.end,
        name,
        value: None,
    };

    p.skip_ignored();
    if p.eat('=') {
        statement.end = p.offset();
        p.skip_ignored();
        match p.peek() {
            None => {
                let end = p.source_len();
                p.push_error("expected node value", end, end);
                statement.end = end;
            }
            Some('}') => {
                let at = p.offset();
                p.push_error("expected node value", at, at);
                statement.end = at;
            }
            _ => {
                let value = p.node_value_or_err();
                statement.end = value.end();
                statement.value = Some(value);
            }
        }
    }
    p.push_statement(Statement::EnumMemberDef(statement));
}

/// ```txt
/// NodeMember
///     Ident : NodeValue
/// ```
///
/// Service and resource bodies bind member names to arbitrary node values;
/// a plain shape reference is just an identifier value.
pub(crate) fn node_member(p: &mut Parser) {
    let name = p.ident();
    let mut statement = NodeMemberDef {
        start: name.start,
        end: name.end,
        name,
        colon: None,
        value: None,
    };

    p.skip_ignored();
    if p.peek() == Some(':') {
        statement.colon = Some(p.offset());
        p.bump();
        statement.end = p.offset();
        p.skip_ignored();
        match p.peek() {
            None => {
                let end = p.source_len();
                p.push_error("expected node value", end, end);
                statement.end = end;
            }
            Some('}') => {
                let at = p.offset();
                p.push_error("expected node value", at, at);
                statement.end = at;
            }
            _ => {
                let value = p.node_value_or_err();
                statement.end = value.end();
                statement.value = Some(value);
            }
        }
    } else {
        let at = p.offset();
        p.push_error("expected `:`", at, at);
    }
    p.push_statement(Statement::NodeMemberDef(statement));
}

/// ```txt
/// OperationMember
///     Ident : Ident
///     Ident := [TraitApplications] [Mixins] { StructuralMember* }
/// ```
pub(crate) fn operation_member(p: &mut Parser) {
    let name = p.ident();
    p.skip_ignored();
    if p.peek() != Some(':') {
        let at = p.offset();
        p.push_error("expected `:`", at, at);
        p.push_statement(Statement::MemberDef(MemberDef {
            start: name.start,
            end: name.end,
            name,
            colon: None,
            target: None,
            default: None,
        }));
        return;
    }

    let colon = p.offset();
    p.bump();
    if p.eat('=') {
        let end = p.offset();
        p.push_statement(Statement::InlineMemberDef(InlineMemberDef {
            start: name.start,
            end,
            name,
        }));
        inline_structure(p);
        return;
    }

    let mut statement = MemberDef {
        start: name.start,
        end: p.offset(),
        name,
        colon: Some(colon),
        target: None,
        default: None,
    };
    p.skip_ignored();
    if p.at_ident_start() {
        let target = p.ident();
        statement.end = target.end;
        statement.target = Some(target);
    } else {
        let at = p.offset();
        p.push_error("expected member target", at, at);
        statement.end = at;
    }
    p.push_statement(Statement::MemberDef(statement));
}

/// ```txt
/// ElidedMember
///     $ Ident
/// ```
pub(crate) fn elided_member(p: &mut Parser) {
    let start = p.offset();
    p.bump(); // '$'
    let name = if p.at_ident_start() {
        p.ident()
    } else {
        p.push_error("expected member name", start, p.offset());
        Ident::empty()
    };
    let end = p.offset();
    p.push_statement(Statement::ElidedMemberDef(ElidedMemberDef {
        start,
        end,
        name,
    }));
}

/// After `:=`: optional traits and mixins, then the inline structure's
/// block of structural members. The nested block lands in the statement
/// stream like any other, so the locator can descend into it.
fn inline_structure(p: &mut Parser) {
    loop {
        p.skip_ignored();
        match p.peek() {
            Some('@') => trait_::trait_application(p),
            Some('{') => {
                shape::body(p, structural_member, true);
                return;
            }
            Some(c) if is_ident_start(c) && p.at_word("with") => shape::mixins(p),
            _ => {
                let at = p.offset();
                p.push_error("expected inline structure body", at, at);
                return;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{Node, Parser, Statement};
    use pretty_assertions::assert_eq;
    use unindent::unindent;

    #[test]
    fn member_with_default_value() {
        let idl = "structure Foo {\n  a: Integer = 0\n}\n";
        let tree = Parser::new(idl).parse_idl();
        assert!(tree.errors().is_empty(), "{tree:?}");
        let member = tree
            .statements()
            .iter()
            .find_map(|s| match s {
                Statement::MemberDef(m) => Some(m),
                _ => None,
            })
            .unwrap();
        assert_eq!(member.colon, Some(19));
        assert!(matches!(member.default, Some(Node::Num(_))));
    }

    #[test]
    fn member_without_target_keeps_the_slot_open() {
        let idl = "structure Foo {\n  a: \n}\n";
        let tree = Parser::new(idl).parse_idl();
        assert_eq!(tree.errors().len(), 1);
        assert_eq!(tree.errors()[0].message(), "expected member target");
        let member = tree
            .statements()
            .iter()
            .find_map(|s| match s {
                Statement::MemberDef(m) => Some(m),
                _ => None,
            })
            .unwrap();
        assert_eq!(member.target, None);
        // the span stays open past the colon so completion can land there
        assert!(member.end > member.colon.unwrap());
    }

    #[test]
    fn elided_member() {
        let idl = "structure Foo {\n  $name\n}\n";
        let tree = Parser::new(idl).parse_idl();
        assert!(tree.errors().is_empty(), "{tree:?}");
        let elided = tree
            .statements()
            .iter()
            .find_map(|s| match s {
                Statement::ElidedMemberDef(m) => Some(m),
                _ => None,
            })
            .unwrap();
        assert_eq!(elided.name.text, "name");
        assert_eq!((elided.start, elided.end), (18, 23));
    }

    #[test]
    fn member_traits_are_sibling_statements() {
        let idl = unindent(
            "
            structure Foo {
                @required
                a: String
            }
            ",
        );
        let tree = Parser::new(&idl).parse_idl();
        assert!(tree.errors().is_empty(), "{tree:?}");
        let kinds: Vec<_> = tree
            .statements()
            .iter()
            .map(|s| match s {
                Statement::ShapeDef(_) => "shape",
                Statement::Block(_) => "block",
                Statement::TraitApplication(_) => "trait",
                Statement::MemberDef(_) => "member",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["shape", "block", "trait", "member"]);
    }

    #[test]
    fn intenum_member_values() {
        let idl = unindent(
            "
            intEnum Code {
                OK = 200
                NOT_FOUND = 404
            }
            ",
        );
        let tree = Parser::new(&idl).parse_idl();
        assert!(tree.errors().is_empty(), "{tree:?}");
        let values: Vec<_> = tree
            .statements()
            .iter()
            .filter_map(|s| match s {
                Statement::EnumMemberDef(m) => match &m.value {
                    Some(Node::Num(n)) => Some(n.text.as_str()),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(values, ["200", "404"]);
    }

    #[test]
    fn inline_input_output() {
        let idl = unindent(
            "
            operation GetCity {
                input := {
                    cityId: CityId
                }
                output: GetCityOutput
            }
            ",
        );
        let tree = Parser::new(&idl).parse_idl();
        assert!(tree.errors().is_empty(), "{tree:?}");
        let statements = tree.statements();
        // shape, block, inline, nested block, nested member, member
        assert_eq!(statements.len(), 6);
        let Statement::InlineMemberDef(inline) = &statements[2] else {
            panic!("expected an inline member, got {tree:?}");
        };
        assert_eq!(inline.name.text, "input");
        let Statement::Block(outer) = &statements[1] else {
            panic!("expected the operation block, got {tree:?}");
        };
        assert_eq!(outer.last_statement_index, 5);
        let Statement::Block(inner) = &statements[3] else {
            panic!("expected the inline block, got {tree:?}");
        };
        assert_eq!(inner.last_statement_index, 4);
        let Statement::MemberDef(nested) = &statements[4] else {
            panic!("expected the nested member, got {tree:?}");
        };
        assert_eq!(nested.name.text, "cityId");
        let Statement::MemberDef(output) = &statements[5] else {
            panic!("expected the output member, got {tree:?}");
        };
        assert_eq!(output.name.text, "output");
    }

    #[test]
    fn inline_with_traits_and_mixins() {
        let idl = unindent(
            "
            operation PutCity {
                input := @references([{resource: City}]) with [CityProps] {
                    name: String
                }
            }
            ",
        );
        let tree = Parser::new(&idl).parse_idl();
        assert!(tree.errors().is_empty(), "{tree:?}");
        let kinds: Vec<_> = tree
            .statements()
            .iter()
            .map(|s| match s {
                Statement::ShapeDef(_) => "shape",
                Statement::Block(_) => "block",
                Statement::InlineMemberDef(_) => "inline",
                Statement::TraitApplication(_) => "trait",
                Statement::Mixins(_) => "mixins",
                Statement::MemberDef(_) => "member",
                _ => "other",
            })
            .collect();
        assert_eq!(
            kinds,
            ["shape", "block", "inline", "trait", "mixins", "block", "member"]
        );
    }
}
