use crate::StatementView;
use lathe_parser::{Item, Statement};

/// What the cursor is on, semantically. Feature handlers use this to decide
/// what completion and hover should offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentPositionContext {
    /// On a trait id or inside a trait's value.
    Trait,
    /// Past the colon of a member definition, where a target shape id goes.
    MemberTarget,
    /// On a shape definition (or an in-progress one).
    ShapeDef,
    /// Inside a `with [...]` mixin list.
    Mixin,
    /// On the target of a `use` statement.
    UseTarget,
    Other,
}

/// Classify the offset by its innermost enclosing statement. Pure table
/// dispatch: the result depends only on the statement stream and the offset.
pub fn context_at(view: &StatementView, offset: usize) -> DocumentPositionContext {
    let Some(statement) = view.statement_at(offset) else {
        return DocumentPositionContext::Other;
    };
    match statement {
        Statement::TraitApplication(_) => DocumentPositionContext::Trait,
        Statement::Mixins(_) => DocumentPositionContext::Mixin,
        Statement::Use(_) => DocumentPositionContext::UseTarget,
        Statement::ShapeDef(_) | Statement::Incomplete(_) => DocumentPositionContext::ShapeDef,
        Statement::MemberDef(member) => {
            let past_colon = member.colon.is_some_and(|colon| offset > colon);
            let in_target = member
                .target
                .as_ref()
                .is_some_and(|target| target.is_in(offset));
            if past_colon || in_target {
                DocumentPositionContext::MemberTarget
            } else {
                DocumentPositionContext::Other
            }
        }
        _ => DocumentPositionContext::Other,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use lathe_parser::Parser;
    use pretty_assertions::assert_eq;
    use triomphe::Arc;

    fn view(input: &str) -> StatementView {
        StatementView::new(Arc::new(Parser::new(input).parse_idl()))
    }

    #[test]
    fn member_target_and_shape_def() {
        let idl = "namespace com.foo\nstructure S { a: String }\n";
        let v = view(idl);
        let target = idl.find("String").unwrap();
        assert_eq!(context_at(&v, target), DocumentPositionContext::MemberTarget);
        let name = idl.find('S').unwrap();
        assert_eq!(context_at(&v, name), DocumentPositionContext::ShapeDef);
        let member_name = idl.find("a:").unwrap();
        assert_eq!(context_at(&v, member_name), DocumentPositionContext::Other);
    }

    #[test]
    fn trait_context_covers_the_value() {
        let idl = "@http(method: \"GET\", uri: \"/\")\noperation Foo {}\n";
        let v = view(idl);
        let method = idl.find("method").unwrap();
        assert_eq!(context_at(&v, method), DocumentPositionContext::Trait);
        assert_eq!(context_at(&v, 0), DocumentPositionContext::Trait);
    }

    #[test]
    fn use_and_mixins() {
        let idl = "use com.foo#Bar\nstructure S with [M] {}\n";
        let v = view(idl);
        let bar = idl.find("Bar").unwrap();
        assert_eq!(context_at(&v, bar), DocumentPositionContext::UseTarget);
        let mixin = idl.find('M').unwrap();
        assert_eq!(context_at(&v, mixin), DocumentPositionContext::Mixin);
    }

    #[test]
    fn incomplete_statement_is_a_shape_def_in_progress() {
        let v = view("stru");
        assert_eq!(context_at(&v, 2), DocumentPositionContext::ShapeDef);
    }

    #[test]
    fn outside_any_statement_is_other() {
        let v = view("namespace com.foo\n\n\n");
        assert_eq!(context_at(&v, 18), DocumentPositionContext::Other);
    }

    #[test]
    fn empty_member_target_slot() {
        let idl = "structure S {\n  a: \n}\n";
        let v = view(idl);
        let colon = idl.find(':').unwrap();
        assert_eq!(
            context_at(&v, colon + 1),
            DocumentPositionContext::MemberTarget
        );
    }
}
