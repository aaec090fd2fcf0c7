use crate::node::{impl_item, Key, Node};
use crate::{Ident, Item};
use std::fmt;

/// A statement in the flat statement stream.
///
/// Shape bodies are not a tree: a shape definition is followed by an
/// optional [`ForResource`], an optional [`Mixins`], a [`Block`] marking the
/// `{ … }` span, then the member statements at sibling positions. Blocks
/// nest only through inline I/O definitions (`:=`).
#[derive(Clone, PartialEq)]
pub enum Statement {
    Incomplete(Incomplete),
    Control(Control),
    Metadata(Metadata),
    Namespace(Namespace),
    Use(Use),
    Apply(Apply),
    ShapeDef(ShapeDef),
    ForResource(ForResource),
    Mixins(Mixins),
    TraitApplication(TraitApplication),
    MemberDef(MemberDef),
    EnumMemberDef(EnumMemberDef),
    ElidedMemberDef(ElidedMemberDef),
    InlineMemberDef(InlineMemberDef),
    NodeMemberDef(NodeMemberDef),
    Block(Block),
}

/// A lone identifier at top level, usually a statement still being typed.
#[derive(Clone, Debug, PartialEq)]
pub struct Incomplete {
    pub start: usize,
    pub end: usize,
    pub ident: Ident,
}

/// A `$key: value` control statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub start: usize,
    pub end: usize,
    pub key: Ident,
    pub value: Option<Node>,
}

/// A `metadata key = value` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Metadata {
    pub start: usize,
    pub end: usize,
    pub key: Option<Key>,
    pub value: Option<Node>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Namespace {
    pub start: usize,
    pub end: usize,
    pub name: Ident,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Use {
    pub start: usize,
    pub end: usize,
    pub name: Ident,
}

/// An `apply <id>` statement. The trait applications that follow it parse as
/// ordinary [`TraitApplication`] statements, in a [`Block`] for the braced
/// form.
#[derive(Clone, Debug, PartialEq)]
pub struct Apply {
    pub start: usize,
    pub end: usize,
    pub id: Ident,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShapeDef {
    pub start: usize,
    pub end: usize,
    pub shape_type: Ident,
    pub name: Ident,
}

/// A `for <resource>` clause after a shape definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ForResource {
    pub start: usize,
    pub end: usize,
    pub resource: Ident,
}

/// A `with [A, B]` mixin clause after a shape definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Mixins {
    pub start: usize,
    pub end: usize,
    pub mixins: Vec<Ident>,
}

/// An `@id` or `@id(…)` trait application.
#[derive(Clone, Debug, PartialEq)]
pub struct TraitApplication {
    pub start: usize,
    pub end: usize,
    pub id: Ident,
    pub value: Option<Node>,
}

/// A `name: Target` member. `colon` is `None` when no colon has been typed
/// yet; otherwise it sits between the name and the target.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberDef {
    pub start: usize,
    pub end: usize,
    pub name: Ident,
    pub colon: Option<usize>,
    pub target: Option<Ident>,
    pub default: Option<Node>,
}

/// An enum or intEnum member, `NAME` or `NAME = value`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumMemberDef {
    pub start: usize,
    pub end: usize,
    pub name: Ident,
    pub value: Option<Node>,
}

/// A `$name` member whose target is elided from a mixin or resource.
#[derive(Clone, Debug, PartialEq)]
pub struct ElidedMemberDef {
    pub start: usize,
    pub end: usize,
    pub name: Ident,
}

/// A `name :=` member introducing an inline structure; the structure's
/// traits, mixins and block follow as sibling statements.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineMemberDef {
    pub start: usize,
    pub end: usize,
    pub name: Ident,
}

/// A `name: <node value>` member, used by service and resource shapes.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeMemberDef {
    pub start: usize,
    pub end: usize,
    pub name: Ident,
    pub colon: Option<usize>,
    pub value: Option<Node>,
}

/// Marker for a `{ … }` span in the statement stream. Member statements live
/// at the sibling positions `block_index + 1 ..= last_statement_index`;
/// `last_statement_index` equals the block's own index when the block is
/// empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
    pub last_statement_index: usize,
}

impl_item!(
    Incomplete,
    Control,
    Metadata,
    Namespace,
    Use,
    Apply,
    ShapeDef,
    ForResource,
    Mixins,
    TraitApplication,
    MemberDef,
    EnumMemberDef,
    ElidedMemberDef,
    InlineMemberDef,
    NodeMemberDef,
    Block,
);

impl Item for Statement {
    fn start(&self) -> usize {
        match self {
            Statement::Incomplete(s) => s.start,
            Statement::Control(s) => s.start,
            Statement::Metadata(s) => s.start,
            Statement::Namespace(s) => s.start,
            Statement::Use(s) => s.start,
            Statement::Apply(s) => s.start,
            Statement::ShapeDef(s) => s.start,
            Statement::ForResource(s) => s.start,
            Statement::Mixins(s) => s.start,
            Statement::TraitApplication(s) => s.start,
            Statement::MemberDef(s) => s.start,
            Statement::EnumMemberDef(s) => s.start,
            Statement::ElidedMemberDef(s) => s.start,
            Statement::InlineMemberDef(s) => s.start,
            Statement::NodeMemberDef(s) => s.start,
            Statement::Block(s) => s.start,
        }
    }

    fn end(&self) -> usize {
        match self {
            Statement::Incomplete(s) => s.end,
            Statement::Control(s) => s.end,
            Statement::Metadata(s) => s.end,
            Statement::Namespace(s) => s.end,
            Statement::Use(s) => s.end,
            Statement::Apply(s) => s.end,
            Statement::ShapeDef(s) => s.end,
            Statement::ForResource(s) => s.end,
            Statement::Mixins(s) => s.end,
            Statement::TraitApplication(s) => s.end,
            Statement::MemberDef(s) => s.end,
            Statement::EnumMemberDef(s) => s.end,
            Statement::ElidedMemberDef(s) => s.end,
            Statement::InlineMemberDef(s) => s.end,
            Statement::NodeMemberDef(s) => s.end,
            Statement::Block(s) => s.end,
        }
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Incomplete(s) => {
                write!(f, "INCOMPLETE@{}..{} {}", s.start, s.end, s.ident)
            }
            Statement::Control(s) => {
                write!(f, "CONTROL@{}..{} ${}", s.start, s.end, s.key)
            }
            Statement::Metadata(s) => {
                let key = s.key.as_ref().map(Key::text).unwrap_or_default();
                write!(f, "METADATA@{}..{} {}", s.start, s.end, key)
            }
            Statement::Namespace(s) => {
                write!(f, "NAMESPACE@{}..{} {}", s.start, s.end, s.name)
            }
            Statement::Use(s) => write!(f, "USE@{}..{} {}", s.start, s.end, s.name),
            Statement::Apply(s) => write!(f, "APPLY@{}..{} {}", s.start, s.end, s.id),
            Statement::ShapeDef(s) => {
                write!(f, "SHAPE_DEF@{}..{} {} {}", s.start, s.end, s.shape_type, s.name)
            }
            Statement::ForResource(s) => {
                write!(f, "FOR_RESOURCE@{}..{} {}", s.start, s.end, s.resource)
            }
            Statement::Mixins(s) => {
                let names: Vec<&str> = s.mixins.iter().map(|m| m.text.as_str()).collect();
                write!(f, "MIXINS@{}..{} [{}]", s.start, s.end, names.join(" "))
            }
            Statement::TraitApplication(s) => {
                write!(f, "TRAIT_APPLICATION@{}..{} @{}", s.start, s.end, s.id)
            }
            Statement::MemberDef(s) => {
                write!(f, "MEMBER_DEF@{}..{} {}", s.start, s.end, s.name)?;
                if let Some(target) = &s.target {
                    write!(f, ": {target}")?;
                }
                Ok(())
            }
            Statement::EnumMemberDef(s) => {
                write!(f, "ENUM_MEMBER_DEF@{}..{} {}", s.start, s.end, s.name)
            }
            Statement::ElidedMemberDef(s) => {
                write!(f, "ELIDED_MEMBER_DEF@{}..{} ${}", s.start, s.end, s.name)
            }
            Statement::InlineMemberDef(s) => {
                write!(f, "INLINE_MEMBER_DEF@{}..{} {}", s.start, s.end, s.name)
            }
            Statement::NodeMemberDef(s) => {
                write!(f, "NODE_MEMBER_DEF@{}..{} {}", s.start, s.end, s.name)
            }
            Statement::Block(s) => write!(f, "BLOCK@{}..{}", s.start, s.end),
        }
    }
}
