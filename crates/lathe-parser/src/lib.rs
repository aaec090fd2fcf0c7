#![doc = include_str!("../README.md")]

mod cursor;
mod error;
mod item;
mod limit;
mod node;
mod parser;
mod statement;
mod syntax_tree;


pub use crate::cursor::{is_ident_char, is_ident_start};
pub use crate::error::Error;
pub use crate::item::{Ident, Item};
pub use crate::limit::LimitTracker;
pub use crate::node::{Arr, Key, Kvp, Kvps, Node, NodeErr, Num, Obj, Str};
pub use crate::parser::Parser;
pub use crate::statement::{
    Apply, Block, Control, ElidedMemberDef, EnumMemberDef, ForResource, Incomplete,
    InlineMemberDef, MemberDef, Metadata, Mixins, Namespace, NodeMemberDef, ShapeDef, Statement,
    TraitApplication, Use,
};
pub use crate::syntax_tree::{NodeTree, SyntaxTree};
