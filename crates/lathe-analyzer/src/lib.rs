#![doc = include_str!("../README.md")]

mod analysis;
mod cancel;
mod context;
mod diagnostic;
mod document;
mod ident;
mod node_cursor;
mod sources;
mod view;

pub use crate::analysis::Analysis;
pub use crate::cancel::CancellationToken;
pub use crate::context::{context_at, DocumentPositionContext};
pub use crate::diagnostic::{version_code_action, version_diagnostic, Diagnostic, DiagnosticCode};
pub use crate::document::{range_of, range_of_value_excluding_quotes, Document};
pub use crate::ident::{identifier_at, ScannedId, ShapeIdKind};
pub use crate::node_cursor::{node_path, Edge, NodePath};
pub use crate::sources::{FileId, SourceEntry, Sources};
pub use crate::view::StatementView;

pub use lsp_types::{Position, Range, TextEdit};
