use crate::{range_of, Document};
use lathe_parser::{Node, Statement, SyntaxTree};
use lsp_types::{Position, Range, TextEdit};
use serde::{Deserialize, Serialize};

/// Diagnostic codes the code-action layer recognises. The wire value is the
/// kebab-case code string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// The file has no `$version` control statement.
    DefineVersion,
    /// The file's `$version` is outdated.
    UpdateVersion,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::DefineVersion => "define-version",
            DiagnosticCode::UpdateVersion => "update-version",
        }
    }
}

/// A diagnostic the core hands to the publishing layer: a span, a message,
/// and optionally a code the code-action layer acts on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub range: Range,
    pub message: String,
}

/// Check the document's `$version` control statement.
///
/// No statement at all means the file predates versioning: report
/// [`DiagnosticCode::DefineVersion`] at the origin. A `$version` of `1`
/// reports [`DiagnosticCode::UpdateVersion`] over the statement's range. A
/// current or unrecognisable version reports nothing; non-string values are
/// the validator's problem, not ours.
pub fn version_diagnostic(document: &Document, tree: &SyntaxTree) -> Option<Diagnostic> {
    for statement in tree.statements() {
        let Statement::Control(control) = statement else {
            continue;
        };
        if control.key.text != "version" {
            continue;
        }
        let outdated = match &control.value {
            Some(Node::Str(value)) => value.value.starts_with('1'),
            None => true,
            Some(_) => false,
        };
        if outdated {
            return Some(Diagnostic {
                code: DiagnosticCode::UpdateVersion,
                range: range_of(document, control)?,
                message: "the `$version` control statement is outdated".into(),
            });
        }
        return None;
    }
    Some(Diagnostic {
        code: DiagnosticCode::DefineVersion,
        range: Range::new(Position::new(0, 0), Position::new(0, 0)),
        message: "this file doesn't define a `$version` control statement".into(),
    })
}

/// The edit fixing a version diagnostic, computed purely from the current
/// document state: insert a version statement at the origin, or replace the
/// existing statement's range.
pub fn version_code_action(diagnostic: &Diagnostic) -> TextEdit {
    match diagnostic.code {
        DiagnosticCode::DefineVersion => TextEdit {
            range: diagnostic.range,
            new_text: "$version: \"1\"\n\n".into(),
        },
        DiagnosticCode::UpdateVersion => TextEdit {
            range: diagnostic.range,
            new_text: "$version: \"2\"".into(),
        },
    }
}
