//! Miette diagnostic wrapper for rule compile errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use cldr_rules::CompileError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::rules_file::LoadError;

/// A miette-compatible diagnostic pointing into a rule's text.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cldr_rules::syntax))]
pub struct RuleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl RuleDiagnostic {
    /// Create a diagnostic from a compile error.
    ///
    /// `origin` names where the rule came from, e.g. `plurals.cardinal.one`.
    /// Errors without a position in rule text label the whole rule.
    pub fn from_compile_error(origin: &str, err: &CompileError) -> Self {
        let (text, offset, len) = match err.root() {
            CompileError::PluralRuleSyntax {
                rule,
                column,
                offending,
                ..
            } => {
                let len = offending.split_whitespace().next().map_or(1, str::len);
                (rule.clone(), column.saturating_sub(1), len)
            }
            CompileError::RbnfRuleSyntax {
                rule, offending, ..
            } => {
                let offset = rule.find(offending.as_str()).unwrap_or(0);
                (rule.clone(), offset, offending.len().max(1))
            }
            CompileError::InvalidBaseValue { key }
            | CompileError::InvalidRadix { key, .. }
            | CompileError::DuplicateRule { key, .. } => (key.clone(), 0, key.len()),
            CompileError::InPluralRule { .. } | CompileError::InRbnfRule { .. } => {
                (String::new(), 0, 0)
            }
        };

        // Clamp to the text so miette never sees an out-of-bounds span.
        let offset = offset.min(text.len());
        let len = len.min(text.len() - offset);

        RuleDiagnostic {
            src: NamedSource::new(origin, text),
            span: (offset, len).into(),
            message: err.to_string(),
            help: help_for(err.root()),
        }
    }

    /// Create a diagnostic from a rules file that failed to parse as JSON.
    ///
    /// Returns `None` for errors without file content to point into.
    pub fn from_load_error(err: &LoadError) -> Option<Self> {
        let LoadError::Json {
            path,
            line,
            column,
            message,
            content,
        } = err
        else {
            return None;
        };

        // Sum of (line_length + 1) for lines before the error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);
        let offset = offset.min(content.len());

        Some(RuleDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.clone()),
            span: (offset, 1).into(),
            message: message.clone(),
            help: None,
        })
    }
}

fn help_for(err: &CompileError) -> Option<String> {
    match err {
        CompileError::PluralRuleSyntax { .. } => Some(
            "operands are n, i, v, w, f, t, e and c; relations use =, !=, is, in or within"
                .to_string(),
        ),
        CompileError::InvalidBaseValue { .. } => {
            Some("keys are numbers or one of -x, x.x, 0.x, x.0, Inf, NaN".to_string())
        }
        _ => None,
    }
}
