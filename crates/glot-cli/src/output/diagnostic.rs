//! Miette diagnostics for pattern compile errors.

use glot::{BindError, CompileError, ParseError};
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use serde::Serialize;
use thiserror::Error;

/// A compile error pointing into the pattern text.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
pub enum PatternDiagnostic {
    #[error("syntax error in {construct}: {message}")]
    #[diagnostic(code(glot::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,

        #[label("here")]
        span: SourceSpan,

        construct: String,
        message: String,
    },

    #[error("{message}")]
    #[diagnostic(code(glot::bind))]
    Bind {
        #[source_code]
        src: NamedSource<String>,

        #[label("not accepted")]
        span: SourceSpan,

        message: String,

        #[help]
        help: Option<String>,
    },
}

/// JSON form of a compile error.
#[derive(Debug, Serialize)]
pub struct CompileErrorJson {
    pub error: String,
    pub offset: usize,
    pub length: usize,
}

impl PatternDiagnostic {
    /// Create a diagnostic for `error`, raised compiling `pattern`.
    pub fn from_compile_error(name: &str, pattern: &str, error: &CompileError) -> Self {
        let src = NamedSource::new(name, pattern.to_string());
        match error {
            CompileError::Parse(error) => {
                let ParseError::Syntax {
                    construct, message, ..
                } = error;
                PatternDiagnostic::Syntax {
                    src,
                    // Clamp to the pattern to avoid a miette panic on out-of-bounds
                    span: (error.offset().min(pattern.len()), 1).into(),
                    construct: construct.clone(),
                    message: message.clone(),
                }
            }
            CompileError::Bind(error) => PatternDiagnostic::Bind {
                src,
                span: representation_span(pattern, error),
                message: error.to_string(),
                help: Some("check the spelling, or register a factory that accepts it".into()),
            },
        }
    }

    pub fn span(&self) -> SourceSpan {
        match self {
            PatternDiagnostic::Syntax { span, .. } | PatternDiagnostic::Bind { span, .. } => *span,
        }
    }

    pub fn to_json(&self) -> CompileErrorJson {
        let span = self.span();
        CompileErrorJson {
            error: self.to_string(),
            offset: span.offset(),
            length: span.len(),
        }
    }

    /// Print the diagnostic with its source excerpt on stderr.
    pub fn report(self) {
        eprintln!("{:?}", Report::new(self));
    }
}

/// Binding errors carry no position, so point at the first occurrence of
/// the rejected text, or the whole pattern.
fn representation_span(pattern: &str, error: &BindError) -> SourceSpan {
    let representation = error.representation();
    match pattern.find(representation).filter(|_| !representation.is_empty()) {
        Some(offset) => (offset, representation.len()).into(),
        None => (0, pattern.len()).into(),
    }
}

#[cfg(test)]
mod tests {
    use glot::Dialect;
    use glot::parser::DefaultParser;

    use super::*;

    #[test]
    fn syntax_error_points_at_offset() {
        let error = Dialect::standard().compile("Hi {Name").unwrap_err();
        let diagnostic = PatternDiagnostic::from_compile_error("pattern", "Hi {Name", &error);
        assert!(matches!(diagnostic, PatternDiagnostic::Syntax { .. }));
        assert!(diagnostic.span().offset() <= "Hi {Name".len());
    }

    #[test]
    fn bind_error_points_at_representation() {
        let pattern = "#N{one: a | b}";
        let error = Dialect::empty(DefaultParser).compile(pattern).unwrap_err();
        let diagnostic = PatternDiagnostic::from_compile_error("pattern", pattern, &error);
        let json = diagnostic.to_json();
        assert_eq!(json.offset, 1);
        assert_eq!(json.length, 1);
    }
}
