//! Errors raised while replaying an edit script

use thiserror::Error;

use crate::editor::FactoryError;
use crate::error::render_report;
use crate::parser::ast::Span;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScriptError {
    /// A name that no earlier statement bound
    #[error("unknown element '{name}'")]
    UnknownReference {
        name: String,
        span: Span,
        suggestions: Vec<String>,
    },

    /// A name bound twice in the same script
    #[error("'{name}' is already bound to an element")]
    DuplicateBinding { name: String, span: Span },

    /// A target that resolves to an id missing from the current layout
    #[error("element \"{id}\" is not on the floor")]
    ElementNotFound {
        id: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("unknown field '{field}' for {kind}")]
    UnknownField {
        kind: String,
        field: String,
        span: Span,
        suggestions: Vec<String>,
    },

    #[error("{kind} requires field '{field}'")]
    MissingField {
        kind: String,
        field: &'static str,
        span: Span,
    },

    #[error("field '{field}' expects {expected}, found {found}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: &'static str,
        span: Span,
    },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        field: String,
        reason: String,
        span: Span,
    },

    #[error("{source}")]
    Factory { source: FactoryError, span: Span },
}

impl ScriptError {
    /// Create an unknown reference error with suggestions
    pub fn unknown_reference(name: impl Into<String>, span: Span, suggestions: Vec<String>) -> Self {
        Self::UnknownReference {
            name: name.into(),
            span,
            suggestions,
        }
    }

    pub fn duplicate_binding(name: impl Into<String>, span: Span) -> Self {
        Self::DuplicateBinding {
            name: name.into(),
            span,
        }
    }

    pub fn element_not_found(id: impl Into<String>, span: Span, suggestions: Vec<String>) -> Self {
        Self::ElementNotFound {
            id: id.into(),
            span,
            suggestions,
        }
    }

    pub fn unknown_field(
        kind: impl Into<String>,
        field: impl Into<String>,
        span: Span,
        suggestions: Vec<String>,
    ) -> Self {
        Self::UnknownField {
            kind: kind.into(),
            field: field.into(),
            span,
            suggestions,
        }
    }

    pub fn missing_field(kind: impl Into<String>, field: &'static str, span: Span) -> Self {
        Self::MissingField {
            kind: kind.into(),
            field,
            span,
        }
    }

    pub fn field_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &'static str,
        span: Span,
    ) -> Self {
        Self::FieldType {
            field: field.into(),
            expected,
            found,
            span,
        }
    }

    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>, span: Span) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
            span,
        }
    }

    /// Get the source span of the offending construct
    pub fn span(&self) -> &Span {
        match self {
            Self::UnknownReference { span, .. }
            | Self::DuplicateBinding { span, .. }
            | Self::ElementNotFound { span, .. }
            | Self::UnknownField { span, .. }
            | Self::MissingField { span, .. }
            | Self::FieldType { span, .. }
            | Self::InvalidValue { span, .. }
            | Self::Factory { span, .. } => span,
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownReference { suggestions, .. }
            | Self::ElementNotFound { suggestions, .. }
            | Self::UnknownField { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let help = self
            .suggestions()
            .filter(|s| !s.is_empty())
            .map(|s| format!("did you mean: {}?", s.join(", ")));
        let message = self.to_string();
        render_report(source, filename, self.span().clone(), &message, &message, help)
    }
}
