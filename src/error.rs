//! Error types for parsing edit scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Syntax { span, .. } => span.clone(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let label = if expected.is_empty() {
                    message.clone()
                } else {
                    format!("{}\nExpected: {}", message, expected.join(", "))
                };
                render_report(source, filename, span.clone(), message, &label, None)
            }
        }
    }
}

/// Render one labelled ariadne report to a string
pub(crate) fn render_report(
    source: &str,
    filename: &str,
    span: Span,
    message: &str,
    label: &str,
    help: Option<String>,
) -> String {
    let mut buf = Vec::new();
    let mut report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span))
                .with_message(label)
                .with_color(Color::Red),
        );
    if let Some(help) = help {
        report = report.with_help(help);
    }
    report
        .finish()
        .write((filename, Source::from(source)), &mut buf)
        .expect("writing a report into memory cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}

impl<'a> From<chumsky::error::Rich<'a, Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found.as_deref() {
                Some(tok) if tok.keyword().is_some() => format!(
                    "Unexpected {} (keywords cannot be used as names)",
                    format_token(tok)
                ),
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of input".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let mut expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();
        expected.sort();
        expected.dedup();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    if let Some(keyword) = tok.keyword() {
        return format!("keyword '{}'", keyword);
    }
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::Number(n) => format!("number {}", n),
        Token::HexColor(c) => format!("color {}", c),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Minus => "'-'".to_string(),
        _ => format!("{:?}", tok),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_token() {
        assert_eq!(format_token(&Token::At), "keyword 'at'");
        assert_eq!(format_token(&Token::Ident("t1".into())), "identifier 't1'");
        assert_eq!(format_token(&Token::Number(4.0)), "number 4");
        assert_eq!(format_token(&Token::Comma), "','");
    }

    #[test]
    fn test_format_includes_message_and_expected() {
        let err = ParseError::Syntax {
            span: 4..6,
            message: "Unexpected keyword 'to'".to_string(),
            expected: vec!["identifier".to_string()],
        };
        let out = err.format("add to", "script.floor");
        assert!(out.contains("Unexpected keyword 'to'"));
        assert!(out.contains("Expected: identifier"));
        assert!(out.contains("script.floor"));
        assert_eq!(err.span(), 4..6);
    }
}
