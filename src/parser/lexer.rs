//! Lexer for floor edit scripts using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Statement keywords
    #[token("add")]
    Add,
    #[token("update")]
    Update,
    #[token("move")]
    Move,
    #[token("resize")]
    Resize,
    #[token("duplicate")]
    Duplicate,
    #[token("remove")]
    Remove,
    #[token("undo")]
    Undo,
    #[token("redo")]
    Redo,

    // Clause keywords
    #[token("at")]
    At,
    #[token("to")]
    To,
    #[token("by")]
    By,
    #[token("as")]
    As,

    // Delimiters
    #[token("[")]
    BracketOpen,
    #[token("]")]
    BracketClose,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("-")]
    Minus,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"#[0-9a-fA-F]{3,8}", |lex| lex.slice().to_string())]
    HexColor(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

impl Token {
    /// Source spelling of a keyword token
    pub fn keyword(&self) -> Option<&'static str> {
        Some(match self {
            Token::Add => "add",
            Token::Update => "update",
            Token::Move => "move",
            Token::Resize => "resize",
            Token::Duplicate => "duplicate",
            Token::Remove => "remove",
            Token::Undo => "undo",
            Token::Redo => "redo",
            Token::At => "at",
            Token::To => "to",
            Token::By => "by",
            Token::As => "as",
            _ => return None,
        })
    }
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
