//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse an edit script into an AST
pub fn parse(input: &str) -> Result<Script, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Split (Token, SimpleSpan) into token and span parts
    let token_stream = Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s));

    script_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => Identifier::new(s),
    }
    .map_with(|id, e| Spanned::new(id, span_range(&e.span())))
    .labelled("identifier");

    let string_literal = select! {
        Token::String(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    // Optional leading minus: `-20`
    let number = just(Token::Minus)
        .or_not()
        .then(select! { Token::Number(n) => n })
        .map(|(minus, n)| if minus.is_some() { -n } else { n })
        .labelled("number");

    let pair = number
        .clone()
        .then_ignore(just(Token::Comma))
        .then(number.clone())
        .map_with(|(a, b), e| Spanned::new(Pair { a, b }, span_range(&e.span())));

    let target = choice((
        identifier
            .clone()
            .map(|id| Spanned::new(Target::Name(id.node), id.span)),
        string_literal.map(|s| Spanned::new(Target::Id(s.node), s.span)),
    ))
    .labelled("element");

    let value = recursive(|value| {
        let list = value
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(Value::List);

        choice((
            number.clone().map(Value::Number),
            select! {
                Token::String(s) => Value::String(s),
                Token::HexColor(c) => Value::Color(c),
                Token::Ident(s) => Value::Ident(Identifier::new(s)),
            },
            list,
        ))
        .map_with(|v, e| Spanned::new(v, span_range(&e.span())))
    });

    let field = identifier
        .clone()
        .then_ignore(just(Token::Colon))
        .then(value)
        .map_with(|(key, value), e| Spanned::new(Field { key, value }, span_range(&e.span())));

    let field_block = field
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose));

    let at_clause = just(Token::At).ignore_then(pair.clone());

    // add <kind> [name] [fields] [at x, y]
    let add_stmt = just(Token::Add)
        .ignore_then(identifier.clone())
        .then(identifier.clone().or_not())
        .then(field_block.clone().or_not())
        .then(at_clause.clone().or_not())
        .map(|(((kind, name), fields), at)| {
            Statement::Add(AddStmt {
                kind,
                name,
                fields: fields.unwrap_or_default(),
                at,
            })
        });

    let update_stmt = just(Token::Update)
        .ignore_then(target.clone())
        .then(field_block)
        .map(|(target, fields)| Statement::Update(UpdateStmt { target, fields }));

    let motion = choice((
        just(Token::To).to(Motion::To),
        just(Token::By).to(Motion::By),
    ));

    let move_stmt = just(Token::Move)
        .ignore_then(target.clone())
        .then(motion)
        .then(pair.clone())
        .map(|((target, motion), offset)| {
            Statement::Move(MoveStmt {
                target,
                motion,
                offset,
            })
        });

    let resize_stmt = just(Token::Resize)
        .ignore_then(target.clone())
        .then_ignore(just(Token::To))
        .then(pair)
        .map(|(target, size)| Statement::Resize(ResizeStmt { target, size }));

    let duplicate_stmt = just(Token::Duplicate)
        .ignore_then(target.clone())
        .then(just(Token::As).ignore_then(identifier).or_not())
        .then(at_clause.or_not())
        .map(|((source, name), at)| Statement::Duplicate(DuplicateStmt { source, name, at }));

    let remove_stmt = just(Token::Remove)
        .ignore_then(target)
        .map(Statement::Remove);

    let statement = choice((
        add_stmt,
        update_stmt,
        move_stmt,
        resize_stmt,
        duplicate_stmt,
        remove_stmt,
        just(Token::Undo).to(Statement::Undo),
        just(Token::Redo).to(Statement::Redo),
    ))
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())))
    .boxed();

    statement
        .repeated()
        .collect()
        .then_ignore(end())
        .map(|statements| Script { statements })
}
