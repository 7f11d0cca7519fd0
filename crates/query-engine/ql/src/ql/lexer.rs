//! Tokenizer shared by the three clause grammars.

use std::fmt;
use std::ops::Range;

use chumsky::prelude::*;

/// Character offsets of a token in its clause.
pub type Span = Range<usize>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    // Keywords, matched case-insensitively
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Is,
    Null,
    Asc,
    Desc,
    True,
    False,

    // Literals
    Ident(String),
    Number(String),
    Str(String),

    // Punctuation
    Comma,  // ,
    Dot,    // .
    LParen, // (
    RParen, // )
    Star,   // *
    Minus,  // -
    Eq,     // =
    NotEq,  // != or <>
    Gt,     // >
    Gte,    // >=
    Lt,     // <
    Lte,    // <=
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Not => write!(f, "not"),
            Token::In => write!(f, "in"),
            Token::Between => write!(f, "between"),
            Token::Like => write!(f, "like"),
            Token::Is => write!(f, "is"),
            Token::Null => write!(f, "null"),
            Token::Asc => write!(f, "asc"),
            Token::Desc => write!(f, "desc"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::Ident(s) | Token::Number(s) => write!(f, "{s}"),
            Token::Str(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Token::Comma => write!(f, ","),
            Token::Dot => write!(f, "."),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Star => write!(f, "*"),
            Token::Minus => write!(f, "-"),
            Token::Eq => write!(f, "="),
            Token::NotEq => write!(f, "!="),
            Token::Gt => write!(f, ">"),
            Token::Gte => write!(f, ">="),
            Token::Lt => write!(f, "<"),
            Token::Lte => write!(f, "<="),
        }
    }
}

pub fn lexer() -> impl Parser<char, Vec<(Token, Span)>, Error = Simple<char>> {
    let keyword_or_ident = text::ident().map(|s: String| match s.to_lowercase().as_str() {
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "in" => Token::In,
        "between" => Token::Between,
        "like" => Token::Like,
        "is" => Token::Is,
        "null" => Token::Null,
        "asc" => Token::Asc,
        "desc" => Token::Desc,
        "true" => Token::True,
        "false" => Token::False,
        _ => Token::Ident(s),
    });

    let digits = filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>();

    let number = digits
        .clone()
        .then(just('.').ignore_then(digits).or_not())
        .map(|(whole, fraction)| match fraction {
            Some(fraction) => Token::Number(format!("{whole}.{fraction}")),
            None => Token::Number(whole),
        });

    // a doubled quote inside a string literal stands for one quote
    let string = just('\'')
        .ignore_then(just("''").to('\'').or(none_of('\'')).repeated())
        .then_ignore(just('\''))
        .collect::<String>()
        .map(Token::Str);

    let punctuation = choice((
        just("!=").to(Token::NotEq),
        just("<>").to(Token::NotEq),
        just(">=").to(Token::Gte),
        just("<=").to(Token::Lte),
        just('=').to(Token::Eq),
        just('>').to(Token::Gt),
        just('<').to(Token::Lt),
        just(',').to(Token::Comma),
        just('.').to(Token::Dot),
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('*').to(Token::Star),
        just('-').to(Token::Minus),
    ));

    choice((keyword_or_ident, number, string, punctuation))
        .map_with_span(|token, span| (token, span))
        .padded()
        .repeated()
        .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lexer()
            .parse(input)
            .unwrap()
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(
            tokens("a NOT In (1) AnD b Is NuLl"),
            vec![
                Token::Ident("a".into()),
                Token::Not,
                Token::In,
                Token::LParen,
                Token::Number("1".into()),
                Token::RParen,
                Token::And,
                Token::Ident("b".into()),
                Token::Is,
                Token::Null,
            ]
        );
    }

    #[test]
    fn paths_numbers_and_strings() {
        assert_eq!(
            tokens("b.c >= -1.5 and d <> 'it''s'"),
            vec![
                Token::Ident("b".into()),
                Token::Dot,
                Token::Ident("c".into()),
                Token::Gte,
                Token::Minus,
                Token::Number("1.5".into()),
                Token::And,
                Token::Ident("d".into()),
                Token::NotEq,
                Token::Str("it's".into()),
            ]
        );
    }

    #[test]
    fn spans_exclude_whitespace() {
        let spanned = lexer().parse("  a ,b").unwrap();
        let spans: Vec<Span> = spanned.into_iter().map(|(_, span)| span).collect();
        assert_eq!(spans, vec![2..3, 4..5, 5..6]);
    }

    #[test]
    fn unknown_characters_are_rejected() {
        assert!(lexer().parse("a = #").is_err());
    }
}
