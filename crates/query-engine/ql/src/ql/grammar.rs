//! Grammars of the three clause kinds.
//!
//! Each entry point reads a whole clause and folds it straight into the
//! intermediate representation, so no parse state outlives the call.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use chumsky::Stream;

use super::ast::{Operator, OrderBy, Predicate, Projection};
use super::error::{LocatedError, SyntaxError};
use super::lexer::{lexer, Token};

/// Read a `select` clause: `*` or a comma separated list of field paths.
/// `*` selects everything and yields no projections.
pub fn select_list(clause: &str) -> Result<Vec<Projection>, SyntaxError> {
    parse_clause(clause, select_list_parser())
}

/// Read a `where` clause: predicates joined by `and`.
pub fn search_condition(clause: &str) -> Result<Vec<Predicate>, SyntaxError> {
    parse_clause(clause, search_condition_parser())
}

/// Read an `order by` clause: field paths with an optional `asc` or `desc`.
pub fn sort_specifier_list(clause: &str) -> Result<Vec<OrderBy>, SyntaxError> {
    parse_clause(clause, sort_specifier_list_parser())
}

fn parse_clause<O>(
    clause: &str,
    parser: impl Parser<Token, O, Error = Simple<Token>>,
) -> Result<O, SyntaxError> {
    let tokens = lexer()
        .parse(clause)
        .map_err(|errors| tokenizing_error(clause, errors))?;

    let len = clause.chars().count();
    parser
        .then_ignore(end())
        .parse(Stream::from_iter(len..len + 1, tokens.into_iter()))
        .map_err(|errors| parsing_error(clause, errors))
}

// Grammar //

fn path() -> impl Parser<Token, Vec<String>, Error = Simple<Token>> + Clone {
    select! { Token::Ident(name) => name }
        .separated_by(just(Token::Dot))
        .at_least(1)
}

fn projection() -> impl Parser<Token, Projection, Error = Simple<Token>> + Clone {
    path().map(|parts| {
        parts
            .iter()
            .fold(Projection::new(""), |mut projection, part| {
                projection.append(part);
                projection
            })
    })
}

fn select_list_parser() -> impl Parser<Token, Vec<Projection>, Error = Simple<Token>> + Clone {
    just(Token::Star)
        .to(vec![])
        .or(projection().separated_by(just(Token::Comma)).at_least(1))
}

/// A literal and whether it was written as a string.
fn value() -> impl Parser<Token, (String, bool), Error = Simple<Token>> + Clone {
    let number = just(Token::Minus)
        .or_not()
        .then(select! { Token::Number(digits) => digits })
        .map(|(minus, digits)| match minus {
            Some(_) => format!("-{digits}"),
            None => digits,
        });

    choice((
        select! { Token::Str(text) => (text, true) },
        number.map(|digits| (digits, false)),
        just(Token::True).to(("true".to_string(), false)),
        just(Token::False).to(("false".to_string(), false)),
    ))
}

fn predicate() -> impl Parser<Token, Predicate, Error = Simple<Token>> + Clone {
    let comparison_operator = select! {
        Token::Eq => Operator::Equals,
        Token::NotEq => Operator::NotEquals,
        Token::Gt => Operator::GreaterThan,
        Token::Gte => Operator::GreaterThanOrEqualTo,
        Token::Lt => Operator::LessThan,
        Token::Lte => Operator::LessThanOrEqualTo,
    };

    let comparison = comparison_operator
        .then(value())
        .map(|(operator, value)| (operator, vec![value]));

    let negation = just(Token::Not).or_not().map(|not| not.is_some());

    let in_list = negation
        .clone()
        .then_ignore(just(Token::In))
        .then(
            value()
                .separated_by(just(Token::Comma))
                .at_least(1)
                .delimited_by(just(Token::LParen), just(Token::RParen)),
        )
        .map(|(negated, values)| {
            let operator = if negated { Operator::NotIn } else { Operator::In };
            (operator, values)
        });

    let between = negation
        .clone()
        .then_ignore(just(Token::Between))
        .then(value())
        .then_ignore(just(Token::And))
        .then(value())
        .map(|((negated, low), high)| {
            let operator = if negated {
                Operator::NotBetween
            } else {
                Operator::Between
            };
            (operator, vec![low, high])
        });

    let like = negation
        .then_ignore(just(Token::Like))
        .then(value())
        .map(|(negated, pattern)| {
            let operator = if negated {
                Operator::NotLike
            } else {
                Operator::Like
            };
            (operator, vec![pattern])
        });

    let null_check = just(Token::Is)
        .ignore_then(just(Token::Not).or_not())
        .then_ignore(just(Token::Null))
        .map(|not| {
            let operator = match not {
                Some(_) => Operator::IsNotNull,
                None => Operator::IsNull,
            };
            (operator, vec![])
        });

    // Only one field may stand on the left. Reading a field list first puts
    // the failure of a dangling `a, ` at the end of input.
    let lhs = path()
        .map(|parts| parts.join("."))
        .then(
            just(Token::Comma)
                .map_with_span(|_, span| span)
                .then_ignore(path())
                .repeated(),
        )
        .validate(|(lhs, commas), _, emit| {
            if let Some(comma) = commas.into_iter().next() {
                emit(Simple::custom(comma, "no viable alternative at input ','"));
            }
            lhs
        });

    lhs.then(choice((comparison, in_list, between, like, null_check)))
        .map(|(lhs, (operator, values))| {
            let mut predicate = Predicate::new(lhs, operator);
            for (value, quoted) in values {
                predicate.push_rhs(value, quoted);
            }
            predicate
        })
}

fn search_condition_parser() -> impl Parser<Token, Vec<Predicate>, Error = Simple<Token>> + Clone
{
    predicate().separated_by(just(Token::And)).at_least(1)
}

fn sort_specifier_list_parser() -> impl Parser<Token, Vec<OrderBy>, Error = Simple<Token>> + Clone
{
    let direction = choice((just(Token::Asc).to(true), just(Token::Desc).to(false)));

    path()
        .map(|parts| parts.join("."))
        .then(direction.or_not())
        .map(|(name, ascending)| OrderBy::new(name, ascending.unwrap_or(false)))
        .separated_by(just(Token::Comma))
        .at_least(1)
}

// Errors //

fn tokenizing_error(clause: &str, errors: Vec<Simple<char>>) -> SyntaxError {
    SyntaxError::new(
        errors
            .into_iter()
            .map(|error| {
                let found = error
                    .found()
                    .map_or_else(|| "<EOF>".to_string(), ToString::to_string);
                LocatedError::at_offset(
                    clause,
                    error.span().start,
                    format!("token recognition error at: '{found}'"),
                )
            })
            .collect(),
    )
}

fn parsing_error(clause: &str, errors: Vec<Simple<Token>>) -> SyntaxError {
    SyntaxError::new(
        errors
            .into_iter()
            .map(|error| {
                let message = match error.reason() {
                    SimpleReason::Custom(message) => message.clone(),
                    _ => {
                        let found = error
                            .found()
                            .map_or_else(|| "<EOF>".to_string(), ToString::to_string);
                        format!("no viable alternative at input '{found}'")
                    }
                };
                LocatedError::at_offset(clause, error.span().start, message)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_list_reads_dotted_paths() {
        let projections = select_list("a, b.c").unwrap();
        similar_asserts::assert_eq!(
            projections,
            vec![Projection::new("a"), Projection::new("b.c")]
        );
    }

    #[test]
    fn select_star_selects_everything() {
        assert!(select_list("*").unwrap().is_empty());
    }

    #[test]
    fn sort_keys_default_to_descending() {
        similar_asserts::assert_eq!(
            sort_specifier_list("a ASC, b desc, c.d.e").unwrap(),
            vec![
                OrderBy::new("a", true),
                OrderBy::new("b", false),
                OrderBy::new("c.d.e", false)
            ]
        );
    }

    #[test]
    fn search_condition_reads_every_operator() {
        let predicates = search_condition(
            "name = 'Bill' and name != 'Bob' and age >= 18 and age < -2.5 \
             and tag IN ('x', 'y') and tag not in (1, 2) and age between 30 and 40 \
             and age not between 1 and 2 and name like 'B%' and name NOT LIKE '%x' \
             and a.b is null and a.b is not null and flag = true",
        )
        .unwrap();

        let operators: Vec<Operator> = predicates.iter().map(Predicate::operator).collect();
        assert_eq!(
            operators,
            vec![
                Operator::Equals,
                Operator::NotEquals,
                Operator::GreaterThanOrEqualTo,
                Operator::LessThan,
                Operator::In,
                Operator::NotIn,
                Operator::Between,
                Operator::NotBetween,
                Operator::Like,
                Operator::NotLike,
                Operator::IsNull,
                Operator::IsNotNull,
                Operator::Equals,
            ]
        );
        assert_eq!(predicates[3].rhs(), ["-2.5"]);
        assert!(!predicates[3].is_quoted());
        assert_eq!(predicates[4].rhs(), ["x", "y"]);
        assert!(predicates[4].is_quoted());
        assert_eq!(predicates[6].rhs(), ["30", "40"]);
        assert_eq!(predicates[10].lhs(), "a.b");
        assert!(predicates[10].rhs().is_empty());
        assert_eq!(predicates[12].rhs(), ["true"]);
    }

    #[test]
    fn predicates_render_back_to_their_clause() {
        let clause = "name = 'Bill' and age between 30 and 40 and tag not in ('a', 'b')";
        let rendered: Vec<String> = search_condition(clause)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(rendered.join(" and "), clause);
    }

    #[test]
    fn parsing_twice_gives_equal_results() {
        let clause = "a = 1 and b.c like 'x%'";
        assert_eq!(
            search_condition(clause).unwrap(),
            search_condition(clause).unwrap()
        );
    }

    #[test]
    fn trailing_comma_in_select_list_fails_at_end_of_input() {
        let error = select_list("a, ").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 4: no viable alternative at input '<EOF>'");
    }

    #[test]
    fn trailing_comma_in_sort_list_fails_at_end_of_input() {
        let error = sort_specifier_list("a, ").unwrap_err();
        let first = error.first().unwrap();
        assert_eq!((first.line, first.column), (1, 4));
    }

    #[test]
    fn trailing_comma_in_search_condition_fails_at_end_of_input() {
        let error = search_condition("a, ").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 4: no viable alternative at input '<EOF>'");
    }

    #[test]
    fn missing_operand_fails_at_end_of_input() {
        let error = search_condition("a = ").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 5: no viable alternative at input '<EOF>'");
    }

    #[test]
    fn several_fields_on_the_left_are_rejected_at_the_comma() {
        let error = search_condition("a, b = 1").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 2: no viable alternative at input ','");
    }

    #[test]
    fn keywords_are_not_field_names() {
        let error = select_list("name, in").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 7: no viable alternative at input 'in'");

        let error = search_condition("desc = 1").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 1: no viable alternative at input 'desc'");

        let error = sort_specifier_list("null asc").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 1: no viable alternative at input 'null'");
    }

    #[test]
    fn errors_on_later_lines_are_located() {
        let error = search_condition("a = 1\nand b = ").unwrap_err();
        let first = error.first().unwrap();
        assert_eq!(first.line, 2);
        assert_eq!(first.column, 9);
    }

    #[test]
    fn disjunction_is_rejected() {
        let error = search_condition("a = 1 or b = 2").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 7: no viable alternative at input 'or'");
    }

    #[test]
    fn unknown_characters_are_reported() {
        let error = search_condition("a = #").unwrap_err();
        insta::assert_snapshot!(error, @"Line: 1, Position: 5: token recognition error at: '#'");
    }
}
