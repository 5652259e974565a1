//! PEST-based expression parser
//!
//! Parses expression source like `mpg > 31` or `~x + y` into [`Expr`] AST
//! nodes. The grammar lives in `expr.pest`; this module walks the pair tree
//! and builds the AST.

use pest::Parser;
use pest_derive::Parser;
use thiserror::Error;

use crate::ast::{BinaryOp, Expr, UnaryOp};

/* ===================== PEST Parser ===================== */

#[derive(Parser)]
#[grammar = "parser/expr.pest"]
struct ExprParser;

/* ===================== Error Types ===================== */

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error("parse error: {0}")]
    PestError(String),
    #[error("invalid expression: {0}")]
    BuildError(String),
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        ParseError::PestError(err.to_string())
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/* ===================== Public API ===================== */

/// Parse an expression source string into an AST
pub fn parse_expr(source: &str) -> ParseResult<Expr> {
    let mut pairs = ExprParser::parse(Rule::program, source)?;
    let program = pairs.next().unwrap();

    // program = { SOI ~ expression ~ EOI }
    let expression = program.into_inner().next().unwrap();
    build_expression(expression)
}

/* ===================== AST Builder ===================== */

fn build_expression(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expr> {
    match pair.as_rule() {
        Rule::expression => {
            // expression = { formula | logical_or }
            let inner = pair.into_inner().next().unwrap();
            build_expression(inner)
        }
        Rule::formula => {
            // formula = { "~" ~ logical_or }
            let body = pair.into_inner().next().unwrap();
            Ok(Expr::Formula {
                body: Box::new(build_expression(body)?),
            })
        }
        Rule::logical_or
        | Rule::logical_and
        | Rule::equality
        | Rule::comparison
        | Rule::additive
        | Rule::multiplicative => build_binary_chain(pair),
        Rule::unary => {
            // unary = { not_op ~ unary | neg_op ~ unary | primary }
            let mut inner = pair.into_inner();
            let first = inner.next().unwrap();
            match first.as_rule() {
                Rule::not_op => Ok(Expr::Unary {
                    op: UnaryOp::Not,
                    operand: Box::new(build_expression(inner.next().unwrap())?),
                }),
                Rule::neg_op => Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(build_expression(inner.next().unwrap())?),
                }),
                _ => build_expression(first),
            }
        }
        Rule::primary => {
            // primary = { literal | identifier | "(" ~ expression ~ ")" }
            let inner = pair.into_inner().next().unwrap();
            build_expression(inner)
        }
        Rule::literal => {
            let inner = pair.into_inner().next().unwrap();
            build_expression(inner)
        }
        Rule::identifier => Ok(Expr::Ident {
            name: pair.as_str().to_string(),
        }),
        Rule::number => {
            let num_str = pair.as_str();
            let v = num_str.parse::<f64>().map_err(|e| {
                ParseError::BuildError(format!("failed to parse number '{}': {}", num_str, e))
            })?;
            Ok(Expr::LitNum { v })
        }
        Rule::boolean => Ok(Expr::LitBool {
            v: pair.as_str() == "true",
        }),
        Rule::null_lit => Ok(Expr::LitNull),
        Rule::string => {
            // string = { "\"" ~ string_content ~ "\"" }
            let content = pair.into_inner().next().unwrap();
            Ok(Expr::LitStr {
                v: unescape_string(content.as_str()),
            })
        }
        _ => Err(ParseError::BuildError(format!(
            "unexpected expression rule: {:?}",
            pair.as_rule()
        ))),
    }
}

/// Fold a left-associative chain of `operand (op operand)*` pairs
fn build_binary_chain(pair: pest::iterators::Pair<Rule>) -> ParseResult<Expr> {
    let mut inner = pair.into_inner();
    let mut expr = build_expression(inner.next().unwrap())?;

    while let Some(op_pair) = inner.next() {
        let op = build_operator(&op_pair)?;
        let right = build_expression(inner.next().unwrap())?;
        expr = Expr::Binary {
            op,
            left: Box::new(expr),
            right: Box::new(right),
        };
    }

    Ok(expr)
}

fn build_operator(pair: &pest::iterators::Pair<Rule>) -> ParseResult<BinaryOp> {
    let op = match (pair.as_rule(), pair.as_str()) {
        (Rule::or_op, _) => BinaryOp::Or,
        (Rule::and_op, _) => BinaryOp::And,
        (Rule::eq_op, "==") => BinaryOp::Eq,
        (Rule::eq_op, _) => BinaryOp::Ne,
        (Rule::cmp_op, "<=") => BinaryOp::Le,
        (Rule::cmp_op, ">=") => BinaryOp::Ge,
        (Rule::cmp_op, "<") => BinaryOp::Lt,
        (Rule::cmp_op, _) => BinaryOp::Gt,
        (Rule::add_op, "+") => BinaryOp::Add,
        (Rule::add_op, _) => BinaryOp::Sub,
        (Rule::mul_op, "*") => BinaryOp::Mul,
        (Rule::mul_op, "/") => BinaryOp::Div,
        (Rule::mul_op, _) => BinaryOp::Rem,
        (rule, _) => {
            return Err(ParseError::BuildError(format!(
                "unexpected operator rule: {:?}",
                rule
            )))
        }
    };
    Ok(op)
}

fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

/* ===================== Tests ===================== */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_literal() {
        assert_eq!(parse_expr("42").unwrap(), Expr::LitNum { v: 42.0 });
        assert_eq!(parse_expr("3.14").unwrap(), Expr::LitNum { v: 3.14 });
    }

    #[test]
    fn test_parse_bool_and_null_literals() {
        assert_eq!(parse_expr("true").unwrap(), Expr::LitBool { v: true });
        assert_eq!(parse_expr("false").unwrap(), Expr::LitBool { v: false });
        assert_eq!(parse_expr("null").unwrap(), Expr::LitNull);
    }

    #[test]
    fn test_parse_string_literal_with_escapes() {
        assert_eq!(
            parse_expr(r#""a\"b\n""#).unwrap(),
            Expr::LitStr {
                v: "a\"b\n".to_string()
            }
        );
    }

    #[test]
    fn test_parse_identifier() {
        assert_eq!(
            parse_expr("mpg").unwrap(),
            Expr::Ident {
                name: "mpg".to_string()
            }
        );
    }

    #[test]
    fn test_parse_dotted_identifier() {
        // R-style names like Sepal.Length are single identifiers
        assert_eq!(
            parse_expr("Sepal.Length").unwrap(),
            Expr::Ident {
                name: "Sepal.Length".to_string()
            }
        );
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        // `trueish` is an identifier, bare `true` is a literal
        assert_eq!(
            parse_expr("trueish").unwrap(),
            Expr::Ident {
                name: "trueish".to_string()
            }
        );
    }

    #[test]
    fn test_parse_comparison() {
        let expr = parse_expr("mpg > 31").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Gt,
                left: Box::new(Expr::Ident {
                    name: "mpg".to_string()
                }),
                right: Box::new(Expr::LitNum { v: 31.0 }),
            }
        );
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let expr = parse_expr("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(Expr::LitNum { v: 1.0 }),
                right: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    left: Box::new(Expr::LitNum { v: 2.0 }),
                    right: Box::new(Expr::LitNum { v: 3.0 }),
                }),
            }
        );
    }

    #[test]
    fn test_comparison_binds_tighter_than_logical() {
        let expr = parse_expr("a < 1 && b > 2").unwrap();
        match expr {
            Expr::Binary { op, left, right } => {
                assert_eq!(op, BinaryOp::And);
                assert!(matches!(*left, Expr::Binary { op: BinaryOp::Lt, .. }));
                assert!(matches!(*right, Expr::Binary { op: BinaryOp::Gt, .. }));
            }
            other => panic!("expected And at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        let expr = parse_expr("10 - 3 - 2").unwrap();
        assert_eq!(
            expr,
            Expr::Binary {
                op: BinaryOp::Sub,
                left: Box::new(Expr::Binary {
                    op: BinaryOp::Sub,
                    left: Box::new(Expr::LitNum { v: 10.0 }),
                    right: Box::new(Expr::LitNum { v: 3.0 }),
                }),
                right: Box::new(Expr::LitNum { v: 2.0 }),
            }
        );
    }

    #[test]
    fn test_parens_override_precedence() {
        let expr = parse_expr("(1 + 2) * 3").unwrap();
        match expr {
            Expr::Binary { op, left, .. } => {
                assert_eq!(op, BinaryOp::Mul);
                assert!(matches!(*left, Expr::Binary { op: BinaryOp::Add, .. }));
            }
            other => panic!("expected Mul at the root, got {:?}", other),
        }
    }

    #[test]
    fn test_unary_negation_and_not() {
        assert_eq!(
            parse_expr("-x").unwrap(),
            Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(Expr::Ident {
                    name: "x".to_string()
                }),
            }
        );
        assert_eq!(
            parse_expr("!done").unwrap(),
            Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(Expr::Ident {
                    name: "done".to_string()
                }),
            }
        );
    }

    #[test]
    fn test_parse_formula() {
        let expr = parse_expr("~mpg > 31").unwrap();
        match expr {
            Expr::Formula { body } => {
                assert!(matches!(*body, Expr::Binary { op: BinaryOp::Gt, .. }));
            }
            other => panic!("expected Formula, got {:?}", other),
        }
    }

    #[test]
    fn test_formula_quotes_whole_expression() {
        // The formula body spans the whole `x + y`, not just `x`
        let expr = parse_expr("~x + y").unwrap();
        match expr {
            Expr::Formula { body } => {
                assert!(matches!(*body, Expr::Binary { op: BinaryOp::Add, .. }));
            }
            other => panic!("expected Formula, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_on_trailing_garbage() {
        assert!(parse_expr("1 + 2 @").is_err());
    }

    #[test]
    fn test_parse_error_on_empty_input() {
        assert!(parse_expr("").is_err());
    }

    #[test]
    fn test_parse_error_on_unclosed_paren() {
        assert!(parse_expr("(1 + 2").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let expr = parse_expr("(a + b) * 2 >= limit").unwrap();
        let reparsed = parse_expr(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed);
    }
}
