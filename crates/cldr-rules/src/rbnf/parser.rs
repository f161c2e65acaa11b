//! RBNF rule-body tokenizer using winnow.
//!
//! Splits a rule body into literal text, substitutions (`<…<`, `>…>`, `=…=`
//! and the arrow spellings `←…←`, `→…→`), optional clauses (`[…]`) and plural
//! selectors (`$(cardinal,one{…}other{…})$`). Tokens carry no numeric meaning
//! yet; [`super::rule::compile_rule`] resolves them against a rule's base
//! value.

use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::prelude::*;
use winnow::token::{none_of, one_of, take_till, take_while};

use super::ast::Marker;
use crate::error::CompileError;
use crate::plural::PluralRuleType;

/// Characters with syntactic meaning in a rule body.
const SYNTAX_CHARS: [char; 9] = ['\'', '<', '>', '=', '[', ']', '$', '←', '→'];

/// Triple substitutions, which this tokenizer does not support.
const UNSUPPORTED: [&str; 4] = [">>>", "<<<", "→→→", "←←←"];

/// A lexical token of a rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Text(String),
    Substitution {
        marker: Marker,
        target: Option<String>,
    },
    Optional(Vec<Token>),
    Plural {
        kind: PluralRuleType,
        cases: Vec<(String, String)>,
    },
}

/// Tokenize a rule body.
///
/// One trailing `;` and a leading apostrophe (which protects leading
/// whitespace in CLDR data) are removed first.
pub(crate) fn tokenize(body: &str) -> Result<Vec<Token>, CompileError> {
    let trimmed = body.strip_suffix(';').unwrap_or(body);
    let trimmed = trimmed.strip_prefix('\'').unwrap_or(trimmed);

    if let Some(seq) = UNSUPPORTED.iter().find(|seq| trimmed.contains(**seq)) {
        return Err(syntax_error(
            body,
            seq,
            "triple substitutions are not supported",
        ));
    }

    let mut remaining = trimmed;
    let result: ModalResult<Vec<Token>> = repeat(0.., token).parse_next(&mut remaining);
    match result {
        Ok(tokens) if remaining.is_empty() => Ok(merge_text(tokens)),
        Ok(_) => Err(syntax_error(body, remaining, "unexpected character")),
        Err(_) => Err(syntax_error(body, remaining, "malformed token")),
    }
}

fn syntax_error(rule: &str, offending: &str, message: &str) -> CompileError {
    CompileError::RbnfRuleSyntax {
        rule: rule.to_string(),
        offending: if offending.is_empty() {
            "end of input".to_string()
        } else {
            offending.to_string()
        },
        message: message.to_string(),
    }
}

/// Merge adjacent Text tokens into single tokens.
fn merge_text(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Text(text) => {
                if let Some(Token::Text(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Token::Text(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

/// Parse a single top-level token.
fn token(input: &mut &str) -> ModalResult<Token> {
    alt((escape, substitution, optional, plural_selector, text_char)).parse_next(input)
}

/// Parse a token allowed inside an optional clause.
fn inner_token(input: &mut &str) -> ModalResult<Token> {
    alt((escape, substitution, plural_selector, text_char)).parse_next(input)
}

/// Parse an apostrophe escape: `'<` -> `<`, `''` -> `'`.
fn escape(input: &mut &str) -> ModalResult<Token> {
    preceded('\'', one_of(SYNTAX_CHARS))
        .map(|c: char| Token::Text(c.to_string()))
        .parse_next(input)
}

/// Parse one literal character.
fn text_char(input: &mut &str) -> ModalResult<Token> {
    none_of(['<', '>', '=', '[', ']', '←', '→'])
        .map(|c: char| Token::Text(c.to_string()))
        .parse_next(input)
}

/// Parse a substitution: an opening marker, an optional target, the same marker.
fn substitution(input: &mut &str) -> ModalResult<Token> {
    let open = one_of(['<', '>', '=', '←', '→']).parse_next(input)?;
    let target: &str = take_till(0.., move |c: char| c == open).parse_next(input)?;
    cut_err(open).parse_next(input)?;

    let marker = match open {
        '<' | '←' => Marker::Less,
        '>' | '→' => Marker::Greater,
        _ => Marker::Equal,
    };
    let target = (!target.is_empty()).then(|| target.to_string());
    Ok(Token::Substitution { marker, target })
}

/// Parse an optional clause: `[` tokens `]`.
fn optional(input: &mut &str) -> ModalResult<Token> {
    '['.parse_next(input)?;
    let inner: Vec<Token> = repeat(0.., inner_token).parse_next(input)?;
    cut_err(']').parse_next(input)?;
    Ok(Token::Optional(merge_text(inner)))
}

/// Parse a plural selector: `$(kind, category{text}...)` with optional `$`.
fn plural_selector(input: &mut &str) -> ModalResult<Token> {
    "$(".parse_next(input)?;
    let kind = cut_err(preceded(
        ws,
        alt((
            "cardinal".value(PluralRuleType::Cardinal),
            "ordinal".value(PluralRuleType::Ordinal),
        )),
    ))
    .parse_next(input)?;
    cut_err((ws, ',')).parse_next(input)?;
    let cases: Vec<(String, String)> = cut_err(repeat(1.., plural_case)).parse_next(input)?;
    cut_err((ws, ')')).parse_next(input)?;
    opt('$').parse_next(input)?;
    Ok(Token::Plural { kind, cases })
}

/// Parse one `category{text}` case of a plural selector.
fn plural_case(input: &mut &str) -> ModalResult<(String, String)> {
    ws(input)?;
    let category: &str = take_while(1.., |c: char| c.is_ascii_alphanumeric()).parse_next(input)?;
    ws(input)?;
    let text: &str = delimited('{', take_till(0.., '}'), cut_err('}')).parse_next(input)?;
    Ok((category.to_string(), text.to_string()))
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}
