//! Media query parsing and evaluation.
//!
//! Supports the subset of Media Queries Level 3 that breakpoint definitions
//! use: comma-separated query lists, the `all` / `screen` / `print` media
//! types with optional `not` / `only` prefixes, and the `min-width`,
//! `max-width`, `min-height`, `max-height` and `orientation` features.
//!
//! Queries are evaluated against a [`Viewport`], which is always a screen:
//! `print` never matches.

use std::fmt;
use std::str::FromStr;

use logos::Logos;

use crate::media::viewport::{Orientation, Viewport};

/// Pixels per `em` / `rem` when a length uses font-relative units.
const PX_PER_EM: f32 = 16.0;

/// Errors from media query parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MediaQueryError {
    #[error("empty media query")]
    Empty,
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of media query: {0}")]
    UnexpectedEof(String),
    #[error("unknown media type: {0}")]
    UnknownMediaType(String),
    #[error("unknown media feature: {0}")]
    UnknownFeature(String),
    #[error("invalid value for {feature}: {value}")]
    InvalidValue { feature: String, value: String },
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Media type of a query condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    All,
    Screen,
    Print,
}

impl MediaType {
    fn matches_screen(self) -> bool {
        !matches!(self, MediaType::Print)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaType::All => "all",
            MediaType::Screen => "screen",
            MediaType::Print => "print",
        })
    }
}

/// A single `(feature: value)` test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaFeature {
    MinWidth(f32),
    MaxWidth(f32),
    MinHeight(f32),
    MaxHeight(f32),
    Orientation(Orientation),
}

impl MediaFeature {
    /// Evaluate against a viewport. Bounds are inclusive.
    pub fn matches(&self, viewport: &Viewport) -> bool {
        match *self {
            MediaFeature::MinWidth(px) => viewport.width >= px,
            MediaFeature::MaxWidth(px) => viewport.width <= px,
            MediaFeature::MinHeight(px) => viewport.height >= px,
            MediaFeature::MaxHeight(px) => viewport.height <= px,
            MediaFeature::Orientation(orientation) => viewport.orientation() == orientation,
        }
    }
}

impl fmt::Display for MediaFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaFeature::MinWidth(px) => write!(f, "(min-width: {px}px)"),
            MediaFeature::MaxWidth(px) => write!(f, "(max-width: {px}px)"),
            MediaFeature::MinHeight(px) => write!(f, "(min-height: {px}px)"),
            MediaFeature::MaxHeight(px) => write!(f, "(max-height: {px}px)"),
            MediaFeature::Orientation(Orientation::Portrait) => f.write_str("(orientation: portrait)"),
            MediaFeature::Orientation(Orientation::Landscape) => {
                f.write_str("(orientation: landscape)")
            }
        }
    }
}

/// One member of a query list: media type plus features joined by `and`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaCondition {
    negated: bool,
    media_type: MediaType,
    features: Vec<MediaFeature>,
}

impl MediaCondition {
    /// A condition on `media_type` with no features.
    pub fn new(media_type: MediaType) -> Self {
        Self {
            negated: false,
            media_type,
            features: Vec::new(),
        }
    }

    /// A condition matching every media type.
    pub fn all() -> Self {
        Self::new(MediaType::All)
    }

    /// A condition matching screens.
    pub fn screen() -> Self {
        Self::new(MediaType::Screen)
    }

    /// Negate the whole condition (builder).
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Add a feature test (builder).
    pub fn and(mut self, feature: MediaFeature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn features(&self) -> &[MediaFeature] {
        &self.features
    }

    /// Evaluate against a viewport.
    pub fn matches(&self, viewport: &Viewport) -> bool {
        let matched = self.media_type.matches_screen()
            && self.features.iter().all(|feature| feature.matches(viewport));
        matched != self.negated
    }
}

impl fmt::Display for MediaCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.negated {
            write!(f, "not {}", self.media_type)?;
            first = false;
        } else if self.media_type != MediaType::All || self.features.is_empty() {
            write!(f, "{}", self.media_type)?;
            first = false;
        }
        for feature in &self.features {
            if !first {
                f.write_str(" and ")?;
            }
            write!(f, "{feature}")?;
            first = false;
        }
        Ok(())
    }
}

/// A parsed media query list. Matches when any condition matches.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    conditions: Vec<MediaCondition>,
}

impl MediaQuery {
    /// Parse a media query list such as `screen and (max-width: 599.98px)`.
    pub fn parse(input: &str) -> Result<Self, MediaQueryError> {
        let tokens = lex(input)?;
        if tokens.is_empty() {
            return Err(MediaQueryError::Empty);
        }
        let mut parser = Parser { tokens, cursor: 0 };
        parser.parse_query()
    }

    /// A query with a single condition.
    pub fn new(condition: MediaCondition) -> Self {
        Self {
            conditions: vec![condition],
        }
    }

    /// Add an alternative condition (builder).
    pub fn or(mut self, condition: MediaCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// `(min-width: px)`.
    pub fn min_width(px: f32) -> Self {
        Self::new(MediaCondition::all().and(MediaFeature::MinWidth(px)))
    }

    /// `(max-width: px)`.
    pub fn max_width(px: f32) -> Self {
        Self::new(MediaCondition::all().and(MediaFeature::MaxWidth(px)))
    }

    /// `(min-width: min) and (max-width: max)`.
    pub fn between(min: f32, max: f32) -> Self {
        Self::new(
            MediaCondition::all()
                .and(MediaFeature::MinWidth(min))
                .and(MediaFeature::MaxWidth(max)),
        )
    }

    pub fn conditions(&self) -> &[MediaCondition] {
        &self.conditions
    }

    /// Evaluate against a viewport.
    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.conditions.iter().any(|condition| condition.matches(viewport))
    }
}

impl FromStr for MediaQuery {
    type Err = MediaQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{condition}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
enum Token {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    /// Number with an optional unit: `600`, `599.98px`, `48em`.
    #[regex(r"[0-9]+(\.[0-9]+)?[a-zA-Z]*")]
    Length,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,
}

#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    pos: usize,
}

fn lex(input: &str) -> Result<Vec<PToken>, MediaQueryError> {
    let mut tokens = Vec::new();
    for (pos, (result, span)) in Token::lexer(input).spanned().enumerate() {
        match result {
            Ok(token) => tokens.push(PToken {
                token,
                text: input[span].to_string(),
                pos,
            }),
            Err(()) => {
                return Err(MediaQueryError::UnexpectedToken {
                    position: pos,
                    message: format!("unrecognized input '{}'", &input[span]),
                })
            }
        }
    }
    Ok(tokens)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: Token) -> Result<PToken, MediaQueryError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(tok),
            Some(tok) => Err(MediaQueryError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(MediaQueryError::UnexpectedEof(format!("expected {expected:?}"))),
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        self.peek()
            .is_some_and(|tok| tok.token == Token::Ident && tok.text.eq_ignore_ascii_case(keyword))
    }

    fn parse_query(&mut self) -> Result<MediaQuery, MediaQueryError> {
        let mut conditions = vec![self.parse_condition()?];
        while let Some(tok) = self.advance() {
            if tok.token != Token::Comma {
                return Err(MediaQueryError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("expected ',' or end of query, got '{}'", tok.text),
                });
            }
            conditions.push(self.parse_condition()?);
        }
        Ok(MediaQuery { conditions })
    }

    fn parse_condition(&mut self) -> Result<MediaCondition, MediaQueryError> {
        let mut condition = match self.peek().map(|tok| tok.token) {
            Some(Token::Ident) => {
                let negated = self.peek_keyword("not");
                if negated || self.peek_keyword("only") {
                    self.advance();
                }
                let media_type = self.parse_media_type()?;
                let condition = MediaCondition::new(media_type);
                if negated {
                    condition.negate()
                } else {
                    condition
                }
            }
            Some(Token::ParenOpen) => MediaCondition::all().and(self.parse_feature()?),
            Some(_) => {
                let tok = self.peek().cloned();
                return Err(MediaQueryError::UnexpectedToken {
                    position: tok.as_ref().map_or(self.cursor, |t| t.pos),
                    message: format!(
                        "expected media type or feature, got '{}'",
                        tok.map(|t| t.text).unwrap_or_default()
                    ),
                });
            }
            None => {
                return Err(MediaQueryError::UnexpectedEof(
                    "expected media type or feature".into(),
                ))
            }
        };

        while self.peek_keyword("and") {
            self.advance();
            condition = condition.and(self.parse_feature()?);
        }
        Ok(condition)
    }

    fn parse_media_type(&mut self) -> Result<MediaType, MediaQueryError> {
        let tok = self.expect(Token::Ident)?;
        match tok.text.to_ascii_lowercase().as_str() {
            "all" => Ok(MediaType::All),
            "screen" => Ok(MediaType::Screen),
            "print" => Ok(MediaType::Print),
            _ => Err(MediaQueryError::UnknownMediaType(tok.text)),
        }
    }

    fn parse_feature(&mut self) -> Result<MediaFeature, MediaQueryError> {
        self.expect(Token::ParenOpen)?;
        let name = self.expect(Token::Ident)?.text.to_ascii_lowercase();
        self.expect(Token::Colon)?;
        let value = match self.advance() {
            Some(tok) if matches!(tok.token, Token::Length | Token::Ident) => tok.text,
            Some(tok) => {
                return Err(MediaQueryError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("expected value for {name}, got '{}'", tok.text),
                })
            }
            None => return Err(MediaQueryError::UnexpectedEof(format!("expected value for {name}"))),
        };
        self.expect(Token::ParenClose)?;

        let feature = match name.as_str() {
            "min-width" => MediaFeature::MinWidth(parse_length(&name, &value)?),
            "max-width" => MediaFeature::MaxWidth(parse_length(&name, &value)?),
            "min-height" => MediaFeature::MinHeight(parse_length(&name, &value)?),
            "max-height" => MediaFeature::MaxHeight(parse_length(&name, &value)?),
            "orientation" => match value.to_ascii_lowercase().as_str() {
                "portrait" => MediaFeature::Orientation(Orientation::Portrait),
                "landscape" => MediaFeature::Orientation(Orientation::Landscape),
                _ => {
                    return Err(MediaQueryError::InvalidValue {
                        feature: name,
                        value,
                    })
                }
            },
            _ => return Err(MediaQueryError::UnknownFeature(name)),
        };
        Ok(feature)
    }
}

/// Parse `600`, `599.98px`, `30em` or `30rem` into pixels.
fn parse_length(feature: &str, text: &str) -> Result<f32, MediaQueryError> {
    let invalid = || MediaQueryError::InvalidValue {
        feature: feature.to_string(),
        value: text.to_string(),
    };
    let split = text
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let number: f32 = number.parse().map_err(|_| invalid())?;
    match unit.to_ascii_lowercase().as_str() {
        "" | "px" => Ok(number),
        "em" | "rem" => Ok(number * PX_PER_EM),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp(width: f32, height: f32) -> Viewport {
        Viewport::new(width, height)
    }

    // ── Parsing ──────────────────────────────────────────────────────

    #[test]
    fn parse_screen_max_width() {
        let q = MediaQuery::parse("screen and (max-width: 599.98px)").unwrap();
        assert_eq!(
            q,
            MediaQuery::new(MediaCondition::screen().and(MediaFeature::MaxWidth(599.98)))
        );
    }

    #[test]
    fn parse_feature_only_query() {
        let q = MediaQuery::parse("(min-width: 600px) and (max-width: 959.98px)").unwrap();
        assert_eq!(q, MediaQuery::between(600.0, 959.98));
    }

    #[test]
    fn parse_query_list() {
        let q = MediaQuery::parse(
            "(max-width: 599.98px) and (orientation: portrait), (max-width: 959.98px) and (orientation: landscape)",
        )
        .unwrap();
        assert_eq!(q.conditions().len(), 2);
        assert_eq!(
            q.conditions()[1].features(),
            &[
                MediaFeature::MaxWidth(959.98),
                MediaFeature::Orientation(Orientation::Landscape)
            ]
        );
    }

    #[test]
    fn parse_not_and_only() {
        let q = MediaQuery::parse("not print").unwrap();
        assert!(q.conditions()[0].is_negated());
        assert_eq!(q.conditions()[0].media_type(), MediaType::Print);

        let q = MediaQuery::parse("only screen and (min-width: 10px)").unwrap();
        assert!(!q.conditions()[0].is_negated());
        assert_eq!(q.conditions()[0].media_type(), MediaType::Screen);
    }

    #[test]
    fn parse_is_case_insensitive() {
        let q = MediaQuery::parse("SCREEN AND (MAX-WIDTH: 100PX)").unwrap();
        assert_eq!(q, MediaQuery::new(MediaCondition::screen().and(MediaFeature::MaxWidth(100.0))));
    }

    #[test]
    fn parse_em_units() {
        let q = MediaQuery::parse("(min-width: 40rem)").unwrap();
        assert_eq!(q, MediaQuery::min_width(640.0));
    }

    #[test]
    fn parse_unitless_length() {
        assert_eq!(MediaQuery::parse("(max-width: 300)").unwrap(), MediaQuery::max_width(300.0));
    }

    #[test]
    fn from_str_works() {
        let q: MediaQuery = "(min-width: 1px)".parse().unwrap();
        assert_eq!(q, MediaQuery::min_width(1.0));
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn empty_query_is_error() {
        assert_eq!(MediaQuery::parse("   "), Err(MediaQueryError::Empty));
    }

    #[test]
    fn unknown_media_type() {
        assert_eq!(
            MediaQuery::parse("tv and (min-width: 1px)"),
            Err(MediaQueryError::UnknownMediaType("tv".into()))
        );
    }

    #[test]
    fn unknown_feature() {
        assert_eq!(
            MediaQuery::parse("(min-resolution: 2)"),
            Err(MediaQueryError::UnknownFeature("min-resolution".into()))
        );
    }

    #[test]
    fn invalid_unit() {
        assert!(matches!(
            MediaQuery::parse("(min-width: 10vw)"),
            Err(MediaQueryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn invalid_orientation() {
        assert!(matches!(
            MediaQuery::parse("(orientation: sideways)"),
            Err(MediaQueryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn unterminated_feature() {
        assert!(matches!(
            MediaQuery::parse("(min-width: 10px"),
            Err(MediaQueryError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn trailing_comma() {
        assert!(matches!(
            MediaQuery::parse("screen,"),
            Err(MediaQueryError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn garbage_characters() {
        assert!(matches!(
            MediaQuery::parse("screen > print"),
            Err(MediaQueryError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn missing_and_between_features() {
        assert!(matches!(
            MediaQuery::parse("(min-width: 1px) (max-width: 2px)"),
            Err(MediaQueryError::UnexpectedToken { .. })
        ));
    }

    // ── Evaluation ───────────────────────────────────────────────────

    #[test]
    fn width_bounds_are_inclusive() {
        let q = MediaQuery::between(600.0, 959.98);
        assert!(!q.matches(&vp(599.0, 800.0)));
        assert!(q.matches(&vp(600.0, 800.0)));
        assert!(q.matches(&vp(959.98, 800.0)));
        assert!(!q.matches(&vp(960.0, 800.0)));
    }

    #[test]
    fn height_features() {
        let q = MediaQuery::parse("(min-height: 100px) and (max-height: 200px)").unwrap();
        assert!(q.matches(&vp(10.0, 150.0)));
        assert!(!q.matches(&vp(10.0, 250.0)));
    }

    #[test]
    fn print_never_matches_screen() {
        let q = MediaQuery::parse("print").unwrap();
        assert!(!q.matches(&vp(1000.0, 1000.0)));
        let q = MediaQuery::parse("not print").unwrap();
        assert!(q.matches(&vp(1000.0, 1000.0)));
    }

    #[test]
    fn orientation_feature() {
        let q = MediaQuery::parse("(orientation: landscape)").unwrap();
        assert!(q.matches(&vp(1000.0, 500.0)));
        assert!(!q.matches(&vp(500.0, 1000.0)));
    }

    #[test]
    fn any_condition_in_list_matches() {
        let q = MediaQuery::parse("(max-width: 100px), (min-width: 1000px)").unwrap();
        assert!(q.matches(&vp(50.0, 10.0)));
        assert!(q.matches(&vp(2000.0, 10.0)));
        assert!(!q.matches(&vp(500.0, 10.0)));
    }

    // ── Display ──────────────────────────────────────────────────────

    #[test]
    fn display_round_trips_through_parse() {
        let source = "screen and (max-width: 599.98px), (min-width: 1280px) and (orientation: landscape)";
        let q = MediaQuery::parse(source).unwrap();
        assert_eq!(q.to_string(), source);
        assert_eq!(MediaQuery::parse(&q.to_string()).unwrap(), q);
    }

    #[test]
    fn display_bare_type_and_negation() {
        assert_eq!(MediaQuery::parse("all").unwrap().to_string(), "all");
        assert_eq!(MediaQuery::parse("not print").unwrap().to_string(), "not print");
    }
}
