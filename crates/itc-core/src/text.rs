//! Parsers for the printed notation of ids, events and stamps.
//!
//! The notation is the one produced by the `Display` impls:
//!
//! ```text
//! id     = "0" | "1" | "(" id "," id ")"
//! event  = n | "(" n "," event "," event ")"
//! stamp  = "(" id "," event ")"
//! ```
//!
//! Whitespace is allowed around every token. Ids and events are returned
//! exactly as written; stamps are normalized. Event trees whose accumulated
//! counters overflow are rejected, and stamp counters may not exceed
//! [`MAX_COUNTER`].

use std::str::FromStr;

use nom::{
    branch::alt,
    character::complete::{char, multispace0, u64 as counter},
    combinator::{map, value},
    error::{Error, ErrorKind},
    sequence::{delimited, tuple},
    IResult,
};

use crate::encode::MAX_DEPTH;
use crate::error::ParseError;
use crate::event::Event;
use crate::id::Id;
use crate::stamp::{Stamp, MAX_COUNTER};

/// A single punctuation character with optional surrounding whitespace.
fn token<'a>(c: char) -> impl FnMut(&'a str) -> IResult<&'a str, char> {
    delimited(multispace0, char(c), multispace0)
}

fn too_deep(input: &str) -> nom::Err<Error<&str>> {
    nom::Err::Failure(Error::new(input, ErrorKind::TooLarge))
}

fn id_at(input: &str, depth: usize) -> IResult<&str, Id> {
    if depth > MAX_DEPTH {
        return Err(too_deep(input));
    }
    alt((
        value(Id::Zero, char('0')),
        value(Id::One, char('1')),
        |i| id_node(i, depth),
    ))(input)
}

fn id_node(input: &str, depth: usize) -> IResult<&str, Id> {
    let (input, _) = token('(')(input)?;
    let (input, left) = id_at(input, depth + 1)?;
    let (input, _) = token(',')(input)?;
    let (input, right) = id_at(input, depth + 1)?;
    let (input, _) = token(')')(input)?;
    Ok((input, Id::Node(Box::new(left), Box::new(right))))
}

fn event_at(input: &str, depth: usize) -> IResult<&str, Event> {
    if depth > MAX_DEPTH {
        return Err(too_deep(input));
    }
    alt((map(counter, Event::Leaf), |i| event_node(i, depth)))(input)
}

fn event_node(input: &str, depth: usize) -> IResult<&str, Event> {
    let (input, (_, baseline, _)) = tuple((token('('), counter, token(',')))(input)?;
    let (input, left) = event_at(input, depth + 1)?;
    let (input, _) = token(',')(input)?;
    let (input, right) = event_at(input, depth + 1)?;
    let (input, _) = token(')')(input)?;
    Ok((input, Event::node(baseline, left, right)))
}

/// A whole event tree whose counters, summed down every path, stay within
/// `limit`.
fn event_within(input: &str, limit: u64) -> IResult<&str, Event> {
    let (rest, event) = event_at(input, 0)?;
    match event.checked_max() {
        Some(max) if max <= limit => Ok((rest, event)),
        _ => Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge))),
    }
}

fn stamp(input: &str) -> IResult<&str, Stamp> {
    let (input, _) = token('(')(input)?;
    let (input, id) = id_at(input, 0)?;
    let (input, _) = token(',')(input)?;
    let (input, event) = event_within(input, MAX_COUNTER)?;
    let (input, _) = token(')')(input)?;
    Ok((input, Stamp::from_parts(id, event)))
}

/// Runs `parser` over the whole of `input`, allowing surrounding
/// whitespace.
fn parse_complete<T>(
    input: &str,
    kind: &'static str,
    parser: impl FnMut(&str) -> IResult<&str, T>,
) -> Result<T, ParseError> {
    match delimited(multispace0, parser, multispace0)(input) {
        Ok(("", parsed)) => Ok(parsed),
        Ok((rest, _)) => Err(ParseError::Trailing {
            kind,
            rest: rest.to_string(),
        }),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(ParseError::Invalid {
            kind,
            offset: input.len() - e.input.len(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Invalid {
            kind,
            offset: input.len(),
        }),
    }
}

impl FromStr for Id {
    type Err = ParseError;

    /// Parses an id as written; the result is not normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete(s, "id", |i| id_at(i, 0))
    }
}

impl FromStr for Event {
    type Err = ParseError;

    /// Parses an event tree as written; the result is not normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete(s, "event", |i| event_within(i, u64::MAX))
    }
}

impl FromStr for Stamp {
    type Err = ParseError;

    /// Parses a stamp and normalizes both of its trees.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complete(s, "stamp", stamp)
    }
}
