//! Selector subset
//!
//! Supports `*`, type selectors, `.class`, `#id`, compounds of those
//! (`li.item#first`) and comma-separated lists. Combinators, attributes and
//! pseudo-classes are rejected.

use animora_core::{Error, Result};
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    multi::{many0, separated_list1},
    sequence::{delimited, preceded},
    IResult,
};

/// One compound selector: every present part must match
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

/// A comma-separated selector list
#[derive(Clone, Debug, PartialEq)]
pub struct SelectorList {
    pub compounds: Vec<Compound>,
}

/// The element attributes selectors look at
pub trait Selectable {
    fn tag(&self) -> &str;
    fn id(&self) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

enum Part<'a> {
    Id(&'a str),
    Class(&'a str),
}

fn ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

fn part(input: &str) -> IResult<&str, Part<'_>> {
    alt((
        map(preceded(char('#'), ident), Part::Id),
        map(preceded(char('.'), ident), Part::Class),
    ))(input)
}

fn compound(input: &str) -> IResult<&str, Compound> {
    let (input, head) = opt(alt((map(char('*'), |_| None), map(ident, Some))))(input)?;
    let (input, parts) = many0(part)(input)?;

    let mut compound = Compound {
        tag: head.flatten().map(|t| t.to_ascii_lowercase()),
        ..Default::default()
    };
    for part in parts {
        match part {
            Part::Id(id) => compound.id = Some(id.to_string()),
            Part::Class(class) => compound.classes.push(class.to_string()),
        }
    }
    // An empty compound is only valid as `*`
    if head.is_none() && compound.id.is_none() && compound.classes.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((input, compound))
}

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self> {
        let list = separated_list1(char(','), delimited(multispace0, compound, multispace0));
        all_consuming(list)(input)
            .map(|(_, compounds)| Self { compounds })
            .map_err(|_| Error::InvalidSelector(input.to_string()))
    }

    pub fn matches<E: Selectable>(&self, element: &E) -> bool {
        self.compounds.iter().any(|c| c.matches(element))
    }
}

impl Compound {
    pub fn matches<E: Selectable>(&self, element: &E) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| element.has_class(c))
    }
}
