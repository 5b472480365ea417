//! CSS colour resolution
//!
//! Accepts hex (`#rgb`, `#rrggbb`, `#rrggbbaa`), `rgb()`, `rgba()` and a
//! small set of named colours. Alpha is parsed and discarded: computed
//! colours are reported as three 0-255 channels.

use animora_core::Rgb;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1, take_while_m_n},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map_res, opt},
    number::complete::float,
    sequence::{delimited, preceded, terminated},
    IResult,
};

type ParseResult<'a, O> = IResult<&'a str, O>;

/// Resolve a CSS colour string
pub fn parse_css_color(input: &str) -> Option<Rgb> {
    let input = input.trim();
    if let Ok((_, rgb)) = all_consuming(alt((hex_color, rgba_color, rgb_color)))(input) {
        return Some(rgb);
    }
    named_color(input)
}

fn hex_pair(input: &str) -> ParseResult<'_, u8> {
    map_res(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |h| {
        u8::from_str_radix(h, 16)
    })(input)
}

fn hex_color(input: &str) -> ParseResult<'_, Rgb> {
    let (rest, hex) = preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit()))(input)?;
    let rgb = match hex.len() {
        3 => {
            let mut digits = hex.chars().filter_map(|c| c.to_digit(16)).map(|d| (d * 17) as u8);
            match (digits.next(), digits.next(), digits.next()) {
                (Some(r), Some(g), Some(b)) => Rgb::new(r, g, b),
                _ => return Err(length_error(input)),
            }
        }
        6 | 8 => {
            let (hex, r) = hex_pair(hex)?;
            let (hex, g) = hex_pair(hex)?;
            let (_, b) = hex_pair(hex)?;
            Rgb::new(r, g, b)
        }
        _ => return Err(length_error(input)),
    };
    Ok((rest, rgb))
}

fn length_error(input: &str) -> nom::Err<nom::error::Error<&str>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::LengthValue))
}

/// A channel followed by a comma
fn channel(input: &str) -> ParseResult<'_, f32> {
    terminated(padded(float), char(','))(input)
}

fn padded<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

fn rgba_color(input: &str) -> ParseResult<'_, Rgb> {
    let (input, _) = tag_no_case("rgba")(input)?;
    let (input, _) = padded(char('('))(input)?;
    let (input, r) = channel(input)?;
    let (input, g) = channel(input)?;
    let (input, b) = channel(input)?;
    let (input, _alpha) = padded(float)(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Rgb::new(to_channel(r), to_channel(g), to_channel(b))))
}

fn rgb_color(input: &str) -> ParseResult<'_, Rgb> {
    let (input, _) = tag_no_case("rgb")(input)?;
    let (input, _) = padded(char('('))(input)?;
    let (input, r) = channel(input)?;
    let (input, g) = channel(input)?;
    let (input, b) = padded(float)(input)?;
    // Tolerate an alpha channel in rgb() as browsers do
    let (input, _) = opt(preceded(char(','), padded(float)))(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Rgb::new(to_channel(r), to_channel(g), to_channel(b))))
}

fn named_color(name: &str) -> Option<Rgb> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" | "transparent" => Rgb::BLACK,
        "white" => Rgb::WHITE,
        "red" => Rgb::new(255, 0, 0),
        "green" => Rgb::new(0, 128, 0),
        "lime" => Rgb::new(0, 255, 0),
        "blue" => Rgb::new(0, 0, 255),
        "yellow" => Rgb::new(255, 255, 0),
        "cyan" | "aqua" => Rgb::new(0, 255, 255),
        "magenta" | "fuchsia" => Rgb::new(255, 0, 255),
        "gray" | "grey" => Rgb::new(128, 128, 128),
        "silver" => Rgb::new(192, 192, 192),
        "maroon" => Rgb::new(128, 0, 0),
        "navy" => Rgb::new(0, 0, 128),
        "teal" => Rgb::new(0, 128, 128),
        "olive" => Rgb::new(128, 128, 0),
        "orange" => Rgb::new(255, 165, 0),
        "purple" => Rgb::new(128, 0, 128),
        "pink" => Rgb::new(255, 192, 203),
        _ => return None,
    };
    Some(rgb)
}
