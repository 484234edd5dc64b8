//! Parser implementation for rows of a peptide count report.

use nom::bytes::complete::tag;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::character::complete::line_ending;
use nom::character::complete::space0;
use nom::combinator::eof;
use nom::combinator::opt;
use nom::number::complete::double;
use nom::sequence::terminated;
use nom::IResult;
use nom::Parser;

use super::HEADER;

pub fn header(input: &str) -> IResult<&str, &str> {
    terminated(tag(HEADER), opt(line_ending)).parse(input)
}

pub fn peptide(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphabetic()).parse(input)
}

pub fn row(input: &str) -> IResult<&str, (&str, f64, u64)> {
    let (input, peptide) = terminated(peptide, char(',')).parse(input)?;
    let (input, rate) = terminated(double, char(',')).parse(input)?;
    let (input, count) = terminated(nom::character::complete::u64, space0).parse(input)?;
    let (input, _) = nom::branch::alt((line_ending, eof)).parse(input)?;
    Ok((input, (peptide, rate, count)))
}
