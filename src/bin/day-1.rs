use std::collections::HashMap;

use aoc::{input::number, PuzzleError};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{line_ending, space0, space1},
    multi::separated_list1,
    sequence::{delimited, separated_pair},
    IResult,
};

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(1)?;
    let (left, right) = parse_input(&input)?;
    aoc::report(1, 1, "Total Distance", part_1(&left, &right));
    aoc::report(1, 2, "Similarity Score", part_2(&left, &right));
    Ok(())
}

/// `a   b` or `a,b`
fn parse_line(line: &str) -> IResult<&str, (u64, u64)> {
    separated_pair(
        number,
        alt((delimited(space0, tag(","), space0), space1)),
        number,
    )(line)
}

fn parse_lines(input: &str) -> IResult<&str, Vec<(u64, u64)>> {
    separated_list1(line_ending, parse_line)(input)
}

fn parse_input(input: &str) -> Result<(Vec<u64>, Vec<u64>), PuzzleError> {
    let pairs = aoc::input::parse_all(parse_lines, input)?;
    tracing::debug!(lines = pairs.len());
    Ok(pairs.into_iter().unzip())
}

fn part_1(left: &[u64], right: &[u64]) -> u64 {
    let mut left = left.to_vec();
    let mut right = right.to_vec();
    left.sort_unstable();
    right.sort_unstable();
    left.iter().zip(right.iter()).map(|(a, b)| a.abs_diff(*b)).sum()
}

fn part_2(left: &[u64], right: &[u64]) -> u64 {
    let occurrences: HashMap<u64, u64> =
        right.iter().fold(HashMap::default(), |mut acc, el| {
            *acc.entry(*el).or_default() += 1;
            acc
        });
    left.iter()
        .map(|a| occurrences.get(a).copied().unwrap_or_default() * a)
        .sum()
}
