use std::collections::HashMap;

use aoc::{input::number, PuzzleError};
use nom::{character::complete::space1, multi::separated_list1, IResult};

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(11)?;
    let stones = parse_input(&input)?;
    aoc::report(11, 1, "Stones after 25 blinks", count_after(&stones, 25)?);
    aoc::report(11, 2, "Stones after 75 blinks", count_after(&stones, 75)?);
    Ok(())
}

fn parse_stones(input: &str) -> IResult<&str, Vec<u64>> {
    separated_list1(space1, number)(input)
}

fn parse_input(input: &str) -> Result<Vec<u64>, PuzzleError> {
    aoc::input::parse_all(parse_stones, input.trim_start())
}

/// Engraved number -> how many stones carry it. Order never matters for the count.
type Stones = HashMap<u64, u64>;

fn change(stone: u64) -> Result<(u64, Option<u64>), PuzzleError> {
    if stone == 0 {
        return Ok((1, None));
    }
    let digits = stone.ilog10() + 1;
    if digits % 2 == 0 {
        let half = 10u64.pow(digits / 2);
        Ok((stone / half, Some(stone % half)))
    } else {
        let grown = stone
            .checked_mul(2024)
            .ok_or_else(|| PuzzleError::invalid(format!("stone {stone} grows past 64 bits")))?;
        Ok((grown, None))
    }
}

fn blink(stones: &Stones) -> Result<Stones, PuzzleError> {
    let mut next = Stones::with_capacity(stones.len());
    for (&stone, &count) in stones {
        let (left, right) = change(stone)?;
        *next.entry(left).or_default() += count;
        if let Some(right) = right {
            *next.entry(right).or_default() += count;
        }
    }
    Ok(next)
}

fn count_after(initial: &[u64], blinks: usize) -> Result<u64, PuzzleError> {
    let mut stones = initial.iter().fold(Stones::new(), |mut stones, stone| {
        *stones.entry(*stone).or_default() += 1;
        stones
    });
    for iteration in 1..=blinks {
        stones = blink(&stones)?;
        tracing::debug!(iteration, distinct = stones.len(), total = stones.values().sum::<u64>());
    }
    Ok(stones.values().sum())
}
