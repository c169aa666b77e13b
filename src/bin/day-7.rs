use aoc::{input::number, PuzzleError};
use indicatif::ProgressStyle;
use nom::{
    bytes::complete::tag,
    character::complete::{line_ending, space1},
    combinator::map,
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};
use tracing::{Level, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(7)?;
    let equations = parse_input(&input)?;
    aoc::report(7, 1, "Total of possibly valid results", part_1(&equations));
    aoc::report(7, 2, "Total of possibly valid results", part_2(&equations)?);
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Equation {
    result: u64,
    numbers: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Add,
    Multiply,
    Concat,
}

impl Operator {
    /// `None` when the result does not fit in a `u64`.
    fn apply(&self, a: u64, b: u64) -> Option<u64> {
        match self {
            Self::Add => a.checked_add(b),
            Self::Multiply => a.checked_mul(b),
            Self::Concat => {
                let shift = 10u64.checked_pow(b.checked_ilog10().unwrap_or(0) + 1)?;
                a.checked_mul(shift)?.checked_add(b)
            }
        }
    }
}

impl Equation {
    /// Every value reachable by combining the numbers left to right with `allowed`.
    /// Without zeros no operator can shrink a value, so branches past the result are dropped.
    fn reachable(&self, allowed: &[Operator]) -> Vec<u64> {
        let Some((first, rest)) = self.numbers.split_first() else {
            return vec![];
        };
        let can_shrink = rest.contains(&0);
        rest.iter().fold(vec![*first], |values, b| {
            values
                .iter()
                .flat_map(|a| allowed.iter().filter_map(move |op| op.apply(*a, *b)))
                .filter(|value| can_shrink || *value <= self.result)
                .collect()
        })
    }

    fn solvable(&self, allowed: &[Operator]) -> bool {
        self.reachable(allowed).contains(&self.result)
    }
}

fn parse_equation(input: &str) -> IResult<&str, Equation> {
    map(
        separated_pair(number, tag(": "), separated_list1(space1, number)),
        |(result, numbers)| Equation { result, numbers },
    )(input)
}

fn parse_equations(input: &str) -> IResult<&str, Vec<Equation>> {
    separated_list1(line_ending, parse_equation)(input)
}

fn parse_input(input: &str) -> Result<Vec<Equation>, PuzzleError> {
    aoc::input::parse_all(parse_equations, input)
}

fn total(equations: &[Equation], allowed: &[Operator]) -> u64 {
    equations
        .iter()
        .filter(|equation| {
            Span::current().pb_inc(1);
            equation.solvable(allowed)
        })
        .map(|equation| equation.result)
        .sum()
}

fn part_1(equations: &[Equation]) -> u64 {
    total(equations, &[Operator::Add, Operator::Multiply])
}

fn part_2(equations: &[Equation]) -> anyhow::Result<u64> {
    let span = tracing::span!(Level::INFO, "try_solve");
    span.pb_set_style(&ProgressStyle::default_bar().template("{elapsed} {bar} {pos:>7}/{len:7}")?);
    span.pb_set_length(equations.len() as u64);
    let _span = span.enter();

    Ok(total(
        equations,
        &[Operator::Add, Operator::Multiply, Operator::Concat],
    ))
}
