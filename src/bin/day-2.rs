use aoc::{input::number, PuzzleError};
use nom::{
    character::complete::{line_ending, space1},
    multi::separated_list1,
    IResult,
};

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(2)?;
    let reports = parse_input(&input)?;
    aoc::report(2, 1, "Total safe reports", part_1(&reports));
    aoc::report(2, 2, "Total safe reports after dampening", part_2(&reports));
    Ok(())
}

fn parse_reports(input: &str) -> IResult<&str, Vec<Vec<i64>>> {
    separated_list1(line_ending, separated_list1(space1, number))(input)
}

fn parse_input(input: &str) -> Result<Vec<Vec<i64>>, PuzzleError> {
    aoc::input::parse_all(parse_reports, input)
}

/// Index of the first step that breaks the trend set by the first step, or is too steep.
fn find_report_error(report: &[i64]) -> Option<usize> {
    let mut diffs = report
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .map(|diff| (diff.signum(), matches!(diff.abs(), 1..=3)));
    let first = diffs.next()?;
    if !first.1 {
        return Some(0);
    }
    diffs.position(|d| d != first).map(|i| i + 1)
}

fn is_safe(report: &[i64]) -> bool {
    find_report_error(report).is_none()
}

fn part_1(reports: &[Vec<i64>]) -> usize {
    reports.iter().filter(|report| is_safe(report)).count()
}

fn part_2(reports: &[Vec<i64>]) -> usize {
    reports
        .iter()
        .filter(|report| {
            is_safe(report)
                || (0..report.len()).any(|skip| {
                    let dampened = [&report[..skip], &report[skip + 1..]].concat();
                    is_safe(&dampened)
                })
        })
        .count()
}
