use std::collections::HashSet;

use aoc::{Direction, Grid, Position, PuzzleError};

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(10)?;
    let grid = parse_input(&input)?;
    let trails = trailheads(&grid);
    tracing::debug!(trailheads = trails.len());
    aoc::report(10, 1, "Sum of trailhead scores", part_1(&trails));
    aoc::report(10, 2, "Sum of trailhead ratings", part_2(&trails));
    Ok(())
}

fn parse_input(input: &str) -> Result<Grid<u8>, PuzzleError> {
    Grid::parse(input, |c| {
        c.to_digit(10)
            .map(|d| d as u8)
            .ok_or_else(|| PuzzleError::invalid(format!("expected a height, found {c:?}")))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Trailhead {
    start: Position,
    /// Summit reached by each distinct hiking trail, one entry per trail.
    ends: Vec<Position>,
}

impl Trailhead {
    /// Number of distinct summits.
    fn score(&self) -> usize {
        self.ends.iter().collect::<HashSet<_>>().len()
    }
    /// Number of distinct trails.
    fn rating(&self) -> u64 {
        self.ends.len() as u64
    }
}

/// Walks every uphill path from `start`, one height at a time.
fn explore(grid: &Grid<u8>, start: Position) -> Trailhead {
    let _span = tracing::trace_span!("explore", %start).entered();
    let mut ends = vec![];
    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        let height = grid[pos];
        if height == 9 {
            ends.push(pos);
            continue;
        }
        stack.extend(
            Direction::ALL
                .iter()
                .map(|dir| pos.step(*dir))
                .filter(|next| grid.get(*next) == Some(&(height + 1))),
        );
    }
    tracing::trace!(trails = ends.len());
    Trailhead { start, ends }
}

fn trailheads(grid: &Grid<u8>) -> Vec<Trailhead> {
    grid.find_all(|height| *height == 0)
        .into_iter()
        .map(|start| explore(grid, start))
        .collect()
}

fn part_1(trailheads: &[Trailhead]) -> usize {
    trailheads.iter().map(Trailhead::score).sum()
}

fn part_2(trailheads: &[Trailhead]) -> u64 {
    trailheads.iter().map(Trailhead::rating).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
89010123
78121874
87430965
96549874
45678903
32019012
01329801
10456732
";

    #[test]
    fn example() {
        let grid = parse_input(EXAMPLE).unwrap();
        let trails = trailheads(&grid);
        assert_eq!(trails.len(), 9);
        assert_eq!(part_1(&trails), 36);
        assert_eq!(part_2(&trails), 81);
    }

    #[test]
    fn single_trail() {
        let grid = parse_input("0123\n1234\n8765\n9876\n").unwrap();
        let trails = trailheads(&grid);
        assert_eq!(trails.len(), 1);
        assert_eq!(trails[0].start, Position::new(0, 0));
        assert_eq!(trails[0].score(), 1);
        assert_eq!(trails[0].rating(), 16);
    }

    #[test]
    fn rejects_non_digits() {
        assert!(parse_input("01.\n987\n").is_err());
    }
}
