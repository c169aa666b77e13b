use std::collections::{BTreeMap, HashSet};

use aoc::{
    geometry::{distance, has_distance_ratio, is_collinear},
    Grid, Position, PuzzleError,
};

const TARGET_RATIO: f64 = 2.0;
const TOLERANCE: f64 = 0.01;

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(8)?;
    let grid = parse_input(&input)?;
    aoc::report(8, 1, "Total Antinodes", solve(&grid, Resonance::One));
    aoc::report(
        8,
        2,
        "Total Antinodes with Resonance",
        solve(&grid, Resonance::Infinite),
    );
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Antenna(char),
}

fn parse_input(input: &str) -> Result<Grid<Tile>, PuzzleError> {
    Grid::parse(input, |c| {
        Ok(match c {
            '.' | '#' => Tile::Empty,
            ch => Tile::Antenna(ch),
        })
    })
}

/// Antenna positions by frequency, each list in row-major order.
fn map_antennas(grid: &Grid<Tile>) -> BTreeMap<char, Vec<Position>> {
    grid.indexed_iter()
        .flat_map(|(pos, tile)| match tile {
            Tile::Empty => None,
            Tile::Antenna(ch) => Some((*ch, pos)),
        })
        .fold(BTreeMap::new(), |mut map, (ch, pos)| {
            map.entry(ch).or_insert_with(Vec::new).push(pos);
            map
        })
}

fn pairs(positions: &[Position]) -> impl Iterator<Item = (Position, Position)> + '_ {
    positions
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| positions[i + 1..].iter().map(move |b| (*a, *b)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resonance {
    /// Antinodes sit on the line, twice as far from one antenna as from the other.
    One,
    /// Every cell on the line is an antinode.
    Infinite,
}

fn solve(grid: &Grid<Tile>, resonance: Resonance) -> usize {
    let antinodes = find_antinodes(grid, resonance);
    tracing::trace!(?resonance, "antinodes:\n{}", render(grid, &antinodes));
    antinodes.len()
}

fn find_antinodes(grid: &Grid<Tile>, resonance: Resonance) -> HashSet<Position> {
    let mut antinodes = HashSet::new();
    for (frequency, positions) in map_antennas(grid) {
        tracing::trace!(%frequency, ?positions);
        if resonance == Resonance::Infinite && positions.len() > 1 {
            antinodes.extend(positions.iter().copied());
        }
        for (a, b) in pairs(&positions) {
            match resonance {
                Resonance::One => antinodes.extend(ratio_antinodes(grid, a, b)),
                Resonance::Infinite => antinodes.extend(
                    grid.positions()
                        .filter(|candidate| is_collinear(a, b, *candidate, TOLERANCE)),
                ),
            }
        }
    }
    antinodes
}

/// Scans a window around the pair, padded by twice their distance and clipped to the map.
fn ratio_antinodes(grid: &Grid<Tile>, a: Position, b: Position) -> Vec<Position> {
    let d = distance(a, b);
    if d == 0.0 {
        return vec![];
    }
    let pad = (d * 2.0) as isize;
    let last_row = grid.height() as isize - 1;
    let last_col = grid.width() as isize - 1;
    let rows = (a.row.min(b.row) - pad).max(0)..=(a.row.max(b.row) + pad).min(last_row);
    let cols = (a.col.min(b.col) - pad).max(0)..=(a.col.max(b.col) + pad).min(last_col);
    rows.flat_map(|row| cols.clone().map(move |col| Position::new(row, col)))
        .filter(|candidate| *candidate != a && *candidate != b)
        .filter(|candidate| is_collinear(a, b, *candidate, TOLERANCE))
        .filter(|candidate| {
            has_distance_ratio(a, b, *candidate, TARGET_RATIO, TOLERANCE)
                || has_distance_ratio(b, a, *candidate, TARGET_RATIO, TOLERANCE)
        })
        .collect()
}

fn render(grid: &Grid<Tile>, antinodes: &HashSet<Position>) -> String {
    let mut out = String::new();
    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let pos = Position::from((row, col));
            out.push(match (grid[pos], antinodes.contains(&pos)) {
                (Tile::Antenna(ch), _) => ch,
                (Tile::Empty, true) => '#',
                (Tile::Empty, false) => '.',
            });
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
............
........0...
.....0......
.......0....
....0.......
......A.....
............
............
........A...
.........A..
............
............
";

    #[test]
    fn example() {
        let grid = parse_input(EXAMPLE).unwrap();
        assert_eq!(solve(&grid, Resonance::One), 14);
        assert_eq!(solve(&grid, Resonance::Infinite), 34);
    }

    #[test]
    fn single_pair() {
        let grid = parse_input(
            "\
..........
..........
..........
....a.....
..........
.....a....
..........
..........
..........
..........
",
        )
        .unwrap();
        let antinodes = find_antinodes(&grid, Resonance::One);
        assert_eq!(
            antinodes,
            HashSet::from([Position::new(1, 3), Position::new(7, 6)])
        );
    }

    #[test]
    fn harmonics_contain_ratio_antinodes() {
        let grid = parse_input(EXAMPLE).unwrap();
        let one = find_antinodes(&grid, Resonance::One);
        let infinite = find_antinodes(&grid, Resonance::Infinite);
        assert!(one.is_subset(&infinite));
        assert!(one.iter().all(|pos| grid.in_bounds(*pos)));
    }

    #[test]
    fn lone_antenna_has_no_antinodes() {
        let grid = parse_input("...\n.a.\n...\n").unwrap();
        assert!(find_antinodes(&grid, Resonance::One).is_empty());
        assert!(find_antinodes(&grid, Resonance::Infinite).is_empty());
    }

    #[test]
    fn harmonic_line_through_pair() {
        let grid = parse_input("T....\n.T...\n.....\n.....\n").unwrap();
        let antinodes = find_antinodes(&grid, Resonance::Infinite);
        assert_eq!(
            antinodes,
            HashSet::from([
                Position::new(0, 0),
                Position::new(1, 1),
                Position::new(2, 2),
                Position::new(3, 3),
            ])
        );
    }

    #[test]
    fn pairs_are_unordered() {
        let positions = [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)];
        let all: Vec<_> = pairs(&positions).collect();
        assert_eq!(all.len(), 3);
        assert!(pairs(&positions[..1]).next().is_none());
    }

    #[test]
    fn render_marks_antinodes() {
        let grid = parse_input("....\n.a..\n..a.\n....\n").unwrap();
        let antinodes = find_antinodes(&grid, Resonance::One);
        assert_eq!(render(&grid, &antinodes), "#...\n.a..\n..a.\n...#\n");
    }
}
