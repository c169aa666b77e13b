use std::collections::HashMap;

use aoc::{Direction, Grid, Position, PuzzleError};
use indicatif::ProgressStyle;
use tracing::{instrument, Level, Span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(6)?;
    let (grid, guard) = parse_input(&input)?;
    aoc::report(6, 1, "Distinct Positions", part_1(&grid, guard)?);
    aoc::report(6, 2, "Time Loops", part_2(&grid, guard)?);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Wall,
    Guard(Direction),
}

impl TryFrom<char> for Cell {
    type Error = PuzzleError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '.' => Ok(Cell::Empty),
            '#' => Ok(Cell::Wall),
            '^' => Ok(Cell::Guard(Direction::North)),
            '>' => Ok(Cell::Guard(Direction::East)),
            'v' => Ok(Cell::Guard(Direction::South)),
            '<' => Ok(Cell::Guard(Direction::West)),
            _ => Err(PuzzleError::invalid(format!("unexpected map cell {c:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GuardState {
    position: Position,
    facing: Direction,
}

fn parse_input(input: &str) -> Result<(Grid<Cell>, GuardState), PuzzleError> {
    let grid = Grid::parse(input, Cell::try_from)?;
    let guards: Vec<GuardState> = grid
        .indexed_iter()
        .filter_map(|(position, cell)| match cell {
            Cell::Guard(facing) => Some(GuardState {
                position,
                facing: *facing,
            }),
            Cell::Empty | Cell::Wall => None,
        })
        .collect();
    let &[guard] = guards.as_slice() else {
        return Err(PuzzleError::invalid(format!(
            "expected exactly one guard, found {}",
            guards.len()
        )));
    };
    Ok((grid, guard))
}

/// Set of directions a cell has been crossed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Headings(u8);

impl Headings {
    fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 8,
        }
    }
    /// Returns `false` if `direction` was already present.
    fn insert(&mut self, direction: Direction) -> bool {
        let bit = Self::bit(direction);
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }
    fn contains(self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }
    fn marker(self) -> char {
        let vertical = self.contains(Direction::North) || self.contains(Direction::South);
        let horizontal = self.contains(Direction::East) || self.contains(Direction::West);
        match (vertical, horizontal) {
            (true, true) => '+',
            (true, false) => '|',
            (false, true) => '-',
            (false, false) => '.',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    OutOfBounds,
    Loop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Patrol {
    /// Overlay over the map: every cell the guard stood on, with the headings it had there.
    visits: HashMap<Position, Headings>,
    outcome: Outcome,
    steps: usize,
}

impl Patrol {
    fn distinct_positions(&self) -> usize {
        self.visits.len()
    }

    fn render(&self, grid: &Grid<Cell>, obstacle: Option<Position>) -> String {
        let mut out = String::new();
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let pos = Position::from((row, col));
                let marker = match (grid[pos], self.visits.get(&pos)) {
                    _ if Some(pos) == obstacle => 'O',
                    (Cell::Wall, _) => '#',
                    (Cell::Guard(_), _) => '^',
                    (Cell::Empty, Some(headings)) => headings.marker(),
                    (Cell::Empty, None) => '.',
                };
                out.push(marker);
            }
            out.push('\n');
        }
        out
    }
}

/// Where the guard is after one step, or `None` once it walks off the map.
fn step(grid: &Grid<Cell>, state: GuardState, obstacle: Option<Position>) -> Option<GuardState> {
    let next = state.position.step(state.facing);
    match grid.get(next)? {
        Cell::Wall => Some(GuardState {
            facing: state.facing.turn_right(),
            ..state
        }),
        _ if Some(next) == obstacle => Some(GuardState {
            facing: state.facing.turn_right(),
            ..state
        }),
        _ => Some(GuardState {
            position: next,
            ..state
        }),
    }
}

fn simulate(
    grid: &Grid<Cell>,
    start: GuardState,
    obstacle: Option<Position>,
) -> Result<Patrol, PuzzleError> {
    // every step either ends the patrol or reaches a state not seen before
    let step_limit = grid.height() * grid.width() * 4;
    simulate_with_limit(grid, start, obstacle, step_limit)
}

fn simulate_with_limit(
    grid: &Grid<Cell>,
    start: GuardState,
    obstacle: Option<Position>,
    step_limit: usize,
) -> Result<Patrol, PuzzleError> {
    let mut visits: HashMap<Position, Headings> = HashMap::new();
    visits.entry(start.position).or_default().insert(start.facing);
    let mut state = start;
    for steps in 1..=step_limit {
        let Some(next) = step(grid, state, obstacle) else {
            return Ok(Patrol {
                visits,
                outcome: Outcome::OutOfBounds,
                steps,
            });
        };
        if !visits.entry(next.position).or_default().insert(next.facing) {
            return Ok(Patrol {
                visits,
                outcome: Outcome::Loop,
                steps,
            });
        }
        state = next;
    }
    tracing::error!(?start, ?obstacle, step_limit, "guard patrol hit the step limit");
    Err(PuzzleError::DidNotConverge { steps: step_limit })
}

fn part_1(grid: &Grid<Cell>, guard: GuardState) -> anyhow::Result<usize> {
    let patrol = simulate(grid, guard, None)?;
    tracing::trace!("patrol:\n{}", patrol.render(grid, None));
    Ok(patrol.distinct_positions())
}

fn part_2(grid: &Grid<Cell>, guard: GuardState) -> anyhow::Result<usize> {
    let candidates = grid.find_all(|cell| *cell == Cell::Empty);

    let span = tracing::span!(Level::INFO, "loop check");
    tracing::info!(candidates = candidates.len(), "Checking for loops");
    span.pb_set_style(&ProgressStyle::default_bar().template("{elapsed} {bar} {pos:>7}/{len:7}")?);
    span.pb_set_length(candidates.len() as u64);
    let _span = span.enter();

    let loops = candidates.into_iter().try_fold(0, |loops, obstacle| {
        Span::current().pb_inc(1);
        check_loop(grid, guard, obstacle).map(|looped| loops + looped as usize)
    })?;
    Ok(loops)
}

#[instrument(level = "trace", skip(grid))]
fn check_loop(
    grid: &Grid<Cell>,
    guard: GuardState,
    obstacle: Position,
) -> Result<bool, PuzzleError> {
    let patrol = simulate(grid, guard, Some(obstacle))?;
    if patrol.outcome == Outcome::Loop {
        tracing::trace!("loop:\n{}", patrol.render(grid, Some(obstacle)));
    }
    Ok(patrol.outcome == Outcome::Loop)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
....#.....
.........#
..........
..#.......
.......#..
..........
.#..^.....
........#.
#.........
......#...
";

    #[test]
    fn example() {
        let (grid, guard) = parse_input(EXAMPLE).unwrap();
        assert_eq!(guard.position, Position::new(6, 4));
        assert_eq!(guard.facing, Direction::North);
        assert_eq!(part_1(&grid, guard).unwrap(), 41);
        assert_eq!(part_2(&grid, guard).unwrap(), 6);
    }

    #[test]
    fn guard_on_top_edge_leaves_immediately() {
        let input = format!("....^.....\n{}", "..........\n".repeat(9));
        let (grid, guard) = parse_input(&input).unwrap();
        assert_eq!(guard.position, Position::new(0, 4));
        let patrol = simulate(&grid, guard, None).unwrap();
        assert_eq!(patrol.outcome, Outcome::OutOfBounds);
        assert_eq!(patrol.distinct_positions(), 1);
        assert_eq!(patrol.steps, 1);
    }

    #[test]
    fn straight_corridor_never_loops() {
        let (grid, guard) = parse_input(".....\n.....\n..>..\n.....\n").unwrap();
        let patrol = simulate(&grid, guard, None).unwrap();
        assert_eq!(patrol.outcome, Outcome::OutOfBounds);
        assert_eq!(patrol.distinct_positions(), 3);
    }

    #[test]
    fn repeated_state_is_a_loop() {
        let input = "\
.#...
....#
.^...
#....
...#.
";
        let (grid, guard) = parse_input(input).unwrap();
        let patrol = simulate(&grid, guard, None).unwrap();
        assert_eq!(patrol.outcome, Outcome::Loop);
        assert_eq!(patrol.distinct_positions(), 8);
        assert!(patrol.visits[&Position::new(1, 1)].contains(Direction::North));
    }

    #[test]
    fn boxed_in_guard_loops_in_place() {
        let (grid, guard) = parse_input(".#.\n#^#\n.#.\n").unwrap();
        let patrol = simulate(&grid, guard, None).unwrap();
        assert_eq!(patrol.outcome, Outcome::Loop);
        assert_eq!(patrol.distinct_positions(), 1);
        assert_eq!(patrol.steps, 4);
    }

    #[test]
    fn simulation_is_deterministic_and_leaves_map_untouched() {
        let (grid, guard) = parse_input(EXAMPLE).unwrap();
        let before = grid.clone();
        let first = simulate(&grid, guard, Some(Position::new(6, 3))).unwrap();
        let second = simulate(&grid, guard, Some(Position::new(6, 3))).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.outcome, Outcome::Loop);
        assert_eq!(grid, before);
    }

    #[test]
    fn obstacle_off_the_path_changes_nothing() {
        let (grid, guard) = parse_input(EXAMPLE).unwrap();
        let plain = simulate(&grid, guard, None).unwrap();
        let with_obstacle = simulate(&grid, guard, Some(Position::new(0, 0))).unwrap();
        assert_eq!(with_obstacle.outcome, Outcome::OutOfBounds);
        assert_eq!(plain.visits, with_obstacle.visits);
    }

    #[test]
    fn step_limit_is_an_error() {
        let (grid, guard) = parse_input(EXAMPLE).unwrap();
        assert_eq!(
            simulate_with_limit(&grid, guard, None, 3),
            Err(PuzzleError::DidNotConverge { steps: 3 })
        );
    }

    #[test]
    fn render_marks_trail() {
        let (grid, guard) = parse_input("....\n.^.#\n....\n").unwrap();
        let patrol = simulate(&grid, guard, Some(Position::new(0, 1))).unwrap();
        assert_eq!(patrol.outcome, Outcome::OutOfBounds);
        assert_eq!(
            patrol.render(&grid, Some(Position::new(0, 1))),
            ".O..\n.^+#\n..|.\n"
        );
    }

    #[test]
    fn guard_keeps_its_marked_heading() {
        for (marker, facing) in [
            ('^', Direction::North),
            ('>', Direction::East),
            ('v', Direction::South),
            ('<', Direction::West),
        ] {
            let (_, guard) = parse_input(&format!("...\n.{marker}#\n...\n")).unwrap();
            assert_eq!(
                guard,
                GuardState {
                    position: Position::new(1, 1),
                    facing
                }
            );
        }
    }

    #[test]
    fn rejects_bad_maps() {
        assert!(parse_input("....\n....\n").is_err());
        assert!(parse_input("^..\n..^\n").is_err());
        assert!(parse_input("^.x\n...\n").is_err());
        assert!(parse_input("^..\n\n...\n").is_err());
    }
}
