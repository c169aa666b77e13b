use std::{
    fmt::{self, Display},
    ops::Index,
    str::FromStr,
};

use crate::PuzzleError;

/// A `(row, col)` coordinate. May point outside of any grid; lookups check bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: isize,
    pub col: isize,
}

impl Position {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    pub fn offset(self, dr: isize, dc: isize) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();
        self.offset(dr, dc)
    }

    /// The position as a real `(y, x)` vector.
    pub fn to_vector(self) -> (f64, f64) {
        (self.row as f64, self.col as f64)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row as isize, col as isize)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise order, starting north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// `(row, col)` delta of a single step.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T>(pub Vec<Vec<T>>);

impl<T> Grid<T> {
    /// Builds a grid from text, one row per line. Rows must all have the same length.
    /// Trailing blank lines are ignored; a blank line anywhere else is an error.
    pub fn parse(
        input: &str,
        mut cell: impl FnMut(char) -> Result<T, PuzzleError>,
    ) -> Result<Self, PuzzleError> {
        let mut lines: Vec<&str> = input
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        if let Some(row) = lines.iter().position(|line| line.is_empty()) {
            return Err(PuzzleError::invalid(format!("row {row} is empty")));
        }
        let rows = lines
            .into_iter()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .map(&mut cell)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| match err {
                        PuzzleError::InvalidInput(reason) => {
                            PuzzleError::invalid(format!("row {row}: {reason}"))
                        }
                        other => other,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let Some(width) = rows.first().map(Vec::len) else {
            return Err(PuzzleError::invalid("empty grid"));
        };
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != width)
        {
            return Err(PuzzleError::invalid(format!(
                "expected every row to be {width} wide, but row {row} is {found} wide"
            )));
        }
        Ok(Grid(rows))
    }

    pub fn height(&self) -> usize {
        self.0.len()
    }
    pub fn width(&self) -> usize {
        self.0.first().map(|row| row.len()).unwrap_or(0)
    }
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.cell_index(pos).is_some()
    }
    pub fn get(&self, pos: Position) -> Option<&T> {
        let (row, col) = self.cell_index(pos)?;
        self.0.get(row).and_then(|cells| cells.get(col))
    }
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, t)| (Position::from((row, col)), t))
        })
    }
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.indexed_iter().map(|(pos, _)| pos)
    }
    /// Every position whose cell satisfies `predicate`, in row-major order.
    pub fn find_all(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<Position> {
        self.indexed_iter()
            .filter(|(_, t)| predicate(t))
            .map(|(pos, _)| pos)
            .collect()
    }

    fn cell_index(&self, pos: Position) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.height() && col < self.width()).then_some((row, col))
    }
}

impl FromStr for Grid<char> {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grid::parse(s, Ok)
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, index: Position) -> &Self::Output {
        match self.cell_index(index) {
            Some((row, col)) => &self.0[row][col],
            None => panic!("{index} is outside of the grid"),
        }
    }
}

impl<T: Display> Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.0 {
            for cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid<char> {
        "ab.\n.c.\nd.e\n".parse().unwrap()
    }

    #[test]
    fn dimensions() {
        let grid = sample();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 3);

        let wide: Grid<char> = "....\n....".parse().unwrap();
        assert_eq!(wide.height(), 2);
        assert_eq!(wide.width(), 4);
    }

    #[test]
    fn get_is_bounds_checked() {
        let grid = sample();
        assert_eq!(grid.get(Position::new(0, 1)), Some(&'b'));
        assert_eq!(grid.get(Position::new(-1, 0)), None);
        assert_eq!(grid.get(Position::new(0, 3)), None);
        assert_eq!(grid.get(Position::new(3, 0)), None);
        assert!(grid.in_bounds(Position::new(2, 2)));
        assert!(!grid.in_bounds(Position::new(2, -1)));
    }

    #[test]
    fn find_all_is_row_major() {
        let grid = sample();
        let found = grid.find_all(|c| *c != '.');
        assert_eq!(
            found,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(2, 0),
                Position::new(2, 2),
            ]
        );
        assert!(found.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(found.iter().all(|pos| grid.in_bounds(*pos)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = "...\n..\n".parse::<Grid<char>>().unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidInput(_)));
        assert!("".parse::<Grid<char>>().is_err());
    }

    #[test]
    fn blank_lines_only_allowed_at_the_end() {
        let grid: Grid<char> = "ab
cd


".parse().unwrap();
        assert_eq!(grid.height(), 2);

        let err = "ab

cd
".parse::<Grid<char>>().unwrap_err();
        assert_eq!(err, PuzzleError::invalid("row 1 is empty"));
        assert!("
ab
cd
".parse::<Grid<char>>().is_err());
        assert!("

".parse::<Grid<char>>().is_err());
    }

    #[test]
    fn cell_parse_errors_propagate() {
        let err = Grid::parse("12\n3x", |c| {
            c.to_digit(10)
                .ok_or_else(|| PuzzleError::invalid(format!("not a digit: {c:?}")))
        })
        .unwrap_err();
        assert_eq!(err, PuzzleError::invalid("row 1: not a digit: 'x'"));
    }

    #[test]
    fn directions_turn_clockwise() {
        let mut direction = Direction::North;
        let mut seen = vec![];
        for _ in 0..4 {
            seen.push(direction);
            direction = direction.turn_right();
        }
        assert_eq!(seen, Direction::ALL);
        assert_eq!(direction, Direction::North);
        assert_eq!(
            Position::new(5, 5).step(Direction::North),
            Position::new(4, 5)
        );
        assert_eq!(
            Position::new(5, 5).step(Direction::West),
            Position::new(5, 4)
        );
    }

    #[test]
    fn display_round_trips_text() {
        let grid = sample();
        assert_eq!(grid.to_string(), "ab.\n.c.\nd.e\n");
    }
}
