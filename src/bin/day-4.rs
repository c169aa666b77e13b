use aoc::{Grid, Position, PuzzleError};

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(4)?;
    let grid = parse_input(&input)?;
    aoc::report(4, 1, "XMAS occurrences", part_1(&grid));
    aoc::report(4, 2, "X-MAS occurrences", part_2(&grid));
    Ok(())
}

fn parse_input(input: &str) -> Result<Grid<char>, PuzzleError> {
    input.parse()
}

const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

fn search_word(grid: &Grid<char>, start: Position, word: &str) -> usize {
    DIRECTIONS
        .iter()
        .filter(|(dr, dc)| {
            word.chars().enumerate().all(|(i, c)| {
                let i = i as isize;
                grid.get(start.offset(dr * i, dc * i)) == Some(&c)
            })
        })
        .count()
}

fn is_x_mas(grid: &Grid<char>, pos: Position) -> bool {
    let diagonal = |offsets: [(isize, isize); 3]| offsets.map(|(dr, dc)| grid.get(pos.offset(dr, dc)));
    let diagonal_1 = diagonal([(-1, -1), (0, 0), (1, 1)]);
    let diagonal_2 = diagonal([(1, -1), (0, 0), (-1, 1)]);
    let mas = [Some(&'M'), Some(&'A'), Some(&'S')];
    let mas_reversed = [Some(&'S'), Some(&'A'), Some(&'M')];
    let mas_1 = diagonal_1 == mas || diagonal_1 == mas_reversed;
    let mas_2 = diagonal_2 == mas || diagonal_2 == mas_reversed;
    mas_1 && mas_2
}

fn part_1(grid: &Grid<char>) -> usize {
    grid.find_all(|c| *c == 'X')
        .into_iter()
        .map(|start| search_word(grid, start, "XMAS"))
        .sum()
}

fn part_2(grid: &Grid<char>) -> usize {
    grid.find_all(|c| *c == 'A')
        .into_iter()
        .filter(|pos| is_x_mas(grid, *pos))
        .count()
}
