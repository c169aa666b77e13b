use std::path::{Path, PathBuf};

use nom::{
    character::complete::{digit1, multispace0},
    combinator::{all_consuming, map_res},
    sequence::terminated,
    Finish, IResult, Parser,
};

use crate::PuzzleError;

/// Files tried for `day`, in order, relative to `root`.
pub fn candidates(root: &Path, day: u8) -> Vec<PathBuf> {
    vec![
        root.join("inputs").join(format!("day-{day}.txt")),
        root.join(format!("day{day:02}")).join("input.txt"),
        root.join("input.txt"),
    ]
}

/// Reads the whole input of `day`, looking in the current directory.
pub fn read(day: u8) -> Result<String, PuzzleError> {
    read_from(Path::new("."), day)
}

pub fn read_from(root: &Path, day: u8) -> Result<String, PuzzleError> {
    let candidates = candidates(root, day);
    let Some(path) = candidates.iter().find(|path| path.is_file()) else {
        let tried = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(PuzzleError::invalid(format!(
            "no input for day {day}, tried {tried}"
        )));
    };
    tracing::debug!(path = %path.display(), "reading input");
    std::fs::read_to_string(path)
        .map_err(|err| PuzzleError::invalid(format!("could not read {}: {err}", path.display())))
}

/// Runs `parser` over the whole of `input`; trailing whitespace is allowed, anything else is not.
pub fn parse_all<'a, O>(
    parser: impl Parser<&'a str, O, nom::error::Error<&'a str>>,
    input: &'a str,
) -> Result<O, PuzzleError> {
    all_consuming(terminated(parser, multispace0))(input)
        .finish()
        .map(|(_, output)| output)
        .map_err(|err| PuzzleError::invalid(summarize(err)))
}

fn summarize(err: nom::error::Error<&str>) -> String {
    let near: String = err.input.chars().take(20).collect();
    format!("parse error ({:?}) near {near:?}", err.code)
}

pub fn number<T: std::str::FromStr>(input: &str) -> IResult<&str, T> {
    map_res(digit1, str::parse::<T>)(input)
}
