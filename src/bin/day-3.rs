use aoc::{input::number, PuzzleError};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::anychar,
    combinator::{map, value},
    multi::many0,
    sequence::{delimited, separated_pair},
    IResult,
};

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(3)?;
    let tokens = parse_input(&input)?;
    tracing::debug!(tokens = tokens.len());
    aoc::report(3, 1, "Sum of products", part_1(&tokens)?);
    aoc::report(3, 2, "Sum of enabled products", part_2(&tokens)?);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Do,
    Dont,
    Mul(u64, u64),
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        map(
            delimited(
                tag("mul("),
                separated_pair(number, tag(","), number),
                tag(")"),
            ),
            |(a, b)| Token::Mul(a, b),
        ),
        value(Token::Do, tag("do()")),
        value(Token::Dont, tag("don't()")),
    ))(input)
}

/// Every instruction in the corrupted memory; anything that is not one is skipped a char at a time.
fn parse_tokens(input: &str) -> IResult<&str, Vec<Token>> {
    map(
        many0(alt((map(token, Some), value(None, anychar)))),
        |tokens| tokens.into_iter().flatten().collect(),
    )(input)
}

fn parse_input(input: &str) -> Result<Vec<Token>, PuzzleError> {
    aoc::input::parse_all(parse_tokens, input)
}

fn product(a: u64, b: u64) -> Result<u64, PuzzleError> {
    a.checked_mul(b)
        .ok_or_else(|| PuzzleError::invalid(format!("mul({a},{b}) does not fit in 64 bits")))
}

fn add(sum: u64, value: u64) -> Result<u64, PuzzleError> {
    sum.checked_add(value)
        .ok_or_else(|| PuzzleError::invalid("sum of products does not fit in 64 bits"))
}

fn part_1(tokens: &[Token]) -> Result<u64, PuzzleError> {
    tokens.iter().try_fold(0, |sum, token| match token {
        Token::Mul(a, b) => add(sum, product(*a, *b)?),
        Token::Do | Token::Dont => Ok(sum),
    })
}

fn part_2(tokens: &[Token]) -> Result<u64, PuzzleError> {
    let (_, sum) = tokens
        .iter()
        .try_fold((true, 0), |(enabled, sum), token| -> Result<_, PuzzleError> {
            match token {
                Token::Do => Ok((true, sum)),
                Token::Dont => Ok((false, sum)),
                Token::Mul(a, b) if enabled => Ok((enabled, add(sum, product(*a, *b)?)?)),
                Token::Mul(..) => Ok((enabled, sum)),
            }
        })?;
    Ok(sum)
}
