use std::collections::HashMap;

use aoc::{input::number, PuzzleError};
use nom::{
    bytes::complete::tag,
    character::complete::{line_ending, multispace1},
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};

fn main() -> anyhow::Result<()> {
    aoc::init_tracing()?;
    let input = aoc::input::read(5)?;
    let state = parse_input(&input)?;
    aoc::report(
        5,
        1,
        "Total of correctly ordered update's middle values",
        part_1(&state),
    );
    aoc::report(
        5,
        2,
        "Total of incorrectly ordered update's corrected middle values",
        part_2(&state)?,
    );
    Ok(())
}

/// `before|after`: when both pages are in an update, `before` has to be printed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule(u32, u32);

fn parse_rule(input: &str) -> IResult<&str, Rule> {
    let (rem, (a, b)) = separated_pair(number, tag("|"), number)(input)?;
    Ok((rem, Rule(a, b)))
}

fn parse_update(input: &str) -> IResult<&str, Vec<u32>> {
    separated_list1(tag(","), number)(input)
}

fn parse_sections(input: &str) -> IResult<&str, (Vec<Rule>, Vec<Vec<u32>>)> {
    separated_pair(
        separated_list1(line_ending, parse_rule),
        multispace1,
        separated_list1(line_ending, parse_update),
    )(input)
}

pub struct State {
    updates: Vec<Vec<u32>>,
    /// Pages that must come after the key page.
    successors: HashMap<u32, Vec<u32>>,
}

fn parse_input(input: &str) -> Result<State, PuzzleError> {
    let (rules, updates) = aoc::input::parse_all(parse_sections, input)?;
    let successors = rules
        .iter()
        .fold(HashMap::<u32, Vec<u32>>::new(), |mut map, Rule(a, b)| {
            map.entry(*a).or_default().push(*b);
            map
        });
    tracing::debug!(rules = rules.len(), updates = updates.len());
    Ok(State {
        updates,
        successors,
    })
}

impl State {
    /// The first page found printed before a page it has to follow.
    fn first_violation(&self, update: &[u32]) -> Option<u32> {
        update.iter().enumerate().find_map(|(i, page)| {
            let before = &update[..i];
            self.successors
                .get(page)?
                .iter()
                .find(|after| before.contains(after))
                .copied()
        })
    }

    fn is_ordered(&self, update: &[u32]) -> bool {
        self.first_violation(update).is_none()
    }

    /// Moves violating pages to the back until the update is ordered.
    fn reorder(&self, update: &[u32]) -> Result<Vec<u32>, PuzzleError> {
        let mut update = update.to_vec();
        let move_limit = update.len() * update.len() + 1;
        for _ in 0..move_limit {
            let Some(page) = self.first_violation(&update) else {
                return Ok(update);
            };
            update.retain(|other| *other != page);
            update.push(page);
        }
        tracing::error!(?update, move_limit, "update could not be reordered");
        Err(PuzzleError::DidNotConverge { steps: move_limit })
    }
}

fn middle(update: &[u32]) -> u32 {
    update[(update.len() - 1) / 2]
}

fn part_1(state: &State) -> u32 {
    state
        .updates
        .iter()
        .filter(|update| state.is_ordered(update))
        .map(|update| middle(update))
        .sum()
}

fn part_2(state: &State) -> Result<u32, PuzzleError> {
    state
        .updates
        .iter()
        .filter(|update| !state.is_ordered(update))
        .map(|update| state.reorder(update))
        .inspect(|reordered| tracing::debug!(?reordered))
        .map(|reordered| reordered.map(|update| middle(&update)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
47|53
97|13
97|61
97|47
75|29
61|13
75|53
29|13
97|29
53|29
61|53
97|53
61|29
47|13
75|47
97|75
47|61
75|61
47|29
75|13
53|13

75,47,61,53,29
97,61,53,29,13
75,29,13
75,97,47,61,53
61,13,29
97,13,75,29,47
";

    #[test]
    fn example() {
        let state = parse_input(EXAMPLE).unwrap();
        assert_eq!(state.updates.len(), 6);
        assert_eq!(part_1(&state), 143);
        assert_eq!(part_2(&state).unwrap(), 123);
    }

    #[test]
    fn reorder_fixes_updates() {
        let state = parse_input(EXAMPLE).unwrap();
        assert_eq!(
            state.reorder(&[75, 97, 47, 61, 53]).unwrap(),
            vec![97, 75, 47, 61, 53]
        );
        assert_eq!(state.reorder(&[61, 13, 29]).unwrap(), vec![61, 29, 13]);
        assert_eq!(
            state.reorder(&[97, 13, 75, 29, 47]).unwrap(),
            vec![97, 75, 47, 29, 13]
        );
        assert_eq!(state.reorder(&[75, 29, 13]).unwrap(), vec![75, 29, 13]);
    }

    #[test]
    fn contradictory_rules_do_not_converge() {
        let state = parse_input("1|2\n2|1\n\n1,2\n").unwrap();
        assert!(matches!(
            state.reorder(&[1, 2]),
            Err(PuzzleError::DidNotConverge { .. })
        ));
        assert!(part_2(&state).is_err());
    }

    #[test]
    fn missing_updates_section_is_invalid() {
        assert!(parse_input("47|53\n97|13\n").is_err());
    }
}
