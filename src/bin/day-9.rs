use std::fmt::Display;

use aoc::PuzzleError;
use nom::{
    character::complete::anychar,
    combinator::{map_opt, opt},
    multi::many0,
    sequence::pair,
    IResult,
};

fn main() -> anyhow::Result<()> {
    let log_path = aoc::init_tracing_with_log_file("logs")?;
    tracing::info!(log = %log_path.display(), "writing debug log");
    tracing::info!("for block traces use RUST_LOG=info,day_9=trace");
    let input = aoc::input::read(9)?;
    let disk = Disk::new(&parse_input(&input)?);
    tracing::debug!(%disk, "parsed disk map");
    aoc::report(9, 1, "Checksum", part_1(&disk));
    aoc::report(9, 2, "Checksum", part_2(&disk));
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: usize,
    data: usize,
    empty: usize,
}

fn parse_entries(input: &str) -> IResult<&str, Vec<(usize, Option<usize>)>> {
    let take_digit = |input| map_opt(anychar, |c| c.to_digit(10).map(|d| d as usize))(input);
    many0(pair(take_digit, opt(take_digit)))(input)
}

fn parse_input(input: &str) -> Result<Vec<Entry>, PuzzleError> {
    let entries: Vec<_> = aoc::input::parse_all(parse_entries, input)?
        .into_iter()
        .enumerate()
        .map(|(id, (data, empty))| Entry {
            id,
            data,
            empty: empty.unwrap_or(0),
        })
        .collect();
    if entries.is_empty() {
        return Err(PuzzleError::invalid("empty disk map"));
    }
    Ok(entries)
}

/// One slot per block: the id of the file stored there, or `None` for free space.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Disk(Vec<Option<usize>>);

impl Disk {
    fn new(entries: &[Entry]) -> Self {
        let blocks = entries
            .iter()
            .flat_map(|entry| {
                std::iter::repeat(Some(entry.id))
                    .take(entry.data)
                    .chain(std::iter::repeat(None).take(entry.empty))
            })
            .collect();
        Self(blocks)
    }

    /// Moves single blocks from the end of the disk into the leftmost free slot
    /// until there is no gap left between file blocks.
    fn compact_blocks(&self) -> Self {
        let _span = tracing::trace_span!("compact_blocks").entered();
        let mut blocks = self.0.clone();
        let mut free = 0;
        let mut last = blocks.len();
        loop {
            while free < blocks.len() && blocks[free].is_some() {
                free += 1;
            }
            while last > 0 && blocks[last - 1].is_none() {
                last -= 1;
            }
            if free >= last {
                break;
            }
            tracing::trace!(from = last - 1, to = free, id = ?blocks[last - 1]);
            blocks.swap(free, last - 1);
        }
        Self(blocks)
    }

    /// Moves whole files, highest id first, into the leftmost free span to their left
    /// that can hold them. Files that do not fit anywhere stay put.
    fn compact_files(&self) -> Self {
        let _span = tracing::trace_span!("compact_files").entered();
        let mut blocks = self.0.clone();
        let mut files = self.files();
        files.sort_by(|a, b| b.id.cmp(&a.id));
        for file in files {
            let Some(target) = find_free_span(&blocks[..file.start], file.len) else {
                continue;
            };
            tracing::trace!(id = file.id, from = file.start, to = target, len = file.len);
            for offset in 0..file.len {
                blocks.swap(target + offset, file.start + offset);
            }
        }
        Self(blocks)
    }

    fn files(&self) -> Vec<FileSpan> {
        let mut files: Vec<FileSpan> = vec![];
        for (index, block) in self.0.iter().enumerate() {
            let Some(id) = *block else { continue };
            match files.last_mut() {
                Some(last) if last.id == id && last.start + last.len == index => last.len += 1,
                _ => files.push(FileSpan {
                    id,
                    start: index,
                    len: 1,
                }),
            }
        }
        files
    }

    fn checksum(&self) -> usize {
        self.0
            .iter()
            .enumerate()
            .map(|(pos, id)| pos * id.unwrap_or(0))
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileSpan {
    id: usize,
    start: usize,
    len: usize,
}

fn find_free_span(blocks: &[Option<usize>], len: usize) -> Option<usize> {
    let mut run = 0;
    for (index, block) in blocks.iter().enumerate() {
        if block.is_some() {
            run = 0;
            continue;
        }
        run += 1;
        if run == len {
            return Some(index + 1 - len);
        }
    }
    None
}

impl Display for Disk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self
            .0
            .iter()
            .map(|id| id.map(|id| id.to_string()).unwrap_or(".".to_string()))
            .collect::<String>();
        write!(f, "{s}")
    }
}

fn part_1(disk: &Disk) -> usize {
    let compacted = disk.compact_blocks();
    tracing::debug!(%compacted, "part 1 compacted disk");
    compacted.checksum()
}

fn part_2(disk: &Disk) -> usize {
    let compacted = disk.compact_files();
    tracing::debug!(%compacted, "part 2 compacted disk");
    compacted.checksum()
}
