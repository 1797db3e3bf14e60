use crate::cards::Street;
use crate::clustering::{BucketTable, RankPattern, SuitPattern};
use std::io::{BufRead, BufReader, Write};

/// writes one row per bucketed hand: `hand_index, equity.., cluster_id,
/// ..., rank_pattern, suit_pattern` (spec.md §6 "Bucket table file"). The
/// core only ever reads back `id` (col 3), `rank_pattern` (col 6), and
/// `suit_pattern` (col 7); the equity columns in between exist for human
/// inspection and are not re-parsed.
pub fn write(path: &str, round: Street, rows: &[(usize, Vec<f32>, usize, RankPattern, SuitPattern)]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "hand_index,equity,round,id,street,round2,rank_pattern,suit_pattern")?;
    for (hand_index, equity, cluster_id, rank_pattern, suit_pattern) in rows {
        let equity_str = equity.iter().map(|e| format!("{e:.6}")).collect::<Vec<_>>().join(";");
        let rank_json = serde_json::to_string(rank_pattern).expect("rank pattern serializes");
        let suit_json = serde_json::to_string(suit_pattern).expect("suit pattern serializes");
        writeln!(
            file,
            "{hand_index},\"{equity_str}\",{round},{cluster_id},{round},{round},\"{rank_json}\",\"{suit_json}\""
        )?;
    }
    Ok(())
}

/// loads a bucket table for `round` back out of the CSV written by
/// [`write`]. Column indices are fixed per spec.md §6: `id` at column 3,
/// `rank_pattern` at column 6, `suit_pattern` at column 7 (0-indexed).
/// Whitespace inside the pattern strings is stripped before parsing.
pub fn read(path: &str, round: Street) -> std::io::Result<BucketTable> {
    let file = std::fs::File::open(path)?;
    let mut table = BucketTable::new();
    for line in BufReader::new(file).lines().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let columns = split_csv_row(&line);
        let id: usize = columns[3]
            .trim()
            .parse()
            .map_err(|_| std::io::Error::new(std::io::ErrorKind::InvalidData, format!("bad bucket id in row: {line}")))?;
        let rank_json: String = columns[6].chars().filter(|c| !c.is_whitespace()).collect();
        let suit_json: String = columns[7].chars().filter(|c| !c.is_whitespace()).collect();
        let rank_pattern: RankPattern = serde_json::from_str(&unquote(&rank_json))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        let suit_pattern: SuitPattern = serde_json::from_str(&unquote(&suit_json))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        table.insert(round, rank_pattern, suit_pattern, id);
    }
    Ok(table)
}

fn unquote(s: &str) -> String {
    s.trim_matches('"').replace("\"\"", "\"")
}

/// a minimal quote-aware CSV row splitter -- the core never writes commas
/// inside unquoted fields, so this does not need a full RFC 4180 parser.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};

    #[test]
    fn round_trips_id_and_patterns_through_csv() {
        let cards = vec![Card::new(Rank::Ace, Suit::Club), Card::new(Rank::Ace, Suit::Diamond)];
        let rank_pattern = RankPattern::of(&cards);
        let suit_pattern = SuitPattern::of(&cards);
        let rows = vec![(0usize, vec![0.5, 0.6], 3usize, rank_pattern.clone(), suit_pattern.clone())];

        let dir = std::env::temp_dir();
        let path = dir.join(format!("bucket_csv_test_{}.csv", std::process::id()));
        let path = path.to_str().unwrap();
        write(path, Street::Flop, &rows).unwrap();
        let table = read(path, Street::Flop).unwrap();
        assert_eq!(table.lookup(Street::Flop, &rank_pattern, &suit_pattern), Some(3));
        std::fs::remove_file(path).ok();
    }
}
