use crate::cards::Street;
use crate::gameplay::Action;
use crate::mccfr::RegretNode;
use crate::{Chips, Utility};
use std::io::{BufRead, BufReader, Write};
use std::str::FromStr;

/// one row of the strategy output file (spec.md §6). Columns, in order:
/// `Round, Player, Abstraction, PreviousActions, Strategy, CumulatedPot,
/// StrategyUpdateCount`.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyRow {
    pub round: Street,
    pub player: usize,
    pub abstraction: String,
    pub previous_actions: String,
    pub strategy: Vec<(Action, Utility)>,
    pub pot: Chips,
    pub update_count: u64,
}

impl StrategyRow {
    pub fn from_node(key: &str, node: &RegretNode) -> Self {
        let _ = key;
        let sigma = node.average_strategy();
        Self {
            round: node.round(),
            player: node.seat(),
            abstraction: node.abstraction().to_string(),
            previous_actions: node.previous_actions().to_string(),
            strategy: node.actions().iter().copied().zip(sigma).collect(),
            pot: node.pot(),
            update_count: node.update_count(),
        }
    }

    fn key(&self) -> (Street, usize, String, String) {
        (self.round, self.player, self.abstraction.clone(), self.previous_actions.clone())
    }
}

pub fn write(path: &str, rows: &[StrategyRow]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "Round,Player,Abstraction,PreviousActions,Strategy,CumulatedPot,StrategyUpdateCount")?;
    for row in rows {
        let strategy = row
            .strategy
            .iter()
            .map(|(action, prob)| format!("{action}:{prob:.6}"))
            .collect::<Vec<_>>()
            .join("|");
        writeln!(
            file,
            "{},{},{},\"{}\",\"{}\",{:.6},{}",
            row.round, row.player, row.abstraction, row.previous_actions, strategy, row.pot, row.update_count
        )?;
    }
    Ok(())
}

pub fn read(path: &str) -> std::io::Result<Vec<StrategyRow>> {
    let file = std::fs::File::open(path)?;
    let mut rows = Vec::new();
    for line in BufReader::new(file).lines().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(&line).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?);
    }
    Ok(rows)
}

fn parse_row(line: &str) -> Result<StrategyRow, String> {
    let columns = split_csv_row(line);
    if columns.len() != 7 {
        return Err(format!("expected 7 columns, got {}: {line}", columns.len()));
    }
    let round = Street::from_str(columns[0].trim()).map_err(|e| e.to_string())?;
    let player: usize = columns[1].trim().parse().map_err(|_| format!("bad player in row: {line}"))?;
    let abstraction = unquote(&columns[2]);
    let previous_actions = unquote(&columns[3]);
    let strategy = unquote(&columns[4])
        .split('|')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (action, prob) = pair.split_once(':').ok_or_else(|| format!("bad strategy pair '{pair}'"))?;
            let action = Action::from_str(action).map_err(|e| e.to_string())?;
            let prob: Utility = prob.parse().map_err(|_| format!("bad probability '{prob}'"))?;
            Ok((action, prob))
        })
        .collect::<Result<Vec<_>, String>>()?;
    let pot: Chips = columns[5].trim().parse().map_err(|_| format!("bad pot in row: {line}"))?;
    let update_count: u64 = columns[6].trim().parse().map_err(|_| format!("bad update count in row: {line}"))?;
    Ok(StrategyRow {
        round,
        player,
        abstraction,
        previous_actions,
        strategy,
        pot,
        update_count,
    })
}

fn unquote(s: &str) -> String {
    s.trim().trim_matches('"').replace("\"\"", "\"")
}

fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    fields.push(current);
    fields
}

/// visit-weighted merge across runs (spec.md §4.8). Actions absent from a
/// given run contribute probability zero with weight zero; the merged
/// `update_count` sums the inputs with no offset (spec.md §9 item 4).
pub fn aggregate(runs: &[Vec<StrategyRow>]) -> Vec<StrategyRow> {
    use std::collections::HashMap;

    let mut merged: HashMap<(Street, usize, String, String), (HashMap<Action, Utility>, u64)> = HashMap::new();
    for run in runs {
        for row in run {
            let entry = merged.entry(row.key()).or_insert_with(|| (HashMap::new(), 0));
            let weight = row.update_count as Utility;
            for (action, prob) in &row.strategy {
                *entry.0.entry(*action).or_insert(0.0) += prob * weight;
            }
            entry.1 += row.update_count;
        }
    }

    merged
        .into_iter()
        .map(|((round, player, abstraction, previous_actions), (weighted, update_count))| {
            let total: Utility = weighted.values().sum();
            let mut strategy: Vec<(Action, Utility)> = weighted
                .into_iter()
                .map(|(action, sum)| (action, if total > 0.0 { sum / total } else { 0.0 }))
                .collect();
            strategy.sort_by_key(|(action, _)| action.to_string());
            StrategyRow {
                round,
                player,
                abstraction,
                previous_actions,
                strategy,
                pot: 0.0,
                update_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::BetSize;

    fn row(strategy: Vec<(Action, Utility)>, update_count: u64) -> StrategyRow {
        StrategyRow {
            round: Street::Pref,
            player: 0,
            abstraction: "AKs".into(),
            previous_actions: String::new(),
            strategy,
            pot: 1.5,
            update_count,
        }
    }

    #[test]
    fn csv_round_trips_a_row() {
        let rows = vec![row(vec![(Action::Fold, 0.3), (Action::Bet(BetSize::Two), 0.7)], 42)];
        let dir = std::env::temp_dir();
        let path = dir.join(format!("strategy_csv_test_{}.csv", std::process::id()));
        let path = path.to_str().unwrap();
        write(path, &rows).unwrap();
        let read_back = read(path).unwrap();
        assert_eq!(read_back.len(), 1);
        assert_eq!(read_back[0].update_count, 42);
        assert_eq!(read_back[0].abstraction, "AKs");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn aggregation_scenario_matches_spec_literal_example() {
        // spec.md §8 scenario 6: (0.6, 0.4) w/ 100 updates and (0.2, 0.8) w/
        // 100 updates merges to (0.4, 0.6) w/ 200 updates.
        let fold = Action::Fold;
        let call = Action::Call;
        let run_a = vec![row(vec![(fold, 0.6), (call, 0.4)], 100)];
        let run_b = vec![row(vec![(fold, 0.2), (call, 0.8)], 100)];
        let merged = aggregate(&[run_a, run_b]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].update_count, 200);
        let sigma: std::collections::HashMap<Action, Utility> = merged[0].strategy.iter().copied().collect();
        assert!((sigma[&fold] - 0.4).abs() < 1e-9);
        assert!((sigma[&call] - 0.6).abs() < 1e-9);
    }

    #[test]
    fn actions_unseen_in_a_run_contribute_zero_weight() {
        let run_a = vec![row(vec![(Action::Fold, 1.0)], 10)];
        let run_b = vec![row(vec![(Action::Fold, 0.5), (Action::Call, 0.5)], 10)];
        let merged = aggregate(&[run_a, run_b]);
        let sigma: std::collections::HashMap<Action, Utility> = merged[0].strategy.iter().copied().collect();
        // fold: (1.0*10 + 0.5*10) / (10 + 10) = 0.75; call: (0 + 0.5*10)/20 = 0.25
        assert!((sigma[&Action::Fold] - 0.75).abs() < 1e-9);
        assert!((sigma[&Action::Call] - 0.25).abs() < 1e-9);
    }
}
