//! Voting Aggregator: per-row majority vote across the stacked layer-1
//! predictions, ties resolved to the lowest encoded class.

use std::collections::BTreeMap;

/// Most frequent value per row across models. `predictions` holds one vector
/// per model, all the same length; the result has one winner per row. With
/// every model disagreeing, the lowest class index wins.
pub fn mode_rows(predictions: &[Vec<usize>]) -> Vec<usize> {
    let Some(first) = predictions.first() else {
        return Vec::new();
    };
    let rows = first.len();
    let mut winners = Vec::with_capacity(rows);
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();

    for row in 0..rows {
        counts.clear();
        for model in predictions {
            if let Some(&value) = model.get(row) {
                *counts.entry(value).or_insert(0) += 1;
            }
        }
        // Ascending key iteration plus a strict comparison gives the
        // lowest-value tie break.
        let mut best = (usize::MAX, 0usize);
        for (&value, &count) in counts.iter() {
            if count > best.1 {
                best = (value, count);
            }
        }
        winners.push(best.0);
    }
    winners
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_wins() {
        let preds = vec![vec![2, 0], vec![2, 1], vec![1, 1]];
        assert_eq!(mode_rows(&preds), vec![2, 1]);
    }

    #[test]
    fn three_way_disagreement_resolves_to_lowest_class() {
        // Models predict 2, 0, 1 for the same row; each value occurs once,
        // so the mode rule elects the lowest encoded class: 0.
        let preds = vec![vec![2], vec![0], vec![1]];
        assert_eq!(mode_rows(&preds), vec![0]);
    }

    #[test]
    fn two_way_tie_resolves_to_lowest_class() {
        let preds = vec![vec![3], vec![1], vec![3], vec![1]];
        assert_eq!(mode_rows(&preds), vec![1]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(mode_rows(&[]).is_empty());
    }
}
