//! Hardcoded reference games for solver validation and benchmarks
//!
//! Row player = player index 0, column player = index 1. Each cell is
//! `[row payoff, column payoff]`.
//!
//!   prisoners_dilemma   cooperate/defect        unique pure NE (defect, defect)
//!   matching_pennies    heads/tails             no pure NE, mixed p = q = 0.5
//!   all_equal(v)        a/b                     every cell a tied pure NE
//!   battle_of_sexes     opera/football          two pure NE plus mixed (2/3, 1/3)
//!   rock_paper_scissors rock/paper/scissors     unique mixed NE, uniform
//!   dominance_solvable  3×3                     unique pure NE (1, 1) after two rounds
//!   pennies_with_dominated_column  2×3         matching pennies plus a dominated column

use crate::model::{PayoffModel, Player};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn game(row: (&str, &[&str]), col: (&str, &[&str]), cells: Vec<Vec<[f64; 2]>>) -> PayoffModel {
    let row_player = Player::new(row.0, labels(row.1)).expect("fixture player");
    let col_player = Player::new(col.0, labels(col.1)).expect("fixture player");
    PayoffModel::new(row_player, col_player, cells).expect("fixture game")
}

pub fn prisoners_dilemma() -> PayoffModel {
    game(
        ("prisoner_a", &["cooperate", "defect"]),
        ("prisoner_b", &["cooperate", "defect"]),
        vec![
            vec![[-1.0, -1.0], [-3.0, 0.0]],
            vec![[0.0, -3.0], [-2.0, -2.0]],
        ],
    )
}

pub fn matching_pennies() -> PayoffModel {
    game(
        ("matcher", &["heads", "tails"]),
        ("mismatcher", &["heads", "tails"]),
        vec![
            vec![[1.0, -1.0], [-1.0, 1.0]],
            vec![[-1.0, 1.0], [1.0, -1.0]],
        ],
    )
}

pub fn all_equal(value: f64) -> PayoffModel {
    game(
        ("left", &["a", "b"]),
        ("right", &["a", "b"]),
        vec![vec![[value, value]; 2]; 2],
    )
}

pub fn battle_of_sexes() -> PayoffModel {
    game(
        ("first", &["opera", "football"]),
        ("second", &["opera", "football"]),
        vec![
            vec![[2.0, 1.0], [0.0, 0.0]],
            vec![[0.0, 0.0], [1.0, 2.0]],
        ],
    )
}

pub fn rock_paper_scissors() -> PayoffModel {
    let moves: &[&str] = &["rock", "paper", "scissors"];
    let row = [[0.0, -1.0, 1.0], [1.0, 0.0, -1.0], [-1.0, 1.0, 0.0]];
    let cells = row
        .iter()
        .map(|r| r.iter().map(|&v| [v, -v]).collect())
        .collect();
    game(("one", moves), ("two", moves), cells)
}

pub fn dominance_solvable() -> PayoffModel {
    game(
        ("row", &["low", "high", "mid"]),
        ("col", &["low", "high", "mid"]),
        vec![
            vec![[0.0, 0.0], [0.0, 2.0], [0.0, 1.0]],
            vec![[2.0, 0.0], [2.0, 2.0], [2.0, 1.0]],
            vec![[1.0, 0.0], [1.0, 2.0], [1.0, 1.0]],
        ],
    )
}

pub fn pennies_with_dominated_column() -> PayoffModel {
    game(
        ("matcher", &["heads", "tails"]),
        ("mismatcher", &["heads", "tails", "walk_away"]),
        vec![
            vec![[1.0, -1.0], [-1.0, 1.0], [0.0, -5.0]],
            vec![[-1.0, 1.0], [1.0, -1.0], [0.0, -5.0]],
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shapes() {
        assert!(prisoners_dilemma().is_two_by_two());
        assert_eq!(rock_paper_scissors().rows(), 3);
        assert_eq!(pennies_with_dominated_column().cols(), 3);
        assert_eq!(rock_paper_scissors().payoffs(0, 2), [1.0, -1.0]);
    }
}
