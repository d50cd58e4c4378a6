use game_types::{PLAYER_COUNT, PlayerIndex, Round, Standing, display_name};

pub struct ScoringEngine;

impl ScoringEngine {
    /// Score a single seat. A made bid earns the bid plus a tenth of a point
    /// per overtrick; a missed bid costs the full bid, whatever the shortfall.
    pub fn score(bid: i32, tricks_won: i32) -> f64 {
        if tricks_won >= bid {
            bid as f64 + (tricks_won - bid) as f64 * 0.1
        } else {
            -(bid as f64)
        }
    }

    pub fn score_round(
        bids: &[i32; PLAYER_COUNT],
        tricks: &[i32; PLAYER_COUNT],
    ) -> [f64; PLAYER_COUNT] {
        std::array::from_fn(|i| Self::score(bids[i], tricks[i]))
    }

    /// Running totals per seat, summed over every recorded round.
    pub fn totals(rounds: &[Round]) -> [f64; PLAYER_COUNT] {
        let mut totals = [0.0; PLAYER_COUNT];
        for round in rounds {
            for (total, score) in totals.iter_mut().zip(round.scores.iter()) {
                *total += score;
            }
        }
        totals
    }

    /// First seat holding the highest total. Ties go to the lowest index.
    pub fn leader_index(totals: &[f64; PLAYER_COUNT]) -> PlayerIndex {
        let mut best = 0;
        for (i, total) in totals.iter().enumerate().skip(1) {
            if *total > totals[best] {
                best = i;
            }
        }
        best
    }

    /// Every seat tied for the best score of a round.
    pub fn round_winners(scores: &[f64; PLAYER_COUNT]) -> Vec<PlayerIndex> {
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score == best)
            .map(|(i, _)| i)
            .collect()
    }

    /// Rank seats by total, highest first. Equal totals keep seat order, and
    /// every seat gets its own position 1..=4.
    pub fn standings(
        names: &[String; PLAYER_COUNT],
        totals: &[f64; PLAYER_COUNT],
    ) -> Vec<Standing> {
        let mut order: Vec<PlayerIndex> = (0..PLAYER_COUNT).collect();
        order.sort_by(|a, b| totals[*b].total_cmp(&totals[*a]));

        order
            .into_iter()
            .enumerate()
            .map(|(position, index)| Standing {
                rank: position as u32 + 1,
                player_index: index,
                name: display_name(index, &names[index]),
                score: totals[index],
            })
            .collect()
    }
}
