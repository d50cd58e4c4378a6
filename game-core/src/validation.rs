use game_types::{
    AUTO_ROUND_BID_SUM, BidsPreview, MAX_BID, MIN_BID, PLAYER_COUNT, RoundError,
    TRICKS_PER_ROUND,
};

/// A submission that passed validation. For auto rounds `tricks` has already
/// been forced to match the bids.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRound {
    pub bids: [i32; PLAYER_COUNT],
    pub tricks: [i32; PLAYER_COUNT],
    pub auto_round: bool,
}

pub struct RoundValidator;

impl RoundValidator {
    pub fn is_valid_bid(bid: i32) -> bool {
        (MIN_BID..=MAX_BID).contains(&bid)
    }

    /// True when the auto path is open: every bid valid and the bids sum to 9.
    pub fn auto_round_eligible(bids: &[i32; PLAYER_COUNT]) -> bool {
        bids.iter().all(|b| Self::is_valid_bid(*b)) && bids.iter().sum::<i32>() == AUTO_ROUND_BID_SUM
    }

    pub fn preview(bids: &[i32; PLAYER_COUNT]) -> BidsPreview {
        BidsPreview {
            bid_total: bids.iter().sum(),
            auto_round_eligible: Self::auto_round_eligible(bids),
        }
    }

    pub fn validate(
        bids: [i32; PLAYER_COUNT],
        tricks: [i32; PLAYER_COUNT],
        auto_round: bool,
    ) -> Result<ValidatedRound, RoundError> {
        if let Some((player, bid)) = bids
            .iter()
            .copied()
            .enumerate()
            .find(|(_, bid)| !Self::is_valid_bid(*bid))
        {
            return Err(RoundError::BidOutOfRange { player, bid });
        }

        if auto_round {
            let total = bids.iter().sum();
            if total != AUTO_ROUND_BID_SUM {
                return Err(RoundError::AutoRoundBidSum { total });
            }
            return Ok(ValidatedRound {
                bids,
                tricks: bids,
                auto_round: true,
            });
        }

        let total = tricks.iter().sum();
        if total != TRICKS_PER_ROUND {
            return Err(RoundError::TrickSumMismatch { total });
        }

        Ok(ValidatedRound {
            bids,
            tricks,
            auto_round: false,
        })
    }
}
