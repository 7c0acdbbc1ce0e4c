use log::{debug, info};

use crate::config::*;
use crate::{check_ballots, first_max};

/// First past the post: every ballot counts for its first choice.
///
/// Returns `None` when there are no ballots. Ties are resolved in favor of
/// the candidate with the lowest index.
pub fn tabulate_plurality(
    ballots: &[Ballot],
    num_candidates: usize,
) -> Result<Option<PluralityResult>, InvalidInputError> {
    check_ballots(ballots, num_candidates)?;
    if ballots.is_empty() {
        debug!("tabulate_plurality: no ballots");
        return Ok(None);
    }

    let mut tally: Vec<u64> = vec![0; num_candidates];
    for ballot in ballots.iter() {
        if let Some(cidx) = ballot.first() {
            tally[cidx] += 1;
        }
    }
    debug!("tabulate_plurality: tally: {:?}", tally);

    let res = first_max(tally.iter().cloned().enumerate()).map(|(winner, vote_count)| {
        PluralityResult {
            winner,
            winner_label: candidate_label(winner),
            vote_count,
            tally: tally.clone(),
        }
    });
    if let Some(r) = &res {
        info!(
            "Plurality: {} wins with {} votes",
            r.winner_label, r.vote_count
        );
    }
    Ok(res)
}
