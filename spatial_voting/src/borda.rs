use log::{debug, info};

use crate::config::*;
use crate::{check_ballots, first_max};

/// Borda count: with `n` candidates, the candidate at rank `r` (starting at
/// 0) receives `n - 1 - r` points.
///
/// Returns `None` when there are no ballots. Ties are resolved in favor of
/// the candidate with the lowest index.
pub fn tabulate_borda(
    ballots: &[Ballot],
    num_candidates: usize,
) -> Result<Option<BordaResult>, InvalidInputError> {
    check_ballots(ballots, num_candidates)?;
    if ballots.is_empty() {
        debug!("tabulate_borda: no ballots");
        return Ok(None);
    }

    let mut scores: Vec<u64> = vec![0; num_candidates];
    for ballot in ballots.iter() {
        for (rank, &cidx) in ballot.ranks.iter().enumerate() {
            scores[cidx] += (num_candidates - 1 - rank) as u64;
        }
    }
    debug!("tabulate_borda: scores: {:?}", scores);

    let res = first_max(scores.iter().cloned().enumerate()).map(|(winner, score)| BordaResult {
        winner,
        winner_label: candidate_label(winner),
        score,
        scores: scores.clone(),
    });
    if let Some(r) = &res {
        info!("Borda: {} wins with {} points", r.winner_label, r.score);
    }
    Ok(res)
}
