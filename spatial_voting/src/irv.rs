use log::{debug, info};

use crate::config::*;
use crate::{check_ballots, first_max, first_min};

/// Runs the instant-runoff algorithm.
///
/// Every round, each ballot counts for its most preferred candidate still
/// running. A candidate with strictly more than half of the ballots wins.
/// Otherwise the candidate with the fewest votes is eliminated (the lowest
/// index among the tied ones) and a new round starts. When only one
/// candidate is left, it wins by default.
///
/// Returns `None` when there are no ballots or no candidates.
pub fn tabulate_irv(
    ballots: &[Ballot],
    num_candidates: usize,
) -> Result<Option<IrvResult>, InvalidInputError> {
    check_ballots(ballots, num_candidates)?;
    if ballots.is_empty() || num_candidates == 0 {
        debug!(
            "tabulate_irv: nothing to tabulate: {:?} ballots, {:?} candidates",
            ballots.len(),
            num_candidates
        );
        return Ok(None);
    }

    let majority = ballots.len() as f64 / 2.0;
    // The candidates still running, in index order.
    let mut remaining: Vec<usize> = (0..num_candidates).collect();
    let mut running: Vec<bool> = vec![true; num_candidates];
    let mut rounds: Vec<IrvRound> = Vec::new();

    while remaining.len() > 1 {
        let round_id = (rounds.len() + 1) as u32;
        let tally = compute_tally(ballots, &running);
        debug!(
            "Round id: {:?} remaining: {:?} tally: {:?}",
            round_id, remaining, tally
        );

        if let Some((leader, count)) = first_max(remaining.iter().map(|&cidx| (cidx, tally[cidx])))
        {
            if count as f64 > majority {
                info!(
                    "IRV: {} wins round {} with {} votes (majority above {})",
                    candidate_label(leader),
                    round_id,
                    count,
                    majority
                );
                rounds.push(IrvRound {
                    round: round_id,
                    tally,
                    remaining: remaining.clone(),
                    eliminated: None,
                });
                return Ok(Some(IrvResult {
                    winner: leader,
                    winner_label: candidate_label(leader),
                    rounds,
                    vote_count: Some(count),
                }));
            }
        }

        let eliminated = first_min(remaining.iter().map(|&cidx| (cidx, tally[cidx])))
            .map(|(cidx, _)| cidx);
        debug!("Round id: {:?} eliminated: {:?}", round_id, eliminated);
        rounds.push(IrvRound {
            round: round_id,
            tally,
            remaining: remaining.clone(),
            eliminated,
        });
        if let Some(cidx) = eliminated {
            running[cidx] = false;
            remaining.retain(|&c| c != cidx);
        }
    }

    // Only one candidate left, it is the winner by default.
    let res = remaining.first().map(|&winner| IrvResult {
        winner,
        winner_label: candidate_label(winner),
        rounds,
        vote_count: None,
    });
    if let Some(r) = &res {
        info!(
            "IRV: {} wins as the last candidate after {} rounds",
            r.winner_label,
            r.rounds.len()
        );
    }
    Ok(res)
}

// Counts every ballot for its first choice still running. The tally has an
// entry for every candidate, zero for the eliminated ones.
fn compute_tally(ballots: &[Ballot], running: &[bool]) -> Vec<u64> {
    let mut tally: Vec<u64> = vec![0; running.len()];
    for ballot in ballots.iter() {
        if let Some(&cidx) = ballot.ranks.iter().find(|&&cidx| running[cidx]) {
            tally[cidx] += 1;
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn majority_in_first_round() {
        init_logger();
        let bs = ballots(&[(vec![0, 1], 3)]);
        let res = tabulate_irv(&bs, 2).unwrap().unwrap();
        assert_eq!(res.winner, 0);
        assert_eq!(res.winner_label, "Candidate 1");
        assert_eq!(res.vote_count, Some(3));
        assert_eq!(
            res.rounds,
            vec![IrvRound {
                round: 1,
                tally: vec![3, 0],
                remaining: vec![0, 1],
                eliminated: None,
            }]
        );
    }

    #[test]
    fn transfers_after_elimination() {
        init_logger();
        // 2 is eliminated first and its votes go to 1.
        let bs = ballots(&[(vec![0, 1, 2], 4), (vec![1, 0, 2], 3), (vec![2, 1, 0], 2)]);
        let res = tabulate_irv(&bs, 3).unwrap().unwrap();
        assert_eq!(res.winner, 1);
        assert_eq!(res.vote_count, Some(5));
        assert_eq!(
            res.rounds,
            vec![
                IrvRound {
                    round: 1,
                    tally: vec![4, 3, 2],
                    remaining: vec![0, 1, 2],
                    eliminated: Some(2),
                },
                IrvRound {
                    round: 2,
                    tally: vec![4, 5, 0],
                    remaining: vec![0, 1],
                    eliminated: None,
                },
            ]
        );
    }

    #[test]
    fn exact_half_is_not_a_majority() {
        // 2 voters each. 0 is eliminated on the tie, and 1 is left alone.
        let bs = ballots(&[(vec![0, 1], 2), (vec![1, 0], 2)]);
        let res = tabulate_irv(&bs, 2).unwrap().unwrap();
        assert_eq!(res.winner, 1);
        assert_eq!(res.vote_count, None);
        assert_eq!(res.rounds.len(), 1);
        assert_eq!(res.rounds[0].tally, vec![2, 2]);
        assert_eq!(res.rounds[0].eliminated, Some(0));
    }

    #[test]
    fn elimination_tie_removes_lowest_index() {
        // 1 and 2 are tied for last, 1 goes and its vote moves to 0.
        let bs = ballots(&[
            (vec![0, 1, 2], 2),
            (vec![1, 0, 2], 1),
            (vec![2, 1, 0], 1),
        ]);
        let res = tabulate_irv(&bs, 3).unwrap().unwrap();
        assert_eq!(res.rounds[0].tally, vec![2, 1, 1]);
        assert_eq!(res.rounds[0].eliminated, Some(1));
        assert_eq!(res.rounds[1].tally, vec![3, 0, 1]);
        assert_eq!(res.rounds[1].remaining, vec![0, 2]);
        assert_eq!(res.winner, 0);
        assert_eq!(res.vote_count, Some(3));
    }

    #[test]
    fn last_candidate_standing() {
        // Zero-vote candidates are eliminated one by one until 1 is alone.
        let bs = ballots(&[(vec![0, 1, 2, 3], 1), (vec![1, 0, 2, 3], 1)]);
        let res = tabulate_irv(&bs, 4).unwrap().unwrap();
        let eliminated: Vec<Option<usize>> = res.rounds.iter().map(|r| r.eliminated).collect();
        assert_eq!(eliminated, vec![Some(2), Some(3), Some(0)]);
        assert_eq!(res.winner, 1);
        assert_eq!(res.vote_count, None);
    }

    #[test]
    fn single_candidate_wins_without_rounds() {
        let bs = ballots(&[(vec![0], 3)]);
        let res = tabulate_irv(&bs, 1).unwrap().unwrap();
        assert_eq!(res.winner, 0);
        assert!(res.rounds.is_empty());
        assert_eq!(res.vote_count, None);
    }

    #[test]
    fn no_ballots_or_candidates() {
        assert_eq!(tabulate_irv(&[], 3), Ok(None));
        let bs = ballots(&[(vec![], 3)]);
        assert_eq!(tabulate_irv(&bs, 0), Ok(None));
    }

    #[quickcheck]
    fn terminates_with_a_winner(cs: Vec<(i16, i16)>, vs: Vec<(i16, i16)>) -> bool {
        let (bs, n) = positional_ballots(&cs, &vs);
        match tabulate_irv(&bs, n) {
            Ok(None) => bs.is_empty() || n == 0,
            Ok(Some(res)) => {
                res.winner < n
                    && res.rounds.len() <= n
                    && res
                        .rounds
                        .iter()
                        .all(|r| r.tally.iter().sum::<u64>() == bs.len() as u64)
            }
            Err(_) => false,
        }
    }
}
