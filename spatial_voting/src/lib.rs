mod borda;
pub mod builder;
mod condorcet;
mod config;
mod election;
mod irv;
pub mod manual;
mod plurality;
mod preferences;

use log::{debug, info};

pub use crate::borda::tabulate_borda;
pub use crate::condorcet::{pairwise_matrix, tabulate_condorcet};
pub use crate::config::*;
pub use crate::election::Election;
pub use crate::irv::tabulate_irv;
pub use crate::plurality::tabulate_plurality;
pub use crate::preferences::{derive_preferences, nearest_candidate};

/// Runs all the voting rules on the same ballots.
///
/// Arguments:
/// * `ballots` the ranked ballots, one per voter
/// * `num_candidates` the number of candidates every ballot must rank
pub fn tabulate_all(
    ballots: &[Ballot],
    num_candidates: usize,
) -> Result<ElectionResults, InvalidInputError> {
    info!(
        "Tabulating {:?} ballots over {:?} candidates",
        ballots.len(),
        num_candidates
    );
    let res = ElectionResults {
        num_voters: ballots.len(),
        plurality: tabulate_plurality(ballots, num_candidates)?,
        irv: tabulate_irv(ballots, num_candidates)?,
        borda: tabulate_borda(ballots, num_candidates)?,
        condorcet: tabulate_condorcet(ballots, num_candidates)?,
    };
    info!(
        "Winners: plurality {:?} irv {:?} borda {:?} condorcet {:?}",
        res.plurality.as_ref().map(|r| r.winner),
        res.irv.as_ref().map(|r| r.winner),
        res.borda.as_ref().map(|r| r.winner),
        res.condorcet.winner
    );
    Ok(res)
}

// Every ballot must be a permutation of [0, num_candidates).
pub(crate) fn check_ballots(
    ballots: &[Ballot],
    num_candidates: usize,
) -> Result<(), InvalidInputError> {
    debug!(
        "check_ballots: {:?} ballots, {:?} candidates",
        ballots.len(),
        num_candidates
    );
    let mut seen: Vec<bool> = vec![false; num_candidates];
    for (bidx, ballot) in ballots.iter().enumerate() {
        if ballot.len() != num_candidates {
            return Err(InvalidInputError::BallotLength {
                ballot: bidx,
                expected: num_candidates,
                found: ballot.len(),
            });
        }
        seen.iter_mut().for_each(|s| *s = false);
        for &cidx in ballot.ranks.iter() {
            if cidx >= num_candidates {
                return Err(InvalidInputError::CandidateOutOfRange {
                    ballot: bidx,
                    candidate: cidx,
                    num_candidates,
                });
            }
            if seen[cidx] {
                return Err(InvalidInputError::DuplicateRanking {
                    ballot: bidx,
                    candidate: cidx,
                });
            }
            seen[cidx] = true;
        }
    }
    Ok(())
}

/// The first (candidate, count) pair reaching the maximum count.
pub(crate) fn first_max<I>(counts: I) -> Option<(usize, u64)>
where
    I: IntoIterator<Item = (usize, u64)>,
{
    let mut best: Option<(usize, u64)> = None;
    for (cidx, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((cidx, count)),
        }
    }
    best
}

/// The first (candidate, count) pair reaching the minimum count.
pub(crate) fn first_min<I>(counts: I) -> Option<(usize, u64)>
where
    I: IntoIterator<Item = (usize, u64)>,
{
    let mut best: Option<(usize, u64)> = None;
    for (cidx, count) in counts {
        match best {
            Some((_, best_count)) if count >= best_count => {}
            _ => best = Some((cidx, count)),
        }
    }
    best
}

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{derive_preferences, Ballot, Candidate, Voter};

    pub fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Repeats every ranking the given number of times.
    pub fn ballots(spec: &[(Vec<usize>, usize)]) -> Vec<Ballot> {
        let mut res: Vec<Ballot> = Vec::new();
        for (ranks, count) in spec.iter() {
            for _ in 0..*count {
                res.push(Ballot::new(ranks.clone()));
            }
        }
        res
    }

    /// Ballots derived from integer positions, with at most 8 candidates.
    /// Returns the ballots and the number of candidates.
    pub fn positional_ballots(cs: &[(i16, i16)], vs: &[(i16, i16)]) -> (Vec<Ballot>, usize) {
        let candidates: Vec<Candidate> = cs
            .iter()
            .take(8)
            .enumerate()
            .map(|(idx, (x, y))| Candidate::new(idx as u32, *x as f64, *y as f64))
            .collect();
        let voters: Vec<Voter> = vs
            .iter()
            .map(|(x, y)| Voter::new(*x as f64, *y as f64))
            .collect();
        (derive_preferences(&candidates, &voters), candidates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use super::*;

    #[test]
    fn first_max_prefers_lowest_index() {
        let counts = [3_u64, 5, 5, 1];
        assert_eq!(first_max(counts.iter().cloned().enumerate()), Some((1, 5)));
        assert_eq!(first_max(Vec::<(usize, u64)>::new()), None);
    }

    #[test]
    fn first_min_prefers_lowest_index() {
        let counts: [(usize, u64); 4] = [(2, 4), (0, 1), (3, 1), (1, 7)];
        assert_eq!(first_min(counts), Some((0, 1)));
    }

    #[test]
    fn check_ballots_accepts_permutations() {
        let bs = ballots(&[(vec![2, 0, 1], 2), (vec![0, 1, 2], 1)]);
        assert_eq!(check_ballots(&bs, 3), Ok(()));
        assert_eq!(check_ballots(&[], 3), Ok(()));
    }

    #[test]
    fn check_ballots_rejects_length_mismatch() {
        let bs = ballots(&[(vec![0, 1, 2], 1), (vec![0, 1], 1)]);
        assert_eq!(
            check_ballots(&bs, 3),
            Err(InvalidInputError::BallotLength {
                ballot: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn check_ballots_rejects_out_of_range_and_duplicates() {
        let bs = ballots(&[(vec![0, 3, 1], 1)]);
        assert_eq!(
            check_ballots(&bs, 3),
            Err(InvalidInputError::CandidateOutOfRange {
                ballot: 0,
                candidate: 3,
                num_candidates: 3
            })
        );
        let bs = ballots(&[(vec![1, 0, 1], 1)]);
        assert_eq!(
            check_ballots(&bs, 3),
            Err(InvalidInputError::DuplicateRanking {
                ballot: 0,
                candidate: 1
            })
        );
    }

    #[test]
    fn tabulate_all_unanimous() {
        init_logger();
        let bs = ballots(&[(vec![0, 1], 3)]);
        let res = tabulate_all(&bs, 2).unwrap();
        assert_eq!(res.num_voters, 3);

        let plurality = res.plurality.unwrap();
        assert_eq!(plurality.winner, 0);
        assert_eq!(plurality.vote_count, 3);

        let borda = res.borda.unwrap();
        assert_eq!(borda.scores, vec![3, 0]);

        let irv = res.irv.unwrap();
        assert_eq!(irv.winner, 0);
        assert_eq!(irv.rounds.len(), 1);

        assert!(res.condorcet.exists());
        assert_eq!(res.condorcet.winner, Some(0));
        assert_eq!(res.condorcet.matrix, vec![vec![0, 3], vec![0, 0]]);
    }

    #[test]
    fn tabulate_all_without_voters() {
        init_logger();
        let res = tabulate_all(&[], 4).unwrap();
        assert_eq!(res.num_voters, 0);
        assert_eq!(res.plurality, None);
        assert_eq!(res.irv, None);
        assert_eq!(res.borda, None);
        assert!(!res.condorcet.exists());
        assert_eq!(res.condorcet.winner_label, None);
    }

    #[test]
    fn tabulate_all_rejects_malformed_ballots() {
        let bs = ballots(&[(vec![0, 0], 1)]);
        assert!(tabulate_all(&bs, 2).is_err());
    }
}
