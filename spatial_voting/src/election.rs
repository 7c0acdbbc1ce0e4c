use std::collections::HashSet;

use log::{debug, info};

use crate::config::*;
use crate::{derive_preferences, nearest_candidate, tabulate_all};

/// The positions of the candidates and of the voters for one computation.
///
/// An election is immutable. Moving a candidate or changing the voters means
/// building a new election, so that all the results always come from the
/// same snapshot of positions.
#[derive(PartialEq, Debug, Clone)]
pub struct Election {
    candidates: Vec<Candidate>,
    voters: Vec<Voter>,
}

impl Election {
    /// Checks that all the coordinates are finite and that no two
    /// candidates share the same id.
    pub fn new(
        candidates: Vec<Candidate>,
        voters: Vec<Voter>,
    ) -> Result<Election, InvalidInputError> {
        let mut seen_ids: HashSet<CandidateId> = HashSet::new();
        for (idx, c) in candidates.iter().enumerate() {
            if !c.position.is_finite() {
                return Err(InvalidInputError::NonFiniteCoordinate {
                    what: "candidate",
                    index: idx,
                });
            }
            if !seen_ids.insert(c.id) {
                return Err(InvalidInputError::DuplicateCandidateId(c.id));
            }
        }
        if let Some(idx) = voters.iter().position(|v| !v.position.is_finite()) {
            return Err(InvalidInputError::NonFiniteCoordinate {
                what: "voter",
                index: idx,
            });
        }
        debug!(
            "Election::new: {:?} candidates, {:?} voters",
            candidates.len(),
            voters.len()
        );
        Ok(Election { candidates, voters })
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    pub fn num_candidates(&self) -> usize {
        self.candidates.len()
    }

    /// The id of the candidate at this index in the results.
    pub fn candidate_id(&self, index: usize) -> Option<CandidateId> {
        self.candidates.get(index).map(|c| c.id)
    }

    pub fn candidate_index(&self, id: CandidateId) -> Option<usize> {
        self.candidates.iter().position(|c| c.id == id)
    }

    /// One ranked ballot per voter, in the order of the voters.
    pub fn ballots(&self) -> Vec<Ballot> {
        derive_preferences(&self.candidates, &self.voters)
    }

    /// The index of the candidate closest to a point.
    pub fn nearest_candidate(&self, point: &Point) -> Option<usize> {
        nearest_candidate(&self.candidates, point)
    }

    /// Derives the ballots once and runs every voting rule on them.
    pub fn tabulate(&self) -> Result<ElectionResults, InvalidInputError> {
        info!(
            "Processing {:?} voters, candidates: {:?}",
            self.voters.len(),
            self.candidates
        );
        let ballots = self.ballots();
        tabulate_all(&ballots, self.candidates.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_logger;

    fn two_candidates() -> Vec<Candidate> {
        vec![Candidate::new(0, 0.0, 0.0), Candidate::new(1, 10.0, 0.0)]
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let mut cs = two_candidates();
        cs[1].position.y = f64::NAN;
        assert_eq!(
            Election::new(cs, vec![]),
            Err(InvalidInputError::NonFiniteCoordinate {
                what: "candidate",
                index: 1
            })
        );

        let vs = vec![Voter::new(1.0, 1.0), Voter::new(f64::INFINITY, 0.0)];
        assert_eq!(
            Election::new(two_candidates(), vs),
            Err(InvalidInputError::NonFiniteCoordinate {
                what: "voter",
                index: 1
            })
        );
    }

    #[test]
    fn rejects_duplicate_ids() {
        let cs = vec![Candidate::new(4, 0.0, 0.0), Candidate::new(4, 1.0, 0.0)];
        assert_eq!(
            Election::new(cs, vec![]),
            Err(InvalidInputError::DuplicateCandidateId(CandidateId(4)))
        );
    }

    #[test]
    fn ids_survive_reordering() {
        let cs = vec![Candidate::new(7, 10.0, 0.0), Candidate::new(3, 0.0, 0.0)];
        let vs = vec![Voter::new(1.0, 0.0), Voter::new(2.0, 0.0), Voter::new(9.0, 0.0)];
        let e = Election::new(cs, vs).unwrap();
        let res = e.tabulate().unwrap();
        let winner = res.plurality.unwrap().winner;
        assert_eq!(e.candidate_id(winner), Some(CandidateId(3)));
        assert_eq!(e.candidate_index(CandidateId(7)), Some(0));
        assert_eq!(e.candidate_id(2), None);
    }

    #[test]
    fn spatial_two_candidates() {
        init_logger();
        let vs = vec![
            Voter::new(-1.0, 2.0),
            Voter::new(3.0, -4.0),
            Voter::new(4.9, 0.0),
        ];
        let e = Election::new(two_candidates(), vs).unwrap();
        assert_eq!(e.ballots(), vec![Ballot::new(vec![0, 1]); 3]);
        let res = e.tabulate().unwrap();
        assert_eq!(res.plurality.unwrap().tally, vec![3, 0]);
        assert_eq!(res.borda.unwrap().scores, vec![3, 0]);
        let irv = res.irv.unwrap();
        assert_eq!(irv.winner, 0);
        assert_eq!(irv.rounds.len(), 1);
        assert_eq!(res.condorcet.winner, Some(0));
    }

    #[test]
    fn empty_election() {
        let e = Election::new(two_candidates(), vec![]).unwrap();
        let res = e.tabulate().unwrap();
        assert_eq!(res.plurality, None);
        assert_eq!(res.irv, None);
        assert_eq!(res.borda, None);
        assert!(!res.condorcet.exists());

        let e = Election::new(vec![], vec![Voter::new(0.0, 0.0)]).unwrap();
        let res = e.tabulate().unwrap();
        assert_eq!(res.plurality, None);
        assert_eq!(res.irv, None);
        assert!(!res.condorcet.exists());
        assert_eq!(e.nearest_candidate(&Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn results_are_deterministic() {
        let cs = vec![
            Candidate::new(0, 0.0, 0.0),
            Candidate::new(1, 10.0, 0.0),
            Candidate::new(2, 5.0, 8.0),
        ];
        let vs: Vec<Voter> = (0..30)
            .map(|i| Voter::new((i * 7 % 11) as f64, (i * 5 % 13) as f64 - 2.0))
            .collect();
        let e = Election::new(cs, vs).unwrap();
        assert_eq!(e.tabulate().unwrap(), e.tabulate().unwrap());
        let total: u64 = e.tabulate().unwrap().plurality.unwrap().tally.iter().sum();
        assert_eq!(total, 30);
    }
}
