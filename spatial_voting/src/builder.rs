pub use crate::config::*;
use crate::Election;

/// A builder for assembling an election from positions.
///
/// Candidates added with [`Builder::add_candidate`] get the next free id.
///
/// ```
/// pub use spatial_voting::builder::Builder;
/// # use spatial_voting::InvalidInputError;
///
/// let mut builder = Builder::new();
/// builder.add_candidate(0.0, 0.0);
/// builder.add_candidate(10.0, 0.0);
///
/// builder.add_voter(1.0, 1.0);
/// builder.add_voter(9.0, -2.0);
/// builder.add_voter(2.0, 3.0);
///
/// let results = builder.build()?.tabulate()?;
/// assert_eq!(results.plurality.map(|r| r.winner), Some(0));
///
/// # Ok::<(), InvalidInputError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _candidates: Vec<Candidate>,
    pub(crate) _voters: Vec<Voter>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds a candidate and returns the id it was given.
    ///
    /// The id follows the largest id in use. Once `u32::MAX` is taken, the
    /// lowest unused id is given instead.
    pub fn add_candidate(&mut self, x: f64, y: f64) -> CandidateId {
        let next_id = match self._candidates.iter().map(|c| c.id.0).max() {
            None => 0,
            Some(max_id) => max_id
                .checked_add(1)
                .unwrap_or_else(|| self.lowest_unused_id()),
        };
        self._candidates.push(Candidate::new(next_id, x, y));
        CandidateId(next_id)
    }

    fn lowest_unused_id(&self) -> u32 {
        let mut ids: Vec<u32> = self._candidates.iter().map(|c| c.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        // The first gap in the sorted ids.
        ids.iter()
            .enumerate()
            .find(|&(pos, &id)| pos as u32 != id)
            .map(|(pos, _)| pos as u32)
            .unwrap_or(ids.len() as u32)
    }

    /// Adds a candidate with an explicit id.
    ///
    /// Duplicated ids are reported when building the election.
    pub fn add_candidate_with_id(&mut self, id: u32, x: f64, y: f64) {
        self._candidates.push(Candidate::new(id, x, y));
    }

    pub fn add_voter(&mut self, x: f64, y: f64) {
        self._voters.push(Voter::new(x, y));
    }

    pub fn add_voters(&mut self, positions: &[(f64, f64)]) {
        self._voters
            .extend(positions.iter().map(|(x, y)| Voter::new(*x, *y)));
    }

    pub fn build(self) -> Result<Election, InvalidInputError> {
        Election::new(self._candidates, self._voters)
    }
}
