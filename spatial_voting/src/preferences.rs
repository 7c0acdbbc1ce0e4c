use log::debug;

use crate::config::*;

/// Derives one ranked ballot per voter from the positions.
///
/// Each voter ranks all the candidates by increasing distance. When two
/// candidates are at exactly the same distance, the one with the lower index
/// is ranked first.
pub fn derive_preferences(candidates: &[Candidate], voters: &[Voter]) -> Vec<Ballot> {
    debug!(
        "derive_preferences: {:?} voters, {:?} candidates",
        voters.len(),
        candidates.len()
    );
    voters
        .iter()
        .map(|v| rank_candidates(candidates, &v.position))
        .collect()
}

fn rank_candidates(candidates: &[Candidate], point: &Point) -> Ballot {
    let mut distances: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(cidx, c)| (cidx, point.distance(&c.position)))
        .collect();
    distances.sort_by(|(cidx1, d1), (cidx2, d2)| d1.total_cmp(d2).then(cidx1.cmp(cidx2)));
    Ballot::new(distances.iter().map(|(cidx, _)| *cidx).collect())
}

/// The index of the candidate closest to the point, the first one in case
/// of equality. Returns `None` when there are no candidates.
pub fn nearest_candidate(candidates: &[Candidate], point: &Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (cidx, c) in candidates.iter().enumerate() {
        let d = point.distance(&c.position);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((cidx, d)),
        }
    }
    best.map(|(cidx, _)| cidx)
}
