use log::{debug, info};

use crate::check_ballots;
use crate::config::*;

/// Looks for the candidate that beats every other candidate head to head.
///
/// A tied matchup does not count as a win. At most one candidate can satisfy
/// this; candidates are checked in index order. Unlike the other rules, the
/// result is always returned: `exists()` is false when there are no ballots
/// or when the pairwise preferences form a cycle.
pub fn tabulate_condorcet(
    ballots: &[Ballot],
    num_candidates: usize,
) -> Result<CondorcetResult, InvalidInputError> {
    check_ballots(ballots, num_candidates)?;
    let matrix = pairwise_matrix(ballots, num_candidates);
    debug!("tabulate_condorcet: matrix: {:?}", matrix);

    let winner = if ballots.is_empty() {
        None
    } else {
        (0..num_candidates).find(|&cidx| beats_everyone(&matrix, cidx))
    };
    match winner {
        Some(cidx) => info!("Condorcet: {} wins", candidate_label(cidx)),
        None => info!("Condorcet: no winner"),
    }
    Ok(CondorcetResult {
        winner,
        winner_label: winner.map(candidate_label),
        matrix,
    })
}

/// `matrix[a][b]` counts the ballots that rank `a` anywhere above `b`.
///
/// The ballots are expected to be permutations of the candidate indexes.
pub fn pairwise_matrix(ballots: &[Ballot], num_candidates: usize) -> Vec<Vec<u64>> {
    let mut matrix: Vec<Vec<u64>> = vec![vec![0; num_candidates]; num_candidates];
    for ballot in ballots.iter() {
        for (i, &preferred) in ballot.ranks.iter().enumerate() {
            for &other in ballot.ranks[i + 1..].iter() {
                matrix[preferred][other] += 1;
            }
        }
    }
    matrix
}

fn beats_everyone(matrix: &[Vec<u64>], cidx: usize) -> bool {
    (0..matrix.len()).all(|other| other == cidx || matrix[cidx][other] > matrix[other][cidx])
}
