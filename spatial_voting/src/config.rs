// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A position in the plane.
///
/// Coordinates may take any sign or magnitude, but they must be finite for
/// an election to be accepted.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// The Euclidean distance between two points.
    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Point {
        Point::new(p.0, p.1)
    }
}

/// The stable identifier of a candidate.
///
/// It is independent from the position of the candidate in the list given to
/// an election, so that reordering the list does not renumber a candidate.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub u32);

impl Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Candidate {
    pub id: CandidateId,
    pub position: Point,
}

impl Candidate {
    pub fn new(id: u32, x: f64, y: f64) -> Candidate {
        Candidate {
            id: CandidateId(id),
            position: Point::new(x, y),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Voter {
    pub position: Point,
}

impl Voter {
    pub fn new(x: f64, y: f64) -> Voter {
        Voter {
            position: Point::new(x, y),
        }
    }
}

/// A ranked ballot.
///
/// The ranks are indexes into the list of candidates of the election, the
/// most preferred candidate first. A well-formed ballot ranks every candidate
/// exactly once.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    pub ranks: Vec<usize>,
}

impl Ballot {
    pub fn new(ranks: Vec<usize>) -> Ballot {
        Ballot { ranks }
    }

    /// The most preferred candidate, if the ballot ranks any.
    pub fn first(&self) -> Option<usize> {
        self.ranks.first().cloned()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl From<Vec<usize>> for Ballot {
    fn from(ranks: Vec<usize>) -> Ballot {
        Ballot { ranks }
    }
}

// ******** Output data structures *********

/// The display name of the candidate at the given index.
///
/// Candidates are numbered from 1 for display, while indexes start at 0.
pub fn candidate_label(index: usize) -> String {
    format!("Candidate {}", index + 1)
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PluralityResult {
    pub winner: usize,
    pub winner_label: String,
    /// The number of first choices of the winner.
    pub vote_count: u64,
    /// The number of first choices for every candidate, by index.
    pub tally: Vec<u64>,
}

/// Statistics for one round of instant-runoff.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct IrvRound {
    pub round: u32,
    /// Votes for every candidate, by index. Candidates that are no longer
    /// running have a count of zero.
    pub tally: Vec<u64>,
    /// The candidates still running during this round, in index order.
    pub remaining: Vec<usize>,
    /// The candidate removed at the end of this round, if no one won.
    pub eliminated: Option<usize>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct IrvResult {
    pub winner: usize,
    pub winner_label: String,
    pub rounds: Vec<IrvRound>,
    /// The count of the winner in the final round, when the winner was
    /// decided by a majority. Absent when the winner was the last one standing.
    pub vote_count: Option<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BordaResult {
    pub winner: usize,
    pub winner_label: String,
    pub score: u64,
    pub scores: Vec<u64>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CondorcetResult {
    pub winner: Option<usize>,
    pub winner_label: Option<String>,
    /// `matrix[a][b]` is the number of ballots ranking `a` above `b`.
    pub matrix: Vec<Vec<u64>>,
}

impl CondorcetResult {
    pub fn exists(&self) -> bool {
        self.winner.is_some()
    }
}

/// The outcome of all the voting rules on the same set of ballots.
///
/// The nullable results are `None` when there are no voters.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ElectionResults {
    pub num_voters: usize,
    pub plurality: Option<PluralityResult>,
    pub irv: Option<IrvResult>,
    pub borda: Option<BordaResult>,
    pub condorcet: CondorcetResult,
}

/// Errors that prevent the election from being computed.
///
/// An election without voters is not an error: the tabulations simply have
/// no result.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum InvalidInputError {
    /// A coordinate is NaN or infinite. `what` is "candidate" or "voter".
    NonFiniteCoordinate { what: &'static str, index: usize },
    DuplicateCandidateId(CandidateId),
    /// A ballot does not rank the expected number of candidates.
    BallotLength {
        ballot: usize,
        expected: usize,
        found: usize,
    },
    CandidateOutOfRange {
        ballot: usize,
        candidate: usize,
        num_candidates: usize,
    },
    DuplicateRanking { ballot: usize, candidate: usize },
}

impl Error for InvalidInputError {}

impl Display for InvalidInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInputError::NonFiniteCoordinate { what, index } => {
                write!(f, "{} {} has a non-finite coordinate", what, index)
            }
            InvalidInputError::DuplicateCandidateId(cid) => {
                write!(f, "candidate id {} is used more than once", cid)
            }
            InvalidInputError::BallotLength {
                ballot,
                expected,
                found,
            } => write!(
                f,
                "ballot {} ranks {} candidates, expected {}",
                ballot, found, expected
            ),
            InvalidInputError::CandidateOutOfRange {
                ballot,
                candidate,
                num_candidates,
            } => write!(
                f,
                "ballot {} ranks candidate {} but there are only {} candidates",
                ballot, candidate, num_candidates
            ),
            InvalidInputError::DuplicateRanking { ballot, candidate } => write!(
                f,
                "ballot {} ranks candidate {} more than once",
                ballot, candidate
            ),
        }
    }
}
