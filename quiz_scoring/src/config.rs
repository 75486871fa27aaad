// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The fixed universe of single-letter codes for the paired (type) model,
/// in presentation order.
pub const TYPE_CODES: [char; 8] = ['E', 'I', 'S', 'N', 'T', 'F', 'J', 'P'];

/// Lowest accepted rating in the interest model.
pub const MIN_RATING: u32 = 1;
/// Highest accepted rating in the interest model.
pub const MAX_RATING: u32 = 5;

/// One of the four complementary letter pairs of the forced-choice model.
///
/// The enumeration order is the order in which the winning letters are
/// concatenated into the result code.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum DimensionPair {
    EI,
    SN,
    TF,
    JP,
}

impl DimensionPair {
    pub const ALL: [DimensionPair; 4] = [
        DimensionPair::EI,
        DimensionPair::SN,
        DimensionPair::TF,
        DimensionPair::JP,
    ];

    /// The two pole letters, in the pair's listed order.
    pub fn letters(&self) -> (char, char) {
        match self {
            DimensionPair::EI => ('E', 'I'),
            DimensionPair::SN => ('S', 'N'),
            DimensionPair::TF => ('T', 'F'),
            DimensionPair::JP => ('J', 'P'),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            DimensionPair::EI => "EI",
            DimensionPair::SN => "SN",
            DimensionPair::TF => "TF",
            DimensionPair::JP => "JP",
        }
    }

    /// Parses a two-letter tag such as `EI` or `E/I`.
    pub fn from_tag(tag: &str) -> Option<DimensionPair> {
        let cleaned: String = tag
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_uppercase();
        match cleaned.as_str() {
            "EI" => Some(DimensionPair::EI),
            "SN" => Some(DimensionPair::SN),
            "TF" => Some(DimensionPair::TF),
            "JP" => Some(DimensionPair::JP),
            _ => None,
        }
    }

    /// Whether the given code is one of the two poles of this pair.
    pub fn contains(&self, code: char) -> bool {
        let (a, b) = self.letters();
        code == a || code == b
    }
}

/// One of the two answers offered by a forced-choice question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionOption {
    pub text: String,
    pub code: char,
}

/// A forced-choice question.
///
/// Invariant: the two option codes are the two letters of `pair`. This is
/// checked once at the load boundary; the scorer itself tolerates any input
/// and simply skips codes outside the known universe.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub id: u32,
    pub pair: DimensionPair,
    pub prompt: String,
    pub option_a: QuestionOption,
    pub option_b: QuestionOption,
}

impl Question {
    /// True when the option codes are exactly the two letters of the pair,
    /// in either order.
    pub fn options_consistent(&self) -> bool {
        let (a, b) = self.pair.letters();
        (self.option_a.code == a && self.option_b.code == b)
            || (self.option_a.code == b && self.option_b.code == a)
    }
}

/// The recorded selections of one attempt: question id to selected code.
pub type AnswerSet = HashMap<u32, char>;

/// One of the six interest categories of the ranked model, in the
/// enumeration order used for tie-breaking.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum InterestCategory {
    Realistic,
    Investigative,
    Artistic,
    Social,
    Enterprising,
    Conventional,
}

impl InterestCategory {
    pub const ALL: [InterestCategory; 6] = [
        InterestCategory::Realistic,
        InterestCategory::Investigative,
        InterestCategory::Artistic,
        InterestCategory::Social,
        InterestCategory::Enterprising,
        InterestCategory::Conventional,
    ];

    pub fn letter(&self) -> char {
        match self {
            InterestCategory::Realistic => 'R',
            InterestCategory::Investigative => 'I',
            InterestCategory::Artistic => 'A',
            InterestCategory::Social => 'S',
            InterestCategory::Enterprising => 'E',
            InterestCategory::Conventional => 'C',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InterestCategory::Realistic => "Realistic",
            InterestCategory::Investigative => "Investigative",
            InterestCategory::Artistic => "Artistic",
            InterestCategory::Social => "Social",
            InterestCategory::Enterprising => "Enterprising",
            InterestCategory::Conventional => "Conventional",
        }
    }

    pub fn from_letter(letter: char) -> Option<InterestCategory> {
        InterestCategory::ALL
            .iter()
            .find(|c| c.letter() == letter.to_ascii_uppercase())
            .copied()
    }
}

/// A question of the ranked model, rated on the fixed discrete scale.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RatedQuestion {
    pub id: u32,
    pub category: InterestCategory,
    pub prompt: String,
}

/// The ratings of one attempt: question id to value on the
/// `MIN_RATING..=MAX_RATING` scale.
pub type RatingSet = HashMap<u32, u32>;

// ******** Output data structures *********

/// Per-code running counts over a fixed letter universe.
///
/// All buckets start at zero and the presentation order is the universe
/// order, regardless of the order in which answers arrive.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoreTally {
    counts: Vec<(char, u32)>,
}

impl ScoreTally {
    pub(crate) fn new(universe: &[char]) -> ScoreTally {
        ScoreTally {
            counts: universe.iter().map(|&c| (c, 0)).collect(),
        }
    }

    /// Adds to the bucket for `code`. Returns false when the code is not in
    /// the universe, in which case nothing is recorded.
    pub(crate) fn add(&mut self, code: char, value: u32) -> bool {
        for entry in self.counts.iter_mut() {
            if entry.0 == code {
                entry.1 += value;
                return true;
            }
        }
        false
    }

    pub fn count(&self, code: char) -> u32 {
        self.counts
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// The buckets in universe order.
    pub fn counts(&self) -> &[(char, u32)] {
        &self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Result of scoring one paired-model attempt.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TypeResult {
    /// Four letters, one winner per pair, in `DimensionPair::ALL` order.
    pub code: String,
    pub tally: ScoreTally,
    /// Questions whose answer was recorded and counted.
    pub answered: usize,
    /// Questions that contributed nothing to the tally.
    pub unanswered: usize,
}

/// Result of scoring one ranked-model attempt.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct InterestResult {
    /// The top-N category letters, highest sum first.
    pub code: String,
    /// All six categories by descending sum, ties in enumeration order.
    pub ranking: Vec<(char, u32)>,
    pub tally: ScoreTally,
    pub rated: usize,
    pub unrated: usize,
}

// ********* Configuration **********

/// Which pole of a pair wins an exact tie.
///
/// The tie-break letter is an explicit configuration choice: the historical
/// behavior is to hand the tie to the first-listed letter of each pair
/// (E over I, S over N, T over F, J over P).
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieBreakMode {
    FavorFirst,
    FavorSecond,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ScoringRules {
    pub tie_break: TieBreakMode,
}

impl ScoringRules {
    pub const DEFAULT_RULES: ScoringRules = ScoringRules {
        tie_break: TieBreakMode::FavorFirst,
    };
}

/// Errors raised when assembling an attempt. Scoring itself never fails.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum QuizErrors {
    /// An answer was recorded for a question id that is not in the store.
    UnknownQuestion { id: u32 },
    /// An answer code is not one of the two poles of the question's pair.
    CodeOutsidePair { id: u32, code: char },
    /// A question's option codes do not match its dimension pair.
    InconsistentOptions { id: u32 },
}

impl Error for QuizErrors {}

impl Display for QuizErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizErrors::UnknownQuestion { id } => {
                write!(f, "QuizError: no question with id {}", id)
            }
            QuizErrors::CodeOutsidePair { id, code } => {
                write!(f, "QuizError: code {:?} outside the pair of question {}", code, id)
            }
            QuizErrors::InconsistentOptions { id } => {
                write!(f, "QuizError: option codes of question {} do not match its pair", id)
            }
        }
    }
}
