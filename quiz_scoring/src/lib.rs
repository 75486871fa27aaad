mod config;
pub mod builder;
pub mod manual;
pub mod quick_start;

use log::{debug, info, warn};

pub use crate::config::*;

/// Scores one attempt of the paired (forced-choice) model.
///
/// Arguments:
/// * `questions` the ordered question store
/// * `answers` the recorded selections, possibly incomplete
/// * `rules` the scoring rules (currently the tie-break choice)
///
/// Guarantees: deterministic for a given answer set, never fails. The tally
/// total equals the number of counted answers; unanswered questions and
/// codes outside the known universe contribute nothing.
pub fn run_type_scoring(
    questions: &[Question],
    answers: &AnswerSet,
    rules: &ScoringRules,
) -> TypeResult {
    info!(
        "run_type_scoring: processing {:?} questions, {:?} recorded answers, rules: {:?}",
        questions.len(),
        answers.len(),
        rules
    );

    let mut tally = ScoreTally::new(&TYPE_CODES);
    let mut answered: usize = 0;
    for q in questions.iter() {
        if let Some(&code) = answers.get(&q.id) {
            if tally.add(code, 1) {
                answered += 1;
            } else {
                warn!(
                    "run_type_scoring: question {}: code {:?} is not a known bucket, skipping",
                    q.id, code
                );
            }
        }
    }
    debug!("run_type_scoring: tally: {:?}", tally);

    let mut code = String::with_capacity(DimensionPair::ALL.len());
    for pair in DimensionPair::ALL.iter() {
        code.push(pair_winner(&tally, *pair, rules.tie_break));
    }
    info!("run_type_scoring: result code: {}", code);

    let unanswered = questions.len() - answered;
    TypeResult {
        code,
        tally,
        answered,
        unanswered,
    }
}

// The winning letter of one pair. An exact tie goes to the pole selected by
// the tie-break mode.
fn pair_winner(tally: &ScoreTally, pair: DimensionPair, tie_break: TieBreakMode) -> char {
    let (first, second) = pair.letters();
    let (a, b) = (tally.count(first), tally.count(second));
    debug!("pair_winner: {:?}: {}={} {}={}", pair, first, a, second, b);
    if a > b {
        first
    } else if b > a {
        second
    } else {
        match tie_break {
            TieBreakMode::FavorFirst => first,
            TieBreakMode::FavorSecond => second,
        }
    }
}

/// Scores one attempt of the ranked (interest) model.
///
/// Sums the ratings per category with no normalization, then ranks the six
/// categories by descending sum. Ties keep the category enumeration order
/// (the sort is stable). Ratings outside the fixed scale are clamped into
/// `MIN_RATING..=MAX_RATING`. Never fails.
pub fn run_interest_ranking(
    questions: &[RatedQuestion],
    ratings: &RatingSet,
    top_n: usize,
) -> InterestResult {
    info!(
        "run_interest_ranking: processing {:?} questions, {:?} ratings, top_n: {}",
        questions.len(),
        ratings.len(),
        top_n
    );

    let universe: Vec<char> = InterestCategory::ALL.iter().map(|c| c.letter()).collect();
    let mut tally = ScoreTally::new(&universe);
    let mut rated: usize = 0;
    for q in questions.iter() {
        if let Some(&value) = ratings.get(&q.id) {
            let clamped = value.clamp(MIN_RATING, MAX_RATING);
            if clamped != value {
                warn!(
                    "run_interest_ranking: question {}: rating {} outside {}..={}, clamped to {}",
                    q.id, value, MIN_RATING, MAX_RATING, clamped
                );
            }
            tally.add(q.category.letter(), clamped);
            rated += 1;
        }
    }
    debug!("run_interest_ranking: tally: {:?}", tally);

    let mut ranking: Vec<(char, u32)> = tally.counts().to_vec();
    // Stable sort: equal sums keep the enumeration order.
    ranking.sort_by(|a, b| b.1.cmp(&a.1));
    let code: String = ranking.iter().take(top_n).map(|(c, _)| c).collect();
    info!("run_interest_ranking: ranking: {:?} code: {}", ranking, code);

    let unrated = questions.len() - rated;
    InterestResult {
        code,
        ranking,
        tally,
        rated,
        unrated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn question(id: u32, pair: DimensionPair) -> Question {
        let (a, b) = pair.letters();
        Question {
            id,
            pair,
            prompt: format!("Question {}", id),
            option_a: QuestionOption {
                text: format!("option {}", a),
                code: a,
            },
            option_b: QuestionOption {
                text: format!("option {}", b),
                code: b,
            },
        }
    }

    fn small_store() -> Vec<Question> {
        vec![
            question(1, DimensionPair::EI),
            question(2, DimensionPair::EI),
            question(3, DimensionPair::EI),
            question(4, DimensionPair::SN),
            question(5, DimensionPair::TF),
            question(6, DimensionPair::JP),
        ]
    }

    #[test]
    fn majority_wins_the_pair() {
        let questions = small_store();
        let answers: AnswerSet =
            HashMap::from([(1, 'E'), (2, 'I'), (3, 'E'), (4, 'N'), (5, 'F'), (6, 'J')]);
        let res = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        assert_eq!(res.tally.count('E'), 2);
        assert_eq!(res.tally.count('I'), 1);
        assert_eq!(res.code, "ENFJ");
        assert_eq!(res.answered, 6);
        assert_eq!(res.unanswered, 0);
    }

    #[test]
    fn empty_answers_resolve_to_default_winners() {
        let questions = small_store();
        let answers: AnswerSet = HashMap::new();
        let res = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        assert_eq!(res.code, "ESTJ");
        assert_eq!(res.tally.total(), 0);
        assert_eq!(res.unanswered, questions.len());

        let flipped = ScoringRules {
            tie_break: TieBreakMode::FavorSecond,
        };
        let res2 = run_type_scoring(&questions, &answers, &flipped);
        assert_eq!(res2.code, "INFP");
    }

    #[test]
    fn code_always_has_one_letter_per_pair() {
        let questions = small_store();
        let answers: AnswerSet = HashMap::from([(1, 'I'), (4, 'S')]);
        let res = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        assert_eq!(res.code.len(), 4);
        for (c, pair) in res.code.chars().zip(DimensionPair::ALL.iter()) {
            assert!(pair.contains(c), "{} not in {:?}", c, pair);
        }
    }

    #[test]
    fn tally_total_matches_counted_answers() {
        let questions = small_store();
        let answers: AnswerSet = HashMap::from([(1, 'E'), (4, 'S'), (5, 'T')]);
        let res = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        assert_eq!(res.tally.total(), 3);
        assert_eq!(res.answered, 3);
        assert_eq!(res.unanswered, 3);
    }

    #[test]
    fn unknown_codes_are_skipped() {
        let questions = small_store();
        let answers: AnswerSet = HashMap::from([(1, 'X'), (2, 'E')]);
        let res = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        assert_eq!(res.tally.total(), 1);
        assert_eq!(res.answered, 1);
        assert_eq!(res.unanswered, 5);
    }

    #[test]
    fn scoring_is_idempotent() {
        let questions = small_store();
        let answers: AnswerSet = HashMap::from([(1, 'E'), (2, 'I'), (4, 'N')]);
        let res1 = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        let res2 = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        assert_eq!(res1, res2);
    }

    fn rated(id: u32, category: InterestCategory) -> RatedQuestion {
        RatedQuestion {
            id,
            category,
            prompt: format!("Statement {}", id),
        }
    }

    #[test]
    fn interest_sums_and_ranks() {
        let questions = vec![
            rated(1, InterestCategory::Realistic),
            rated(2, InterestCategory::Artistic),
            rated(3, InterestCategory::Artistic),
            rated(4, InterestCategory::Social),
        ];
        let ratings: RatingSet = HashMap::from([(1, 2), (2, 5), (3, 4), (4, 3)]);
        let res = run_interest_ranking(&questions, &ratings, 3);
        assert_eq!(res.tally.count('A'), 9);
        assert_eq!(res.code, "ASR");
        assert_eq!(res.ranking[0], ('A', 9));
        assert_eq!(res.rated, 4);
        assert_eq!(res.unrated, 0);
    }

    #[test]
    fn interest_ties_keep_enumeration_order() {
        let questions = vec![
            rated(1, InterestCategory::Conventional),
            rated(2, InterestCategory::Realistic),
        ];
        let ratings: RatingSet = HashMap::from([(1, 3), (2, 3)]);
        let res = run_interest_ranking(&questions, &ratings, 2);
        // R enumerates before C, so the tie resolves to RC.
        assert_eq!(res.code, "RC");
    }

    #[test]
    fn interest_ratings_are_clamped() {
        let questions = vec![rated(1, InterestCategory::Social)];
        let ratings: RatingSet = HashMap::from([(1, 12)]);
        let res = run_interest_ranking(&questions, &ratings, 1);
        assert_eq!(res.tally.count('S'), MAX_RATING);
        assert_eq!(res.code, "S");
    }
}
