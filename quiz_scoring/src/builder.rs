pub use crate::config::*;
use crate::run_type_scoring;

/// Assembles one attempt of the paired model.
///
/// The builder holds the question store and the answers recorded so far.
/// Recording is incremental and an answer may be revised at any time;
/// `clear` starts a fresh attempt over the same questions.
///
/// ```
/// pub use quiz_scoring::builder::AttemptBuilder;
/// pub use quiz_scoring::{DimensionPair, Question, QuestionOption, ScoringRules};
/// # use quiz_scoring::QuizErrors;
///
/// let questions = vec![Question {
///     id: 1,
///     pair: DimensionPair::EI,
///     prompt: "After a long week, you would rather".to_string(),
///     option_a: QuestionOption { text: "meet people".to_string(), code: 'E' },
///     option_b: QuestionOption { text: "stay in".to_string(), code: 'I' },
/// }];
///
/// let mut attempt = AttemptBuilder::new(&ScoringRules::DEFAULT_RULES)?
///     .questions(&questions)?;
/// attempt.record(1, 'E')?;
/// let result = attempt.score();
/// assert_eq!(result.code.len(), 4);
///
/// # Ok::<(), QuizErrors>(())
/// ```
pub struct AttemptBuilder {
    pub(crate) _rules: ScoringRules,
    pub(crate) _questions: Vec<Question>,
    pub(crate) _answers: AnswerSet,
}

impl AttemptBuilder {
    pub fn new(rules: &ScoringRules) -> Result<AttemptBuilder, QuizErrors> {
        Ok(AttemptBuilder {
            _rules: rules.clone(),
            _questions: Vec::new(),
            _answers: AnswerSet::new(),
        })
    }

    /// Installs the question store for this attempt.
    ///
    /// This is the validation boundary for the option-code invariant: a
    /// question whose option codes do not match its pair is rejected here.
    pub fn questions(self, questions: &[Question]) -> Result<AttemptBuilder, QuizErrors> {
        for q in questions.iter() {
            if !q.options_consistent() {
                return Err(QuizErrors::InconsistentOptions { id: q.id });
            }
        }
        Ok(AttemptBuilder {
            _rules: self._rules,
            _questions: questions.to_vec(),
            _answers: AnswerSet::new(),
        })
    }

    /// Records the selected code for one question, overwriting any previous
    /// selection for the same id.
    pub fn record(&mut self, id: u32, code: char) -> Result<(), QuizErrors> {
        let q = self
            ._questions
            .iter()
            .find(|q| q.id == id)
            .ok_or(QuizErrors::UnknownQuestion { id })?;
        if !q.pair.contains(code) {
            return Err(QuizErrors::CodeOutsidePair { id, code });
        }
        self._answers.insert(id, code);
        Ok(())
    }

    /// Discards the recorded answers and starts a fresh attempt.
    pub fn clear(&mut self) {
        self._answers.clear();
    }

    pub fn answers(&self) -> &AnswerSet {
        &self._answers
    }

    pub fn score(&self) -> TypeResult {
        run_type_scoring(&self._questions, &self._answers, &self._rules)
    }
}
