// The interactive session: a small page loop over the terminal, used when
// no recorded answer file is given. Generic over the reader and writer so
// the whole flow can be driven from a script.

use std::fs;
use std::io::{BufRead, Write};

use log::info;
use snafu::prelude::*;

use quiz_scoring::*;

use crate::app::descriptors::DescriptorBook;
use crate::app::render;
use crate::app::*;

const MENU: &str = "\
[1] Take the quiz   [2] See my result   [3] Reading guide   [4] About   [q] Quit";

pub fn run_session<R, W>(
    input: &mut R,
    out: &mut W,
    questions: &[Question],
    rules: &ScoringRules,
    book: &DescriptorBook,
    image_out: &Option<String>,
) -> AppResult<()>
where
    R: BufRead,
    W: Write,
{
    let mut answers: AnswerSet = AnswerSet::new();
    loop {
        writeln!(out).context(TerminalIoSnafu {})?;
        writeln!(out, "{}", MENU).context(TerminalIoSnafu {})?;
        write!(out, "> ").context(TerminalIoSnafu {})?;
        out.flush().context(TerminalIoSnafu {})?;
        let line = match read_line(input)? {
            None => break,
            Some(l) => l,
        };
        match line.trim() {
            "q" | "Q" => break,
            "1" => {
                // Each pass through the quiz page is a fresh attempt.
                answers.clear();
                if !run_quiz(input, out, questions, &mut answers)? {
                    break;
                }
            }
            "2" => show_result(out, questions, &answers, rules, book, image_out)?,
            "3" => show_guide(out)?,
            "4" => show_info(out)?,
            "" => {}
            other => {
                writeln!(out, "Please pick 1-4, or q to quit (got {:?})", other)
                    .context(TerminalIoSnafu {})?;
            }
        }
    }
    writeln!(out, "Bye.").context(TerminalIoSnafu {})?;
    Ok(())
}

// Returns false when the input ended or the user quit mid-quiz.
fn run_quiz<R, W>(
    input: &mut R,
    out: &mut W,
    questions: &[Question],
    answers: &mut AnswerSet,
) -> AppResult<bool>
where
    R: BufRead,
    W: Write,
{
    if questions.is_empty() {
        writeln!(out, "The question file is empty, nothing to ask.")
            .context(TerminalIoSnafu {})?;
        return Ok(true);
    }
    let mut idx: usize = 0;
    while idx < questions.len() {
        let q = &questions[idx];
        writeln!(out).context(TerminalIoSnafu {})?;
        writeln!(out, "{}/{}. {}", idx + 1, questions.len(), q.prompt)
            .context(TerminalIoSnafu {})?;
        writeln!(out, "  a) {}", q.option_a.text).context(TerminalIoSnafu {})?;
        writeln!(out, "  b) {}", q.option_b.text).context(TerminalIoSnafu {})?;
        write!(out, "a/b (m for the menu): ").context(TerminalIoSnafu {})?;
        out.flush().context(TerminalIoSnafu {})?;
        let line = match read_line(input)? {
            None => return Ok(false),
            Some(l) => l,
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "a" => {
                answers.insert(q.id, q.option_a.code);
                idx += 1;
            }
            "b" => {
                answers.insert(q.id, q.option_b.code);
                idx += 1;
            }
            "m" => return Ok(true),
            "q" => return Ok(false),
            _ => {
                writeln!(out, "Please answer a or b.").context(TerminalIoSnafu {})?;
            }
        }
    }
    writeln!(out, "Done. Pick 2 on the menu to see your result.")
        .context(TerminalIoSnafu {})?;
    Ok(true)
}

fn show_result<W: Write>(
    out: &mut W,
    questions: &[Question],
    answers: &AnswerSet,
    rules: &ScoringRules,
    book: &DescriptorBook,
    image_out: &Option<String>,
) -> AppResult<()> {
    if answers.is_empty() {
        writeln!(out, "No attempt recorded yet. Pick 1 to take the quiz.")
            .context(TerminalIoSnafu {})?;
        return Ok(());
    }
    let result = run_type_scoring(questions, answers, rules);
    writeln!(out).context(TerminalIoSnafu {})?;
    writeln!(out, "Your result: {}", result.code).context(TerminalIoSnafu {})?;
    for pair in DimensionPair::ALL.iter() {
        let (a, b) = pair.letters();
        writeln!(
            out,
            "  {}: {} {} / {} {}",
            pair.tag(),
            a,
            result.tally.count(a),
            b,
            result.tally.count(b)
        )
        .context(TerminalIoSnafu {})?;
    }
    if result.unanswered > 0 {
        writeln!(
            out,
            "({} of {} questions were left unanswered; the result uses the rest.)",
            result.unanswered,
            questions.len()
        )
        .context(TerminalIoSnafu {})?;
    }

    let d = book.lookup_type(&result.code);
    writeln!(out).context(TerminalIoSnafu {})?;
    writeln!(out, "{}", d.summary).context(TerminalIoSnafu {})?;
    if !d.majors.is_empty() {
        writeln!(out, "Suggested fields of study: {}", d.majors.join(", "))
            .context(TerminalIoSnafu {})?;
    }
    if !d.careers.is_empty() {
        writeln!(out, "Suggested careers: {}", d.careers.join(", "))
            .context(TerminalIoSnafu {})?;
    }
    for note in &d.notes {
        writeln!(out, "  - {}", note).context(TerminalIoSnafu {})?;
    }

    if let Some(path) = image_out {
        let png = render::render_type_chart(&result)?;
        fs::write(path, png).context(OpeningFileSnafu { path: path.clone() })?;
        info!("Wrote chart to {:?}", path);
        writeln!(out, "Chart written to {}", path).context(TerminalIoSnafu {})?;
    }
    Ok(())
}

fn show_guide<W: Write>(out: &mut W) -> AppResult<()> {
    writeln!(
        out,
        "\
Each answer counts one point for the letter behind the chosen option.
Every dimension opposes two letters (E/I, S/N, T/F, J/P); the letter with
more points wins its dimension, and the four winners spell the code.
A tied dimension goes to its first-listed letter unless the tie-break
setting says otherwise. Skipped questions simply count for neither side."
    )
    .context(TerminalIoSnafu {})?;
    Ok(())
}

fn show_info<W: Write>(out: &mut W) -> AppResult<()> {
    writeln!(
        out,
        "\
This quiz is a self-reflection aid for exploring study and career
directions. It is not a clinical or diagnostic instrument, and the
suggested fields are starting points for research, not prescriptions."
    )
    .context(TerminalIoSnafu {})?;
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> AppResult<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context(TerminalIoSnafu {})?;
    if n == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_questions() -> Vec<Question> {
        vec![
            Question {
                id: 1,
                pair: DimensionPair::EI,
                prompt: "After a long week you would rather".to_string(),
                option_a: QuestionOption {
                    text: "meet people".to_string(),
                    code: 'E',
                },
                option_b: QuestionOption {
                    text: "stay in".to_string(),
                    code: 'I',
                },
            },
            Question {
                id: 2,
                pair: DimensionPair::SN,
                prompt: "When learning something new you prefer".to_string(),
                option_a: QuestionOption {
                    text: "worked examples".to_string(),
                    code: 'S',
                },
                option_b: QuestionOption {
                    text: "the big picture".to_string(),
                    code: 'N',
                },
            },
        ]
    }

    fn drive(script: &str, questions: &[Question]) -> String {
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out: Vec<u8> = Vec::new();
        let book = DescriptorBook::with_supplement(&None).unwrap();
        run_session(
            &mut input,
            &mut out,
            questions,
            &ScoringRules::DEFAULT_RULES,
            &book,
            &None,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn full_attempt_shows_a_result() {
        let transcript = drive("1\na\nb\n2\nq\n", &sample_questions());
        assert!(transcript.contains("Done."));
        // E and N answered, the other dimensions fall to their first letters.
        assert!(transcript.contains("Your result: ENTJ"));
        assert!(transcript.contains("EI: E 1 / I 0"));
    }

    #[test]
    fn result_before_any_attempt_is_a_hint() {
        let transcript = drive("2\nq\n", &sample_questions());
        assert!(transcript.contains("No attempt recorded yet"));
    }

    #[test]
    fn quiz_abandoned_with_no_answers_shows_the_hint() {
        let transcript = drive("1\nm\n2\nq\n", &sample_questions());
        assert!(transcript.contains("No attempt recorded yet"));
        assert!(!transcript.contains("Your result:"));
    }

    #[test]
    fn abandoned_quiz_yields_a_partial_result() {
        let transcript = drive("1\na\nm\n2\nq\n", &sample_questions());
        assert!(transcript.contains("1 of 2 questions were left unanswered"));
    }

    #[test]
    fn unknown_menu_entries_are_rejected() {
        let transcript = drive("7\nq\n", &sample_questions());
        assert!(transcript.contains("Please pick 1-4"));
    }

    #[test]
    fn input_ending_mid_quiz_is_not_an_error() {
        let transcript = drive("1\na\n", &sample_questions());
        assert!(transcript.contains("Bye."));
    }

    #[test]
    fn bad_answers_do_not_advance() {
        let transcript = drive("1\nx\na\nb\nq\n", &sample_questions());
        assert!(transcript.contains("Please answer a or b."));
        assert!(transcript.contains("Done."));
    }
}
