/*!

# Quick start

This example runs a small forced-choice quiz end to end from a spreadsheet
export.

**Preparing the questions** Create a CSV file `questions.csv` with one row
per question. The `dimension_pair` column names the letter pair the
question belongs to and the two option columns carry the answer texts with
their single-letter codes:

```text
id,dimension_pair,question,option_a_text,option_a_code,option_b_text,option_b_code
1,EI,After a long week you would rather,meet people,E,stay in,I
2,SN,When learning something new you prefer,worked examples,S,the big picture,N
3,TF,When a friend is upset you first,look for a fix,T,listen,F
4,JP,Before a trip you usually,plan each day,J,decide on the spot,P
```

**Taking the quiz** Run `typetally` with the question file. With no
recorded answers, it opens the interactive menu:

```bash
typetally --questions questions.csv
```

```text
[1] Take the quiz   [2] See my result   [3] Reading guide   [4] About   [q] Quit
>
```

Answer each question with `a` or `b`. The result page prints the four
letter code, its description and the per-pair tallies.

**Scoring a recorded attempt** Answers collected elsewhere can be scored
without the interactive session. The answer file has two columns, the
question id and the selected code:

```text
id,code
1,E
2,N
3,F
4,J
```

```bash
typetally --questions questions.csv --answers answers.csv --out stdout --image result.png
```

This prints a JSON summary of the attempt and writes a PNG chart of the
per-pair tallies next to it. See the [manual](../manual/index.html) for the
other input formats and for the interest-inventory model.

*/
