/*!

This is the long-form manual for `quiz_scoring` and `typetally`.

## Models

Two scoring models are supported:

* the **paired** model (`--model type`, the default): forced-choice
  questions, each attached to one of the four complementary letter pairs
  `E/I`, `S/N`, `T/F`, `J/P`. Every answer adds one count to the selected
  letter's bucket. The result code is four letters, one winner per pair.
  An exact tie within a pair goes to the configured default letter
  (`--tie-break first`, the historical behavior, or `--tie-break second`).

* the **ranked** model (`--model interest`): statements rated on a 1 to 5
  scale, each attached to one of the six interest categories `R`, `I`, `A`,
  `S`, `E`, `C`. Ratings are summed per category with no normalization and
  the categories are ranked by descending sum. Ties keep the category
  enumeration order. The result code is the top-N letters (`--top`,
  default 3).

Both scorers are total functions: missing answers are skipped, the result
degrades to a partial or all-zero tally and the caller is warned.

## Input formats

The following input types are supported with the `--input-type` flag:

### `csv` (default)

Pre-flattened question rows. The required columns are found by name in the
header; extra columns are ignored and artifact `Unnamed` columns produced
by spreadsheet exports are stripped.

```text
id,dimension_pair,question,option_a_text,option_a_code,option_b_text,option_b_code
1,EI,After a long week you would rather,meet people,E,stay in,I
2,SN,When learning something new you prefer,worked examples,S,the big picture,N
```

A missing required column is a configuration error and the message names
the missing columns. An empty `question` cell is filled with a
`Question {id}` placeholder.

### `csv_wide` and `xlsx_wide`

One column per letter `E,I,S,N,T,F,J,P` and one row per pair group. Each
row is flattened into up to four questions, one per pair; a pair with an
empty cell on either side yields no question from that row. Sequential ids
are assigned in flattening order.

```text
E,I,S,N,T,F,J,P
meet people,stay in,worked examples,the big picture,look for a fix,listen,plan ahead,improvise
```

The `xlsx_wide` variant reads the first worksheet of an Excel workbook, or
the one named with `--excel-worksheet-name`.

### `csv_interest`

Statements for the ranked model, with columns `id,category,question`. The
category is a letter (`R`, `I`, `A`, `S`, `E`, `C`) or a full category
name.

Question files may be encoded in UTF-8 (with or without a BOM) or in
EUC-KR/CP949; both encodings are tried in that order.

## Recorded answers

`--answers` points to a two-column file: `id,code` for the paired model and
`id,rating` for the ranked model. When it is given, the interactive session
is skipped and the program scores directly, writes the JSON summary
(`--out`, a path or `stdout`) and optionally the PNG chart (`--image`).
With `--reference`, the produced summary is compared against an expected
summary in JSON format and any difference is reported as an error.

## Descriptors

The built-in descriptor table covers the sixteen four-letter codes and the
six interest categories. A code absent from the table renders with a
placeholder description rather than failing. `--descriptors` names an
optional two-column supplement file (`code,note`) whose notes are appended
to the matching descriptor; a missing supplement file is not an error.

*/
