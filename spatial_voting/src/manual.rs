/*!

This is the long-form manual for `spatial_voting` and `spatialvote`.

## The model

Voters and candidates are points in a plane. Every voter ranks all the
candidates by increasing Euclidean distance: the closest candidate is the
first choice, the farthest one is the last choice. When two candidates are at
exactly the same distance from a voter, the candidate listed first is ranked
first.

The same ballots are then counted with four rules. Candidates are reported by
their index in the list of candidates, and displayed as `Candidate 1`,
`Candidate 2`, ... (the display number is the index plus one).

### Plurality

Each ballot counts for its first choice. The candidate with the most votes
wins; in case of equality, the candidate listed first wins.

### Instant-runoff (IRV)

Each ballot counts for its first choice still in the race. If a candidate has
strictly more than half of the ballots, it wins. Otherwise the candidate with
the fewest votes is eliminated (the first one listed in case of equality) and
the ballots are counted again. The last candidate left wins even without a
majority. Every round is reported with its tally, the candidates still running
and the eliminated candidate.

### Borda count

With `n` candidates, a first choice is worth `n - 1` points, a second choice
`n - 2` points, down to 0 points for the last choice. The highest score wins,
the candidate listed first in case of equality.

### Condorcet

A candidate wins if, for every other candidate, more ballots rank it above
that candidate than the other way around. A tie in a single matchup is enough
to disqualify a candidate. There may be no such candidate (for example with a
cycle of preferences), and there is no Condorcet result without voters.

## Scenario files

The `spatialvote` program reads a scenario in JSON:

```text
{
  "outputSettings": {
    "contestName": "Two candidates",
    "contestDate": "2024-11-05",
    "contestJurisdiction": "Plane",
    "outputDirectory": "out"
  },
  "candidates": [
    { "id": 0, "x": 100.0, "y": 200.0 },
    { "x": 300.0, "y": 200.0 }
  ],
  "voters": [
    { "x": 120.0, "y": 180.0 }
  ],
  "voterFileSources": [
    { "provider": "csv", "filePath": "voters.csv", "xColumnIndex": 1, "yColumnIndex": 2 }
  ]
}
```

Only `outputSettings.contestName` and `candidates` are mandatory. A candidate
without an `id` gets its position in the list as id.

### csv

Voter positions, one voter per row. The columns holding the coordinates are
given with `xColumnIndex` and `yColumnIndex` (starting at 1, defaults 1 and
2). The first row is a header unless `hasHeaders` is `false`.

```text
x,y
120.5,180
310,220.25
```

Relative paths are resolved from the directory of the scenario file. The
`--input` flag replaces all the voter sources by a single CSV file with the
default settings.

## Output

The summary is a JSON document with the scenario (`config`) and one entry per
rule (`results`). A rule without a result (no voters) is `null`, except for
Condorcet which reports `"exists": false`. It is printed, or written to the
file given with `--out` (or to `outputDirectory/summary.json` when the scenario
sets an output directory). With `--reference`, the summary is compared with an
expected summary and the differences are displayed.

 */
