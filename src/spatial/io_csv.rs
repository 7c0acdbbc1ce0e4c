// Primitives for reading voter positions from CSV files.

use std::fs::File;

use crate::spatial::*;

pub fn read_csv_positions(path: &str, cfs: &FileSource) -> SResult<Vec<Voter>> {
    let x_idx = cfs.x_column_index()?;
    let y_idx = cfs.y_column_index()?;
    let has_headers = cfs.has_headers.unwrap_or(true);
    // Line numbers are reported as in a text editor, header included.
    let row_offset = if has_headers { 2 } else { 1 };

    let mut res: Vec<Voter> = Vec::new();
    for (idx, line_r) in get_records(path, has_headers)?.enumerate() {
        let lineno = idx + row_offset;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_positions: lineno: {:?} row: {:?}", lineno, line);
        let x = read_coordinate(&line, x_idx, lineno)?;
        let y = read_coordinate(&line, y_idx, lineno)?;
        res.push(Voter::new(x, y));
    }
    info!("read_csv_positions: {:?} voters in {:?}", res.len(), path);
    Ok(res)
}

fn get_records(path: &str, has_headers: bool) -> SResult<csv::StringRecordsIntoIter<File>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    Ok(rdr.into_records())
}

fn read_coordinate(line: &csv::StringRecord, col: usize, lineno: usize) -> SResult<f64> {
    let value = line.get(col).context(CsvLineTooShortSnafu { lineno })?;
    value
        .parse::<f64>()
        .context(CsvNumberSnafu { lineno, value })
}
