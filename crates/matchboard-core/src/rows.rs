// Headerless CSV reading shared by the schedule, rankings, and team loaders.
//
// The input files are hand-edited exports, so rows are read flexibly: any
// number of columns, cells trimmed, blank lines dropped.

use std::io::Read;

use tracing::warn;

/// Read every non-blank CSV line as a list of trimmed cells.
pub(crate) fn read_rows<R: Read>(rdr: R) -> Result<Vec<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                if record.iter().all(|cell| cell.is_empty()) {
                    continue;
                }
                rows.push(record.iter().map(str::to_string).collect());
            }
            Err(e) => {
                if e.is_io_error() {
                    return Err(e);
                }
                warn!("skipping malformed CSV line: {}", e);
            }
        }
    }
    Ok(rows)
}
