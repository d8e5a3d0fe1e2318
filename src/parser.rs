use crate::record::Record;

/// Parse the program CSV into records.
///
/// The first line is the header row and is split on commas as-is. Data rows
/// go through [`split_row`], which understands double-quoted fields. Values
/// are zipped with the headers by position and trimmed; a short row fills
/// the remaining headers with empty strings and surplus values are dropped.
pub fn parse_program_csv(text: &str) -> Vec<Record> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines = normalized.trim().split('\n');
    let headers: Vec<&str> = match lines.next() {
        Some(line) => line.split(',').collect(),
        None => return Vec::new(),
    };

    let records: Vec<Record> = lines
        .map(|line| {
            let values = split_row(line);
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (*h, values.get(i).map(|v| v.trim()).unwrap_or("")))
                .collect()
        })
        .collect();

    log::debug!(
        "Parsed {} rows against {} header fields",
        records.len(),
        headers.len()
    );
    records
}

/// Split one data row on commas that are not inside double quotes.
///
/// A quote only switches quoting on or off and is never part of the value,
/// so `""` inside a quoted field contributes nothing.
pub fn split_row(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    values.push(current);
    values
}
