//! Parser for stock adjustment uploads
//!
//! One adjustment per line: `productId,change,location`. Whitespace around
//! fields is ignored and blank lines are skipped. Line numbers count only
//! non-blank lines, starting at 1.

use contracts::domain::a003_item::Item;

use super::error::StockingError;

/// Parse the whole upload, failing on the first malformed line
pub fn parse_lines(text: &str) -> Result<Vec<Item>, StockingError> {
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut items = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = index + 1;

        // Record positions can point at the blank lines skipped before it
        let content = || {
            let start = record.position().map(|p| p.byte() as usize).unwrap_or(0);
            text.get(start..)
                .map(|rest| rest.trim_start_matches(['\r', '\n']))
                .and_then(|rest| rest.lines().next())
                .unwrap_or_default()
                .to_string()
        };

        if record.len() != 3 {
            return Err(StockingError::LineFormat {
                line,
                content: content(),
            });
        }

        let change = &record[1];
        let quantity = change
            .parse::<i32>()
            .map_err(|_| StockingError::InvalidQuantity {
                line,
                value: change.to_string(),
                content: content(),
            })?;

        items.push(Item::new(&record[0], &record[2], quantity));
    }

    Ok(items)
}
