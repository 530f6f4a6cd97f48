//! # CSV Codec
//!
//! Bulk card import/export as delimited text.
//!
//! ## File Format
//!
//! ```csv
//! front,back,tag,hint
//! apple,quả táo,english,"trái cây"
//! "a,b",ok,,
//! ```
//!
//! Encoding quotes a field only when it contains a comma, a double quote,
//! or a line break (internal quotes doubled); everything else is emitted
//! bare. Decoding is a lenient RFC4180-style read: flexible row lengths,
//! unquoted fields trimmed, blank lines skipped, `\n` and `\r\n` both
//! accepted. Neither direction can fail — a malformed row is read as far
//! as it goes, and import counts bad rows instead of aborting the batch.

use log::info;

use super::models::{Card, Deck};
use super::tags::normalize_tag;

/// Column order for card CSV files, matching the current card shape.
pub const CSV_COLUMNS: [&str; 4] = ["front", "back", "tag", "hint"];

/// Aggregate result of a CSV import: rows turned into cards vs. rows
/// dropped for missing required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added: usize,
    pub skipped: usize,
}

/// Encode a deck's cards as CSV: header row, then one row per card in
/// display order. No trailing newline.
pub fn deck_to_csv(deck: &Deck) -> String {
    let mut lines = Vec::with_capacity(deck.cards.len() + 1);
    lines.push(CSV_COLUMNS.join(","));

    for card in &deck.cards {
        let row = [
            escape_field(&card.front),
            escape_field(&card.back),
            escape_field(&card.tag),
            escape_field(&card.hint),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Quote a field only when it needs it.
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Decode CSV text into rows of fields. Total over any input string:
/// malformed quoting reads as far as it can, rows may differ in length,
/// blank lines are dropped.
///
/// Quoted field content is read literally — only unquoted fields are
/// trimmed — so card text that legitimately starts or ends with
/// whitespace survives an import unchanged.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let chars: Vec<char> = text.chars().collect();
    let mut rows = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while matches!(chars.get(i).copied(), Some('\r' | '\n')) {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let mut row = Vec::new();
        loop {
            row.push(read_field(&chars, &mut i));
            match chars.get(i).copied() {
                Some(',') => i += 1,
                Some('\r') => {
                    i += 1;
                    if chars.get(i) == Some(&'\n') {
                        i += 1;
                    }
                    break;
                }
                Some('\n') => {
                    i += 1;
                    break;
                }
                None => break,
                // Stray text after a quoted field: read it as another field.
                Some(_) => {}
            }
        }
        rows.push(row);
    }

    rows
}

/// Read one field starting at `*i`, advancing past it. A field opening
/// with a double quote reads literally until a closing quote not doubled
/// into an escaped literal quote (or end of input); anything else reads
/// up to the next comma or line break and is trimmed.
fn read_field(chars: &[char], i: &mut usize) -> String {
    let mut field = String::new();

    if chars.get(*i) == Some(&'"') {
        *i += 1;
        while *i < chars.len() {
            if chars[*i] == '"' {
                if chars.get(*i + 1) == Some(&'"') {
                    field.push('"');
                    *i += 2;
                    continue;
                }
                *i += 1;
                break;
            }
            field.push(chars[*i]);
            *i += 1;
        }
        // Padding between the closing quote and the delimiter.
        while matches!(chars.get(*i).copied(), Some(' ' | '\t')) {
            *i += 1;
        }
        field
    } else {
        while *i < chars.len() && chars[*i] != ',' && chars[*i] != '\n' && chars[*i] != '\r' {
            field.push(chars[*i]);
            *i += 1;
        }
        field.trim().to_string()
    }
}

/// Parse `csv_text` and append one card per valid data row to `deck`.
///
/// The first row is treated as a header (and skipped) when any of its
/// lowercased cells is a recognized column name. A data row missing the
/// front or back text (after trim) is counted as skipped; nothing about a
/// bad row can abort the rest of the batch.
pub fn import_cards(deck: &mut Deck, csv_text: &str) -> ImportOutcome {
    let rows = parse_csv(csv_text);
    if rows.is_empty() {
        return ImportOutcome { added: 0, skipped: 0 };
    }

    let has_header = rows[0]
        .iter()
        .any(|cell| CSV_COLUMNS.contains(&cell.to_lowercase().as_str()));
    let data_rows = if has_header { &rows[1..] } else { &rows[..] };

    let mut added = 0;
    let mut skipped = 0;

    for row in data_rows {
        let front = cell(row, 0);
        let back = cell(row, 1);
        if front.is_empty() || back.is_empty() {
            skipped += 1;
            continue;
        }

        let tag = normalize_tag(&cell(row, 2));
        let hint = cell(row, 3);
        deck.cards.push(Card::new(front, back, tag, hint));
        added += 1;
    }

    info!(
        "📄 CSV: Imported {} cards into deck '{}' ({} rows skipped)",
        added, deck.name, skipped
    );

    ImportOutcome { added, skipped }
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).map(|s| s.trim().to_string()).unwrap_or_default()
}

/// The downloadable import template, in the same grammar `import_cards`
/// accepts.
pub fn sample_csv() -> String {
    [
        CSV_COLUMNS.join(","),
        "apple,quả táo,english,\"trái cây\"".to_string(),
        "book,quyển sách,english,\"đồ vật\"".to_string(),
        "\"thank you\",cảm ơn,phrase,\"lịch sự\"".to_string(),
    ]
    .join("\n")
}
