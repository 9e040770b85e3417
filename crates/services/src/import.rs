//! Preview of a vocabulary CSV before it is uploaded for import.

use crate::error::ImportError;

pub const REQUIRED_COLUMNS: [&str; 3] = ["term", "definition", "language"];
pub const PREVIEW_ROWS: usize = 8;

const TERM: &[&str] = &["term"];
const DEFINITION: &[&str] = &["definition", "deinition"];
const LANGUAGE: &[&str] = &["language", "lang"];
const DEFINITION_VI: &[&str] = &["definitionvi", "definition_vi", "meaningvi", "meaning_vi"];
const EXAMPLES: &[&str] = &["examples", "example"];
const PHONETIC: &[&str] = &["phonetic", "ipa"];
const PART_OF_SPEECH: &[&str] = &["partofspeech", "part_of_speech", "pos"];
const TOPIC_IDS: &[&str] = &["topicids", "topic_ids", "topics"];
const STATUS: &[&str] = &["status"];

/// One data row mapped onto the known columns; absent cells are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewRow {
    pub term: String,
    pub definition: String,
    pub language: String,
    pub definition_vi: String,
    pub examples: String,
    pub phonetic: String,
    pub part_of_speech: String,
    pub topic_ids: String,
    pub status: String,
}

/// Headers, the first rows and the row count of an import file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportPreview {
    pub headers: Vec<String>,
    pub rows: Vec<PreviewRow>,
    pub total_rows: usize,
    pub missing_columns: Vec<String>,
}

impl ImportPreview {
    /// Whether the file may be sent to the API.
    #[must_use]
    pub fn can_import(&self) -> bool {
        self.missing_columns.is_empty() && self.total_rows > 0
    }

    /// Missing required columns as an error.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::MissingColumns` listing them.
    pub fn require_columns(&self) -> Result<(), ImportError> {
        if self.missing_columns.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingColumns(self.missing_columns.clone()))
        }
    }
}

/// Build a preview from an uploaded file.
///
/// # Errors
///
/// Returns `ImportError::NotCsv` for other extensions, `Encoding` when the
/// bytes are not UTF-8 and `Empty` when no non-blank row exists.
pub fn preview(file_name: &str, bytes: &[u8]) -> Result<ImportPreview, ImportError> {
    if !file_name.trim().to_ascii_lowercase().ends_with(".csv") {
        return Err(ImportError::NotCsv);
    }
    let text = std::str::from_utf8(bytes).map_err(|_| ImportError::Encoding)?;
    preview_text(text)
}

/// # Errors
///
/// Returns `ImportError::Empty` when no non-blank row exists.
pub fn preview_text(text: &str) -> Result<ImportPreview, ImportError> {
    let rows = parse_csv(text, detect_delimiter(text));
    let Some((header_row, data)) = rows.split_first() else {
        return Err(ImportError::Empty);
    };

    let headers: Vec<String> = header_row.iter().map(|header| normalize_header(header)).collect();
    let column = |aliases: &[&str]| {
        aliases
            .iter()
            .find_map(|alias| headers.iter().rposition(|header| header == alias))
    };
    let columns = [
        column(TERM),
        column(DEFINITION),
        column(LANGUAGE),
        column(DEFINITION_VI),
        column(EXAMPLES),
        column(PHONETIC),
        column(PART_OF_SPEECH),
        column(TOPIC_IDS),
        column(STATUS),
    ];

    let rows = data
        .iter()
        .take(PREVIEW_ROWS)
        .map(|values| {
            let [term, definition, language, definition_vi, examples, phonetic, part_of_speech, topic_ids, status] =
                columns.map(|index| cell(values, index));
            PreviewRow {
                term,
                definition,
                language,
                definition_vi,
                examples,
                phonetic,
                part_of_speech,
                topic_ids,
                status,
            }
        })
        .collect();

    let missing_columns = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|header| header == *required))
        .map(|required| (*required).to_string())
        .collect();

    Ok(ImportPreview {
        headers,
        rows,
        total_rows: data.len(),
        missing_columns,
    })
}

fn cell(values: &[String], index: Option<usize>) -> String {
    index
        .and_then(|index| values.get(index))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Pick `;` or tab over `,` only when the first line has more of them.
#[must_use]
pub fn detect_delimiter(text: &str) -> char {
    let first_line = text.split(['\r', '\n']).next().unwrap_or_default();
    let count = |delimiter: char| first_line.matches(delimiter).count();
    let (commas, semicolons, tabs) = (count(','), count(';'), count('\t'));

    if semicolons > commas && semicolons >= tabs {
        ';'
    } else if tabs > commas && tabs > semicolons {
        '\t'
    } else {
        ','
    }
}

/// Quote-aware split into rows; `""` inside quotes is a literal quote and
/// rows whose cells are all blank are dropped.
#[must_use]
pub fn parse_csv(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => row.push(std::mem::take(&mut field)),
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                end_row(&mut row, &mut rows);
            }
            c => field.push(c),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        end_row(&mut row, &mut rows);
    }

    rows
}

fn end_row(row: &mut Vec<String>, rows: &mut Vec<Vec<String>>) {
    if row.iter().any(|value| !value.trim().is_empty()) {
        rows.push(std::mem::take(row));
    } else {
        row.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_delimiters() {
        assert_eq!(detect_delimiter("term,definition,language"), ',');
        assert_eq!(detect_delimiter("term;definition;language"), ';');
        assert_eq!(detect_delimiter("term\tdefinition\tlanguage"), '\t');
        assert_eq!(detect_delimiter("term;definition,language"), ',');
        assert_eq!(detect_delimiter(""), ',');
    }

    #[test]
    fn parses_quotes_and_crlf() {
        let rows = parse_csv("a,\"b, \"\"c\"\"\"\r\n\r\n,  \r\n\"multi\nline\",x", ',');
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b, \"c\"".to_string()],
                vec!["multi\nline".to_string(), "x".to_string()],
            ]
        );
    }

    #[test]
    fn preview_maps_aliases_and_bom() {
        let text = "\u{feff}Term;Deinition;Language;IPA;Topics\n\
                    cat;a small animal;en;/kæt/;1,2\n\
                    dog;\"loyal; friendly\";en;;\n";
        let preview = preview_text(text).unwrap();

        assert_eq!(preview.headers[0], "term");
        assert_eq!(preview.total_rows, 2);
        assert_eq!(preview.missing_columns, vec!["definition".to_string()]);
        assert!(!preview.can_import());
        assert_eq!(preview.rows[0].definition, "a small animal");
        assert_eq!(preview.rows[0].phonetic, "/kæt/");
        assert_eq!(preview.rows[0].topic_ids, "1,2");
        assert_eq!(preview.rows[1].definition, "loyal; friendly");
        assert_eq!(preview.rows[1].status, "");
    }

    #[test]
    fn preview_caps_rows_and_counts_all() {
        let mut text = String::from("term,definition,language\n");
        for n in 0..12 {
            text.push_str(&format!("w{n},d{n},en\n"));
        }
        let preview = preview_text(&text).unwrap();
        assert_eq!(preview.rows.len(), PREVIEW_ROWS);
        assert_eq!(preview.total_rows, 12);
        assert!(preview.can_import());
        assert!(preview.require_columns().is_ok());
    }

    #[test]
    fn rejects_empty_and_non_csv() {
        assert_eq!(preview("words.csv", b"\n  \n"), Err(ImportError::Empty));
        assert_eq!(preview("words.txt", b"term"), Err(ImportError::NotCsv));
        assert_eq!(preview("words.CSV", &[0xff, 0xfe]), Err(ImportError::Encoding));
    }
}
