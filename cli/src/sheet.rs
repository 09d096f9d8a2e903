//! Code entries loaded from a CSV-exported spreadsheet.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Columns every sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 2] = ["Number", "Code"];

/// Default category for rows without one.
pub const DEFAULT_CATEGORY: &str = "Custom";

/// Default description for rows without one.
pub const DEFAULT_DESCRIPTION: &str = "Custom HTML/CSS code from Google Sheets";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors while loading a sheet.
#[derive(Error, Debug)]
pub enum SheetError {
    /// Download failed
    #[error("Failed to download sheet: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Sheet download returned HTTP {0}")]
    Status(u16),

    /// Malformed CSV
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Required columns are absent
    #[error("Sheet is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// One row of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeEntry {
    /// Unique row key
    pub number: String,
    /// HTML/CSS source
    pub code: String,
    /// Display title
    pub title: String,
    /// Grouping category
    pub category: String,
    /// Free-form description
    pub description: String,
}

impl CodeEntry {
    /// Title used when the sheet has no title for this row.
    pub fn default_title(number: &str) -> String {
        format!("{} - Custom Code", number)
    }
}

struct Columns {
    number: usize,
    code: usize,
    title: Option<usize>,
    category: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, SheetError> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SheetError::MissingColumns(missing));
        }

        Ok(Self {
            number: find("Number").unwrap_or_default(),
            code: find("Code").unwrap_or_default(),
            title: find("Title"),
            category: find("Category"),
            description: find("Description"),
        })
    }
}

fn cell(record: &csv::StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse sheet CSV into entries.
///
/// Rows without a `Number` are skipped; duplicate numbers keep the first row.
pub fn parse_csv(text: &str) -> Result<Vec<CodeEntry>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::resolve(reader.headers()?)?;
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for record in reader.records() {
        let record = record?;
        let Some(number) = cell(&record, Some(columns.number)) else {
            log::debug!("Skipping sheet row without a Number");
            continue;
        };
        if !seen.insert(number.clone()) {
            log::debug!("Skipping duplicate sheet row {}", number);
            continue;
        }

        entries.push(CodeEntry {
            code: record
                .get(columns.code)
                .map(str::to_string)
                .unwrap_or_default(),
            title: cell(&record, columns.title)
                .unwrap_or_else(|| CodeEntry::default_title(&number)),
            category: cell(&record, columns.category)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            description: cell(&record, columns.description)
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            number,
        });
    }

    Ok(entries)
}

/// Download a sheet's CSV export and parse it.
pub async fn load(url: &str) -> Result<Vec<CodeEntry>, SheetError> {
    let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;

    log::info!("Downloading sheet from {}", url);
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(SheetError::Status(response.status().as_u16()));
    }

    let text = response.text().await?;
    let entries = parse_csv(&text)?;
    log::info!("Loaded {} sheet row(s)", entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_sheet() {
        let csv = "Number,Code,Title,Category,Description\n\
                   1,<p>a</p>,First,Cards,Card layout\n\
                   2,\"<div class=\"\"x\"\">b</div>\",Second,Forms,Form\n";
        let entries = parse_csv(csv).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "First");
        assert_eq!(entries[1].code, "<div class=\"x\">b</div>");
        assert_eq!(entries[1].category, "Forms");
    }

    #[test]
    fn test_optional_columns_defaulted() {
        let entries = parse_csv("Number,Code\n7,<p>x</p>\n").unwrap();
        assert_eq!(
            entries[0],
            CodeEntry {
                number: "7".into(),
                code: "<p>x</p>".into(),
                title: "7 - Custom Code".into(),
                category: "Custom".into(),
                description: "Custom HTML/CSS code from Google Sheets".into(),
            }
        );
    }

    #[test]
    fn test_blank_optional_cells_defaulted() {
        let entries = parse_csv("Number,Code,Title\n3,<p>x</p>,\n").unwrap();
        assert_eq!(entries[0].title, "3 - Custom Code");
    }

    #[test]
    fn test_missing_required_columns() {
        let err = parse_csv("Number,Title\n1,x\n").unwrap_err();
        match err {
            SheetError::MissingColumns(cols) => assert_eq!(cols, vec!["Code"]),
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
        assert!(parse_csv("Title\nx\n")
            .unwrap_err()
            .to_string()
            .contains("Number, Code"));
    }

    #[test]
    fn test_duplicates_keep_first() {
        let entries = parse_csv("Number,Code\n1,first\n2,other\n1,second\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].code, "first");
    }

    #[test]
    fn test_rows_without_number_skipped() {
        let entries = parse_csv("Number,Code\n,orphan\n5,kept\n").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].number, "5");
    }
}
