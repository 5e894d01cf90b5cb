//! Spreadsheet loader
//!
//! Reads the survey sheet from disk, normalizes its headers and converts each
//! row into a [`HappinessRecord`].
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read with calamine,
//! taking the first worksheet unless a sheet name is configured. `.csv` files
//! are read with the csv crate. In both cases the first row is the header.
//!
//! Cells holding a spreadsheet error (`#N/A`, `#DIV/0!`, ...) or one of the
//! usual missing-value markers (`NA`, `N/A`, `null`, `NaN`, ...) load as blanks.

use calamine::{open_workbook_auto, Data, Reader};
use std::path::{Path, PathBuf};

use super::columns::{
    normalize_headers, ColumnIndex, Indicator, COUNTRY_COLUMN, LADDER_COLUMN, YEAR_COLUMN,
};
use super::error::{DataError, DataResult};
use super::table::{HappinessRecord, HappinessTable};

/// A single cell as read from the sheet
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }

    fn display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::from(s.as_str()),
            Data::Error(_) => Cell::Empty,
            other => Cell::from(other.to_string().as_str()),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || MISSING_VALUE_TOKENS.contains(&trimmed) {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }
}

const EMPTY_CELL: &Cell = &Cell::Empty;

/// Text markers read as a blank cell, the same set dataframe readers treat as NaN
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header row plus data rows, before typing
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// Loads the happiness spreadsheet from a fixed path
#[derive(Debug, Clone)]
pub struct SpreadsheetLoader {
    path: PathBuf,
    sheet: Option<String>,
}

impl SpreadsheetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet: None,
        }
    }

    /// Read a named worksheet instead of the first one
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, normalize and type the whole sheet
    pub fn load(&self) -> DataResult<HappinessTable> {
        let raw = self.read_raw()?;
        tracing::debug!(
            path = %self.path.display(),
            columns = raw.headers.len(),
            rows = raw.rows.len(),
            "Read raw sheet"
        );

        let table = build_table(&self.path, raw)?;
        tracing::info!(
            path = %self.path.display(),
            rows = table.len(),
            latest_year = table.latest_year(),
            "Loaded happiness dataset"
        );
        Ok(table)
    }

    /// Read the sheet without typing the rows
    pub fn read_raw(&self) -> DataResult<RawSheet> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => self.read_workbook(),
            Some("csv") => read_csv(&self.path),
            _ => Err(DataError::UnsupportedFormat(self.path.clone())),
        }
    }

    fn read_workbook(&self) -> DataResult<RawSheet> {
        let mut workbook = open_workbook_auto(&self.path)?;

        let range = match &self.sheet {
            Some(name) => workbook.worksheet_range(name)?,
            None => workbook.worksheet_range_at(0).ok_or_else(|| {
                DataError::Spreadsheet(format!("{} has no worksheets", self.path.display()))
            })??,
        };

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default();
        let rows: Vec<Vec<Cell>> = rows
            .map(|row| row.iter().map(Cell::from).collect())
            .collect();

        Ok(RawSheet { headers, rows })
    }
}

fn read_csv(path: &Path) -> DataResult<RawSheet> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    read_csv_from(reader)
}

/// Parse CSV text into a raw sheet
pub fn parse_csv_str(data: &str) -> DataResult<RawSheet> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());
    read_csv_from(reader)
}

fn read_csv_from<R: std::io::Read>(mut reader: csv::Reader<R>) -> DataResult<RawSheet> {
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: Vec<Cell> = record.iter().map(Cell::from).collect();
        rows.push(row);
    }

    Ok(RawSheet { headers, rows })
}

/// Normalize headers and convert raw rows into a table.
///
/// Rows where every cell is blank are skipped. Blank or missing-marker numeric
/// cells load as `None`; anything else that fails to parse is an error.
pub fn build_table(source: &Path, raw: RawSheet) -> DataResult<HappinessTable> {
    let columns = normalize_headers(&raw.headers);
    let index = ColumnIndex::new(&columns);

    let country_col = index.require(COUNTRY_COLUMN)?;
    let year_col = index.require(YEAR_COLUMN)?;
    let ladder_col = index.require(LADDER_COLUMN)?;
    let mut indicator_cols = [0usize; 6];
    for (slot, indicator) in indicator_cols.iter_mut().zip(Indicator::ALL) {
        *slot = index.require(indicator.column())?;
    }

    let mut records = Vec::with_capacity(raw.rows.len());
    for (idx, row) in raw.rows.iter().enumerate() {
        if row.iter().all(Cell::is_empty) {
            continue;
        }
        // Sheet row number, counting the header as row 1
        let line = idx + 2;
        let cell = |col: usize| row.get(col).unwrap_or(EMPTY_CELL);

        let country = parse_country(cell(country_col), line)?;
        let year = parse_year(cell(year_col), line)?;
        let ladder = parse_float(cell(ladder_col), line, LADDER_COLUMN)?;

        let mut values = [None; 6];
        for ((value, col), indicator) in values.iter_mut().zip(indicator_cols).zip(Indicator::ALL) {
            *value = parse_float(cell(col), line, indicator.column())?;
        }

        records.push(HappinessRecord::new(country, year, ladder).indicators(values));
    }

    HappinessTable::new(source, columns, records)
}

fn parse_country(cell: &Cell, row: usize) -> DataResult<String> {
    let name = cell.display().trim().to_string();
    if name.is_empty() {
        return Err(DataError::InvalidValue {
            row,
            column: COUNTRY_COLUMN.to_string(),
            value: String::new(),
        });
    }
    Ok(name)
}

fn parse_year(cell: &Cell, row: usize) -> DataResult<i32> {
    let invalid = || DataError::InvalidValue {
        row,
        column: YEAR_COLUMN.to_string(),
        value: cell.display(),
    };

    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        Cell::Empty => return Err(invalid()),
    };

    if !value.is_finite() || value.fract() != 0.0 {
        return Err(invalid());
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(invalid());
    }
    Ok(value as i32)
}

fn parse_float(cell: &Cell, row: usize, column: &str) -> DataResult<Option<f64>> {
    match cell {
        Cell::Empty => Ok(None),
        Cell::Number(n) => Ok(Some(*n)),
        Cell::Text(s) if s.trim().is_empty() => Ok(None),
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| DataError::InvalidValue {
                row,
                column: column.to_string(),
                value: s.clone(),
            }),
    }
}
