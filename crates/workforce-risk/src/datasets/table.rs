use std::collections::HashMap;
use std::io::Read;

/// Header form used for every column lookup: `Performance Rating`, `performance_rating`
/// and `PERFORMANCE_RATING` all become `performance_rating`.
pub fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join("_");
    collapsed.to_ascii_lowercase()
}

/// Empty cells and the usual spreadsheet spellings of "no value".
pub fn is_null_token(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "nan" | "na" | "n/a" | "null" | "none"
    )
}

/// CSV export with normalized headers.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    columns: HashMap<String, usize>,
    rows: Vec<csv::StringRecord>,
}

impl Table {
    pub(crate) fn read<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut columns = HashMap::new();
        for (index, header) in csv_reader.headers()?.iter().enumerate() {
            columns.entry(normalize_header(header)).or_insert(index);
        }

        let rows = csv_reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { columns, rows })
    }

    pub(crate) fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = TableRow<'_>> + '_ {
        self.rows.iter().map(move |record| TableRow {
            columns: &self.columns,
            record,
        })
    }
}

/// One data row; lookups use normalized header names.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TableRow<'a> {
    columns: &'a HashMap<String, usize>,
    record: &'a csv::StringRecord,
}

impl<'a> TableRow<'a> {
    /// Cell text, or `None` when the column is absent or the cell holds a null token.
    pub(crate) fn get(&self, column: &str) -> Option<&'a str> {
        let (columns, record) = (self.columns, self.record);
        let index = *columns.get(column)?;
        record
            .get(index)
            .filter(|value| !is_null_token(value))
    }

    pub(crate) fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(parse_number)
    }

    pub(crate) fn columns(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        let (columns, record) = (self.columns, self.record);
        columns.iter().map(move |(name, index)| {
            (
                name.as_str(),
                record.get(*index).filter(|value| !is_null_token(value)),
            )
        })
    }
}

/// Finite number or nothing; unparseable text is treated as missing.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    parsed.is_finite().then_some(parsed)
}
