/// What the host declared a category column to hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnKind {
    /// Category or task name.
    #[default]
    Label,
    /// Any date role.
    Date,
}

/// A text column supplied by the host (labels and dates).
///
/// Empty cells stand for missing values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryColumn {
    pub display_name: String,
    pub kind: ColumnKind,
    pub values: Vec<String>,
}

impl CategoryColumn {
    pub fn new<I, S>(display_name: impl Into<String>, kind: ColumnKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            display_name: display_name.into(),
            kind,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn label<I, S>(display_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(display_name, ColumnKind::Label, values)
    }

    pub fn date<I, S>(display_name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(display_name, ColumnKind::Date, values)
    }

    /// Cell at `row`, `None` when the column is short or the cell is blank.
    pub fn get(&self, row: usize) -> Option<&str> {
        self.values
            .get(row)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }
}

/// A numeric column supplied by the host (progress).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureColumn {
    pub display_name: String,
    pub values: Vec<Option<f64>>,
}

impl MeasureColumn {
    pub fn new(display_name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            display_name: display_name.into(),
            values,
        }
    }

    /// Number at `row`; NaN and short columns both read as `None`.
    pub fn get(&self, row: usize) -> Option<f64> {
        self.values
            .get(row)
            .copied()
            .flatten()
            .filter(|v| !v.is_nan())
    }
}

/// The tabular data view handed over by the host on every update.
///
/// Category columns are positional: `[category?, task, start, end,
/// planned start?, planned end?, milestone?]`. The leading category column
/// is present only when at least two [`ColumnKind::Label`] columns were
/// supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataView {
    pub categories: Vec<CategoryColumn>,
    pub values: Vec<MeasureColumn>,
}

impl DataView {
    /// Number of rows: the longest category column.
    pub fn row_count(&self) -> usize {
        self.categories.iter().map(CategoryColumn::len).max().unwrap_or(0)
    }

    /// Number of label-like columns the host supplied.
    pub fn label_column_count(&self) -> usize {
        self.categories
            .iter()
            .filter(|c| c.kind == ColumnKind::Label)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.values.is_empty() || self.row_count() == 0
    }
}

/// Named positions of every category column, resolved once per update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    pub category: Option<usize>,
    pub label: usize,
    pub actual_start: usize,
    pub actual_end: usize,
    pub planned_start: usize,
    pub planned_end: usize,
    pub milestone: usize,
}

impl ColumnSchema {
    /// Resolve positions from the number of label-like columns.
    ///
    /// With fewer than two there is no category column and every later role
    /// shifts left by one.
    pub fn resolve(label_columns: usize) -> Self {
        let shift = usize::from(label_columns >= 2);
        Self {
            category: (shift == 1).then_some(0),
            label: shift,
            actual_start: 1 + shift,
            actual_end: 2 + shift,
            planned_start: 3 + shift,
            planned_end: 4 + shift,
            milestone: 5 + shift,
        }
    }

    pub fn has_category(&self) -> bool {
        self.category.is_some()
    }
}
