//! Renderer-neutral operation output.
//!
//! A [`Report`] is either a table of display strings or a block of text.
//! Renderers decide how to draw them; nothing renderer-specific lives here.

/// Output of one operation invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Tabular output.
    Table(Table),
    /// Free-form text output.
    Text(String),
}

impl Report {
    /// Build a table report.
    pub fn table<C, S, R>(columns: C, rows: R) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<String>>,
    {
        Self::Table(Table::new(columns, rows))
    }

    /// Build a text report.
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text(body.into())
    }

    /// The table, if this is a table report.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Text(_) => None,
        }
    }

    /// The body, if this is a text report.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Table(_) => None,
            Self::Text(body) => Some(body),
        }
    }
}

/// Ordered columns and rows of display strings.
///
/// Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from column names and rows.
    pub fn new<C, S, R>(columns: C, rows: R) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let rows: Vec<Vec<String>> = rows.into_iter().collect();
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self { columns, rows }
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the named column, top to bottom. `None` if there is no such
    /// column.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index).map(String::as_str)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_lookup() {
        let table = Table::new(["Index", "Token"], [
            vec!["1".to_string(), "Hi".to_string()],
            vec!["2".to_string(), "!".to_string()],
        ]);

        assert_eq!(table.column("Token"), Some(vec!["Hi", "!"]));
        assert_eq!(table.column("Lemma"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn variant_accessors() {
        let text = Report::text("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_table().is_none());

        let table = Report::table(["A"], Vec::<Vec<String>>::new());
        assert!(table.as_table().is_some_and(Table::is_empty));
        assert!(table.as_text().is_none());
    }
}
