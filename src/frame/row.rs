use crate::Value;

/// One positional slice across the columns of a table.
///
/// A row is an ordered mapping from column name to value. Rows are derived
/// from tables (see [`Table::row`](crate::Table::row)) or assembled by hand
/// and combined into a table with
/// [`DataTable::from_rows`](crate::DataTable::from_rows); tables never store
/// rows themselves.
///
/// # Example
///
/// ```
/// use colframe::{Row, Value};
///
/// let row: Row = [("x", Value::Int64(1)), ("y", Value::from("a"))]
///     .into_iter()
///     .collect();
///
/// assert_eq!(row.get("y"), Some(&Value::from("a")));
/// assert_eq!(row.names().collect::<Vec<_>>(), vec!["x", "y"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets `name` to `value`, keeping the original position of an existing
    /// entry and appending a new one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for Row
where
    N: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.insert(name, value.into());
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut row: Row = [("a", 1), ("b", 2)].into_iter().collect();
        row.insert("a", Value::Int64(10));

        assert_eq!(row.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(row.get("a"), Some(&Value::Int64(10)));
    }

    #[test]
    fn test_missing_name() {
        let row: Row = [("a", 1)].into_iter().collect();
        assert_eq!(row.get("z"), None);
        assert!(!row.contains("z"));
    }
}
