use crate::value::CellValue;

/// One record of a table: column names mapped to values, in column order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TabularRecord {
    fields: Vec<(String, CellValue)>,
}

impl TabularRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from `(column, value)` pairs.
    ///
    /// A repeated column name keeps its first position and takes the last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CellValue>,
    {
        let mut record = Self::new();
        for (name, value) in pairs {
            record.insert(name, value);
        }
        record
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<CellValue>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
