use crate::token::PlaceholderToken;

/// Which source produced a replacement entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReplacementSection {
    /// Derived from the selected table record.
    Record,
    /// Derived from caller-supplied metadata.
    Metadata,
}

/// Resolved token to replacement text table.
///
/// Entries are applied in insertion order, record entries before metadata
/// entries. Inserting a token already present in a section overwrites the value
/// in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplacementMap {
    record: Vec<(PlaceholderToken, String)>,
    metadata: Vec<(PlaceholderToken, String)>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        section: ReplacementSection,
        token: PlaceholderToken,
        value: impl Into<String>,
    ) {
        let value = value.into();
        let entries = match section {
            ReplacementSection::Record => &mut self.record,
            ReplacementSection::Metadata => &mut self.metadata,
        };
        match entries.iter_mut().find(|(existing, _)| *existing == token) {
            Some((_, slot)) => *slot = value,
            None => entries.push((token, value)),
        }
    }

    /// Looks up a token, preferring the record section.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.iter()
            .find(|(existing, _)| existing.as_str() == token)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.get(token).is_some()
    }

    /// All entries in application order.
    pub fn iter(&self) -> impl Iterator<Item = (&PlaceholderToken, &str)> {
        self.record
            .iter()
            .chain(self.metadata.iter())
            .map(|(token, value)| (token, value.as_str()))
    }

    pub fn section(
        &self,
        section: ReplacementSection,
    ) -> impl Iterator<Item = (&PlaceholderToken, &str)> {
        let entries = match section {
            ReplacementSection::Record => &self.record,
            ReplacementSection::Metadata => &self.metadata,
        };
        entries.iter().map(|(token, value)| (token, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.record.len() + self.metadata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record.is_empty() && self.metadata.is_empty()
    }

    /// Runs one substitution pass over `text`.
    ///
    /// Each entry replaces every occurrence of its token in the text produced by
    /// the entries before it. Returns the new text and the number of
    /// occurrences replaced.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut current = text.to_string();
        let mut hits = 0usize;
        for (token, value) in self.iter() {
            let count = current.matches(token.as_str()).count();
            if count == 0 {
                continue;
            }
            hits += count;
            current = current.replace(token.as_str(), value);
        }
        (current, hits)
    }

    /// Per-token occurrence counts for one substitution pass over `text`.
    pub fn occurrences(&self, text: &str) -> Vec<(PlaceholderToken, usize)> {
        let mut current = text.to_string();
        let mut counts = Vec::new();
        for (token, value) in self.iter() {
            let count = current.matches(token.as_str()).count();
            if count == 0 {
                continue;
            }
            counts.push((token.clone(), count));
            current = current.replace(token.as_str(), value);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(name: &str) -> PlaceholderToken {
        PlaceholderToken::for_field(name)
    }

    #[test]
    fn record_entries_apply_before_metadata() {
        let mut map = ReplacementMap::new();
        map.insert(ReplacementSection::Metadata, token("Doctor"), "Dra. Ruiz");
        map.insert(ReplacementSection::Record, token("Doctor"), "from record");
        assert_eq!(map.get("{{Doctor}}"), Some("from record"));
        let (text, hits) = map.apply("Firma: {{Doctor}}");
        assert_eq!(text, "Firma: from record");
        assert_eq!(hits, 1);
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = ReplacementMap::new();
        map.insert(ReplacementSection::Record, token("A"), "1");
        map.insert(ReplacementSection::Record, token("B"), "2");
        map.insert(ReplacementSection::Record, token("A"), "3");
        let entries: Vec<(&str, &str)> = map.iter().map(|(t, v)| (t.as_str(), v)).collect();
        assert_eq!(entries, vec![("{{A}}", "3"), ("{{B}}", "2")]);
    }

    #[test]
    fn apply_replaces_every_occurrence_and_counts() {
        let mut map = ReplacementMap::new();
        map.insert(ReplacementSection::Record, token("X"), "x");
        let (text, hits) = map.apply("{{X}}-{{X}}-{{Y}}");
        assert_eq!(text, "x-x-{{Y}}");
        assert_eq!(hits, 2);
        assert_eq!(map.occurrences("{{X}}{{X}}"), vec![(token("X"), 2)]);
    }

    #[test]
    fn apply_is_case_sensitive_and_literal() {
        let mut map = ReplacementMap::new();
        map.insert(ReplacementSection::Record, token("Hora"), "10:30");
        let (text, hits) = map.apply("{{hora}} {{ Hora }} {{Hora}}");
        assert_eq!(text, "{{hora}} {{ Hora }} 10:30");
        assert_eq!(hits, 1);
    }
}
