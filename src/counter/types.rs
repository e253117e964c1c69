use serde::ser::{Serialize, SerializeMap, Serializer};

/// A word and how often it occurs in a resource.
///
/// Serializes as a single-entry JSON object, `{"<word>": <count>}`, which is
/// the shape the search endpoint returns for each requested word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl Serialize for WordCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.word, &self.count)?;
        map.end()
    }
}
