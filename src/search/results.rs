use serde::ser::{Serialize, SerializeMap, Serializer};
use crate::core::types::BookRecord;

pub const NOT_FOUND_MESSAGE: &str = "Book not found";

/// Outcome of one lookup, serialized as one JSON line.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Found(BookRecord),
    NotFound,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

impl From<Option<BookRecord>> for SearchResult {
    fn from(record: Option<BookRecord>) -> Self {
        match record {
            Some(record) => SearchResult::Found(record),
            None => SearchResult::NotFound,
        }
    }
}

impl Serialize for SearchResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SearchResult::Found(record) => record.serialize(serializer),
            SearchResult::NotFound => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", NOT_FOUND_MESSAGE)?;
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn found_serializes_in_field_order() {
        let result = SearchResult::Found(
            BookRecord::new("111", "Dune")
                .with_author("Herbert")
                .with_category("SciFi")
                .with_price(9.99)
                .with_quantity(5),
        );
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"isbn":"111","name":"Dune","author":"Herbert","category":"SciFi","price":9.99,"quantity":5}"#
        );
    }

    #[test]
    fn not_found_serializes_error_marker() {
        assert_eq!(
            serde_json::to_string(&SearchResult::NotFound).unwrap(),
            r#"{"error":"Book not found"}"#
        );
    }

    #[test]
    fn from_option() {
        assert!(SearchResult::from(Some(BookRecord::new("1", "A"))).is_found());
        assert_eq!(SearchResult::from(None), SearchResult::NotFound);
    }
}
