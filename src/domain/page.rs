use serde::{Deserialize, Serialize};

/// One server-delivered batch of records plus pagination metadata.
///
/// The API paginates Laravel-style: `data` holds the records for the page
/// that was actually served, `current_page`/`last_page` describe where that
/// page sits. Consumers only ever need these three fields; anything else in
/// the envelope is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub last_page: u32,
}

impl<T> Page<T> {
    /// Whether pages remain after the one this envelope describes.
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(current: u32, last: u32) -> Page<u32> {
        Page {
            data: Vec::new(),
            current_page: current,
            last_page: last,
        }
    }

    #[test]
    fn test_has_more_before_last_page() {
        assert!(page(1, 3).has_more());
    }

    #[test]
    fn test_no_more_on_last_page() {
        assert!(!page(3, 3).has_more());
    }

    #[test]
    fn test_no_more_past_last_page() {
        // A server that shrinks its result set can report current > last
        assert!(!page(4, 3).has_more());
    }

    #[test]
    fn test_deserializes_pagination_fields() {
        let json = r#"{"data":[10,20],"current_page":2,"last_page":5,"total":42}"#;
        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.current_page, 2);
        assert!(page.has_more());
    }
}
