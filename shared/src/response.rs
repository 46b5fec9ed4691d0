//! Response types

use serde::{Deserialize, Serialize};

use crate::query::get_all_page;

/// One page of a list endpoint
///
/// ```json
/// { "results": [ ... ], "total_count": 42 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub results: Vec<T>,
    pub total_count: u64,
}

impl<T> ListResponse<T> {
    pub fn new(results: Vec<T>, total_count: u64) -> Self {
        Self {
            results,
            total_count,
        }
    }

    /// Page count for the given page size (at least 1)
    pub fn all_page(&self, page_size: u64) -> u64 {
        get_all_page(self.total_count, page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_list_response() {
        let resp: ListResponse<serde_json::Value> = serde_json::from_value(json!({
            "results": [{ "name": "a" }, { "name": "b" }],
            "total_count": 31,
        }))
        .unwrap();

        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.all_page(15), 3);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let resp = ListResponse::<String>::new(Vec::new(), 0);
        assert_eq!(resp.all_page(15), 1);
    }
}
