//! Request bodies

use std::collections::BTreeMap;

use serde::Serialize;

use crate::query::ApiQuery;

/// Body for fetching a sub-resource list of one parent record
///
/// The parent id goes under a caller-chosen field name, e.g.
///
/// ```json
/// { "query": { ... }, "key_path": "disk", "server_id": "server-3f2a" }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SubDataRequest<'a> {
    pub query: &'a ApiQuery,
    pub key_path: &'a str,
    #[serde(flatten)]
    pub parent: BTreeMap<&'a str, &'a str>,
}

impl<'a> SubDataRequest<'a> {
    pub fn new(query: &'a ApiQuery, key_path: &'a str, id_key: &'a str, id: &'a str) -> Self {
        Self {
            query,
            key_path,
            parent: BTreeMap::from([(id_key, id)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sub_data_body_shape() {
        let query = ApiQuery::paged(2, 15);
        let body = SubDataRequest::new(&query, "data.disks", "server_id", "server-1");

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "query": { "page": { "start": 16, "limit": 15 } },
                "key_path": "data.disks",
                "server_id": "server-1",
            })
        );
    }
}
