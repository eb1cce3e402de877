use serde::Deserialize;
use serde_json::Value;

/// Handle for a session opened on the server.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionInfo {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

/// Result of one PGQL statement: column names plus untyped row values.
///
/// Values stay as JSON; PGQL results mix strings, numbers and nulls and the
/// demo client only renders them.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResultSet {
    #[serde(rename = "colNames", default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl QueryResultSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_result() {
        let json = r#"{
            "colNames": ["label", "num_edges"],
            "rows": [["transfer", 1200], ["owns", 44]]
        }"#;

        let results: QueryResultSet =
            serde_json::from_str(json).expect("Failed to parse result set test JSON");
        assert_eq!(results.columns, vec!["label", "num_edges"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results.rows[0][0], Value::from("transfer"));
    }

    #[test]
    fn test_empty_result_set() {
        let results: QueryResultSet = serde_json::from_str("{}").unwrap();
        assert!(results.is_empty());
        assert!(results.columns.is_empty());
    }

    #[test]
    fn test_parse_session_info() {
        let session: SessionInfo =
            serde_json::from_str(r#"{"sessionId": "0ab12-ff"}"#).unwrap();
        assert_eq!(session.session_id, "0ab12-ff");
    }
}
