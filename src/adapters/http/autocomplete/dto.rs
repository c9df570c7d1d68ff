//! HTTP DTOs for the autocomplete endpoint.

use serde::{Deserialize, Serialize};

/// Suggestion request for the line under the cursor.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    pub code: String,
    /// Character offset into `code`.
    pub cursor_position: usize,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autocomplete_request_reads_camel_case_fields() {
        let json = r#"{"code": "import ", "cursorPosition": 7, "language": "python"}"#;
        let req: AutocompleteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.cursor_position, 7);
        assert_eq!(req.language, "python");
    }

    #[test]
    fn negative_cursor_is_rejected() {
        let json = r#"{"code": "", "cursorPosition": -1, "language": "python"}"#;
        assert!(serde_json::from_str::<AutocompleteRequest>(json).is_err());
    }
}
