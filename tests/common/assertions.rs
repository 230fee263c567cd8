//! Custom test assertions

use pipeline_acl::utils::error::ErrorResponse;

/// Assert an error body carries the expected code
pub fn assert_error_code(body: &serde_json::Value, expected: &str) {
    let response: ErrorResponse = serde_json::from_value(body.clone())
        .unwrap_or_else(|e| panic!("Expected an error body, got {} ({})", body, e));
    assert_eq!(
        response.error.code, expected,
        "Unexpected error code, message: {}",
        response.error.message
    );
}

/// Subject ids of a permissions array, in order
pub fn subject_ids(permissions: &serde_json::Value) -> Vec<String> {
    permissions
        .as_array()
        .unwrap_or_else(|| panic!("Expected a permissions array, got {}", permissions))
        .iter()
        .map(|p| p["subjectId"].as_str().unwrap_or_default().to_string())
        .collect()
}
