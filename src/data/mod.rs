//! Data layer - Pure state without UI coupling
//!
//! This module contains the backend records (projects, contact messages),
//! the static site copy, and UI state as plain data structures.
//! NO imports from frontend/ or any rendering code.

pub mod contact;
pub mod project;
pub mod site;
pub mod ui_state;

pub use contact::*;
pub use project::*;
pub use ui_state::*;

/// Pick the canonical identifier for a backend record.
///
/// Records carry a document id (`_id`) and, on older rows, a numeric `id`.
/// The document id wins whenever it is present and non-blank.
pub(crate) fn resolve_record_id(
    object_id: Option<String>,
    legacy_id: Option<serde_json::Value>,
) -> Option<String> {
    if let Some(id) = object_id.filter(|id| !id.trim().is_empty()) {
        return Some(id);
    }

    match legacy_id? {
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_id_wins_over_legacy_id() {
        let id = resolve_record_id(Some("65ab".to_string()), Some(json!(7)));
        assert_eq!(id.as_deref(), Some("65ab"));
    }

    #[test]
    fn test_legacy_numeric_id_is_stringified() {
        assert_eq!(resolve_record_id(None, Some(json!(42))).as_deref(), Some("42"));
        assert_eq!(
            resolve_record_id(Some("  ".to_string()), Some(json!("9"))).as_deref(),
            Some("9")
        );
    }

    #[test]
    fn test_missing_ids_resolve_to_none() {
        assert_eq!(resolve_record_id(None, None), None);
        assert_eq!(resolve_record_id(None, Some(json!(null))), None);
    }
}
