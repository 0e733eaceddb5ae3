//! Operand stack input payload

use serde::{Deserialize, Serialize};

/// Initial operand stack supplied to a program
///
/// The canonical textual form is `{"operand_stack": ["10", "20"]}`. Values
/// are decimal-string tokens; their numeric validity is the backend's
/// business, not ours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackInputs {
    #[serde(default)]
    pub operand_stack: Vec<String>,
}

impl StackInputs {
    /// Build a payload from decimal-string tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            operand_stack: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// An empty operand stack, the canonical "no explicit inputs" form
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.operand_stack.is_empty()
    }

    /// The pretty two-space-indented form shown in the inputs editor
    pub fn to_editor_text(&self) -> String {
        if self.operand_stack.is_empty() {
            return "{\n  \"operand_stack\": []\n}".to_string();
        }
        let tokens: Vec<String> = self
            .operand_stack
            .iter()
            .map(|t| serde_json::Value::String(t.clone()).to_string())
            .collect();
        format!("{{\n  \"operand_stack\": [{}]\n}}", tokens.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let payload = StackInputs::from_tokens(["10", "20"]);
        let text = serde_json::to_string(&payload).unwrap();
        assert_eq!(text, r#"{"operand_stack":["10","20"]}"#);

        let decoded: StackInputs = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_editor_text_round_trip() {
        let payload = StackInputs::from_tokens(["7"]);
        let decoded: StackInputs = serde_json::from_str(&payload.to_editor_text()).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_canonical_empty_form() {
        let empty = StackInputs::empty();
        assert_eq!(empty.to_editor_text(), "{\n  \"operand_stack\": []\n}");

        let decoded: StackInputs = serde_json::from_str(&empty.to_editor_text()).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_missing_key_is_empty() {
        let decoded: StackInputs = serde_json::from_str("{}").unwrap();
        assert!(decoded.is_empty());
    }
}
