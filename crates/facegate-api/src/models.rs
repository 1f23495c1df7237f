// Wire types for the identity endpoints.

use serde::Deserialize;
use serde_json::Value;

/// Body of a successful reply: `{"message": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SuccessBody {
    pub message: String,
}

/// Body of a rejected reply: `{"detail": ...}`.
///
/// `detail` is usually a string, but validation failures on the server side
/// send a list of error objects instead, so it is kept loosely typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FailureBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl FailureBody {
    /// The human-readable detail, if the server sent a non-empty string.
    pub fn detail_text(self) -> Option<String> {
        match self.detail {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }
}

/// How the server answered a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 2xx with a `message`.
    Accepted { message: String },
    /// Non-success status. `detail` is `None` when the body carried no
    /// usable human-readable detail.
    Rejected { status: u16, detail: Option<String> },
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn detail_of(raw: &str) -> Option<String> {
        serde_json::from_str::<FailureBody>(raw).unwrap().detail_text()
    }

    #[test]
    fn string_detail_is_kept_verbatim() {
        assert_eq!(
            detail_of(r#"{"detail":"Name already taken"}"#).as_deref(),
            Some("Name already taken")
        );
    }

    #[test]
    fn absent_empty_or_structured_detail_is_none() {
        assert_eq!(detail_of("{}"), None);
        assert_eq!(detail_of(r#"{"detail":""}"#), None);
        assert_eq!(detail_of(r#"{"detail":null}"#), None);
        assert_eq!(
            detail_of(r#"{"detail":[{"loc":["body","name"],"msg":"field required"}]}"#),
            None
        );
    }

    #[test]
    fn success_body_requires_message() {
        assert!(serde_json::from_str::<SuccessBody>(r#"{"message":"hi"}"#).is_ok());
        assert!(serde_json::from_str::<SuccessBody>("{}").is_err());
    }
}
