use serde::{Deserialize, Serialize};

/// What the player asks a cell to become.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum CellActionKind {
    #[serde(rename = "flag")]
    Flag,
    #[serde(rename = "uncover")]
    Uncover,
}

/// Body of a cell update. A missing or `null` action removes a flag.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellActionRequest {
    #[serde(default)]
    pub action: Option<CellActionKind>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_is_tri_state() {
        let flag: CellActionRequest = serde_json::from_str(r#"{"action": "flag"}"#).unwrap();
        let uncover: CellActionRequest = serde_json::from_str(r#"{"action": "uncover"}"#).unwrap();
        let unflag: CellActionRequest = serde_json::from_str(r#"{"action": null}"#).unwrap();
        let empty: CellActionRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(flag.action, Some(CellActionKind::Flag));
        assert_eq!(uncover.action, Some(CellActionKind::Uncover));
        assert_eq!(unflag.action, None);
        assert_eq!(empty.action, None);
    }
}
