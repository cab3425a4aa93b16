use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage of a workflow's request lifecycle.
///
/// A workflow only moves `Init -> Loading -> {Success, Error}`; a new trigger
/// puts it back into `Loading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    #[default]
    Init,
    Loading,
    Success,
    Error,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Init => "INIT",
            Phase::Loading => "LOADING",
            Phase::Success => "SUCCESS",
            Phase::Error => "ERROR",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_uppercase_name() {
        let json = serde_json::to_string(&Phase::Loading).unwrap();
        assert_eq!(json, "\"LOADING\"");
        let back: Phase = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(back, Phase::Error);
    }
}
