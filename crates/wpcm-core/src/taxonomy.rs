use crate::error::Result;
use crate::wire;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A category or tag, owned by the platform and referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub count: u64,
}

impl Term {
    pub fn list_from_wire(value: &Value) -> Result<Vec<Term>> {
        wire::expect_array(value, "terms")?
            .iter()
            .map(|v| wire::decode(v, "term"))
            .collect()
    }
}
