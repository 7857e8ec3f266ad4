//! Universe entity - the top-level container of places

use serde::{Deserialize, Serialize};

use crate::UniverseId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Universe {
    pub id: UniverseId,
    pub title: String,
}

impl Universe {
    pub fn new(id: UniverseId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
