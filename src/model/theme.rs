use serde::{Deserialize, Serialize};

pub type ThemeId = i32;

/// A named category grouping one or more sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
}

impl Theme {
    pub fn new(id: ThemeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
