use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL_SEPARATOR: &str = " ";
pub const UNCLASSIFIED_LABEL: &str = "none";
// Membership masks are u32 and every non-empty mask is materialized.
pub const MAX_DIMENSIONS: usize = 16;

/// What to do with declared universe elements that fall in no dimension.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnclassifiedBehaviour {
    /// Never compute a class for them; callers reconcile against their universe.
    #[default]
    Omit,
    /// Report `universe - union(dimensions)` next to the regular classes.
    Explicit,
}

impl UnclassifiedBehaviour {
    pub fn reports_unclassified(&self) -> bool {
        match self {
            UnclassifiedBehaviour::Omit => false,
            UnclassifiedBehaviour::Explicit => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Joins dimension names when a label is displayed.
    pub separator: String,
    pub unclassified: UnclassifiedBehaviour,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            separator: DEFAULT_LABEL_SEPARATOR.to_string(),
            unclassified: UnclassifiedBehaviour::Omit,
        }
    }
}

impl ClassifierConfig {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_unclassified(mut self, unclassified: UnclassifiedBehaviour) -> Self {
        self.unclassified = unclassified;
        self
    }
}
