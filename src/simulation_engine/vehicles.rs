use serde::{Deserialize, Serialize};

/// A vehicle waiting at, or crossing, the intersection.
///
/// The id is an opaque caller-supplied token. Empty and repeated ids are
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
}

impl Vehicle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}
