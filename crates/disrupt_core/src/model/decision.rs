use serde::{Deserialize, Serialize};

use crate::catalog::{self, Intervention, InterventionId};

/// A resolved decision checkpoint.
///
/// The intervention is kept as its wire id so that histories read from
/// outside the process can name interventions the catalog does not know;
/// those records resolve to `None` and contribute no effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub year: i32,
    pub intervention_id: String,
}

impl DecisionRecord {
    pub fn new(year: i32, id: InterventionId) -> Self {
        Self {
            year,
            intervention_id: id.as_str().to_string(),
        }
    }

    /// Catalog entry this record refers to
    pub fn intervention(&self) -> Option<&'static Intervention> {
        catalog::lookup(&self.intervention_id)
    }
}
