//! Open Graph preview of the portfolio site.

use serde::{Deserialize, Serialize};

use crate::{check_url, SchemaError, Validate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OgpPreview {
    pub hybrid_graph: HybridGraph,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridGraph {
    pub image: String,
    pub title: String,
    pub description: String,
}

impl Validate for OgpPreview {
    fn validate(&self) -> Result<(), SchemaError> {
        check_url("hybridGraph.image", &self.hybrid_graph.image)
    }
}
