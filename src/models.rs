use serde::{Deserialize, Serialize, Serializer};

/// Cost field value reported when a beam keeps its original section
pub const NO_REPLACEMENT: &str = "No replacement";

/// One beam as reported by the structural model
#[derive(Debug, Clone, PartialEq)]
pub struct BeamRecord {
    pub identifier: String,
    pub length: f64,
    pub load: f64,
    pub original_section: String,
}

impl BeamRecord {
    pub fn new(
        identifier: impl Into<String>,
        length: f64,
        load: f64,
        original_section: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            length,
            load,
            original_section: original_section.into(),
        }
    }
}

/// One row of the beam library file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSection {
    #[serde(rename = "Section")]
    pub section_id: String,
    #[serde(rename = "MaxMoment")]
    pub max_moment: f64,
    #[serde(rename = "Cost")]
    pub cost: f64,
}

impl CatalogSection {
    pub fn new(section_id: impl Into<String>, max_moment: f64, cost: f64) -> Self {
        Self {
            section_id: section_id.into(),
            max_moment,
            cost,
        }
    }
}

/// Frame object as listed by the model bridge
#[derive(Debug, Clone, Deserialize)]
pub struct FrameObject {
    pub name: String,
    /// Design label assigned in the model ("Beam", "Column", "Brace", ...)
    pub label: String,
    pub length: f64,
    /// Uniform distributed load values in assignment order
    #[serde(default)]
    pub distributed_loads: Vec<f64>,
    pub section: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrameListResponse {
    pub frames: Vec<FrameObject>,
}

/// Cost column of an optimization record: either the selected section's cost
/// or the no-replacement marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportedCost {
    Amount(f64),
    NoReplacement,
}

impl ReportedCost {
    pub fn amount(&self) -> Option<f64> {
        match self {
            ReportedCost::Amount(cost) => Some(*cost),
            ReportedCost::NoReplacement => None,
        }
    }
}

impl Serialize for ReportedCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReportedCost::Amount(cost) => serializer.serialize_f64(*cost),
            ReportedCost::NoReplacement => serializer.serialize_str(NO_REPLACEMENT),
        }
    }
}

/// One output row per input beam
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRecord {
    #[serde(rename = "beam")]
    pub beam_id: String,
    #[serde(rename = "original")]
    pub original_section: String,
    /// Selected section, or the original section when nothing cheaper fits
    #[serde(rename = "optimized")]
    pub optimized_section: String,
    pub cost: ReportedCost,
}

impl OptimizationRecord {
    /// True when a different section than the original one is proposed
    pub fn is_replaced(&self) -> bool {
        self.optimized_section != self.original_section
    }
}

/// Project-wide cost comparison between original and optimized sections
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub total_original_cost: f64,
    pub total_optimized_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
    /// Beams moved to a different section that is not dearer than the original
    pub replaced: usize,
    /// Beams whose cheapest adequate section costs more than the original;
    /// their extra cost makes `savings` negative when it outweighs the rest.
    pub upsized: usize,
    pub unchanged: usize,
    /// Beams whose original section is missing from the library
    pub unpriced: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub results: Vec<OptimizationRecord>,
    pub summary: CostSummary,
}
