//! FILENAME: core/cube-engine/src/definition.rs
//! Roll-Up Definition - The serializable configuration of a summary.
//!
//! A `RollUpDefinition` describes a roll-up declaratively (which dimensions
//! to keep, which measures to produce and how) so it can be stored or sent
//! as JSON. It is compiled against a concrete cube into a
//! `MeasureAggregator`, which is an ordinary `Aggregator`.

use scalar::{ScalarResult, Value};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregation, Aggregator};
use crate::cube::Cube;
use crate::error::{CubeError, CubeResult};
use crate::labels::to_labels;
use crate::rollup::GroupingStrategy;

// ============================================================================
// DEFINITIONS
// ============================================================================

/// One output measure of a roll-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureDefinition {
    /// Name of the output field.
    pub name: String,

    /// Source field to reduce. Only `Count` may omit it (counts rows).
    #[serde(default)]
    pub source: Option<String>,

    /// The reduction to apply.
    #[serde(default)]
    pub aggregation: Aggregation,
}

impl MeasureDefinition {
    pub fn new(name: impl Into<String>, source: impl Into<String>, aggregation: Aggregation) -> Self {
        MeasureDefinition {
            name: name.into(),
            source: Some(source.into()),
            aggregation,
        }
    }

    /// A measure counting the rows of each group.
    pub fn row_count(name: impl Into<String>) -> Self {
        MeasureDefinition {
            name: name.into(),
            source: None,
            aggregation: Aggregation::Count,
        }
    }
}

/// A complete roll-up: grouping dimensions plus output measures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollUpDefinition {
    /// Dimensions to keep, in output order.
    pub dimensions: Vec<String>,

    /// Output measures, in output order.
    pub measures: Vec<MeasureDefinition>,

    #[serde(default)]
    pub strategy: GroupingStrategy,
}

impl RollUpDefinition {
    pub fn new<D: AsRef<str>>(dimensions: &[D]) -> Self {
        RollUpDefinition {
            dimensions: to_labels(dimensions),
            measures: Vec::new(),
            strategy: GroupingStrategy::default(),
        }
    }

    pub fn with_measure(mut self, measure: MeasureDefinition) -> Self {
        self.measures.push(measure);
        self
    }

    pub fn with_strategy(mut self, strategy: GroupingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Output field names, in order.
    pub fn field_names(&self) -> Vec<String> {
        self.measures.iter().map(|m| m.name.clone()).collect()
    }

    /// Resolves measure sources against `cube`'s fields.
    pub fn compile(&self, cube: &Cube) -> CubeResult<MeasureAggregator> {
        let steps = self
            .measures
            .iter()
            .map(|measure| -> CubeResult<(Option<usize>, Aggregation)> {
                let source = match (&measure.source, measure.aggregation) {
                    (Some(source), _) => Some(cube.field_index(source)?),
                    (None, Aggregation::Count) => None,
                    (None, aggregation) => {
                        return Err(CubeError::InvalidDefinition(format!(
                            "measure '{}' needs a source field for {:?}",
                            measure.name, aggregation
                        )))
                    }
                };
                Ok((source, measure.aggregation))
            })
            .collect::<CubeResult<Vec<_>>>()?;

        Ok(MeasureAggregator { steps })
    }
}

// ============================================================================
// COMPILED AGGREGATOR
// ============================================================================

/// A roll-up definition bound to a source cube's field positions.
#[derive(Debug, Clone)]
pub struct MeasureAggregator {
    steps: Vec<(Option<usize>, Aggregation)>,
}

impl MeasureAggregator {
    /// Starting aggregate for a new group.
    pub fn initial_value(&self) -> Vec<Value> {
        self.steps.iter().map(|(_, agg)| agg.initial_value()).collect()
    }
}

impl Aggregator for MeasureAggregator {
    fn aggregate(&self, current: &[Value], row: &[Value]) -> ScalarResult<Vec<Value>> {
        self.steps
            .iter()
            .zip(current)
            .map(|(&(source, aggregation), acc)| match source {
                Some(i) => aggregation.step(acc, Some(row.get(i).unwrap_or(&Value::Empty))),
                None => aggregation.step(acc, None),
            })
            .collect()
    }
}

impl Cube {
    /// Runs the roll-up described by `definition`.
    pub fn roll_up_definition(&self, definition: &RollUpDefinition) -> CubeResult<Cube> {
        let aggregator = definition.compile(self)?;
        let initial_value = aggregator.initial_value();

        self.roll_up_with(
            &definition.dimensions,
            &definition.field_names(),
            aggregator,
            &initial_value,
            definition.strategy,
        )
    }
}
