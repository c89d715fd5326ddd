//! Chart output port trait.

use crate::domain::chart_spec::ChartSpec;
use crate::domain::error::ChartError;

/// Port for handing a finished chart description to a renderer.
pub trait ChartPort {
    fn write(&self, spec: &ChartSpec, output_path: &str) -> Result<(), ChartError>;
}
