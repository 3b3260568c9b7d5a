use crate::utils::loss::CategoricalCrossEntropyLossConfig;
use burn::optim::AdamConfig;
use burn::prelude::*;

/// Evaluation metrics a training driver is expected to report.
#[derive(Module, Default, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Metric {
    /// Fraction of predictions whose arg-max matches the target class.
    #[default]
    Accuracy,
}

/// How the model learns and how its error is measured: optimizer, loss
/// function, and the metrics to evaluate with.
#[derive(Config)]
pub struct CompileConfig {
    /// Optimizer settings, kept at the framework defaults.
    #[config(default = "AdamConfig::new()")]
    pub optimizer: AdamConfig,
    #[config(default = "CategoricalCrossEntropyLossConfig::new()")]
    pub loss: CategoricalCrossEntropyLossConfig,
    #[config(default = "vec![Metric::Accuracy]")]
    pub metrics: Vec<Metric>,
}

// AdamConfig has no Debug impl, so the optimizer field is elided.
impl core::fmt::Debug for CompileConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompileConfig")
            .field("loss", &self.loss)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
