use burn::module::Module;
use burn::prelude::*;
use burn::tensor::activation::log_softmax;

/// Configuration to create a [Categorical Cross-entropy loss](CategoricalCrossEntropyLoss) using the [init function](CategoricalCrossEntropyLossConfig::init).
#[derive(Config, Debug)]
pub struct CategoricalCrossEntropyLossConfig {
    /// Treat the inputs as logits, applying a log-softmax when computing the loss.
    #[config(default = false)]
    pub logits: bool,
}

impl CategoricalCrossEntropyLossConfig {
    /// Initialize [Categorical Cross-entropy loss](CategoricalCrossEntropyLoss).
    pub fn init(&self) -> CategoricalCrossEntropyLoss {
        CategoricalCrossEntropyLoss {
            logits: self.logits,
        }
    }
}

/// Calculate the categorical cross entropy loss from the input predictions
/// and the one-hot targets.
///
/// Should be created using [CategoricalCrossEntropyLossConfig]
#[derive(Module, Clone, Debug)]
pub struct CategoricalCrossEntropyLoss {
    /// Treat the inputs as logits
    pub logits: bool,
}

impl CategoricalCrossEntropyLoss {
    /// Compute the criterion on the input tensor.
    ///
    /// # Shapes
    /// - predictions: `[batch_size, num_classes]`
    /// - targets: `[batch_size, num_classes]` (one-hot)
    pub fn forward<B: Backend>(
        &self,
        predictions: Tensor<B, 2>,
        targets: Tensor<B, 2>,
    ) -> Tensor<B, 1> {
        let log_probs = if self.logits {
            log_softmax(predictions, 1)
        } else {
            // - sum(target * log(prediction))
            // clamp at -100.0 to avoid undefined values at zero probability
            predictions.log().clamp_min(-100.0)
        };
        let loss = (targets * log_probs).sum_dim(1).neg();

        loss.mean()
    }
}
