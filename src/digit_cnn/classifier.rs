use crate::compile::CompileConfig;
use crate::digit_cnn::{ConvBlockConfig, DigitCnn, DigitCnnConfig};
use crate::utils::loss::CategoricalCrossEntropyLoss;
use burn::module::Ignored;
use burn::prelude::*;

/// A compiled model: the initialized network together with its loss module
/// and the compile settings a training driver needs.
#[derive(Module, Debug)]
pub struct Classifier<B: Backend> {
    pub network: DigitCnn<B>,
    pub loss: CategoricalCrossEntropyLoss,
    pub compile: Ignored<CompileConfig>,
}

#[derive(Config, Debug)]
pub struct ClassifierConfig {
    pub network: DigitCnnConfig,
    #[config(default = "CompileConfig::new()")]
    pub compile: CompileConfig,
}

impl ClassifierConfig {
    /// Returns the initialized model.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Classifier<B> {
        Classifier {
            network: self.network.init(device),
            loss: self.compile.loss.init(),
            compile: Ignored(self.compile.clone()),
        }
    }
}

impl<B: Backend> Classifier<B> {
    /// See [`DigitCnn::forward`].
    ///
    /// # Shapes
    ///   - Input [batch, height, width]
    ///   - Output [batch, num_classes]
    pub fn forward(&self, images: Tensor<B, 3>) -> Tensor<B, 2> {
        self.network.forward(images)
    }

    /// Loss of a batch against one-hot targets, using the configured
    /// criterion.
    ///
    /// # Shapes
    ///   - images [batch, height, width]
    ///   - targets [batch, num_classes]
    ///   - Output [1]
    pub fn loss(&self, images: Tensor<B, 3>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
        let predictions = if self.loss.logits {
            self.network.forward_logits(images)
        } else {
            self.network.forward(images)
        };
        self.loss.forward(predictions, targets)
    }
}

/// The fixed architecture: 28x28x1 input, two convolution/pooling stages
/// (8 then 16 filters, 5x5 kernels, 2x2 pooling), a flatten step, and a
/// 10-unit softmax head, compiled with Adam and categorical cross-entropy.
pub fn classifier_config() -> ClassifierConfig {
    ClassifierConfig::new(DigitCnnConfig::new(
        ConvBlockConfig::new(1, 8),
        ConvBlockConfig::new(8, 16),
    ))
}

/// Builds and returns the compiled digit classifier on the given device.
///
/// Weights are freshly initialized on every call; two calls share no state.
pub fn build_model<B: Backend>(device: &B::Device) -> Classifier<B> {
    classifier_config().init(device)
}
