//! The full classifier architecture: two convolution/pooling stages, a
//! flatten step, and a dense softmax head.
//!
//! References:
//! - https://www.tensorflow.org/js/tutorials/training/handwritten_digit_cnn

use crate::digit_cnn::{ConvBlock, ConvBlockConfig};
use burn::nn::{Initializer, Linear, LinearConfig};
use burn::prelude::*;
use burn::tensor::activation::softmax;

#[derive(Module, Debug)]
pub struct DigitCnn<B: Backend> {
    pub block1: ConvBlock<B>,
    pub block2: ConvBlock<B>,
    pub head: Linear<B>,
}

#[derive(Config, Debug)]
pub struct DigitCnnConfig {
    pub block1: ConvBlockConfig,
    pub block2: ConvBlockConfig,
    #[config(default = 28)]
    pub height: usize,
    #[config(default = 28)]
    pub width: usize,
    /// One output unit per digit class.
    #[config(default = 10)]
    pub num_classes: usize,
    /// Variance-scaling weight initialization for the dense head.
    #[config(default = "Initializer::KaimingNormal{gain:1.0,fan_out_only:false}")]
    pub initializer: Initializer,
}

impl DigitCnnConfig {
    /// Returns the initialized model.
    ///
    /// The dense head's input width is derived from the block configs, so the
    /// flatten step always matches the spatial pipeline.
    pub fn init<B: Backend>(&self, device: &B::Device) -> DigitCnn<B> {
        debug_assert_eq!(self.block1.filters, self.block2.channels_in);

        let [h, w] = self
            .block2
            .output_size(self.block1.output_size([self.height, self.width]));
        let flat = self.block2.filters * h * w;

        DigitCnn {
            block1: self.block1.init(device),
            block2: self.block2.init(device),
            head: LinearConfig::new(flat, self.num_classes)
                .with_initializer(self.initializer.clone())
                .init(device),
        }
    }
}

impl<B: Backend> DigitCnn<B> {
    /// Class probabilities for a batch of grayscale images; each row of the
    /// output sums to one.
    ///
    /// See also [`Self::forward_logits`].
    ///
    /// # Shapes
    ///   - Input [batch, height, width]
    ///   - Output [batch, num_classes]
    pub fn forward(&self, images: Tensor<B, 3>) -> Tensor<B, 2> {
        softmax(self.forward_logits(images), 1)
    }

    /// Raw class scores, before the softmax. Preferred input for a
    /// logits-based loss.
    ///
    /// # Shapes
    ///   - Input [batch, height, width]
    ///   - Output [batch, num_classes]
    pub fn forward_logits(&self, images: Tensor<B, 3>) -> Tensor<B, 2> {
        let [batch, height, width] = images.dims();
        let [_flat, num_classes] = self.head.weight.dims();

        let x = images.reshape([batch, 1, height, width]);
        let x = self.block1.forward(x);
        let x = self.block2.forward(x);

        let [_, channels, h, w] = x.dims();
        let x = x.reshape([batch, channels * h * w]);

        let x = self.head.forward(x);
        debug_assert_eq!([batch, num_classes], x.dims());

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::Distribution;

    type TestBackend = burn::backend::NdArray<f32>;

    fn config() -> DigitCnnConfig {
        DigitCnnConfig::new(ConvBlockConfig::new(1, 8), ConvBlockConfig::new(8, 16))
    }

    #[test]
    fn forward_shape() {
        let device = Default::default();
        let model = config().init::<TestBackend>(&device);

        let images =
            Tensor::<TestBackend, 3>::random([4, 28, 28], Distribution::Default, &device);
        assert_eq!([4, 10], model.forward(images).dims());
    }

    #[test]
    fn probabilities_sum_to_one() {
        let device = Default::default();
        let model = config().init::<TestBackend>(&device);

        let images =
            Tensor::<TestBackend, 3>::random([4, 28, 28], Distribution::Default, &device);
        let probs = model.forward(images);

        let sums = probs.sum_dim(1).into_data().to_vec::<f32>().unwrap();
        for sum in sums {
            assert!((sum - 1.0).abs() < 1e-5, "row sum {sum}");
        }
    }

    #[test]
    fn flatten_width_follows_block_configs() {
        let device = Default::default();
        let model = config().init::<TestBackend>(&device);

        // 28 -> conv(5) 24 -> pool 12 -> conv(5) 8 -> pool 4; 16 * 4 * 4 = 256
        assert_eq!([256, 10], model.head.weight.dims());
    }
}
