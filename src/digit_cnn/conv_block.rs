use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::Initializer;
use burn::prelude::*;
use burn::tensor::activation::relu;

/// One feature-extraction stage: a 2D convolution with ReLU, followed by a
/// max-pool downsampling of the spatial dimensions.
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    pub conv: Conv2d<B>,
    pub pool: MaxPool2d,
}

#[derive(Config, Debug)]
pub struct ConvBlockConfig {
    /// Number of input channels. The first block of a network declares the
    /// image depth here; later blocks take the previous block's filter count.
    pub channels_in: usize,
    /// Number of learned filters, i.e. output channels.
    pub filters: usize,
    #[config(default = "[5, 5]")]
    pub kernel_size: [usize; 2],
    #[config(default = "[1, 1]")]
    pub stride: [usize; 2],
    #[config(default = "[2, 2]")]
    pub pool_size: [usize; 2],
    #[config(default = "[2, 2]")]
    pub pool_stride: [usize; 2],
    /// Variance-scaling weight initialization (fan-in, normal distribution).
    #[config(default = "Initializer::KaimingNormal{gain:1.0,fan_out_only:false}")]
    pub initializer: Initializer,
}

impl ConvBlockConfig {
    /// Returns the initialized block.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ConvBlock<B> {
        ConvBlock {
            conv: Conv2dConfig::new([self.channels_in, self.filters], self.kernel_size)
                .with_stride(self.stride)
                .with_initializer(self.initializer.clone())
                .init(device),
            pool: MaxPool2dConfig::new(self.pool_size)
                .with_strides(self.pool_stride)
                .init(),
        }
    }

    /// Spatial output size for a given spatial input size.
    ///
    /// The convolution uses valid padding, so each dimension first shrinks by
    /// `kernel - 1` (scaled by stride), then is downsampled by the pool.
    pub fn output_size(&self, input: [usize; 2]) -> [usize; 2] {
        let stage = |i: usize, d: usize| {
            assert!(
                self.kernel_size[d] <= i,
                "spatial input {i} is smaller than the kernel {}",
                self.kernel_size[d]
            );
            let conv = (i - self.kernel_size[d]) / self.stride[d] + 1;
            assert!(
                self.pool_size[d] <= conv,
                "convolution output {conv} is smaller than the pool {}",
                self.pool_size[d]
            );
            (conv - self.pool_size[d]) / self.pool_stride[d] + 1
        };
        [stage(input[0], 0), stage(input[1], 1)]
    }
}

impl<B: Backend> ConvBlock<B> {
    /// # Shapes
    ///   - Input [batch, channels_in, height, width]
    ///   - Output [batch, filters, pooled_height, pooled_width]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let [batch, _channels, _height, _width] = x.dims();
        let filters = self.conv.weight.dims()[0];

        let x = relu(self.conv.forward(x));
        let x = self.pool.forward(x);
        debug_assert_eq!([batch, filters], [x.dims()[0], x.dims()[1]]);

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::Distribution;

    type TestBackend = burn::backend::NdArray<f32>;

    #[test]
    fn output_shape() {
        let device = Default::default();
        let block = ConvBlockConfig::new(1, 8).init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 4>::random([2, 1, 28, 28], Distribution::Default, &device);
        assert_eq!([2, 8, 12, 12], block.forward(x).dims());
    }

    #[test]
    fn output_size_matches_forward() {
        let config = ConvBlockConfig::new(8, 16);
        assert_eq!([4, 4], config.output_size([12, 12]));

        let device = Default::default();
        let block = config.init::<TestBackend>(&device);
        let x = Tensor::<TestBackend, 4>::random([1, 8, 12, 12], Distribution::Default, &device);
        assert_eq!([1, 16, 4, 4], block.forward(x).dims());
    }

    #[test]
    #[should_panic(expected = "smaller than the kernel")]
    fn output_size_rejects_input_smaller_than_kernel() {
        ConvBlockConfig::new(1, 8).output_size([4, 4]);
    }

    #[test]
    fn defaults() {
        let config = ConvBlockConfig::new(1, 8);
        assert_eq!([5, 5], config.kernel_size);
        assert_eq!([1, 1], config.stride);
        assert_eq!([2, 2], config.pool_size);
        assert_eq!([2, 2], config.pool_stride);
        assert_eq!(
            Initializer::KaimingNormal {
                gain: 1.0,
                fan_out_only: false
            },
            config.initializer
        );
    }
}
