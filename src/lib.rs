//! A convolutional digit classifier built from [Burn](https://github.com/tracel-ai/burn)
//! layer and optimizer primitives.
//!
//! Two convolution/max-pooling stages, a flatten step, and a dense softmax
//! head, for 10-class classification of 28x28 grayscale images.

pub mod compile;
pub mod digit_cnn;

pub mod prelude {
    pub use crate::compile::*;
    pub use crate::digit_cnn::*;
}

pub mod utils;
