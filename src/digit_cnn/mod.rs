mod classifier;
mod conv_block;
mod network;

pub use classifier::{Classifier, ClassifierConfig, build_model, classifier_config};
pub use conv_block::{ConvBlock, ConvBlockConfig};
pub use network::{DigitCnn, DigitCnnConfig};
