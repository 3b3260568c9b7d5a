mod cce;

pub use cce::{CategoricalCrossEntropyLoss, CategoricalCrossEntropyLossConfig};
