mod normalize;

pub use self::normalize::{normalize, NormalizeError};
