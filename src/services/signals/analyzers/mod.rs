//! The five signal analyzers.

pub mod momentum;
pub mod strength;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::Momentum;
pub use strength::Strength;
pub use trend::Trend;
pub use volatility::Volatility;
pub use volume::Volume;
