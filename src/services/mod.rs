pub mod recommendation_store;
pub mod scanner;
pub mod signals;

pub use recommendation_store::RecommendationStore;
pub use scanner::{ScanOutcome, Scanner};
pub use signals::{evaluate, generate_recommendation, Evaluation};
