pub mod alerts;
pub mod calculations;
pub mod lookup;
pub mod policy;
pub mod recommend;
pub mod reports;

pub use alerts::AlertEngine;
pub use policy::ScoringPolicy;
pub use recommend::RecommendationEngine;
