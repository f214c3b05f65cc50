pub mod error;
pub mod pricing;
pub mod provider;
pub mod service;

pub use error::PricingError;
pub use pricing::{
    parse_distance_km, DistancePriceService, PricingOutcome, PricingResult, PricingRule,
};
pub use provider::RemoteDistanceProvider;
pub use service::DistanceProvider;
