pub mod sdk;

pub use sdk::config::DistanceConfig;
pub use sdk::distance::{
    DistancePriceService, DistanceProvider, PricingError, PricingOutcome, PricingResult,
    PricingRule, RemoteDistanceProvider,
};
pub use sdk::region::{BoundingBox, Coordinate};
pub use sdk::selection::{EditMode, SelectionState, Slot};
pub use sdk::widget::{CalculationStatus, FareWidget, MapEvent, WidgetView};
