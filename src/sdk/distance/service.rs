use super::error::PricingError;
use crate::sdk::region::Coordinate;

pub trait DistanceProvider: Send + Sync {
    /// Human-readable travel distance between two points, e.g. `"512 km"`.
    fn distance_text(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<String, PricingError>;
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for Box<P> {
    fn distance_text(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<String, PricingError> {
        (**self).distance_text(origin, destination)
    }
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for &P {
    fn distance_text(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<String, PricingError> {
        (**self).distance_text(origin, destination)
    }
}
