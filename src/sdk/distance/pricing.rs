use super::error::PricingError;
use super::service::DistanceProvider;
use crate::sdk::region::Coordinate;
use serde::Serialize;

/// Price per started distance block, with a floor below which no price exists.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRule {
    pub minimum_km: f64,
    pub block_km: f64,
    pub price_per_block: u64,
    pub currency_symbol: String,
}

impl Default for PricingRule {
    fn default() -> Self {
        Self {
            minimum_km: 100.0,
            block_km: 10.0,
            price_per_block: 2,
            currency_symbol: "$".to_string(),
        }
    }
}

impl PricingRule {
    /// `ceil(distance / block) * price_per_block`, rejecting distances under the minimum.
    pub fn price_for(&self, distance_km: f64) -> Result<u64, PricingError> {
        if distance_km < self.minimum_km {
            return Err(PricingError::BelowMinimumDistance {
                distance_km,
                minimum_km: self.minimum_km,
            });
        }
        let blocks = (distance_km / self.block_km).ceil();
        // `u64::MAX as f64` rounds up to 2^64, so `>=` keeps the cast exact.
        if !blocks.is_finite() || blocks >= u64::MAX as f64 {
            return Err(PricingError::MalformedResponse(format!(
                "distance {} km is out of range",
                distance_km
            )));
        }
        (blocks as u64)
            .checked_mul(self.price_per_block)
            .ok_or_else(|| {
                PricingError::MalformedResponse(format!(
                    "price for {} km is out of range",
                    distance_km
                ))
            })
    }

    pub fn format_price(&self, price: u64) -> String {
        format!("{}{}", self.currency_symbol, price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingResult {
    pub distance_text: String,
    pub distance_km: f64,
    pub price: u64,
}

/// Reads the leading number of a human-readable distance such as `"512 km"`.
///
/// Accepts leading whitespace, an optional sign, a decimal point and an
/// exponent. Anything after the number is ignored, so `"1,234 km"` reads as 1.
pub fn parse_distance_km(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|km| km.is_finite())
}

/// How a single calculation ended.
#[derive(Debug)]
pub enum PricingOutcome {
    Success(PricingResult),
    NetworkFailure(PricingError),
    BelowMinimum(PricingError),
    Malformed(PricingError),
}

impl From<Result<PricingResult, PricingError>> for PricingOutcome {
    fn from(result: Result<PricingResult, PricingError>) -> Self {
        match result {
            Ok(priced) => PricingOutcome::Success(priced),
            Err(e @ PricingError::BelowMinimumDistance { .. }) => PricingOutcome::BelowMinimum(e),
            Err(e @ PricingError::MalformedResponse(_)) => PricingOutcome::Malformed(e),
            Err(e) => PricingOutcome::NetworkFailure(e),
        }
    }
}

pub struct DistancePriceService<P> {
    provider: P,
    rule: PricingRule,
}

impl<P: DistanceProvider> DistancePriceService<P> {
    pub fn new(provider: P) -> Self {
        Self::with_rule(provider, PricingRule::default())
    }

    pub fn with_rule(provider: P, rule: PricingRule) -> Self {
        Self { provider, rule }
    }

    pub fn rule(&self) -> &PricingRule {
        &self.rule
    }

    pub fn compute_price(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<PricingResult, PricingError> {
        let distance_text = self.provider.distance_text(origin, destination)?;
        let distance_km = parse_distance_km(&distance_text).ok_or_else(|| {
            PricingError::MalformedResponse(format!(
                "distance text has no numeric prefix: {:?}",
                distance_text
            ))
        })?;
        let price = self.rule.price_for(distance_km)?;

        log::debug!(
            "Priced {} ({} km) at {}",
            distance_text,
            distance_km,
            self.rule.format_price(price)
        );
        Ok(PricingResult {
            distance_text,
            distance_km,
            price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct FixedDistance(&'static str);

    impl DistanceProvider for FixedDistance {
        fn distance_text(&self, _: Coordinate, _: Coordinate) -> Result<String, PricingError> {
            Ok(self.0.to_string())
        }
    }

    fn price_of(text: &'static str) -> Result<PricingResult, PricingError> {
        DistancePriceService::new(FixedDistance(text))
            .compute_price(Coordinate::new(35.0, 51.0), Coordinate::new(36.0, 52.0))
    }

    #[test]
    fn reads_numeric_prefix() {
        assert_eq!(parse_distance_km("512 km"), Some(512.0));
        assert_eq!(parse_distance_km("  99.999 km"), Some(99.999));
        assert_eq!(parse_distance_km("1,234 km"), Some(1.0));
        assert_eq!(parse_distance_km(".5km"), Some(0.5));
        assert_eq!(parse_distance_km("1.5e2 km"), Some(150.0));
        assert_eq!(parse_distance_km("12e km"), Some(12.0));
        assert_eq!(parse_distance_km("-3 km"), Some(-3.0));
        assert_eq!(parse_distance_km("km 512"), None);
        assert_eq!(parse_distance_km("."), None);
        assert_eq!(parse_distance_km(""), None);
        assert_eq!(parse_distance_km("1e999 km"), None);
    }

    #[test]
    fn price_steps_every_ten_km() {
        let rule = PricingRule::default();
        assert_eq!(rule.price_for(100.0).unwrap(), 20);
        assert_eq!(rule.price_for(100.1).unwrap(), 22);
        assert_eq!(rule.price_for(105.0).unwrap(), 22);
        assert_eq!(rule.price_for(110.0).unwrap(), 22);
        assert_eq!(rule.price_for(512.0).unwrap(), 104);
        assert!(matches!(
            rule.price_for(99.999),
            Err(PricingError::BelowMinimumDistance { .. })
        ));
        assert_eq!(rule.format_price(30), "$30");
    }

    #[test]
    fn huge_distances_are_rejected_not_wrapped() {
        assert!(matches!(
            price_of("1e20 km"),
            Err(PricingError::MalformedResponse(_))
        ));
        assert!(matches!(
            PricingOutcome::from(price_of("1e300 km")),
            PricingOutcome::Malformed(_)
        ));

        // Block count fits in u64 but the multiplied price does not.
        let rule = PricingRule::default();
        assert!(matches!(
            rule.price_for(1e20),
            Err(PricingError::MalformedResponse(_))
        ));
        assert_eq!(rule.price_for(1e15).unwrap(), 200_000_000_000_000);
    }

    #[test]
    fn price_never_decreases_with_distance() {
        let rule = PricingRule::default();
        let mut last = 0;
        for tenth_km in 1000..3000 {
            let price = rule.price_for(tenth_km as f64 / 10.0).unwrap();
            assert!(price >= last);
            last = price;
        }
    }

    #[test]
    fn computes_from_provider_text() {
        let priced = price_of("150 km").unwrap();
        assert_eq!(priced.distance_text, "150 km");
        assert_relative_eq!(priced.distance_km, 150.0);
        assert_eq!(priced.price, 30);

        assert_eq!(price_of("100 km").unwrap().price, 20);
        assert_eq!(price_of("105 km").unwrap().price, 22);
    }

    #[test]
    fn below_minimum_and_unparseable_text() {
        match price_of("99.999 km") {
            Err(PricingError::BelowMinimumDistance { distance_km, .. }) => {
                assert_relative_eq!(distance_km, 99.999)
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            price_of("unknown"),
            Err(PricingError::MalformedResponse(_))
        ));
    }

    #[test]
    fn outcome_classification() {
        assert!(matches!(
            PricingOutcome::from(price_of("150 km")),
            PricingOutcome::Success(_)
        ));
        assert!(matches!(
            PricingOutcome::from(price_of("50 km")),
            PricingOutcome::BelowMinimum(_)
        ));
        assert!(matches!(
            PricingOutcome::from(price_of("n/a")),
            PricingOutcome::Malformed(_)
        ));
        let failed: Result<PricingResult, PricingError> = Err(PricingError::HttpStatus {
            status: 502,
            body: "Bad Gateway".into(),
        });
        assert!(matches!(
            PricingOutcome::from(failed),
            PricingOutcome::NetworkFailure(_)
        ));
    }
}
