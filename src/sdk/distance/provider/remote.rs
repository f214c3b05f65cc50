use super::types::MatrixResponse;
use crate::sdk::config::DistanceConfig;
use crate::sdk::distance::error::PricingError;
use crate::sdk::distance::service::DistanceProvider;
use crate::sdk::region::Coordinate;
use reqwest::blocking::{Client, Request};

/// Distance lookups against a DistanceMatrix.ai compatible endpoint.
/// One GET per lookup, no retries.
pub struct RemoteDistanceProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl RemoteDistanceProvider {
    pub fn new(config: &DistanceConfig) -> Result<Self, PricingError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    pub fn with_client(client: Client, config: &DistanceConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// GET request with `origins`, `destinations` and `key` percent-encoded.
    pub fn build_request(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Request, PricingError> {
        let request = self
            .client
            .get(&self.base_url)
            .query(&[
                ("origins", origin.to_query_param()),
                ("destinations", destination.to_query_param()),
                ("key", self.api_key.clone()),
            ])
            .build()?;
        Ok(request)
    }
}

impl DistanceProvider for RemoteDistanceProvider {
    fn distance_text(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<String, PricingError> {
        let route = format!(
            "{} -> {}",
            origin.to_query_param(),
            destination.to_query_param()
        );
        log::debug!("[PROVIDER] Calling distance matrix for {}", route);

        let request = self.build_request(origin, destination)?;
        let response = match self.client.execute(request) {
            Ok(resp) => resp,
            Err(e) => {
                // The URL carries the API key, so only the route is logged.
                log::error!("Failed to send distance request for {}: {}", route, e);
                return Err(PricingError::Request(e));
            }
        };

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!(
                "Distance API returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(PricingError::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let matrix: MatrixResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse distance response for {}\nError: {}. Body: {}",
                route,
                e,
                text
            );
            e
        })?;

        matrix
            .first_distance_text()
            .map(str::to_owned)
            .ok_or_else(|| PricingError::MalformedResponse(matrix.describe_missing()))
    }
}
