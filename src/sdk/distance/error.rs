use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Error fetching distance data. Please try again.";

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Underlying request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Distance API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    // The response parsed but lacked the nested distance text.
    #[error("Malformed distance response: {0}")]
    MalformedResponse(String),

    #[error("Price cannot be determined for distances less than {minimum_km} km.")]
    BelowMinimumDistance { distance_km: f64, minimum_km: f64 },
}

impl PricingError {
    /// Transport-level failures: the request never produced a usable body.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            PricingError::Request(_) | PricingError::HttpStatus { .. } | PricingError::Parse(_)
        )
    }

    /// The message shown to the user, or `None` when the failure stays silent.
    pub fn user_message(&self) -> Option<String> {
        match self {
            PricingError::MalformedResponse(_) => None,
            PricingError::BelowMinimumDistance { .. } => Some(self.to_string()),
            _ => Some(NETWORK_ERROR_MESSAGE.to_string()),
        }
    }
}
