use samarth_core::ContactError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Invalid(#[from] ContactError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from contact endpoint")]
    UnexpectedStatus { status: u16 },
}

impl DeliveryError {
    /// Message shown to the visitor.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DeliveryError::Invalid(e) => e.to_string(),
            DeliveryError::Http(_) | DeliveryError::UnexpectedStatus { .. } => {
                "Sorry, we could not send your inquiry. Please email us directly.".to_owned()
            }
        }
    }
}
