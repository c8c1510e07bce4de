#![forbid(unsafe_code)]

use solana_client::client_error::ClientError;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use thiserror::Error;

/// Client-side failure taxonomy.
///
/// Every operation in this crate reports one of these kinds; callers decide
/// per kind whether to retry, surface, or abort. Nothing in the crate retries
/// automatically.
#[derive(Debug, Error)]
pub enum KingdomError {
    // Input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Lookup
    #[error("account not found: {0}")]
    NotFound(Pubkey),

    // Transport
    #[error("network failure: {0}")]
    NetworkFailure(String),
    #[error("confirmation timed out for {0}")]
    ConfirmationTimeout(Signature),

    // Chain
    #[error("transaction rejected by the chain: {0}")]
    ChainRejected(String),

    // Decode (account bytes or off-chain document)
    #[error("malformed data: {0}")]
    Malformed(String),

    // Coordination
    #[error("a submission is already in flight")]
    AlreadyInFlight,
    #[error("fetch superseded by a newer request")]
    Cancelled,
}

impl KingdomError {
    /// Transient failures a caller may reasonably re-attempt. A timed-out
    /// confirmation is retryable as a status query, not as a blind resend.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            KingdomError::NetworkFailure(_) | KingdomError::ConfirmationTimeout(_)
        )
    }
}

impl From<ClientError> for KingdomError {
    fn from(e: ClientError) -> Self {
        match e.get_transaction_error() {
            Some(tx_err) => KingdomError::ChainRejected(tx_err.to_string()),
            None => KingdomError::NetworkFailure(e.to_string()),
        }
    }
}
