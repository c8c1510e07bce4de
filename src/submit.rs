#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info};
use solana_sdk::{
    instruction::Instruction, signature::Keypair, signature::Signature, signer::Signer,
    transaction::Transaction,
};
use tokio::time::Instant;

use crate::{
    error::KingdomError,
    rpc::{SignatureDisposition, TxSender},
};

#[derive(Clone, Copy, Debug)]
pub struct SubmitConfig {
    /// How long to wait for finalization before giving up on the wait
    /// (the transaction itself may still land).
    pub confirm_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            confirm_timeout: Duration::from_secs(90),
            poll_interval: Duration::from_secs(2),
        }
    }
}

/// Signs, sends, and waits for finalization of one transaction at a time.
///
/// Invariant: the in-flight flag is set on entry and cleared exactly once on
/// every exit path (success, rejection, transport error, timeout), via an
/// RAII guard. A second submit while one is in flight is refused, not queued.
pub struct Submitter {
    in_flight: AtomicBool,
    config: SubmitConfig,
}

impl Submitter {
    pub fn new(config: SubmitConfig) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            config,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, KingdomError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| KingdomError::AlreadyInFlight)?;
        Ok(InFlightGuard(&self.in_flight))
    }

    pub async fn submit<S: TxSender>(
        &self,
        sender: &S,
        instructions: &[Instruction],
        payer: &Keypair,
    ) -> Result<Signature, KingdomError> {
        let _guard = self.begin()?;

        let blockhash = sender.latest_blockhash().await?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );
        let signature = sender.send(&transaction).await?;
        debug!("sent transaction {signature}");

        let deadline = Instant::now() + self.config.confirm_timeout;
        loop {
            match sender.signature_status(&signature).await? {
                SignatureDisposition::Confirmed => {
                    info!("transaction {signature} finalized");
                    return Ok(signature);
                }
                SignatureDisposition::Failed(reason) => {
                    return Err(KingdomError::ChainRejected(reason));
                }
                SignatureDisposition::Pending => {
                    if Instant::now() >= deadline {
                        return Err(KingdomError::ConfirmationTimeout(signature));
                    }
                    tokio::time::sleep(self.config.poll_interval).await;
                }
            }
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
