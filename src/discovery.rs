#![forbid(unsafe_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::{stream, StreamExt};
use log::{debug, info};
use solana_sdk::pubkey::Pubkey;

use crate::{
    error::KingdomError,
    metadata::{Category, MetadataFetcher, NftDocument},
    pda,
    rpc::ChainReader,
    state::MetadataAccount,
};

/// Monotonic fetch-generation counter. Each UI-level refresh calls
/// [`Generation::begin`]; an older token observes the bump and its run is
/// discarded instead of overwriting fresher state.
#[derive(Clone, Debug, Default)]
pub struct Generation {
    counter: Arc<AtomicU64>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> FetchToken {
        let current = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        FetchToken {
            generation: current,
            counter: Arc::clone(&self.counter),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FetchToken {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl FetchToken {
    pub fn is_current(&self) -> bool {
        self.counter.load(Ordering::SeqCst) == self.generation
    }

    pub fn ensure_current(&self) -> Result<(), KingdomError> {
        if self.is_current() {
            Ok(())
        } else {
            Err(KingdomError::Cancelled)
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DiscoveryConfig {
    /// Upper bound on concurrent per-NFT enrichments (each is one metadata
    /// document fetch plus one holder lookup).
    pub max_in_flight: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { max_in_flight: 8 }
    }
}

/// One fully enriched NFT.
#[derive(Clone, Debug, PartialEq)]
pub struct NftRecord {
    pub mint: Pubkey,
    pub owner: Pubkey,
    pub custody: Pubkey,
    pub metadata_address: Pubkey,
    pub document: NftDocument,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NftStatus {
    /// Still held by its custody account; anyone can protect it.
    Protectable,
    OwnedByViewer,
    /// Protected by some other wallet.
    Protected,
}

impl NftRecord {
    pub fn status(&self, viewer: Option<&Pubkey>) -> NftStatus {
        if self.owner == self.custody {
            NftStatus::Protectable
        } else if viewer.is_some_and(|v| *v == self.owner) {
            NftStatus::OwnedByViewer
        } else {
            NftStatus::Protected
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.document.category()
    }
}

/// Enrichment failure for a single item. Discovery never drops an item
/// silently; a failed item lands here with its reason.
#[derive(Debug)]
pub struct DiscoveryFailure {
    pub metadata_address: Pubkey,
    pub mint: Option<Pubkey>,
    pub error: KingdomError,
}

#[derive(Debug, Default)]
pub struct DiscoveryReport {
    pub nfts: Vec<NftRecord>,
    pub failures: Vec<DiscoveryFailure>,
}

/// Find every NFT created by `program_id` and enrich it with its document
/// and current owner.
///
/// A creator with zero NFTs yields an empty report. Items that fail to
/// enrich are reported, not dropped. Enrichment fan-out is bounded by
/// `config.max_in_flight`. If `token` is superseded while the run is in
/// flight the whole run returns [`KingdomError::Cancelled`] so stale results
/// never reach the caller.
pub async fn discover<C: ChainReader, M: MetadataFetcher>(
    chain: &C,
    fetcher: &M,
    program_id: &Pubkey,
    config: &DiscoveryConfig,
    token: &FetchToken,
) -> Result<DiscoveryReport, KingdomError> {
    token.ensure_current()?;
    let listed = chain.metadata_accounts_by_creator(program_id).await?;
    if listed.is_empty() {
        return Ok(DiscoveryReport::default());
    }

    let outcomes: Vec<Result<NftRecord, DiscoveryFailure>> = stream::iter(
        listed
            .into_iter()
            .map(|(address, data)| enrich_one(chain, fetcher, program_id, address, data)),
    )
    .buffer_unordered(config.max_in_flight.max(1))
    .collect()
    .await;
    token.ensure_current()?;

    let mut report = DiscoveryReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(record) => report.nfts.push(record),
            Err(failure) => {
                debug!(
                    "enrichment failed for metadata {}: {}",
                    failure.metadata_address, failure.error
                );
                report.failures.push(failure);
            }
        }
    }
    info!(
        "discovered {} NFTs ({} failures)",
        report.nfts.len(),
        report.failures.len()
    );
    Ok(report)
}

async fn enrich_one<C: ChainReader, M: MetadataFetcher>(
    chain: &C,
    fetcher: &M,
    program_id: &Pubkey,
    metadata_address: Pubkey,
    data: Vec<u8>,
) -> Result<NftRecord, DiscoveryFailure> {
    let account = MetadataAccount::unpack(&data).map_err(|error| DiscoveryFailure {
        metadata_address,
        mint: None,
        error,
    })?;
    let mint = account.mint;
    let fail = |error| DiscoveryFailure {
        metadata_address,
        mint: Some(mint),
        error,
    };

    let document = fetcher.fetch(account.uri.trim()).await.map_err(fail)?;
    let owner = chain
        .largest_token_holder(&mint)
        .await
        .map_err(fail)?
        .ok_or_else(|| fail(KingdomError::NotFound(mint)))?;
    let (custody, _) = pda::derive_nft_custody(program_id, &mint);

    Ok(NftRecord {
        mint,
        owner,
        custody,
        metadata_address,
        document,
    })
}
