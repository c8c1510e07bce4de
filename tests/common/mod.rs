#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use solana_sdk::{
    hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use tokio::sync::Notify;

use animal_kingdom_client::{
    error::KingdomError,
    metadata::{MetadataFetcher, NftAttribute, NftDocument},
    rpc::{ChainReader, SignatureDisposition, TxSender},
};

// ---------------------------------------------------------------------
// Scripted chain reader
// ---------------------------------------------------------------------

#[derive(Default)]
pub struct MockChain {
    pub metadata_accounts: Vec<(Pubkey, Vec<u8>)>,
    pub accounts: HashMap<Pubkey, Vec<u8>>,
    pub holders: HashMap<Pubkey, Pubkey>,
}

impl ChainReader for MockChain {
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, KingdomError> {
        Ok(self.accounts.get(address).cloned())
    }

    async fn metadata_accounts_by_creator(
        &self,
        _creator: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, KingdomError> {
        Ok(self.metadata_accounts.clone())
    }

    async fn largest_token_holder(
        &self,
        mint: &Pubkey,
    ) -> Result<Option<Pubkey>, KingdomError> {
        Ok(self.holders.get(mint).copied())
    }
}

// ---------------------------------------------------------------------
// Scripted metadata fetcher. Tracks peak concurrency so tests can assert
// the discovery fan-out bound.
// ---------------------------------------------------------------------

#[derive(Default)]
pub struct MockFetcher {
    pub documents: HashMap<String, NftDocument>,
    pub delay: Duration,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl MetadataFetcher for MockFetcher {
    async fn fetch(&self, uri: &str) -> Result<NftDocument, KingdomError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.documents
            .get(uri)
            .cloned()
            .ok_or_else(|| KingdomError::NetworkFailure(format!("{uri}: scripted failure")))
    }
}

// ---------------------------------------------------------------------
// Scripted transaction sender
// ---------------------------------------------------------------------

#[derive(Default)]
pub struct MockSender {
    pub sent: Mutex<Vec<Transaction>>,
    pub fail_send: bool,
    /// Dispositions returned per status poll; once exhausted, Confirmed.
    pub statuses: Mutex<VecDeque<SignatureDisposition>>,
    /// When set, `latest_blockhash` parks until notified.
    pub hold_blockhash: Option<Arc<Notify>>,
}

impl MockSender {
    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("sent lock").len()
    }

    pub fn with_statuses(statuses: Vec<SignatureDisposition>) -> Self {
        Self {
            statuses: Mutex::new(statuses.into()),
            ..Self::default()
        }
    }
}

impl TxSender for MockSender {
    async fn latest_blockhash(&self) -> Result<Hash, KingdomError> {
        if let Some(gate) = &self.hold_blockhash {
            gate.notified().await;
        }
        Ok(Hash::default())
    }

    async fn send(&self, transaction: &Transaction) -> Result<Signature, KingdomError> {
        if self.fail_send {
            return Err(KingdomError::NetworkFailure("scripted send failure".into()));
        }
        let signature = transaction.signatures[0];
        self.sent.lock().expect("sent lock").push(transaction.clone());
        Ok(signature)
    }

    async fn signature_status(
        &self,
        _signature: &Signature,
    ) -> Result<SignatureDisposition, KingdomError> {
        Ok(self
            .statuses
            .lock()
            .expect("statuses lock")
            .pop_front()
            .unwrap_or(SignatureDisposition::Confirmed))
    }
}

// ---------------------------------------------------------------------
// Fixture builders
// ---------------------------------------------------------------------

pub fn kp(n: u8) -> solana_sdk::signature::Keypair {
    use solana_sdk::signature::SeedDerivable;
    solana_sdk::signature::Keypair::from_seed(&[n; 32]).expect("seeded keypair")
}

pub fn pk(n: u8) -> Pubkey {
    Pubkey::new_from_array([n; 32])
}

fn push_padded_string(data: &mut Vec<u8>, text: &str, capacity: usize) {
    data.extend_from_slice(&(capacity as u32).to_le_bytes());
    let mut bytes = text.as_bytes().to_vec();
    assert!(bytes.len() <= capacity, "fixture string too long");
    bytes.resize(capacity, 0);
    data.extend_from_slice(&bytes);
}

/// A token-metadata account in the program's padded layout, with `creator`
/// as the first creator.
pub fn metadata_account_bytes(
    update_authority: &Pubkey,
    mint: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
    creator: &Pubkey,
) -> Vec<u8> {
    let mut data = vec![4u8]; // key = MetadataV1
    data.extend_from_slice(update_authority.as_ref());
    data.extend_from_slice(mint.as_ref());
    push_padded_string(&mut data, name, animal_kingdom_client::state::MAX_NAME_LENGTH);
    push_padded_string(&mut data, symbol, animal_kingdom_client::state::MAX_SYMBOL_LENGTH);
    push_padded_string(&mut data, uri, animal_kingdom_client::state::MAX_URI_LENGTH);
    data.extend_from_slice(&100u16.to_le_bytes()); // seller fee
    data.push(1); // creators: Some
    data.extend_from_slice(&1u32.to_le_bytes()); // one creator
    data.extend_from_slice(creator.as_ref());
    data.push(0); // verified
    data.push(100); // share
    data
}

/// Account bytes as the chain lays them out: discriminator, Borsh body,
/// zero padding up to the allocated space.
pub fn anchor_account_bytes<T: borsh::BorshSerialize>(
    name: &str,
    value: &T,
    space: usize,
) -> Vec<u8> {
    let mut data = animal_kingdom_client::state::account_discriminator(name).to_vec();
    data.extend(value.try_to_vec().expect("borsh"));
    assert!(data.len() <= space, "fixture space too small");
    data.resize(space, 0);
    data
}

pub fn sample_election(date: i64) -> animal_kingdom_client::state::Election {
    use animal_kingdom_client::state::{Election, Organisation, Organisations};
    use animal_kingdom_client::vote::{
        ORG_MARINE_LIFE_PROTECTION, ORG_NATURE_PROTECTION_SOCIETY, ORG_WILDLIFE_PROTECTION,
    };
    Election {
        desc: "election".to_string(),
        date,
        organisations: Organisations {
            wildlife_protection: Organisation {
                name: ORG_WILDLIFE_PROTECTION.to_string(),
                address: pk(11),
                votes: 0,
            },
            nature_protection_society: Organisation {
                name: ORG_NATURE_PROTECTION_SOCIETY.to_string(),
                address: pk(12),
                votes: 0,
            },
            marine_life_protection: Organisation {
                name: ORG_MARINE_LIFE_PROTECTION.to_string(),
                address: pk(13),
                votes: 0,
            },
        },
    }
}

pub fn document(name: &str, category: &str) -> NftDocument {
    NftDocument {
        name: name.to_string(),
        description: format!("{name} conservation cause"),
        symbol: Some("$ALKM".to_string()),
        image: format!("https://img.example/{name}.png"),
        attributes: vec![NftAttribute {
            trait_type: category.to_string(),
            value: serde_json::Value::String(name.to_string()),
        }],
        extra: serde_json::Map::new(),
    }
}
