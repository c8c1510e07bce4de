#![forbid(unsafe_code)]

use std::str::FromStr;

use solana_account_decoder::UiAccountEncoding;
use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig},
    rpc_filter::{Memcmp, RpcFilterType},
};
use solana_sdk::{
    commitment_config::CommitmentConfig, hash::Hash, program_pack::Pack, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};

use crate::{error::KingdomError, pda::TOKEN_METADATA_PROGRAM_ID, state::METADATA_CREATOR_OFFSET};

/// Read access to chain state. Production is RPC-backed; tests substitute
/// scripted implementations.
#[allow(async_fn_in_trait)]
pub trait ChainReader {
    /// Raw data of an account, or `None` if the account does not exist.
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, KingdomError>;

    /// All token-metadata accounts whose first creator is `creator`,
    /// as (address, raw data) pairs.
    async fn metadata_accounts_by_creator(
        &self,
        creator: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, KingdomError>;

    /// Owner of the largest token account of `mint`. For an NFT with supply
    /// one this is the current holder.
    async fn largest_token_holder(&self, mint: &Pubkey)
        -> Result<Option<Pubkey>, KingdomError>;
}

/// Where a submitted signature currently stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureDisposition {
    Pending,
    Confirmed,
    Failed(String),
}

/// Transaction transport. Kept separate from [`ChainReader`] so a submitter
/// needs no read access beyond the blockhash.
#[allow(async_fn_in_trait)]
pub trait TxSender {
    async fn latest_blockhash(&self) -> Result<Hash, KingdomError>;
    async fn send(&self, transaction: &Transaction) -> Result<Signature, KingdomError>;
    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<SignatureDisposition, KingdomError>;
}

/// RPC-backed implementation of both chain traits.
pub struct RpcGateway {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcGateway {
    pub fn new(url: impl Into<String>) -> Self {
        let commitment = CommitmentConfig::confirmed();
        Self {
            rpc: RpcClient::new_with_commitment(url.into(), commitment),
            commitment,
        }
    }
}

impl ChainReader for RpcGateway {
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, KingdomError> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn metadata_accounts_by_creator(
        &self,
        creator: &Pubkey,
    ) -> Result<Vec<(Pubkey, Vec<u8>)>, KingdomError> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                METADATA_CREATOR_OFFSET,
                creator.as_ref(),
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .rpc
            .get_program_accounts_with_config(&TOKEN_METADATA_PROGRAM_ID, config)
            .await?;
        Ok(accounts
            .into_iter()
            .map(|(address, account)| (address, account.data))
            .collect())
    }

    async fn largest_token_holder(
        &self,
        mint: &Pubkey,
    ) -> Result<Option<Pubkey>, KingdomError> {
        let balances = self.rpc.get_token_largest_accounts(mint).await?;
        let Some(largest) = balances.into_iter().next() else {
            return Ok(None);
        };
        let token_account = Pubkey::from_str(&largest.address)
            .map_err(|e| KingdomError::Malformed(format!("token account address: {e}")))?;
        let Some(data) = self.account_data(&token_account).await? else {
            return Ok(None);
        };
        let unpacked = spl_token::state::Account::unpack(&data)
            .map_err(|e| KingdomError::Malformed(format!("token account {token_account}: {e}")))?;
        Ok(Some(unpacked.owner))
    }
}

impl TxSender for RpcGateway {
    async fn latest_blockhash(&self) -> Result<Hash, KingdomError> {
        Ok(self.rpc.get_latest_blockhash().await?)
    }

    async fn send(&self, transaction: &Transaction) -> Result<Signature, KingdomError> {
        Ok(self.rpc.send_transaction(transaction).await?)
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> Result<SignatureDisposition, KingdomError> {
        let response = self.rpc.get_signature_statuses(&[*signature]).await?;
        let Some(status) = response.value.into_iter().next().flatten() else {
            return Ok(SignatureDisposition::Pending);
        };
        if let Some(err) = status.err {
            return Ok(SignatureDisposition::Failed(err.to_string()));
        }
        if status.satisfies_commitment(CommitmentConfig::finalized()) {
            Ok(SignatureDisposition::Confirmed)
        } else {
            Ok(SignatureDisposition::Pending)
        }
    }
}
