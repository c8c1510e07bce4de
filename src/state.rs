#![forbid(unsafe_code)]

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{hash, pubkey::Pubkey};

use crate::error::KingdomError;

/// Anchor-style account discriminator: sha256("account:<Name>")[0..8].
pub const ACCOUNT_DISCRIMINATOR_LEN: usize = 8;

pub fn account_discriminator(name: &str) -> [u8; ACCOUNT_DISCRIMINATOR_LEN] {
    let digest = hash::hash(format!("account:{name}").as_bytes());
    let mut out = [0u8; ACCOUNT_DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest.to_bytes()[..ACCOUNT_DISCRIMINATOR_LEN]);
    out
}

/// Decode an account body after checking its discriminator. Accounts are
/// allocated with fixed space, so trailing zero padding is tolerated.
fn unpack_account<T: BorshDeserialize>(name: &str, data: &[u8]) -> Result<T, KingdomError> {
    if data.len() < ACCOUNT_DISCRIMINATOR_LEN {
        return Err(KingdomError::Malformed(format!(
            "{name} account shorter than its discriminator"
        )));
    }
    if data[..ACCOUNT_DISCRIMINATOR_LEN] != account_discriminator(name) {
        return Err(KingdomError::Malformed(format!(
            "account discriminator does not match {name}"
        )));
    }
    let mut body = &data[ACCOUNT_DISCRIMINATOR_LEN..];
    T::deserialize(&mut body)
        .map_err(|e| KingdomError::Malformed(format!("{name} account body: {e}")))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Organisation {
    pub name: String,
    pub address: Pubkey,
    pub votes: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Organisations {
    pub wildlife_protection: Organisation,
    pub nature_protection_society: Organisation,
    pub marine_life_protection: Organisation,
}

/// On-chain election account: one voting period over the fixed set of three
/// organisations. Created by an admin; read-only from this crate.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Election {
    pub desc: String,
    pub date: i64,
    pub organisations: Organisations,
}

impl Election {
    pub const ACCOUNT_NAME: &'static str = "Election";

    pub fn unpack(data: &[u8]) -> Result<Self, KingdomError> {
        unpack_account(Self::ACCOUNT_NAME, data)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct OrganisationVote {
    pub amount: u32,
    pub organisation_name: String,
    pub organisation_address: Pubkey,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct VoteBreakdown {
    pub wildlife_protection: OrganisationVote,
    pub nature_protection_society: OrganisationVote,
    pub marine_life_protection: OrganisationVote,
}

/// On-chain vote record, keyed by (NFT mint, election). Created once per
/// pair; the interface has no update operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Vote {
    pub desc: String,
    pub mint: Pubkey,
    pub voter: Pubkey,
    pub ata: Pubkey,
    pub date: i64,
    pub vote: VoteBreakdown,
}

impl Vote {
    pub const ACCOUNT_NAME: &'static str = "Vote";

    pub fn unpack(data: &[u8]) -> Result<Self, KingdomError> {
        unpack_account(Self::ACCOUNT_NAME, data)
    }
}

/// Custody record for one NFT; the account name on chain is `NftPDA`.
#[derive(Clone, Debug, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct NftCustody {
    pub mint: Pubkey,
    pub conservation_address: String,
}

impl NftCustody {
    pub const ACCOUNT_NAME: &'static str = "NftPDA";

    pub fn unpack(data: &[u8]) -> Result<Self, KingdomError> {
        unpack_account(Self::ACCOUNT_NAME, data)
    }
}

// ---------------------------------------------------------------------
// Token-metadata account prefix.
//
// The metadata program stores its strings at fixed capacity, padded with
// NULs, which is what makes the creator memcmp offset stable:
//   0        key (u8)
//   1..33    update_authority
//   33..65   mint
//   65..     name   (u32 len + 32 bytes)
//   101..    symbol (u32 len + 10 bytes)
//   115..    uri    (u32 len + 200 bytes)
//   319..321 seller_fee_basis_points (u16)
//   321      creators option tag
//   322..326 creators vec len
//   326..    first creator address
// ---------------------------------------------------------------------

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

/// Byte offset of the first creator address, used as the memcmp filter when
/// listing a creator's NFTs.
pub const METADATA_CREATOR_OFFSET: usize = 1
    + 32
    + 32
    + (4 + MAX_NAME_LENGTH)
    + (4 + MAX_SYMBOL_LENGTH)
    + (4 + MAX_URI_LENGTH)
    + 2
    + 1
    + 4;

/// The slice of a token-metadata account this crate needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataAccount {
    pub update_authority: Pubkey,
    pub mint: Pubkey,
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

impl MetadataAccount {
    pub fn unpack(data: &[u8]) -> Result<Self, KingdomError> {
        let mut cursor = 1usize; // key byte
        let update_authority = read_pubkey(data, &mut cursor)?;
        let mint = read_pubkey(data, &mut cursor)?;
        let name = read_padded_string(data, &mut cursor, MAX_NAME_LENGTH)?;
        let symbol = read_padded_string(data, &mut cursor, MAX_SYMBOL_LENGTH)?;
        let uri = read_padded_string(data, &mut cursor, MAX_URI_LENGTH)?;
        Ok(Self {
            update_authority,
            mint,
            name,
            symbol,
            uri,
        })
    }
}

fn read_pubkey(data: &[u8], cursor: &mut usize) -> Result<Pubkey, KingdomError> {
    let end = cursor
        .checked_add(32)
        .ok_or_else(|| KingdomError::Malformed("metadata offset overflow".into()))?;
    let bytes: [u8; 32] = data
        .get(*cursor..end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| KingdomError::Malformed("metadata account truncated".into()))?;
    *cursor = end;
    Ok(Pubkey::new_from_array(bytes))
}

fn read_padded_string(
    data: &[u8],
    cursor: &mut usize,
    max_len: usize,
) -> Result<String, KingdomError> {
    let len_end = cursor
        .checked_add(4)
        .ok_or_else(|| KingdomError::Malformed("metadata offset overflow".into()))?;
    let len_bytes: [u8; 4] = data
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| KingdomError::Malformed("metadata account truncated".into()))?;
    let len = u32::from_le_bytes(len_bytes) as usize;
    if len > max_len {
        return Err(KingdomError::Malformed(format!(
            "metadata string length {len} exceeds capacity {max_len}"
        )));
    }
    let end = len_end + len;
    let raw = data
        .get(len_end..end)
        .ok_or_else(|| KingdomError::Malformed("metadata account truncated".into()))?;
    *cursor = end;
    let text = std::str::from_utf8(raw)
        .map_err(|_| KingdomError::Malformed("metadata string is not utf-8".into()))?;
    Ok(text.trim_end_matches('\0').to_string())
}
