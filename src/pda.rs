#![forbid(unsafe_code)]

use solana_sdk::{pubkey, pubkey::Pubkey};

/// The external token-metadata program that owns metadata and master-edition
/// accounts.
pub const TOKEN_METADATA_PROGRAM_ID: Pubkey =
    pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

pub const SEED_MINT_AUTHORITY: &[u8] = b"mint";
pub const SEED_NFT_CUSTODY: &[u8] = b"nftPDA";
pub const SEED_ELECTION: &[u8] = b"election";
pub const SEED_TREASURY: &[u8] = b"treasury";
pub const SEED_METADATA: &[u8] = b"metadata";
pub const SEED_EDITION: &[u8] = b"edition";

/// Mint of the NFT named `nft_name`. The program addresses mints by token
/// name, with the program id itself as the second seed.
pub fn derive_mint(program_id: &Pubkey, nft_name: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[nft_name.as_bytes(), program_id.as_ref()], program_id)
}

/// Program-wide mint authority.
pub fn derive_mint_authority(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_MINT_AUTHORITY], program_id)
}

/// Custody account holding an unsold NFT. An NFT whose owner equals this
/// address is still protectable.
pub fn derive_nft_custody(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_NFT_CUSTODY, mint.as_ref()], program_id)
}

/// Election for a given date. The date seed is the base-10 string of the
/// epoch-seconds value, not its little-endian bytes; this matches the
/// deployed interface and is covered by tests.
pub fn derive_election(program_id: &Pubkey, date_of_election: i64) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[SEED_ELECTION, date_of_election.to_string().as_bytes()],
        program_id,
    )
}

/// Vote record for one (NFT mint, election) pair.
pub fn derive_vote(program_id: &Pubkey, mint: &Pubkey, election: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[mint.as_ref(), election.as_ref()], program_id)
}

/// Platform treasury, paid on every transfer.
pub fn derive_treasury(program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[SEED_TREASURY], program_id)
}

/// Metadata account of a mint, owned by the token-metadata program.
pub fn derive_metadata(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            SEED_METADATA,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}

/// Master edition of a mint. After edition creation this account also acts
/// as the mint authority the program expects to be passed in.
pub fn derive_master_edition(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            SEED_METADATA,
            TOKEN_METADATA_PROGRAM_ID.as_ref(),
            mint.as_ref(),
            SEED_EDITION,
        ],
        &TOKEN_METADATA_PROGRAM_ID,
    )
}
