#![forbid(unsafe_code)]

//! Off-chain client for the Animal Kingdom conservation NFT platform:
//! deterministic address derivation, NFT discovery and enrichment,
//! transaction assembly and submission, and DAO vote casting against the
//! deployed on-chain program.

pub mod config;
pub mod discovery;
pub mod error;
pub mod instruction;
pub mod metadata;
pub mod ops;
pub mod pda;
pub mod rpc;
pub mod state;
pub mod submit;
pub mod vote;

use solana_sdk::{pubkey, pubkey::Pubkey};

/// The deployed Animal Kingdom program.
pub const PROGRAM_ID: Pubkey = pubkey!("Bco4dXjvoM1oPsU5c2u8rDKXesq2r9iKoM6cSGz53i87");

pub fn id() -> Pubkey {
    PROGRAM_ID
}
