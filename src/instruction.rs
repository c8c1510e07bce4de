#![forbid(unsafe_code)]

use borsh::BorshSerialize;
use solana_sdk::{
    hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};
use spl_associated_token_account::get_associated_token_address;

use crate::{error::KingdomError, pda, state::Organisations};

/// Named operations of the Animal Kingdom program, with their arguments.
///
/// Wire format: an 8-byte method discriminator followed by the Borsh-encoded
/// arguments in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub enum KingdomInstruction {
    /// initialize_mint_authority()
    /// One-time platform bootstrap of the mint-authority account.
    InitializeMintAuthority,

    /// create_mint(name)
    /// Creates the name-addressed mint, its custody record, and the custody
    /// token account, then mints the single token into custody.
    CreateMint { name: String },

    /// create_metadata(name, uri, seller_fee_basis_points, symbol)
    CreateMetadata {
        name: String,
        uri: String,
        seller_fee_basis_points: u16,
        symbol: String,
    },

    /// create_master_edition(name)
    CreateMasterEdition { name: String },

    /// delete_nft(name)
    /// Burns the NFT out of custody.
    DeleteNft { name: String },

    /// transfer_nft(name)
    /// Moves the NFT from custody to the payer's token account; the payer
    /// funds the conservation project and the treasury.
    TransferNft { name: String },

    /// create_election(date_of_election)
    CreateElection { date_of_election: i64 },

    /// create_vote(name_of_nft, date_of_election, three allocations)
    CreateVote {
        name_of_nft: String,
        date_of_election: i64,
        wildlife_protection_vote: u32,
        nature_protection_society_vote: u32,
        marine_life_protection_vote: u32,
    },
}

/// Method discriminator: sha256("global:<method>")[0..8].
pub fn method_discriminator(method: &str) -> [u8; 8] {
    let digest = hash::hash(format!("global:{method}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest.to_bytes()[..8]);
    out
}

impl KingdomInstruction {
    pub fn method_name(&self) -> &'static str {
        match self {
            KingdomInstruction::InitializeMintAuthority => "initialize_mint_authority",
            KingdomInstruction::CreateMint { .. } => "create_mint",
            KingdomInstruction::CreateMetadata { .. } => "create_metadata",
            KingdomInstruction::CreateMasterEdition { .. } => "create_master_edition",
            KingdomInstruction::DeleteNft { .. } => "delete_nft",
            KingdomInstruction::TransferNft { .. } => "transfer_nft",
            KingdomInstruction::CreateElection { .. } => "create_election",
            KingdomInstruction::CreateVote { .. } => "create_vote",
        }
    }

    pub fn pack(&self) -> Result<Vec<u8>, KingdomError> {
        let mut data = method_discriminator(self.method_name()).to_vec();
        let encode = |e: std::io::Error| KingdomError::Malformed(e.to_string());
        match self {
            KingdomInstruction::InitializeMintAuthority => {}
            KingdomInstruction::CreateMint { name }
            | KingdomInstruction::CreateMasterEdition { name }
            | KingdomInstruction::DeleteNft { name }
            | KingdomInstruction::TransferNft { name } => {
                name.serialize(&mut data).map_err(encode)?;
            }
            KingdomInstruction::CreateMetadata {
                name,
                uri,
                seller_fee_basis_points,
                symbol,
            } => {
                name.serialize(&mut data).map_err(encode)?;
                uri.serialize(&mut data).map_err(encode)?;
                seller_fee_basis_points.serialize(&mut data).map_err(encode)?;
                symbol.serialize(&mut data).map_err(encode)?;
            }
            KingdomInstruction::CreateElection { date_of_election } => {
                date_of_election.serialize(&mut data).map_err(encode)?;
            }
            KingdomInstruction::CreateVote {
                name_of_nft,
                date_of_election,
                wildlife_protection_vote,
                nature_protection_society_vote,
                marine_life_protection_vote,
            } => {
                name_of_nft.serialize(&mut data).map_err(encode)?;
                date_of_election.serialize(&mut data).map_err(encode)?;
                wildlife_protection_vote.serialize(&mut data).map_err(encode)?;
                nature_protection_society_vote
                    .serialize(&mut data)
                    .map_err(encode)?;
                marine_life_protection_vote
                    .serialize(&mut data)
                    .map_err(encode)?;
            }
        }
        Ok(data)
    }
}

/// Wallet addresses of the three organisations, in canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrganisationWallets {
    pub wildlife_protection: Pubkey,
    pub nature_protection_society: Pubkey,
    pub marine_life_protection: Pubkey,
}

impl From<&Organisations> for OrganisationWallets {
    fn from(orgs: &Organisations) -> Self {
        Self {
            wildlife_protection: orgs.wildlife_protection.address,
            nature_protection_society: orgs.nature_protection_society.address,
            marine_life_protection: orgs.marine_life_protection.address,
        }
    }
}

// ---------------------------------------------------------------------
// initialize_mint_authority
// Accounts:
// 0 [writable] mint_authority (PDA ["mint"])
// 1 []         system_program
// 2 []         token_program
// 3 [writable, signer] payer
// ---------------------------------------------------------------------
pub fn initialize_mint_authority(
    program_id: &Pubkey,
    payer: &Pubkey,
) -> Result<Instruction, KingdomError> {
    let (mint_authority, _) = pda::derive_mint_authority(program_id);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(mint_authority, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new(*payer, true),
        ],
        data: KingdomInstruction::InitializeMintAuthority.pack()?,
    })
}

// ---------------------------------------------------------------------
// create_mint(name)
// Accounts:
// 0  [writable] mint (PDA [name, program_id])
// 1  []         mint_authority (PDA ["mint"])
// 2  []         token_program
// 3  [writable] nft_custody (PDA ["nftPDA", mint])
// 4  [writable] token_account (ATA of mint for custody)
// 5  []         token_metadata_program
// 6  [writable, signer] payer
// 7  []         system_program
// 8  []         associated_token_program
// 9  []         current_program (the program id itself)
// 10 [writable] organisation_wallet
// ---------------------------------------------------------------------
pub fn create_mint(
    program_id: &Pubkey,
    name: &str,
    payer: &Pubkey,
    organisation_wallet: &Pubkey,
) -> Result<Instruction, KingdomError> {
    let (mint, _) = pda::derive_mint(program_id, name);
    let (mint_authority, _) = pda::derive_mint_authority(program_id);
    let (custody, _) = pda::derive_nft_custody(program_id, &mint);
    let token_account = get_associated_token_address(&custody, &mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(mint, false),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new(custody, false),
            AccountMeta::new(token_account, false),
            AccountMeta::new_readonly(pda::TOKEN_METADATA_PROGRAM_ID, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
            AccountMeta::new_readonly(*program_id, false),
            AccountMeta::new(*organisation_wallet, false),
        ],
        data: KingdomInstruction::CreateMint {
            name: name.to_string(),
        }
        .pack()?,
    })
}

// ---------------------------------------------------------------------
// create_metadata(name, uri, seller_fee_basis_points, symbol)
// Accounts:
// 0 []         mint
// 1 []         mint_authority
// 2 []         token_program
// 3 [writable] metadata (metadata PDA of mint)
// 4 []         token_metadata_program
// 5 [writable, signer] payer
// 6 []         system_program
// 7 []         current_program
// ---------------------------------------------------------------------
pub fn create_metadata(
    program_id: &Pubkey,
    name: &str,
    uri: &str,
    seller_fee_basis_points: u16,
    symbol: &str,
    payer: &Pubkey,
) -> Result<Instruction, KingdomError> {
    let (mint, _) = pda::derive_mint(program_id, name);
    let (mint_authority, _) = pda::derive_mint_authority(program_id);
    let (metadata, _) = pda::derive_metadata(&mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(mint, false),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new(metadata, false),
            AccountMeta::new_readonly(pda::TOKEN_METADATA_PROGRAM_ID, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: KingdomInstruction::CreateMetadata {
            name: name.to_string(),
            uri: uri.to_string(),
            seller_fee_basis_points,
            symbol: symbol.to_string(),
        }
        .pack()?,
    })
}

// ---------------------------------------------------------------------
// create_master_edition(name)
// Accounts:
// 0 [writable] mint
// 1 []         mint_authority
// 2 []         token_program
// 3 [writable] metadata
// 4 []         token_metadata_program
// 5 [writable, signer] payer
// 6 []         system_program
// 7 [writable] master_edition
// 8 []         current_program
// ---------------------------------------------------------------------
pub fn create_master_edition(
    program_id: &Pubkey,
    name: &str,
    payer: &Pubkey,
) -> Result<Instruction, KingdomError> {
    let (mint, _) = pda::derive_mint(program_id, name);
    let (mint_authority, _) = pda::derive_mint_authority(program_id);
    let (metadata, _) = pda::derive_metadata(&mint);
    let (master_edition, _) = pda::derive_master_edition(&mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(mint, false),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new(metadata, false),
            AccountMeta::new_readonly(pda::TOKEN_METADATA_PROGRAM_ID, false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new(master_edition, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: KingdomInstruction::CreateMasterEdition {
            name: name.to_string(),
        }
        .pack()?,
    })
}

// ---------------------------------------------------------------------
// delete_nft(name)
// Accounts (no signer beyond the transaction fee payer):
// 0 [writable] metadata
// 1 [writable] nft_custody (burn authority)
// 2 [writable] mint
// 3 [writable] token_account (custody ATA)
// 4 [writable] master_edition
// 5 []         token_program
// 6 []         token_metadata_program
// 7 [writable] mint_authority (the master edition after edition creation)
// 8 []         current_program
// ---------------------------------------------------------------------
pub fn delete_nft(program_id: &Pubkey, name: &str) -> Result<Instruction, KingdomError> {
    let (mint, _) = pda::derive_mint(program_id, name);
    let (metadata, _) = pda::derive_metadata(&mint);
    let (custody, _) = pda::derive_nft_custody(program_id, &mint);
    let token_account = get_associated_token_address(&custody, &mint);
    let (master_edition, _) = pda::derive_master_edition(&mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(metadata, false),
            AccountMeta::new(custody, false),
            AccountMeta::new(mint, false),
            AccountMeta::new(token_account, false),
            AccountMeta::new(master_edition, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(pda::TOKEN_METADATA_PROGRAM_ID, false),
            AccountMeta::new(master_edition, false),
            AccountMeta::new_readonly(*program_id, false),
        ],
        data: KingdomInstruction::DeleteNft {
            name: name.to_string(),
        }
        .pack()?,
    })
}

// ---------------------------------------------------------------------
// transfer_nft(name)
// Accounts:
// 0  [writable] project_account (conservation project wallet)
// 1  [writable] treasury_account (PDA ["treasury"])
// 2  [writable] from_account (custody ATA)
// 3  [writable] to_account (payer ATA)
// 4  [writable] authority_account (custody PDA)
// 5  [writable] mint
// 6  [writable] mint_authority (master edition)
// 7  []         current_program
// 8  []         token_program
// 9  []         associated_token_program
// 10 []         system_program
// 11 [writable, signer] payer
// ---------------------------------------------------------------------
pub fn transfer_nft(
    program_id: &Pubkey,
    name: &str,
    payer: &Pubkey,
    project_wallet: &Pubkey,
) -> Result<Instruction, KingdomError> {
    let (mint, _) = pda::derive_mint(program_id, name);
    let (treasury, _) = pda::derive_treasury(program_id);
    let (custody, _) = pda::derive_nft_custody(program_id, &mint);
    let from_account = get_associated_token_address(&custody, &mint);
    let to_account = get_associated_token_address(payer, &mint);
    let (master_edition, _) = pda::derive_master_edition(&mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*project_wallet, false),
            AccountMeta::new(treasury, false),
            AccountMeta::new(from_account, false),
            AccountMeta::new(to_account, false),
            AccountMeta::new(custody, false),
            AccountMeta::new(mint, false),
            AccountMeta::new(master_edition, false),
            AccountMeta::new_readonly(*program_id, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new(*payer, true),
        ],
        data: KingdomInstruction::TransferNft {
            name: name.to_string(),
        }
        .pack()?,
    })
}

// ---------------------------------------------------------------------
// create_election(date_of_election)
// Accounts:
// 0 [writable] election (PDA ["election", decimal date])
// 1 []         wildlife_protection wallet
// 2 []         nature_protection_society wallet
// 3 []         marine_life_protection wallet
// 4 []         system_program
// 5 [writable, signer] payer
// ---------------------------------------------------------------------
pub fn create_election(
    program_id: &Pubkey,
    date_of_election: i64,
    wallets: &OrganisationWallets,
    payer: &Pubkey,
) -> Result<Instruction, KingdomError> {
    let (election, _) = pda::derive_election(program_id, date_of_election);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(election, false),
            AccountMeta::new_readonly(wallets.wildlife_protection, false),
            AccountMeta::new_readonly(wallets.nature_protection_society, false),
            AccountMeta::new_readonly(wallets.marine_life_protection, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new(*payer, true),
        ],
        data: KingdomInstruction::CreateElection { date_of_election }.pack()?,
    })
}

// ---------------------------------------------------------------------
// create_vote(name_of_nft, date_of_election, allocations)
// Accounts:
// 0  [writable] vote (PDA [mint, election])
// 1  []         election (PDA ["election", decimal date])
// 2  [writable] mint
// 3  [writable] mint_authority (master edition)
// 4  [writable] ata_account (payer ATA holding the NFT)
// 5  []         wildlife_protection wallet
// 6  []         nature_protection_society wallet
// 7  []         marine_life_protection wallet
// 8  []         system_program
// 9  []         current_program
// 10 [writable, signer] payer
// ---------------------------------------------------------------------
#[allow(clippy::too_many_arguments)]
pub fn create_vote(
    program_id: &Pubkey,
    name_of_nft: &str,
    mint: &Pubkey,
    date_of_election: i64,
    wallets: &OrganisationWallets,
    wildlife_protection_vote: u32,
    nature_society_vote: u32,
    marine_life_vote: u32,
    payer: &Pubkey,
) -> Result<Instruction, KingdomError> {
    let (election, _) = pda::derive_election(program_id, date_of_election);
    let (vote, _) = pda::derive_vote(program_id, mint, &election);
    let (master_edition, _) = pda::derive_master_edition(mint);
    let ata_account = get_associated_token_address(payer, mint);
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(vote, false),
            AccountMeta::new_readonly(election, false),
            AccountMeta::new(*mint, false),
            AccountMeta::new(master_edition, false),
            AccountMeta::new(ata_account, false),
            AccountMeta::new_readonly(wallets.wildlife_protection, false),
            AccountMeta::new_readonly(wallets.nature_protection_society, false),
            AccountMeta::new_readonly(wallets.marine_life_protection, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(*program_id, false),
            AccountMeta::new(*payer, true),
        ],
        data: KingdomInstruction::CreateVote {
            name_of_nft: name_of_nft.to_string(),
            date_of_election,
            wildlife_protection_vote,
            nature_protection_society_vote: nature_society_vote,
            marine_life_protection_vote: marine_life_vote,
        }
        .pack()?,
    })
}
