#![forbid(unsafe_code)]

use log::info;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer};
use spl_associated_token_account::get_associated_token_address;

use crate::{
    error::KingdomError,
    instruction::{self, OrganisationWallets},
    pda,
    rpc::{ChainReader, TxSender},
    state::{Election, OrganisationVote, Vote, VoteBreakdown},
    submit::Submitter,
};

/// A ballot allocates at most this many points across the organisations.
pub const MAX_VOTE_POINTS: u32 = 100;

pub const ORG_WILDLIFE_PROTECTION: &str = "mauritius_wildlife_protection";
pub const ORG_NATURE_PROTECTION_SOCIETY: &str = "mauritius_nature_protection_society";
pub const ORG_MARINE_LIFE_PROTECTION: &str = "mauritius_marine_life_protection";

/// Points allocated to each organisation by one ballot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    pub wildlife_protection: u32,
    pub nature_protection_society: u32,
    pub marine_life_protection: u32,
}

impl Allocation {
    pub fn total(&self) -> u64 {
        u64::from(self.wildlife_protection)
            + u64::from(self.nature_protection_society)
            + u64::from(self.marine_life_protection)
    }

    /// Client-side precondition only; the program re-validates on chain and
    /// remains the source of truth.
    pub fn validate(&self) -> Result<(), KingdomError> {
        let total = self.total();
        if total > u64::from(MAX_VOTE_POINTS) {
            return Err(KingdomError::InvalidInput(format!(
                "allocation totals {total} points, the maximum is {MAX_VOTE_POINTS}"
            )));
        }
        Ok(())
    }
}

/// Election account for `date`, or `None` if no election exists for it.
pub async fn fetch_election<C: ChainReader>(
    chain: &C,
    program_id: &Pubkey,
    date: i64,
) -> Result<Option<Election>, KingdomError> {
    let (address, _) = pda::derive_election(program_id, date);
    match chain.account_data(&address).await? {
        None => Ok(None),
        Some(data) => Election::unpack(&data).map(Some),
    }
}

/// Existing vote record for (mint, election), or `None` if the pair has not
/// voted yet.
pub async fn fetch_vote<C: ChainReader>(
    chain: &C,
    program_id: &Pubkey,
    mint: &Pubkey,
    election: &Pubkey,
) -> Result<Option<Vote>, KingdomError> {
    let (address, _) = pda::derive_vote(program_id, mint, election);
    match chain.account_data(&address).await? {
        None => Ok(None),
        Some(data) => Vote::unpack(&data).map(Some),
    }
}

/// Cast a ballot with the voting right of one owned NFT.
///
/// The allocation is validated before anything is built or sent; an invalid
/// allocation submits nothing. On success returns a locally reconstructed
/// vote record in the on-chain shape, for immediate display. The record's
/// `date` carries the election date; the chain stamps its own clock.
#[allow(clippy::too_many_arguments)]
pub async fn cast_vote<S: TxSender>(
    sender: &S,
    submitter: &Submitter,
    program_id: &Pubkey,
    payer: &Keypair,
    nft_name: &str,
    mint: &Pubkey,
    election: &Election,
    allocation: &Allocation,
) -> Result<Vote, KingdomError> {
    allocation.validate()?;

    let wallets = OrganisationWallets::from(&election.organisations);
    let ix = instruction::create_vote(
        program_id,
        nft_name,
        mint,
        election.date,
        &wallets,
        allocation.wildlife_protection,
        allocation.nature_protection_society,
        allocation.marine_life_protection,
        &payer.pubkey(),
    )?;
    let signature = submitter.submit(sender, &[ix], payer).await?;
    info!("vote for {nft_name} cast in {signature}");

    Ok(Vote {
        desc: "vote".to_string(),
        mint: *mint,
        voter: payer.pubkey(),
        ata: get_associated_token_address(&payer.pubkey(), mint),
        date: election.date,
        vote: VoteBreakdown {
            wildlife_protection: OrganisationVote {
                amount: allocation.wildlife_protection,
                organisation_name: ORG_WILDLIFE_PROTECTION.to_string(),
                organisation_address: wallets.wildlife_protection,
            },
            nature_protection_society: OrganisationVote {
                amount: allocation.nature_protection_society,
                organisation_name: ORG_NATURE_PROTECTION_SOCIETY.to_string(),
                organisation_address: wallets.nature_protection_society,
            },
            marine_life_protection: OrganisationVote {
                amount: allocation.marine_life_protection,
                organisation_name: ORG_MARINE_LIFE_PROTECTION.to_string(),
                organisation_address: wallets.marine_life_protection,
            },
        },
    })
}
