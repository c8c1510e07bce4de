#![forbid(unsafe_code)]

use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    error::KingdomError,
    instruction::{self, OrganisationWallets},
    pda,
    rpc::TxSender,
    submit::Submitter,
};

/// Everything needed to mint one NFT. The metadata document must already be
/// hosted; this crate does not upload storage.
#[derive(Clone, Debug)]
pub struct NftMintSpec {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub organisation_wallet: Pubkey,
}

/// One-time bootstrap of the program's mint authority.
pub async fn init_mint_authority<S: TxSender>(
    sender: &S,
    submitter: &Submitter,
    program_id: &Pubkey,
    payer: &Keypair,
) -> Result<Signature, KingdomError> {
    let ix = instruction::initialize_mint_authority(program_id, &payer.pubkey())?;
    submitter.submit(sender, &[ix], payer).await
}

/// Mint a new NFT: mint creation, metadata, and master edition in one
/// transaction. Returns the signature and the name-derived mint address.
pub async fn create_nft<S: TxSender>(
    sender: &S,
    submitter: &Submitter,
    program_id: &Pubkey,
    payer: &Keypair,
    spec: &NftMintSpec,
) -> Result<(Signature, Pubkey), KingdomError> {
    if spec.name.is_empty() {
        return Err(KingdomError::InvalidInput("NFT name is empty".into()));
    }
    let payer_key = payer.pubkey();
    let instructions = vec![
        instruction::create_mint(program_id, &spec.name, &payer_key, &spec.organisation_wallet)?,
        instruction::create_metadata(
            program_id,
            &spec.name,
            &spec.uri,
            spec.seller_fee_basis_points,
            &spec.symbol,
            &payer_key,
        )?,
        instruction::create_master_edition(program_id, &spec.name, &payer_key)?,
    ];
    let signature = submitter.submit(sender, &instructions, payer).await?;
    let (mint, _) = pda::derive_mint(program_id, &spec.name);
    info!("minted {} as {mint} in {signature}", spec.name);
    Ok((signature, mint))
}

/// Protect an NFT: transfer it from custody to the payer, paying the
/// conservation project and the treasury.
pub async fn transfer_nft<S: TxSender>(
    sender: &S,
    submitter: &Submitter,
    program_id: &Pubkey,
    payer: &Keypair,
    nft_name: &str,
    project_wallet: &Pubkey,
) -> Result<Signature, KingdomError> {
    let ix = instruction::transfer_nft(program_id, nft_name, &payer.pubkey(), project_wallet)?;
    let signature = submitter.submit(sender, &[ix], payer).await?;
    info!("transferred {nft_name} to {} in {signature}", payer.pubkey());
    Ok(signature)
}

/// Burn an NFT out of custody.
pub async fn burn_nft<S: TxSender>(
    sender: &S,
    submitter: &Submitter,
    program_id: &Pubkey,
    payer: &Keypair,
    nft_name: &str,
) -> Result<Signature, KingdomError> {
    let ix = instruction::delete_nft(program_id, nft_name)?;
    let signature = submitter.submit(sender, &[ix], payer).await?;
    info!("burned {nft_name} in {signature}");
    Ok(signature)
}

/// Open an election on `date` (epoch seconds). The date must lie in the
/// future; this is advisory, the program enforces it authoritatively.
pub async fn create_election<S: TxSender>(
    sender: &S,
    submitter: &Submitter,
    program_id: &Pubkey,
    payer: &Keypair,
    date: i64,
    wallets: &OrganisationWallets,
) -> Result<Signature, KingdomError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| KingdomError::InvalidInput(format!("system clock: {e}")))?
        .as_secs() as i64;
    if date <= now {
        return Err(KingdomError::InvalidInput(format!(
            "election date {date} is not in the future"
        )));
    }
    let ix = instruction::create_election(program_id, date, wallets, &payer.pubkey())?;
    let signature = submitter.submit(sender, &[ix], payer).await?;
    let (election, _) = pda::derive_election(program_id, date);
    info!("created election {election} for {date} in {signature}");
    Ok(signature)
}
