#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

use animal_kingdom_client::{
    config::{load_keypair, Cluster},
    discovery::{discover, DiscoveryConfig, Generation},
    error::KingdomError,
    instruction::OrganisationWallets,
    metadata::HttpMetadataFetcher,
    ops::{self, NftMintSpec},
    pda,
    rpc::RpcGateway,
    submit::{SubmitConfig, Submitter},
    vote::{cast_vote, fetch_election, fetch_vote, Allocation},
};

#[derive(Parser)]
#[command(
    name = "kingdom-admin",
    version,
    about = "Admin tooling for the Animal Kingdom conservation NFT platform"
)]
struct Cli {
    #[arg(long, env = "KINGDOM_CLUSTER", default_value = "devnet")]
    cluster: Cluster,

    #[arg(long, env = "KINGDOM_PROGRAM_ID", default_value_t = animal_kingdom_client::PROGRAM_ID)]
    program_id: Pubkey,

    /// Path to the payer keypair; required by every command that submits.
    #[arg(long, env = "KINGDOM_KEYPAIR")]
    keypair: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every NFT created by the program, with owner and status.
    List {
        /// Wallet whose ownership should be highlighted.
        #[arg(long)]
        viewer: Option<Pubkey>,
    },
    /// Show an election and its running tallies.
    ShowElection {
        /// Election date, epoch seconds (UTC).
        #[arg(long)]
        date: i64,
    },
    /// Bootstrap the program mint authority (once per deployment).
    InitMintAuthority,
    /// Mint an NFT. The metadata document must already be hosted at --uri.
    Mint {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "$ALKM")]
        symbol: String,
        #[arg(long)]
        uri: String,
        #[arg(long, default_value_t = 100)]
        seller_fee_basis_points: u16,
        #[arg(long)]
        organisation_wallet: Pubkey,
    },
    /// Protect (purchase) an NFT by name, paying project and treasury.
    Protect {
        #[arg(long)]
        name: String,
        #[arg(long)]
        project_wallet: Pubkey,
    },
    /// Burn an NFT still held in custody.
    Burn {
        #[arg(long)]
        name: String,
    },
    /// Open an election over the three organisation wallets.
    CreateElection {
        /// Election date, epoch seconds (UTC); must be in the future.
        #[arg(long)]
        date: i64,
        #[arg(long)]
        wildlife_protection: Pubkey,
        #[arg(long)]
        nature_protection_society: Pubkey,
        #[arg(long)]
        marine_life_protection: Pubkey,
    },
    /// Cast a vote with an owned NFT. Allocations must total at most 100.
    Vote {
        #[arg(long)]
        name: String,
        /// Election date, epoch seconds (UTC).
        #[arg(long)]
        date: i64,
        #[arg(long, default_value_t = 0)]
        wildlife_protection: u32,
        #[arg(long, default_value_t = 0)]
        nature_protection_society: u32,
        #[arg(long, default_value_t = 0)]
        marine_life_protection: u32,
    },
}

fn require_keypair(path: &Option<PathBuf>) -> Result<Keypair, KingdomError> {
    let path = path.as_ref().ok_or_else(|| {
        KingdomError::InvalidInput("--keypair (or KINGDOM_KEYPAIR) is required".into())
    })?;
    load_keypair(path)
}

async fn run(cli: Cli) -> Result<(), KingdomError> {
    let gateway = RpcGateway::new(cli.cluster.url());
    let submitter = Submitter::new(SubmitConfig::default());
    let program_id = cli.program_id;

    match cli.command {
        Command::List { viewer } => {
            let fetcher = HttpMetadataFetcher::new()?;
            let token = Generation::new().begin();
            let report = discover(
                &gateway,
                &fetcher,
                &program_id,
                &DiscoveryConfig::default(),
                &token,
            )
            .await?;
            for nft in &report.nfts {
                let category = nft
                    .category()
                    .map(|c| format!("{c:?}"))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {}  [{category}]  owner {}  {:?}",
                    nft.mint,
                    nft.document.name,
                    nft.owner,
                    nft.status(viewer.as_ref()),
                );
            }
            for failure in &report.failures {
                println!(
                    "failed: metadata {} ({}): {}",
                    failure.metadata_address,
                    failure
                        .mint
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "mint unknown".to_string()),
                    failure.error
                );
            }
            println!(
                "{} NFTs, {} failures",
                report.nfts.len(),
                report.failures.len()
            );
        }
        Command::ShowElection { date } => {
            let (address, _) = pda::derive_election(&program_id, date);
            let election = fetch_election(&gateway, &program_id, date)
                .await?
                .ok_or(KingdomError::NotFound(address))?;
            println!("election {address} on {}", election.date);
            for org in [
                &election.organisations.wildlife_protection,
                &election.organisations.nature_protection_society,
                &election.organisations.marine_life_protection,
            ] {
                println!("  {}  {}  {} votes", org.name, org.address, org.votes);
            }
        }
        Command::InitMintAuthority => {
            let payer = require_keypair(&cli.keypair)?;
            let signature = ops::init_mint_authority(&gateway, &submitter, &program_id, &payer).await?;
            println!("mint authority initialized: {signature}");
        }
        Command::Mint {
            name,
            symbol,
            uri,
            seller_fee_basis_points,
            organisation_wallet,
        } => {
            let payer = require_keypair(&cli.keypair)?;
            let spec = NftMintSpec {
                name,
                symbol,
                uri,
                seller_fee_basis_points,
                organisation_wallet,
            };
            let (signature, mint) =
                ops::create_nft(&gateway, &submitter, &program_id, &payer, &spec).await?;
            println!("minted {mint}: {signature}");
        }
        Command::Protect { name, project_wallet } => {
            let payer = require_keypair(&cli.keypair)?;
            let signature = ops::transfer_nft(
                &gateway,
                &submitter,
                &program_id,
                &payer,
                &name,
                &project_wallet,
            )
            .await?;
            println!("protected '{name}': {signature}");
        }
        Command::Burn { name } => {
            let payer = require_keypair(&cli.keypair)?;
            let signature = ops::burn_nft(&gateway, &submitter, &program_id, &payer, &name).await?;
            println!("burned '{name}': {signature}");
        }
        Command::CreateElection {
            date,
            wildlife_protection,
            nature_protection_society,
            marine_life_protection,
        } => {
            let payer = require_keypair(&cli.keypair)?;
            let wallets = OrganisationWallets {
                wildlife_protection,
                nature_protection_society,
                marine_life_protection,
            };
            let signature =
                ops::create_election(&gateway, &submitter, &program_id, &payer, date, &wallets)
                    .await?;
            println!("election created: {signature}");
        }
        Command::Vote {
            name,
            date,
            wildlife_protection,
            nature_protection_society,
            marine_life_protection,
        } => {
            let payer = require_keypair(&cli.keypair)?;
            let (election_address, _) = pda::derive_election(&program_id, date);
            let election = fetch_election(&gateway, &program_id, date)
                .await?
                .ok_or(KingdomError::NotFound(election_address))?;
            let (mint, _) = pda::derive_mint(&program_id, &name);
            if fetch_vote(&gateway, &program_id, &mint, &election_address)
                .await?
                .is_some()
            {
                return Err(KingdomError::InvalidInput(format!(
                    "'{name}' has already voted in this election"
                )));
            }
            let allocation = Allocation {
                wildlife_protection,
                nature_protection_society,
                marine_life_protection,
            };
            let record = cast_vote(
                &gateway,
                &submitter,
                &program_id,
                &payer,
                &name,
                &mint,
                &election,
                &allocation,
            )
            .await?;
            println!(
                "vote cast with '{name}': {} / {} / {}",
                record.vote.wildlife_protection.amount,
                record.vote.nature_protection_society.amount,
                record.vote.marine_life_protection.amount,
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
