#![forbid(unsafe_code)]

use std::path::Path;
use std::str::FromStr;

use solana_sdk::signature::{read_keypair_file, Keypair};

use crate::error::KingdomError;

/// Which network to talk to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cluster {
    Devnet,
    MainnetBeta,
    Localnet,
    Custom(String),
}

impl Cluster {
    pub fn url(&self) -> &str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Cluster::Localnet => "http://127.0.0.1:8899",
            Cluster::Custom(url) => url,
        }
    }
}

impl FromStr for Cluster {
    type Err = KingdomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Cluster::Devnet),
            "mainnet-beta" | "mainnet" => Ok(Cluster::MainnetBeta),
            "localnet" => Ok(Cluster::Localnet),
            other if other.starts_with("http://") || other.starts_with("https://") => {
                Ok(Cluster::Custom(other.to_string()))
            }
            other => Err(KingdomError::InvalidInput(format!(
                "unknown cluster '{other}' (expected devnet, mainnet-beta, localnet, or a URL)"
            ))),
        }
    }
}

pub fn load_keypair(path: &Path) -> Result<Keypair, KingdomError> {
    read_keypair_file(path).map_err(|e| {
        KingdomError::InvalidInput(format!("cannot read keypair {}: {e}", path.display()))
    })
}
