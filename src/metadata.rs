#![forbid(unsafe_code)]

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::KingdomError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: serde_json::Value,
}

/// Off-chain metadata document, as hosted at the uri stored in the on-chain
/// metadata account. Display-only fields (location, organisation, price,
/// duration, ...) vary per document and are kept as an open map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NftDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub image: String,
    #[serde(default)]
    pub attributes: Vec<NftAttribute>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Conservation cause category, carried as the first attribute's trait type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Animal,
    Oceans,
    Land,
    Youth,
}

impl Category {
    pub fn from_trait_type(trait_type: &str) -> Option<Self> {
        match trait_type {
            "Animal" => Some(Category::Animal),
            "Oceans" => Some(Category::Oceans),
            "Land" => Some(Category::Land),
            "Youth" => Some(Category::Youth),
            _ => None,
        }
    }
}

impl NftDocument {
    pub fn category(&self) -> Option<Category> {
        self.attributes
            .first()
            .and_then(|a| Category::from_trait_type(&a.trait_type))
    }
}

/// Loads metadata documents. Production uses HTTP; tests script responses.
#[allow(async_fn_in_trait)]
pub trait MetadataFetcher {
    async fn fetch(&self, uri: &str) -> Result<NftDocument, KingdomError>;
}

pub struct HttpMetadataFetcher {
    http: reqwest::Client,
}

impl HttpMetadataFetcher {
    pub fn new() -> Result<Self, KingdomError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| KingdomError::NetworkFailure(e.to_string()))?;
        Ok(Self { http })
    }
}

impl MetadataFetcher for HttpMetadataFetcher {
    async fn fetch(&self, uri: &str) -> Result<NftDocument, KingdomError> {
        let response = self
            .http
            .get(uri)
            .send()
            .await
            .map_err(|e| KingdomError::NetworkFailure(format!("{uri}: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(KingdomError::NetworkFailure(format!(
                "{uri}: http status {status}"
            )));
        }
        response
            .json::<NftDocument>()
            .await
            .map_err(|e| KingdomError::Malformed(format!("{uri}: {e}")))
    }
}
