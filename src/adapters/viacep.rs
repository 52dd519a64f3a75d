use crate::domain::model::{AddressInfo, LookupOutcome};
use crate::domain::ports::AddressLookup;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Postal-code lookup against a ViaCEP-compatible service:
/// `GET {base}/ws/{digits}/json/`. A missing code comes back as HTTP 200
/// with an `"erro"` marker rather than a 404.
#[derive(Debug, Clone)]
pub struct ViaCepLookup {
    client: Client,
    base_url: String,
}

impl ViaCepLookup {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    // the service has shipped both `"erro": true` and `"erro": "true"`
    #[serde(default)]
    erro: Option<serde_json::Value>,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

impl ViaCepResponse {
    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(value) => value.as_bool() == Some(true) || value.as_str() == Some("true"),
            None => false,
        }
    }
}

#[async_trait]
impl AddressLookup for ViaCepLookup {
    async fn lookup(&self, postal_code_digits: &str) -> Result<LookupOutcome> {
        let url = format!(
            "{}/ws/{}/json/",
            self.base_url.trim_end_matches('/'),
            postal_code_digits
        );
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body: ViaCepResponse = response.json().await?;

        if body.is_not_found() {
            tracing::debug!("postal code {} not found", postal_code_digits);
            return Ok(LookupOutcome::NotFound);
        }

        Ok(LookupOutcome::Found(AddressInfo {
            street: body.logradouro,
            district: body.bairro,
            city: body.localidade,
            state_code: body.uf,
        }))
    }
}
