//! CEP (postal code) lookup for address autofill, against a ViaCEP-compatible service.
//! Public endpoint: no bearer token, no refresh.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::Address;
use crate::validation::normalize_cep;
use serde::Deserialize;
use std::sync::Arc;

const CEP_NOT_FOUND: &str = "CEP not found";

#[derive(Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    cep: String,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    complemento: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
    // `true` or `"true"` depending on the ViaCEP version.
    #[serde(default)]
    erro: Option<serde_json::Value>,
}

impl ViaCepResponse {
    fn is_error(&self) -> bool {
        match &self.erro {
            Some(serde_json::Value::Bool(b)) => *b,
            Some(serde_json::Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct AddressService {
    client: Arc<ApiClient>,
}

impl AddressService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// GET {cep_base_url}/{cep}/json/. Street number and complement are left empty.
    pub async fn lookup_cep(&self, cep: &str) -> Result<Address, ApiError> {
        let cep = normalize_cep(cep)?;
        let url = format!(
            "{}/{}/json/",
            self.client.config().cep_base_url,
            urlencoding::encode(&cep)
        );
        log::debug!("[salon_core] CEP lookup {}", url);
        let resp = self.client.http().get(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::BAD_REQUEST {
            return Err(ApiError::NotFound(CEP_NOT_FOUND.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: "CEP service unavailable".to_string(),
            });
        }
        let body: ViaCepResponse = resp.json().await?;
        if body.is_error() {
            return Err(ApiError::NotFound(CEP_NOT_FOUND.to_string()));
        }
        Ok(Address {
            cep: if body.cep.is_empty() { cep } else { body.cep },
            street: body.logradouro,
            number: String::new(),
            complement: Some(body.complemento).filter(|c| !c.is_empty()),
            neighborhood: body.bairro,
            city: body.localidade,
            state: body.uf,
        })
    }
}

/// Copy looked-up fields into a form, keeping what the user typed for number and complement.
pub fn merge_address(form: &mut Address, found: Address) {
    form.cep = found.cep;
    form.street = found.street;
    form.neighborhood = found.neighborhood;
    form.city = found.city;
    form.state = found.state;
    if form.complement.as_deref().map(str::is_empty).unwrap_or(true) {
        form.complement = found.complement;
    }
}
