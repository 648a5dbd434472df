use anyhow::{Context, Result};
use base::entities::{EntityId, Item};
use base::requests::api::SyncHttpRequest;
use base::requests::entities::{
    HttpRequestData, HttpRequestMethod, HttpRequestWithRetriesParams, RetrySettings,
};
use base::requests::request_json_with_retries;
use serde::{Deserialize, Serialize};

use crate::address::entities::BuildingId;
use crate::equipment::OperatorId;
use crate::pricing::Price;

pub const CATALOG_API_URL_ENV: &str = "CATALOG_API_URL";

pub type TariffId = EntityId;
pub type ProviderId = EntityId;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Internet,
    Tv,
    Mobile,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TariffService {
    pub kind: ServiceKind,
    pub description: String,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TariffProperties {
    pub name: String,
    pub monthly_price: Option<Price>,
    pub services: Vec<TariffService>,
    pub provider_id: Option<ProviderId>,
}

pub type Tariff = Item<TariffId, TariffProperties>;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct OperatorProperties {
    pub name: String,
}

pub type Operator = Item<OperatorId, OperatorProperties>;

pub trait CatalogApi {
    /// Tariffs available at the building.
    fn get_tariffs(&self, building_id: BuildingId) -> Result<Vec<Tariff>>;
    fn get_operators(&self) -> Result<Vec<Operator>>;
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TariffServiceJson {
    #[serde(rename = "type")]
    kind: ServiceKind,
    description: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TariffJson {
    id: TariffId,
    name: String,
    #[serde(default)]
    monthly_price: Option<Price>,
    #[serde(default)]
    services: Vec<TariffServiceJson>,
    #[serde(default)]
    provider_id: Option<ProviderId>,
}

#[derive(Deserialize, Debug)]
struct OperatorJson {
    id: OperatorId,
    name: String,
}

pub struct HttpCatalogApi<R>
where
    R: SyncHttpRequest,
{
    api_url: String,
    target_logger: String,
    retry_settings: RetrySettings,
    request_api: R,
}

impl<R> HttpCatalogApi<R>
where
    R: SyncHttpRequest,
{
    pub fn new(api_url: String, target_logger: String, retry_settings: RetrySettings, request_api: R) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            target_logger,
            retry_settings,
            request_api,
        }
    }

    pub fn from_env(target_logger: String, retry_settings: RetrySettings, request_api: R) -> Result<Self> {
        let api_url =
            dotenv::var(CATALOG_API_URL_ENV).context(format!("{} is not set", CATALOG_API_URL_ENV))?;

        Ok(Self::new(api_url, target_logger, retry_settings, request_api))
    }

    fn retry_params<'a>(&'a self, entity_name: &'a str) -> HttpRequestWithRetriesParams<'a> {
        HttpRequestWithRetriesParams {
            req_entity_name: entity_name,
            target_logger: &self.target_logger,
            number_of_retries: self.retry_settings.number_of_request_retries,
            seconds_to_sleep: self.retry_settings.seconds_to_sleep_before_request_retry,
        }
    }
}

impl<R> CatalogApi for HttpCatalogApi<R>
where
    R: SyncHttpRequest,
{
    fn get_tariffs(&self, building_id: BuildingId) -> Result<Vec<Tariff>> {
        let req_data = HttpRequestData::new(
            HttpRequestMethod::Get,
            &format!("{}/buildings/{}/tariffs", self.api_url, building_id),
        );

        let tariffs: Vec<TariffJson> =
            request_json_with_retries(req_data, self.retry_params("tariffs"), &self.request_api)?;

        Ok(tariffs
            .into_iter()
            .map(|tariff| Item {
                id: tariff.id,
                props: TariffProperties {
                    name: tariff.name,
                    monthly_price: tariff.monthly_price,
                    services: tariff
                        .services
                        .into_iter()
                        .map(|service| TariffService {
                            kind: service.kind,
                            description: service.description,
                        })
                        .collect(),
                    provider_id: tariff.provider_id,
                },
            })
            .collect())
    }

    fn get_operators(&self) -> Result<Vec<Operator>> {
        let req_data =
            HttpRequestData::new(HttpRequestMethod::Get, &format!("{}/operators", self.api_url));

        let operators: Vec<OperatorJson> =
            request_json_with_retries(req_data, self.retry_params("operators"), &self.request_api)?;

        Ok(operators
            .into_iter()
            .map(|operator| Item {
                id: operator.id,
                props: OperatorProperties {
                    name: operator.name,
                },
            })
            .collect())
    }
}
