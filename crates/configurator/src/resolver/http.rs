use anyhow::{Context, Result};
use base::entities::{EntityId, Item};
use base::requests::api::SyncHttpRequest;
use base::requests::entities::{
    HttpRequestData, HttpRequestMethod, HttpRequestWithRetriesParams, Queries, RetrySettings,
};
use base::requests::request_json_with_retries;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::address::entities::{BuildingId, Entrance, Floor, StreetId};
use crate::resolver::api::AddressResolver;
use crate::resolver::entities::{
    AddressSuggestion, Apartment, ApartmentParams, ApartmentProperties, Building, BuildingParams,
    BuildingProperties, CityParams, SearchScope, StreetParams,
};

pub const LOCATIONS_API_URL_ENV: &str = "LOCATIONS_API_URL";

pub type ApiUrl = String;
pub type LoggerTarget = String;

#[derive(Deserialize, Debug)]
struct CreatedEntityJson {
    id: EntityId,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct BuildingJson {
    id: BuildingId,
    house_number: String,
    #[serde(default)]
    corpus_number: Option<String>,
    #[serde(default)]
    entrances: Option<Entrance>,
    #[serde(default)]
    floors: Option<Floor>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApartmentJson {
    id: EntityId,
    number: String,
    #[serde(default)]
    entrance: Option<Entrance>,
    #[serde(default)]
    floor: Option<Floor>,
}

/// Client of the locations service.
pub struct HttpAddressResolver<R>
where
    R: SyncHttpRequest,
{
    api_url: ApiUrl,
    target_logger: LoggerTarget,
    retry_settings: RetrySettings,
    request_api: R,
}

impl<R> HttpAddressResolver<R>
where
    R: SyncHttpRequest,
{
    pub fn new(
        api_url: ApiUrl,
        target_logger: LoggerTarget,
        retry_settings: RetrySettings,
        request_api: R,
    ) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            target_logger,
            retry_settings,
            request_api,
        }
    }

    pub fn from_env(
        target_logger: LoggerTarget,
        retry_settings: RetrySettings,
        request_api: R,
    ) -> Result<Self> {
        let api_url = dotenv::var(LOCATIONS_API_URL_ENV)
            .context(format!("{} is not set", LOCATIONS_API_URL_ENV))?;

        Ok(Self::new(api_url, target_logger, retry_settings, request_api))
    }

    fn request<T: DeserializeOwned>(&self, req_data: HttpRequestData, entity_name: &str) -> Result<T> {
        request_json_with_retries(
            req_data,
            HttpRequestWithRetriesParams {
                req_entity_name: entity_name,
                target_logger: &self.target_logger,
                number_of_retries: self.retry_settings.number_of_request_retries,
                seconds_to_sleep: self.retry_settings.seconds_to_sleep_before_request_retry,
            },
            &self.request_api,
        )
    }

    fn create_or_find<P: Serialize>(&self, path: &str, params: &P, entity_name: &str) -> Result<EntityId> {
        let body = serde_json::to_value(params)
            .context(format!("error on serializing params of {}", entity_name))?;

        let req_data =
            HttpRequestData::new(HttpRequestMethod::Post, &format!("{}/{}", self.api_url, path))
                .with_json_body(body);

        let created: CreatedEntityJson = self.request(req_data, entity_name)?;

        Ok(created.id)
    }
}

impl<R> AddressResolver for HttpAddressResolver<R>
where
    R: SyncHttpRequest,
{
    fn autocomplete(&self, query: &str, scope: &SearchScope) -> Result<Vec<AddressSuggestion>> {
        let mut queries = Queries::from([
            (String::from("query"), query.to_string()),
            (String::from("scope"), scope.name().to_string()),
        ]);

        if let Some(parent_id) = scope.parent_id() {
            queries.insert(String::from("parentId"), parent_id.to_string());
        }

        let req_data = HttpRequestData::new(
            HttpRequestMethod::Get,
            &format!("{}/autocomplete", self.api_url),
        )
        .with_queries(queries);

        self.request(req_data, &format!("{} suggestions", scope.name()))
    }

    fn create_or_find_city(&self, params: &CityParams) -> Result<EntityId> {
        self.create_or_find("cities", params, "a city")
    }

    fn create_or_find_street(&self, params: &StreetParams) -> Result<EntityId> {
        self.create_or_find("streets", params, "a street")
    }

    fn create_or_find_building(&self, params: &BuildingParams) -> Result<EntityId> {
        self.create_or_find("buildings", params, "a building")
    }

    fn create_or_find_apartment(&self, params: &ApartmentParams) -> Result<EntityId> {
        self.create_or_find("apartments", params, "an apartment")
    }

    fn get_buildings(&self, street_id: StreetId) -> Result<Vec<Building>> {
        let req_data = HttpRequestData::new(
            HttpRequestMethod::Get,
            &format!("{}/streets/{}/buildings", self.api_url, street_id),
        );

        let buildings: Vec<BuildingJson> = self.request(req_data, "buildings of a street")?;

        Ok(buildings
            .into_iter()
            .map(|building| Item {
                id: building.id,
                props: BuildingProperties {
                    house_number: building.house_number,
                    corpus_number: building.corpus_number,
                    entrances: building.entrances,
                    floors: building.floors,
                },
            })
            .collect())
    }

    fn get_apartments(&self, building_id: BuildingId) -> Result<Vec<Apartment>> {
        let req_data = HttpRequestData::new(
            HttpRequestMethod::Get,
            &format!("{}/buildings/{}/apartments", self.api_url, building_id),
        );

        let apartments: Vec<ApartmentJson> = self.request(req_data, "apartments of a building")?;

        Ok(apartments
            .into_iter()
            .map(|apartment| Item {
                id: apartment.id,
                props: ApartmentProperties {
                    number: apartment.number,
                    entrance: apartment.entrance,
                    floor: apartment.floor,
                },
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRequest {
        requests: RefCell<Vec<HttpRequestData>>,
        response: String,
    }

    impl RecordingRequest {
        fn responding(response: &str) -> Self {
            Self {
                requests: Default::default(),
                response: response.to_string(),
            }
        }
    }

    impl SyncHttpRequest for RecordingRequest {
        fn call(&self, req: HttpRequestData) -> Result<String> {
            self.requests.borrow_mut().push(req);
            Ok(self.response.clone())
        }
    }

    fn resolver(response: &str) -> HttpAddressResolver<RecordingRequest> {
        HttpAddressResolver::new(
            String::from("http://locations.local/api/"),
            String::from("test"),
            RetrySettings {
                number_of_request_retries: 0,
                seconds_to_sleep_before_request_retry: 0,
            },
            RecordingRequest::responding(response),
        )
    }

    #[test]
    #[allow(non_snake_case)]
    fn autocomplete__street_scope__should_send_query_scope_and_parent() {
        let resolver = resolver(r#"[{"id": 5, "label": "Baumana st."}]"#);

        let suggestions = resolver
            .autocomplete("Baum", &SearchScope::Street { city_id: 1 })
            .unwrap();

        assert_eq!(
            suggestions,
            vec![AddressSuggestion {
                id: 5,
                label: String::from("Baumana st."),
                region_id: None,
            }]
        );

        let requests = resolver.request_api.requests.borrow();
        let queries = requests[0].queries.as_ref().unwrap();

        assert_eq!(requests[0].url, "http://locations.local/api/autocomplete");
        assert_eq!(queries["query"], "Baum");
        assert_eq!(queries["scope"], "street");
        assert_eq!(queries["parentId"], "1");
    }

    #[test]
    #[allow(non_snake_case)]
    fn create_or_find_building__created__should_post_camel_case_body_and_return_id() {
        let resolver = resolver(r#"{"id": 77}"#);

        let id = resolver
            .create_or_find_building(&BuildingParams {
                street_id: 5,
                house_number: String::from("10"),
                corpus_number: Some(String::from("2")),
            })
            .unwrap();

        assert_eq!(id, 77);

        let requests = resolver.request_api.requests.borrow();
        assert_eq!(requests[0].method, HttpRequestMethod::Post);
        assert_eq!(requests[0].url, "http://locations.local/api/buildings");
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &serde_json::json!({"streetId": 5, "houseNumber": "10", "corpusNumber": "2"})
        );
    }

    #[test]
    #[allow(non_snake_case)]
    fn get_apartments__json_list__should_map_into_items() {
        let resolver = resolver(r#"[{"id": 1, "number": "15", "entrance": 1, "floor": 4}]"#);

        let apartments = resolver.get_apartments(77).unwrap();

        assert_eq!(
            apartments,
            vec![Item {
                id: 1,
                props: ApartmentProperties {
                    number: String::from("15"),
                    entrance: Some(1),
                    floor: Some(4),
                },
            }]
        );
    }
}
