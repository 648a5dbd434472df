use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum HttpRequestMethod {
    #[default]
    Get,
    Post,
}

pub type Headers = HashMap<String, String>;
pub type Queries = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct HttpRequestData {
    pub method: HttpRequestMethod,
    pub url: String,
    pub headers: Option<Headers>,
    pub queries: Option<Queries>,
    pub body: Option<Value>,
}

impl HttpRequestData {
    pub fn new(method: HttpRequestMethod, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            ..Default::default()
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_queries(mut self, queries: Queries) -> Self {
        self.queries = Some(queries);
        self
    }

    pub fn with_json_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

pub type NumberOfRetries = u32;
pub type SecondsToSleep = u32;

#[derive(Default)]
pub struct HttpRequestWithRetriesParams<'a> {
    pub req_entity_name: &'a str,
    pub target_logger: &'a str,
    pub number_of_retries: NumberOfRetries,
    pub seconds_to_sleep: SecondsToSleep,
}

pub const DEFAULT_NUMBER_OF_REQUEST_RETRIES: NumberOfRetries = 2;
pub const DEFAULT_NUMBER_OF_SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY: SecondsToSleep = 1;

#[derive(Debug, Clone, Copy)]
pub struct RetrySettings {
    pub number_of_request_retries: NumberOfRetries,
    pub seconds_to_sleep_before_request_retry: SecondsToSleep,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            number_of_request_retries: DEFAULT_NUMBER_OF_REQUEST_RETRIES,
            seconds_to_sleep_before_request_retry:
                DEFAULT_NUMBER_OF_SECONDS_TO_SLEEP_BEFORE_REQUEST_RETRY,
        }
    }
}
