//! Mock batch endpoint shared by the integration tests.
//!
//! The fetcher blocks on its own runtime, so tests are plain `#[test]`
//! functions and the mock server gets a separate runtime here.

#![allow(dead_code)]

use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const BATCH_PATH: &str = "/graph/v1/paper/batch";

pub struct MockApi {
    pub server: MockServer,
    rt: Runtime,
}

impl MockApi {
    pub fn start() -> Self {
        let rt = Runtime::new().expect("failed to build test runtime");
        let server = rt.block_on(MockServer::start());
        Self { server, rt }
    }

    pub fn mount(&self, mock: Mock) {
        self.rt.block_on(mock.mount(&self.server));
    }

    pub fn batch_url(&self) -> String {
        format!("{}{BATCH_PATH}", self.server.uri())
    }

    pub fn requests(&self) -> Vec<Request> {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

/// Respond with `response` to a batch request for exactly `ids`.
pub fn batch_mock(ids: &[&str], response: Value) -> Mock {
    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .and(body_json(json!({ "ids": ids })))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
}

/// Fail any batch request for exactly `ids` with `status`.
pub fn failing_batch_mock(ids: &[&str], status: u16) -> Mock {
    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .and(body_json(json!({ "ids": ids })))
        .respond_with(ResponseTemplate::new(status))
}

/// A paper record shaped like the Graph API's batch response.
pub fn paper(pmid: &str, citations: u64) -> Value {
    json!({
        "paperId": format!("s2-{pmid}"),
        "externalIds": { "PubMed": pmid, "CorpusId": 1000 },
        "title": format!("Paper {pmid}"),
        "authors": [{ "authorId": "42", "name": "A. Author" }],
        "year": 2001,
        "citationCount": citations,
        "fieldsOfStudy": ["Medicine"],
        "publicationDate": "2001-02-03"
    })
}

/// Ids as the request body carries them
pub fn pmids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|id| format!("PMID:{id}")).collect()
}

/// Request body ids, in the order the server saw the requests
pub fn requested_ids(requests: &[Request]) -> Vec<Vec<String>> {
    requests
        .iter()
        .map(|r| {
            let body: Value = r.body_json().expect("request body is JSON");
            body["ids"]
                .as_array()
                .expect("ids array")
                .iter()
                .map(|v| v.as_str().expect("string id").to_string())
                .collect()
        })
        .collect()
}
