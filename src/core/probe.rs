use crate::core::{ConfigProvider, RepoLookup};
use crate::domain::model::{RepoInfo, RepoStatus, StatusRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const USER_AGENT: &str = concat!("spark-network/", env!("CARGO_PKG_VERSION"));

/// `RepoLookup` against the GitHub REST API.
pub struct GithubLookup {
    client: Client,
    api_root: String,
    owner: String,
    token: Option<String>,
}

impl GithubLookup {
    pub fn new(
        api_root: &str,
        owner: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_root: api_root.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_root(),
            config.owner(),
            config.token().map(str::to_string),
            config.request_timeout(),
        )
    }

    pub fn repo_url(&self, name: &str) -> String {
        format!("{}/repos/{}/{}", self.api_root, self.owner, name)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl RepoLookup for GithubLookup {
    async fn fetch(&self, name: &str) -> Result<Option<RepoInfo>> {
        let url = self.repo_url(name);

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        if response.status() != StatusCode::OK {
            return Ok(None);
        }

        let info: RepoInfo = response.json().await?;
        Ok(Some(info))
    }
}

/// Turns lookups into `StatusRecord`s. Never fails: every error becomes `NotFound`.
pub struct StatusProbe<L: RepoLookup> {
    lookup: L,
    owner: String,
}

impl<L: RepoLookup> StatusProbe<L> {
    pub fn new(lookup: L, owner: &str) -> Self {
        Self {
            lookup,
            owner: owner.to_string(),
        }
    }

    pub async fn probe(&self, name: &str) -> StatusRecord {
        match self.lookup.fetch(name).await {
            Ok(Some(info)) => StatusRecord::Found(normalize(&self.owner, name, info)),
            Ok(None) => StatusRecord::NotFound,
            Err(e) => {
                tracing::debug!("lookup for {} failed, treating as missing: {}", name, e);
                StatusRecord::NotFound
            }
        }
    }
}

pub fn pages_url(owner: &str, name: &str) -> String {
    format!("https://{}.github.io/{}/", owner, name)
}

pub fn normalize(owner: &str, name: &str, info: RepoInfo) -> RepoStatus {
    let has_pages = info.has_pages.unwrap_or(false);

    RepoStatus {
        has_pages,
        updated: info
            .updated_at
            .map(|ts| ts.chars().take(10).collect())
            .unwrap_or_default(),
        size: info.size.unwrap_or(0),
        language: info
            .language
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "None".to_string()),
        url: info.html_url.unwrap_or_default(),
        pages_url: has_pages.then(|| pages_url(owner, name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const OWNER: &str = "pewpi-infinity";

    fn lookup(server: &MockServer, token: Option<&str>) -> GithubLookup {
        GithubLookup::new(
            &server.base_url(),
            OWNER,
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_found_repo_is_normalized() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/pewpi-infinity/infinity-spark-hub");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "name": "infinity-spark-hub",
                    "has_pages": true,
                    "updated_at": "2025-03-14T09:26:53Z",
                    "size": 421,
                    "language": "JavaScript",
                    "html_url": "https://github.com/pewpi-infinity/infinity-spark-hub",
                    "stargazers_count": 3
                }));
        });

        let probe = StatusProbe::new(lookup(&server, None), OWNER);
        let record = probe.probe("infinity-spark-hub").await;

        api_mock.assert();
        match record {
            StatusRecord::Found(status) => {
                assert!(status.has_pages);
                assert_eq!(status.updated, "2025-03-14");
                assert_eq!(status.size, 421);
                assert_eq!(status.language, "JavaScript");
                assert_eq!(
                    status.url,
                    "https://github.com/pewpi-infinity/infinity-spark-hub"
                );
                assert_eq!(
                    status.pages_url.as_deref(),
                    Some("https://pewpi-infinity.github.io/infinity-spark-hub/")
                );
            }
            StatusRecord::NotFound => panic!("expected Found"),
        }
    }

    #[tokio::test]
    async fn test_no_pages_means_no_pages_url() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/pewpi-infinity/infinity-spark-lab");
            then.status(200).json_body(serde_json::json!({
                "has_pages": false,
                "updated_at": "2024-11-01T00:00:00Z",
                "size": 7,
                "language": "Python",
                "html_url": "https://github.com/pewpi-infinity/infinity-spark-lab"
            }));
        });

        let probe = StatusProbe::new(lookup(&server, None), OWNER);
        let StatusRecord::Found(status) = probe.probe("infinity-spark-lab").await else {
            panic!("expected Found");
        };
        assert!(!status.has_pages);
        assert!(status.pages_url.is_none());
    }

    #[tokio::test]
    async fn test_missing_fields_get_defaults() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/pewpi-infinity/infinity-spark-mint");
            then.status(200).json_body(serde_json::json!({
                "language": null,
                "updated_at": null,
                "html_url": "https://github.com/pewpi-infinity/infinity-spark-mint"
            }));
        });

        let probe = StatusProbe::new(lookup(&server, None), OWNER);
        let StatusRecord::Found(status) = probe.probe("infinity-spark-mint").await else {
            panic!("expected Found");
        };
        assert_eq!(status.language, "None");
        assert_eq!(status.updated, "");
        assert_eq!(status.size, 0);
        assert!(!status.has_pages);
    }

    #[tokio::test]
    async fn test_not_found_and_server_errors_collapse() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/pewpi-infinity/gone");
            then.status(404)
                .json_body(serde_json::json!({"message": "Not Found"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/pewpi-infinity/broken");
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(GET).path("/repos/pewpi-infinity/garbled");
            then.status(200).body("<html>not json</html>");
        });

        let probe = StatusProbe::new(lookup(&server, None), OWNER);
        assert_eq!(probe.probe("gone").await, StatusRecord::NotFound);
        assert_eq!(probe.probe("broken").await, StatusRecord::NotFound);
        assert_eq!(probe.probe("garbled").await, StatusRecord::NotFound);
    }

    #[tokio::test]
    async fn test_timeout_collapses_to_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/pewpi-infinity/slow");
            then.status(200)
                .delay(Duration::from_millis(800))
                .json_body(serde_json::json!({"has_pages": true}));
        });

        let lookup = GithubLookup::new(
            &server.base_url(),
            OWNER,
            None,
            Duration::from_millis(100),
        )
        .unwrap();
        let probe = StatusProbe::new(lookup, OWNER);

        assert_eq!(probe.probe("slow").await, StatusRecord::NotFound);
    }

    #[tokio::test]
    async fn test_unreachable_host_collapses_to_not_found() {
        let lookup = GithubLookup::new(
            "http://127.0.0.1:1",
            OWNER,
            None,
            Duration::from_millis(500),
        )
        .unwrap();
        let probe = StatusProbe::new(lookup, OWNER);

        assert_eq!(probe.probe("anything").await, StatusRecord::NotFound);
    }

    #[tokio::test]
    async fn test_bearer_token_sent_when_configured() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/pewpi-infinity/infinity-spark")
                .header("Authorization", "Bearer s3cret")
                .header_exists("User-Agent");
            then.status(200).json_body(serde_json::json!({"html_url": "x"}));
        });

        let lookup = lookup(&server, Some("s3cret"));
        assert!(lookup.is_authenticated());
        let probe = StatusProbe::new(lookup, OWNER);

        assert!(probe.probe("infinity-spark").await.exists());
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_empty_token_means_unauthenticated() {
        let server = MockServer::start();
        let authed_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/repos/pewpi-infinity/infinity-spark")
                .header_exists("Authorization");
            then.status(500);
        });
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/repos/pewpi-infinity/infinity-spark");
            then.status(200).json_body(serde_json::json!({"html_url": "x"}));
        });

        let lookup = lookup(&server, Some(""));
        assert!(!lookup.is_authenticated());
        let probe = StatusProbe::new(lookup, OWNER);

        assert!(probe.probe("infinity-spark").await.exists());
        api_mock.assert();
        authed_mock.assert_hits(0);
    }

    #[test]
    fn test_repo_url_trims_trailing_slash() {
        let lookup = GithubLookup::new(
            "https://api.github.com/",
            OWNER,
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            lookup.repo_url("infinity-spark"),
            "https://api.github.com/repos/pewpi-infinity/infinity-spark"
        );
    }
}
