use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::config::GitHubConfig;
use crate::error::FetchError;

/// Executes named GraphQL queries and returns the `data` member of the response.
#[async_trait]
pub trait GraphQlClient: Send + Sync {
    async fn execute(&self, name: &str, query: &str, variables: Value) -> Result<Value, FetchError>;
}

/// Run a query and decode its `data` into `T`.
pub async fn run_query<T: DeserializeOwned>(
    client: &dyn GraphQlClient,
    name: &str,
    query: &str,
    variables: Value,
) -> Result<T, FetchError> {
    let data = client.execute(name, query, variables).await?;
    serde_json::from_value(data)
        .map_err(|e| FetchError::query(name, format!("unexpected response shape: {e}")))
}

/// GraphQL client authenticated with the token of the local `gh` session.
pub struct GhClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl GhClient {
    pub async fn connect(config: &GitHubConfig) -> Result<Self, FetchError> {
        let token = auth_token(&config.gh_path, config.hostname.as_deref()).await?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("gh-board/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.graphql_url.clone(),
            token,
        })
    }
}

async fn auth_token(gh_path: &str, hostname: Option<&str>) -> Result<String, FetchError> {
    let mut cmd = tokio::process::Command::new(gh_path);
    cmd.args(["auth", "token"]);
    if let Some(host) = hostname {
        cmd.args(["--hostname", host]);
    }

    let output = cmd
        .output()
        .await
        .map_err(|e| FetchError::Client(format!("failed to run {gh_path}: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FetchError::Client(format!(
            "gh auth token failed: {}",
            stderr.trim()
        )));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(FetchError::Client(
            "gh auth token returned no token; run `gh auth login`".into(),
        ));
    }
    Ok(token)
}

#[derive(Deserialize)]
struct GqlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GqlError>,
}

#[derive(Deserialize)]
struct GqlError {
    message: String,
}

fn into_data(name: &str, response: GqlResponse) -> Result<Value, FetchError> {
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(FetchError::query(name, messages.join("; ")));
    }
    match response.data {
        Some(Value::Null) | None => Err(FetchError::query(name, "response contained no data")),
        Some(data) => Ok(data),
    }
}

#[async_trait]
impl GraphQlClient for GhClient {
    async fn execute(&self, name: &str, query: &str, variables: Value) -> Result<Value, FetchError> {
        tracing::debug!(query = name, %variables, "sending GraphQL query");
        let body = serde_json::json!({
            "operationName": name,
            "query": query,
            "variables": variables,
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::query(name, format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(FetchError::query(name, format!("HTTP {status}: {}", text.trim())));
        }

        let gql: GqlResponse = resp
            .json()
            .await
            .map_err(|e| FetchError::query(name, format!("failed to parse response: {e}")))?;
        into_data(name, gql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GqlResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn data_is_returned() {
        let data = into_data("Q", parse(r#"{"data":{"viewer":{"login":"me"}}}"#)).unwrap();
        assert_eq!(data["viewer"]["login"], "me");
    }

    #[test]
    fn errors_are_joined() {
        let resp = parse(r#"{"data":null,"errors":[{"message":"a"},{"message":"b"}]}"#);
        assert_eq!(into_data("Q", resp), Err(FetchError::query("Q", "a; b")));
    }

    #[test]
    fn errors_win_over_partial_data() {
        let resp = parse(r#"{"data":{"node":null},"errors":[{"message":"not found"}]}"#);
        assert!(into_data("Q", resp).is_err());
    }

    #[test]
    fn null_data_is_an_error() {
        let err = into_data("Q", parse(r#"{"data":null}"#)).unwrap_err();
        assert!(err.to_string().contains("no data"));
    }

    #[tokio::test]
    async fn missing_gh_binary_is_a_client_error() {
        let config = GitHubConfig {
            gh_path: "/nonexistent/gh-board-test-gh".into(),
            ..GitHubConfig::default()
        };
        match GhClient::connect(&config).await {
            Err(FetchError::Client(msg)) => assert!(msg.contains("failed to run")),
            Err(other) => panic!("expected client error, got {other}"),
            Ok(_) => panic!("expected client error"),
        }
    }
}
