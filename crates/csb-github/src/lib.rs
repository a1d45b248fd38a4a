//! GitHub adapter (codespaces lifecycle).
//!
//! Implements the `csb-core` CodespacesApi port over the GitHub REST API. Each call
//! carries the caller's own token; the client itself holds no credentials.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, RequestBuilder, StatusCode, Url};
use serde::Deserialize;

use csb_core::{
    codespaces::{Codespace, CodespacesApi, LifecycleAction},
    errors::Error,
    Result,
};

const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("csb/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct CodespaceList {
    codespaces: Vec<CodespaceRow>,
}

#[derive(Deserialize)]
struct CodespaceRow {
    id: serde_json::Value,
}

impl CodespaceRow {
    /// GitHub returns numeric ids; other deployments use strings. Keep the text form.
    fn into_codespace(self) -> Option<Codespace> {
        let id = match self.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(Codespace { id })
    }
}

#[derive(Clone, Debug)]
pub struct GithubCodespacesClient {
    api_base: Url,
    http: reqwest::Client,
}

impl GithubCodespacesClient {
    /// `timeout: None` keeps reqwest's default (no overall request timeout).
    pub fn new(api_base: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let http = builder
            .build()
            .map_err(|e| Error::External(format!("github client build error: {e}")))?;

        let raw = api_base.into();
        let api_base = Url::parse(raw.trim())
            .map_err(|e| Error::Config(format!("invalid github api base {raw:?}: {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "github api base {raw:?} cannot carry a path"
            )));
        }

        Ok(Self { api_base, http })
    }

    /// Base URL plus `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::Config(format!(
                    "github api base {} cannot carry a path",
                    self.api_base
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, req: RequestBuilder, token: &str) -> RequestBuilder {
        req.header(header::AUTHORIZATION, format!("token {token}"))
            .header(header::ACCEPT, ACCEPT_GITHUB_V3)
    }

    async fn send(
        &self,
        operation: &'static str,
        req: RequestBuilder,
    ) -> Result<reqwest::Response> {
        req.send()
            .await
            .map_err(|e| Error::External(format!("{operation} request error: {e}")))
    }
}

#[async_trait]
impl CodespacesApi for GithubCodespacesClient {
    async fn list(&self, token: &str) -> Result<Vec<Codespace>> {
        const OP: &str = "list codespaces";

        let url = self.endpoint(&["user", "codespaces"])?;
        let resp = self
            .send(OP, self.authorized(self.http.get(url), token))
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::UnexpectedStatus {
                operation: OP,
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::External(format!("{OP} body error: {e}")))?;
        let list: CodespaceList = serde_json::from_slice(&body)?;

        let codespaces: Vec<Codespace> = list
            .codespaces
            .into_iter()
            .map(CodespaceRow::into_codespace)
            .collect::<Option<_>>()
            .ok_or_else(|| Error::External(format!("{OP}: codespace without a usable id")))?;
        tracing::debug!(count = codespaces.len(), "listed codespaces");
        Ok(codespaces)
    }

    async fn transition(&self, token: &str, id: &str, action: LifecycleAction) -> Result<()> {
        const OP: &str = "codespace lifecycle";

        // Path setters drop "." and ".." segments instead of encoding them.
        if matches!(id, "" | "." | "..") {
            return Err(Error::InvalidArgument(format!("codespace id {id:?}")));
        }
        let url = self.endpoint(&["user", "codespaces", id, action.path_segment()])?;
        let resp = self
            .send(OP, self.authorized(self.http.post(url), token))
            .await?;

        let status = resp.status();
        if status != StatusCode::ACCEPTED {
            return Err(Error::UnexpectedStatus {
                operation: OP,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
