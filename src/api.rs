// API client module: a small blocking HTTP client for the sizer. Every
// call is a single POST; a 200 reply yields a value, anything else is
// explained on stdout by the error reporter and returned as
// `SizerError::Status`.

use log::{debug, warn};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;

use crate::config::SizerConfig;
use crate::error::{Result, SizerError};
use crate::report::ErrorReport;

const SPREADSHEET_MIME: &str = "application/vnd.ms-excel";

/// Short-lived bearer credential returned by the authorization endpoint.
/// Held in memory only; it is never refreshed automatically.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        AccessToken(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Body of a successful token exchange. Only the fields this client reads.
#[derive(Deserialize, Debug)]
struct AuthorizeResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// A workbook to submit to an adapter's ingestion endpoint.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub access_token: AccessToken,
    /// Path of the local workbook.
    pub file_name: PathBuf,
    /// Adapter identifier, selecting `/sizing/adapter/{file_type}`.
    pub file_type: String,
}

/// A recommendation query. `json_data` is sent as-is.
#[derive(Clone, Debug)]
pub struct RecommendationRequest {
    pub access_token: AccessToken,
    pub json_data: String,
}

/// Blocking sizer client. Holds no credentials; each call takes the token
/// it needs.
#[derive(Clone)]
pub struct SizerClient {
    client: Client,
    config: SizerConfig,
}

impl SizerClient {
    pub fn new(config: SizerConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(SizerError::Client)?;
        Ok(SizerClient { client, config })
    }

    /// Client against the production endpoints, or the ones named by
    /// `SIZER_AUTH_URL` / `SIZER_API_URL`.
    pub fn from_env() -> Result<Self> {
        SizerClient::new(SizerConfig::from_env())
    }

    /// Exchange a refresh token for an access token.
    pub fn get_access_token(&self, refresh_token: &str) -> Result<AccessToken> {
        let url = &self.config.auth_url;
        debug!("POST {} (refresh token exchange)", url);
        let res = self
            .client
            .post(url)
            .query(&[("api_token", refresh_token)])
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .map_err(|source| SizerError::Transport {
                url: url.clone(),
                source: source.without_url(),
            })?;

        if res.status() != StatusCode::OK {
            return Err(report_failure(res));
        }
        let body: AuthorizeResponse = res.json().map_err(decode_error)?;
        if let Some(secs) = body.expires_in {
            debug!("access token expires in {}s", secs);
        }
        body.access_token
            .map(AccessToken::new)
            .ok_or(SizerError::MissingField("access_token"))
    }

    /// Upload a workbook for analysis by the adapter named in
    /// `req.file_type`. Returns the parsed analysis unchanged.
    pub fn parse_excel(&self, req: &UploadRequest) -> Result<Value> {
        let url = self.config.adapter_url(&req.file_type);

        let file = File::open(&req.file_name).map_err(|source| SizerError::Spreadsheet {
            path: req.file_name.clone(),
            source,
        })?;
        let file_name = req
            .file_name
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("workbook.xlsx");
        let part = multipart::Part::reader(file)
            .file_name(file_name.to_string())
            .mime_str(SPREADSHEET_MIME)
            .map_err(|e| SizerError::Request(e.without_url()))?;
        let form = multipart::Form::new().part("file", part);

        debug!("POST {} ({})", url, req.file_name.display());
        let res = self
            .client
            .post(&url)
            .query(&[("csp-auth-token", req.access_token.as_str())])
            .multipart(form)
            .send()
            .map_err(|source| SizerError::Transport {
                url,
                source: source.without_url(),
            })?;
        json_body(res)
    }

    /// Ask for a recommendation. The payload is posted as the raw body.
    pub fn get_recommendation(&self, req: &RecommendationRequest) -> Result<Value> {
        let url = self.config.recommendation_url();
        debug!("POST {} ({} byte payload)", url, req.json_data.len());
        let res = self
            .client
            .post(&url)
            .query(&[("csp-auth-token", req.access_token.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .body(req.json_data.clone())
            .send()
            .map_err(|source| SizerError::Transport {
                url,
                source: source.without_url(),
            })?;
        json_body(res)
    }
}

/// Parse a 200 reply, or report and reject anything else.
fn json_body(res: Response) -> Result<Value> {
    if res.status() == StatusCode::OK {
        return res.json::<Value>().map_err(decode_error);
    }
    Err(report_failure(res))
}

// reqwest errors carry the full request URL, whose query holds the token.
fn decode_error(e: reqwest::Error) -> SizerError {
    SizerError::Decode(e.without_url())
}

fn report_failure(res: Response) -> SizerError {
    let status = res.status().as_u16();
    // Path only; the query carries the token.
    let path = res.url().path().to_string();
    let body = res.text().unwrap_or_default();
    warn!("{} answered {}", path, status);

    let report = ErrorReport::from_body(status, &body);
    report.print();
    SizerError::Status(report)
}
