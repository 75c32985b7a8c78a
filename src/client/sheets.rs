//! Google Sheets v4 values API client.
use crate::client::auth::TokenSource;
use crate::client::AppendResponse;
use crate::client::GridClient;
use crate::client::GridError;
use crate::config::Settings;
use crate::database::range::SheetRange;
use crate::spreadsheet::cell::CellValue;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct AppendValuesResponse {
    updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateValuesResponse {
    updated_range: Option<String>,
}

/// Grid client backed by the Google Sheets values API.
///
/// The HTTP connection pool is created on first use and reused for the
/// lifetime of the client.
pub struct SheetsClient {
    spreadsheet_id: String,
    api_url: String,
    timeout: Duration,
    tokens: TokenSource,
    http: OnceCell<reqwest::Client>,
}

impl SheetsClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            spreadsheet_id: settings.spreadsheet_id.to_owned(),
            api_url: settings.api_url.to_owned(),
            timeout: settings.timeout,
            tokens: TokenSource::new(settings.credentials.clone(), &settings.token_url),
            http: OnceCell::new(),
        }
    }

    async fn http(&self) -> Result<&reqwest::Client, GridError> {
        self.http
            .get_or_try_init(|| async {
                debug!(timeout = ?self.timeout, "opening grid store connection");
                reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(GridError::from)
            })
            .await
    }

    /// Builds `{api}/v4/spreadsheets/{id}/values/{range}{suffix}`.
    fn values_url(&self, range: &SheetRange, suffix: &str) -> Result<Url, GridError> {
        let invalid = |message: &str| GridError::Url {
            url: self.api_url.to_owned(),
            message: message.to_owned(),
        };
        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(&e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot be a base URL"))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values"])
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }
}

#[async_trait]
impl GridClient for SheetsClient {
    #[tracing::instrument(skip_all, fields(range = %range))]
    async fn read_range(&self, range: &SheetRange) -> Result<Vec<Vec<CellValue>>, GridError> {
        let http = self.http().await?;
        let mut url = self.values_url(range, "")?;
        url.query_pairs_mut()
            .append_pair("majorDimension", "ROWS")
            .append_pair("valueRenderOption", "FORMATTED_VALUE");

        let response = http
            .get(url)
            .bearer_auth(self.tokens.bearer(http).await?.expose_secret())
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GridError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: ValueRange = response.json().await?;
        debug!(rows = data.values.len(), "read range");
        Ok(data
            .values
            .into_iter()
            .map(|row| row.into_iter().map(CellValue::from).collect())
            .collect())
    }

    #[tracing::instrument(skip_all, fields(range = %range, cells = values.len()))]
    async fn append_row(&self, range: &SheetRange, values: &[CellValue]) -> Result<AppendResponse, GridError> {
        let http = self.http().await?;
        let mut url = self.values_url(range, ":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = http
            .post(url)
            .bearer_auth(self.tokens.bearer(http).await?.expose_secret())
            .json(&json!({ "values": [values] }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GridError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let data: AppendValuesResponse = response.json().await?;
        let updated_range = data.updates.and_then(|updates| updates.updated_range);
        debug!(updated_range = ?updated_range, "appended row");
        Ok(AppendResponse { updated_range })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::config::TableSettings;
    use secrecy::SecretString;
    use wiremock::matchers::body_json;
    use wiremock::matchers::header;
    use wiremock::matchers::method;
    use wiremock::matchers::path_regex;
    use wiremock::matchers::query_param;
    use wiremock::Mock;
    use wiremock::MockServer;
    use wiremock::ResponseTemplate;

    fn settings(api_url: &str) -> Settings {
        Settings {
            spreadsheet_id: "sheet-123".to_string(),
            credentials: Credentials::AccessToken(SecretString::from("ya29.test".to_string())),
            api_url: api_url.to_string(),
            token_url: format!("{api_url}/token"),
            timeout: Duration::from_secs(5),
            table: TableSettings::default(),
        }
    }

    #[test]
    fn values_url_encodes_range() {
        let client = SheetsClient::new(&settings("https://sheets.example.com/"));
        let range = SheetRange::parse("Tabela Eventos!A:Z").unwrap();
        let url = client.values_url(&range, ":append").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.example.com/v4/spreadsheets/sheet-123/values/'Tabela%20Eventos'!A:Z:append"
        );
    }

    #[test]
    fn values_url_rejects_bad_base() {
        let client = SheetsClient::new(&settings("not a url"));
        let range = SheetRange::parse("Tab!A1").unwrap();
        assert!(matches!(client.values_url(&range, ""), Err(GridError::Url { .. })));
    }

    #[tokio::test]
    async fn read_range_maps_values() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/v4/spreadsheets/sheet-123/values/.*A1:Z500$"))
            .and(query_param("majorDimension", "ROWS"))
            .and(header("authorization", "Bearer ya29.test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "'Tabela Eventos'!A1:Z500",
                "majorDimension": "ROWS",
                "values": [["Evento", "Data", "Pax"], [], ["Launch", "10/10/2025", 120]]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SheetsClient::new(&settings(&server.uri()));
        let range = SheetRange::parse("Tabela Eventos!A1:Z500").unwrap();
        let rows = client.read_range(&range).await.unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], CellValue::text("Evento"));
        assert!(rows[1].is_empty());
        assert_eq!(rows[2][2], CellValue::Number(120.0));
    }

    #[tokio::test]
    async fn read_range_without_values() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "range": "'Tabela Eventos'!A1:Z500",
                "majorDimension": "ROWS"
            })))
            .mount(&server)
            .await;

        let client = SheetsClient::new(&settings(&server.uri()));
        let range = SheetRange::parse("Tabela Eventos!A1:Z500").unwrap();
        assert!(client.read_range(&range).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_range_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Requested entity was not found."))
            .mount(&server)
            .await;

        let client = SheetsClient::new(&settings(&server.uri()));
        let range = SheetRange::parse("Tab!A1:Z500").unwrap();
        let err = client.read_range(&range).await.unwrap_err();
        assert!(matches!(err, GridError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn append_row_returns_updated_range() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path_regex(r"^/v4/spreadsheets/sheet-123/values/.*A:Z:append$"))
            .and(query_param("valueInputOption", "USER_ENTERED"))
            .and(query_param("insertDataOption", "INSERT_ROWS"))
            .and(body_json(serde_json::json!({ "values": [["Launch", "", 3.0]] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "sheet-123",
                "updates": {
                    "updatedRange": "'Tabela Eventos'!A12:C12",
                    "updatedRows": 1
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = SheetsClient::new(&settings(&server.uri()));
        let range = SheetRange::parse("Tabela Eventos!A:Z").unwrap();
        let values = vec![CellValue::text("Launch"), CellValue::Empty, CellValue::Number(3.0)];
        let response = client.append_row(&range, &values).await.unwrap();

        assert_eq!(response.updated_range.as_deref(), Some("'Tabela Eventos'!A12:C12"));
    }

    #[tokio::test]
    async fn append_row_without_updates() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "spreadsheetId": "sheet-123"
            })))
            .mount(&server)
            .await;

        let client = SheetsClient::new(&settings(&server.uri()));
        let range = SheetRange::parse("Tab!A:Z").unwrap();
        let response = client.append_row(&range, &[CellValue::text("x")]).await.unwrap();
        assert_eq!(response.updated_range, None);
    }
}
