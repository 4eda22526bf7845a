//! Worksheet access through the Google Sheets v4 REST API.

use crate::extraction::ports::BearerToken;
use crate::reconciliation::{
    domain::Row,
    ports::{SpreadsheetError, SpreadsheetResult, SpreadsheetStore},
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Production Sheets endpoint.
pub const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Production Drive file listing endpoint.
pub const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const VALUE_INPUT: (&str, &str) = ("valueInputOption", "USER_ENTERED");
const GRID_FIELDS: &str = "sheets.properties(sheetId,title,gridProperties(rowCount,columnCount))";

/// Spare rows given to a new worksheet beyond its first payload.
const ROW_HEADROOM: usize = 100;

/// Column count of a new worksheet.
const NEW_SHEET_COLUMNS: usize = 20;

/// How the destination spreadsheet is found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetLocator {
    /// Known spreadsheet id.
    Id(String),
    /// First spreadsheet with this exact name, optionally inside a folder.
    Named {
        /// Spreadsheet file name.
        name: String,
        /// Drive folder id to search in.
        folder: Option<String>,
    },
}

impl SpreadsheetLocator {
    /// Drive search query for [`SpreadsheetLocator::Named`].
    #[must_use]
    pub fn drive_query(&self) -> Option<String> {
        let Self::Named { name, folder } = self else {
            return None;
        };
        let base = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            escape_literal(name)
        );
        Some(match folder {
            Some(parent) => format!("{base} and '{}' in parents", escape_literal(parent)),
            None => base,
        })
    }

    /// Resolves the locator to a spreadsheet id, searching Drive at
    /// `drive_api` when only a name is known.
    ///
    /// # Errors
    ///
    /// Returns [`SpreadsheetError::SpreadsheetNotFound`] when no file
    /// matches, or the request error when the search fails.
    pub async fn resolve(
        &self,
        client: &reqwest::Client,
        token: &BearerToken,
        drive_api: &str,
    ) -> SpreadsheetResult<String> {
        let name = match self {
            Self::Id(id) => return Ok(id.clone()),
            Self::Named { name, .. } => name,
        };
        let query = self.drive_query().unwrap_or_default();
        let request = client
            .get(drive_api)
            .bearer_auth(token.expose())
            .query(&[("q", query.as_str()), ("fields", "files(id,name)")]);
        let listing: FileList = decode(send(request).await?).await?;
        let found = listing.files.into_iter().next().map(|file| file.id);
        found.ok_or_else(|| SpreadsheetError::SpreadsheetNotFound(name.clone()))
    }
}

fn escape_literal(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct SheetEntry {
    #[serde(default)]
    properties: SheetProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    #[serde(default)]
    sheet_id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridProperties {
    #[serde(default)]
    row_count: usize,
    #[serde(default)]
    column_count: usize,
}

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Row>,
}

/// Spreadsheet store bound to one hosted spreadsheet.
#[derive(Debug, Clone)]
pub struct GoogleSheetsStore {
    client: reqwest::Client,
    token: BearerToken,
    spreadsheet_id: String,
    sheets_api: String,
}

impl GoogleSheetsStore {
    /// Creates a store for `spreadsheet_id` on the production endpoint.
    #[must_use]
    pub fn new(client: reqwest::Client, token: BearerToken, spreadsheet_id: impl Into<String>) -> Self {
        Self {
            client,
            token,
            spreadsheet_id: spreadsheet_id.into(),
            sheets_api: SHEETS_API.to_owned(),
        }
    }

    /// Points the store at another Sheets endpoint.
    #[must_use]
    pub fn with_sheets_api(mut self, base: impl Into<String>) -> Self {
        self.sheets_api = base.into();
        self
    }

    /// Id of the bound spreadsheet.
    #[must_use]
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn url(&self, suffix: &[&str]) -> SpreadsheetResult<Url> {
        let mut url = Url::parse(&self.sheets_api)
            .map_err(|err| SpreadsheetError::Transport(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| SpreadsheetError::Transport(format!("{} cannot be a base", self.sheets_api)))?
            .pop_if_empty()
            .extend(suffix);
        Ok(url)
    }

    fn values_url(&self, range: &str, action: &str) -> SpreadsheetResult<Url> {
        let segment = format!("{range}{action}");
        self.url(&[&self.spreadsheet_id, "values", &segment])
    }

    fn authorised(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.token.expose())
    }

    async fn batch_update(&self, requests: &[serde_json::Value]) -> SpreadsheetResult<()> {
        let url = self.url(&[&format!("{}:batchUpdate", self.spreadsheet_id)])?;
        let body = json!({ "requests": requests });
        send(self.authorised(self.client.post(url)).json(&body)).await?;
        Ok(())
    }

    /// Appends rows and columns to `title` until its grid holds a
    /// `rows` by `columns` block; value writes never resize the grid.
    async fn ensure_grid(&self, title: &str, rows: usize, columns: usize) -> SpreadsheetResult<()> {
        let url = self.url(&[&self.spreadsheet_id])?;
        let request = self
            .authorised(self.client.get(url))
            .query(&[("fields", GRID_FIELDS)]);
        let metadata: SpreadsheetMetadata = decode(send(request).await?).await?;
        let sheet = metadata
            .sheets
            .into_iter()
            .map(|entry| entry.properties)
            .find(|properties| properties.title == title)
            .ok_or_else(|| SpreadsheetError::WorksheetNotFound(title.to_owned()))?;
        let grid = &sheet.grid_properties;
        let requests: Vec<serde_json::Value> = [
            ("ROWS", rows.saturating_sub(grid.row_count)),
            ("COLUMNS", columns.saturating_sub(grid.column_count)),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing > 0)
        .map(|(dimension, length)| {
            json!({ "appendDimension": {
                "sheetId": sheet.sheet_id,
                "dimension": dimension,
                "length": length,
            } })
        })
        .collect();
        if requests.is_empty() {
            return Ok(());
        }
        self.batch_update(&requests).await?;
        debug!(worksheet = title, rows, columns, "worksheet grid grown");
        Ok(())
    }
}

/// A1 range covering a whole worksheet.
fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

async fn send(request: RequestBuilder) -> SpreadsheetResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|err| SpreadsheetError::Transport(err.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SpreadsheetError::Rejected {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> SpreadsheetResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| SpreadsheetError::Decode(err.to_string()))
}

#[async_trait]
impl SpreadsheetStore for GoogleSheetsStore {
    async fn worksheet_titles(&self) -> SpreadsheetResult<Vec<String>> {
        let url = self.url(&[&self.spreadsheet_id])?;
        let request = self
            .authorised(self.client.get(url))
            .query(&[("fields", "sheets.properties.title")]);
        let metadata: SpreadsheetMetadata = decode(send(request).await?).await?;
        Ok(metadata
            .sheets
            .into_iter()
            .map(|sheet| sheet.properties.title)
            .collect())
    }

    async fn create_worksheet(&self, title: &str, rows: usize) -> SpreadsheetResult<()> {
        let row_count = rows.saturating_add(ROW_HEADROOM);
        self.batch_update(&[json!({ "addSheet": { "properties": {
            "title": title,
            "gridProperties": { "rowCount": row_count, "columnCount": NEW_SHEET_COLUMNS },
        } } })])
        .await?;
        debug!(worksheet = title, row_count, "worksheet created");
        Ok(())
    }

    async fn read_rows(&self, title: &str) -> SpreadsheetResult<Vec<Row>> {
        let url = self.values_url(&sheet_range(title), "")?;
        let range: ValueRange = decode(send(self.authorised(self.client.get(url))).await?).await?;
        Ok(range.values)
    }

    async fn clear(&self, title: &str) -> SpreadsheetResult<()> {
        let url = self.values_url(&sheet_range(title), ":clear")?;
        send(self.authorised(self.client.post(url)).json(&json!({}))).await?;
        Ok(())
    }

    async fn write_rows(&self, title: &str, rows: &[Row]) -> SpreadsheetResult<()> {
        let columns = rows.iter().map(Vec::len).max().unwrap_or_default();
        self.ensure_grid(title, rows.len(), columns).await?;
        let range = format!("{}!A1", sheet_range(title));
        let url = self.values_url(&range, "")?;
        let request = self
            .authorised(self.client.put(url))
            .query(&[VALUE_INPUT])
            .json(&json!({ "range": range, "values": rows }));
        send(request).await?;
        debug!(worksheet = title, rows = rows.len(), "rows written");
        Ok(())
    }

    async fn append_row(&self, title: &str, row: &[String]) -> SpreadsheetResult<()> {
        let url = self.values_url(&sheet_range(title), ":append")?;
        let request = self
            .authorised(self.client.post(url))
            .query(&[VALUE_INPUT, ("insertDataOption", "INSERT_ROWS")])
            .json(&json!({ "values": [row] }));
        send(request).await?;
        Ok(())
    }

    async fn update_row(
        &self,
        title: &str,
        row_number: usize,
        row: &[String],
    ) -> SpreadsheetResult<()> {
        if row_number == 0 {
            return Err(SpreadsheetError::RowOutOfRange {
                title: title.to_owned(),
                row: row_number,
            });
        }
        let range = format!("{}!A{row_number}", sheet_range(title));
        let url = self.values_url(&range, "")?;
        let request = self
            .authorised(self.client.put(url))
            .query(&[VALUE_INPUT])
            .json(&json!({ "range": range, "values": [row] }));
        send(request).await?;
        Ok(())
    }
}
