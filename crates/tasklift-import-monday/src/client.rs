//! monday.com GraphQL client
//!
//! Boards become projects, groups become sections, items become tasks and
//! item updates become comments. Authenticates with a personal API token
//! ("app key") sent verbatim in the `Authorization` header.
//!
//! API docs: https://developer.monday.com/api-reference/docs

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::time::Duration;
use tasklift_import_types::{ImportError, ImportResult, SourceClient, SourceRecord};
use tracing::{debug, warn};

pub const DEFAULT_MONDAY_API_URL: &str = "https://api.monday.com/v2";

const PLATFORM: &str = "Monday";
const API_VERSION: &str = "2024-01";
const BOARDS_PAGE_SIZE: usize = 50;
const ITEMS_PAGE_SIZE: usize = 100;
const UPDATES_PAGE_SIZE: usize = 100;

const BOARDS_QUERY: &str = "query ($limit: Int!, $page: Int!) { \
    boards(limit: $limit, page: $page) { id name description state board_kind } }";

const GROUPS_QUERY: &str = "query ($board: [ID!]) { \
    boards(ids: $board) { groups { id title position archived } } }";

const ITEMS_QUERY: &str = "query ($board: [ID!], $limit: Int!) { \
    boards(ids: $board) { items_page(limit: $limit) { cursor \
    items { id name group { id } column_values { id type text } } } } }";

const NEXT_ITEMS_QUERY: &str = "query ($cursor: String!, $limit: Int!) { \
    next_items_page(cursor: $cursor, limit: $limit) { cursor \
    items { id name group { id } column_values { id type text } } } }";

const UPDATES_QUERY: &str = "query ($item: [ID!], $limit: Int!, $page: Int!) { \
    items(ids: $item) { updates(limit: $limit, page: $page) { id text_body created_at } } }";

/// monday.com API client
pub struct MondayClient {
    client: Client,
    app_key: String,
    base_url: String,
}

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
    /// Older API versions report failures here instead of `errors`
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct BoardsData {
    boards: Vec<MondayBoard>,
}

#[derive(Debug, Deserialize)]
struct MondayBoard {
    id: String,
    name: Option<String>,
    description: Option<String>,
    state: Option<String>,
    board_kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroupsData {
    boards: Vec<BoardGroups>,
}

#[derive(Debug, Deserialize)]
struct BoardGroups {
    #[serde(default)]
    groups: Vec<MondayGroup>,
}

#[derive(Debug, Deserialize)]
struct MondayGroup {
    id: String,
    title: Option<String>,
    position: Option<String>,
    archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    boards: Vec<BoardItems>,
}

#[derive(Debug, Deserialize)]
struct BoardItems {
    items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
struct NextItemsData {
    next_items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
struct ItemsPage {
    cursor: Option<String>,
    #[serde(default)]
    items: Vec<MondayItem>,
}

#[derive(Debug, Deserialize)]
struct MondayItem {
    id: String,
    name: Option<String>,
    group: Option<ItemGroup>,
    #[serde(default)]
    column_values: Vec<ColumnValue>,
}

#[derive(Debug, Deserialize)]
struct ItemGroup {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ColumnValue {
    #[serde(rename = "type")]
    column_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdatesData {
    items: Vec<ItemUpdates>,
}

#[derive(Debug, Deserialize)]
struct ItemUpdates {
    #[serde(default)]
    updates: Vec<MondayUpdate>,
}

#[derive(Debug, Deserialize)]
struct MondayUpdate {
    id: String,
    text_body: Option<String>,
    created_at: Option<String>,
}

impl MondayClient {
    /// Create a client for the API at `base_url`
    pub fn new(
        app_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> ImportResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ImportError::platform(PLATFORM, format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            app_key: app_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Run a GraphQL query and decode its `data`
    async fn query<T: DeserializeOwned>(&self, query: &str, variables: Value) -> ImportResult<T> {
        debug!("monday.com query: {}", query.split('{').next().unwrap_or(query).trim());

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", &self.app_key)
            .header("API-Version", API_VERSION)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| ImportError::platform(PLATFORM, format!("API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ImportError::platform(PLATFORM, format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ImportError::platform(
                PLATFORM,
                format!("API returned status {}: {}", status, body),
            ));
        }

        let envelope: GraphQlResponse<T> = serde_json::from_str(&body).map_err(|e| {
            ImportError::platform(
                PLATFORM,
                format!("Failed to parse response: {} - Body: {}", e, body),
            )
        })?;

        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(ImportError::platform(PLATFORM, messages.join("; ")));
        }
        if let Some(message) = envelope.error_message {
            return Err(ImportError::platform(PLATFORM, message));
        }

        envelope
            .data
            .ok_or_else(|| ImportError::platform(PLATFORM, "Response carried no data"))
    }

    fn board_record(board: MondayBoard) -> SourceRecord {
        SourceRecord::new()
            .with("id", board.id)
            .with("name", board.name)
            .with("description", board.description)
            .with("state", board.state)
            .with("board_kind", board.board_kind)
    }

    fn group_record(group: MondayGroup) -> SourceRecord {
        SourceRecord::new()
            .with("id", group.id)
            .with("title", group.title)
            .with("position", group.position)
            .with("archived", group.archived.unwrap_or(false))
    }

    /// The first non-empty date column is the item's due date
    fn item_record(item: MondayItem) -> SourceRecord {
        let due_at = item
            .column_values
            .into_iter()
            .filter(|c| c.column_type == "date")
            .find_map(|c| c.text.filter(|t| !t.is_empty()));

        SourceRecord::new()
            .with("id", item.id)
            .with("name", item.name)
            .with("group", item.group.map(|g| g.id))
            .with("due_at", due_at)
    }

    fn update_record(update: MondayUpdate) -> SourceRecord {
        SourceRecord::new()
            .with("id", update.id)
            .with("text_body", update.text_body)
            .with("created_at", update.created_at)
    }
}

#[async_trait]
impl SourceClient for MondayClient {
    fn platform(&self) -> &str {
        PLATFORM
    }

    async fn list_projects(&self) -> ImportResult<Vec<SourceRecord>> {
        let mut records = Vec::new();
        let mut page = 1;

        let mut seen = HashSet::new();

        loop {
            let data: BoardsData = self
                .query(
                    BOARDS_QUERY,
                    json!({ "limit": BOARDS_PAGE_SIZE, "page": page }),
                )
                .await?;
            let fetched = data.boards.len();
            let fresh: Vec<MondayBoard> = data
                .boards
                .into_iter()
                .filter(|b| seen.insert(b.id.clone()))
                .collect();

            if fetched > 0 && fresh.is_empty() {
                warn!("Board page {} repeated earlier boards, stopping", page);
                break;
            }
            records.extend(fresh.into_iter().map(Self::board_record));

            if fetched < BOARDS_PAGE_SIZE {
                break;
            }
            page += 1;
        }

        debug!("Fetched {} boards", records.len());
        Ok(records)
    }

    async fn list_sections(&self, project_external_id: &str) -> ImportResult<Vec<SourceRecord>> {
        let data: GroupsData = self
            .query(GROUPS_QUERY, json!({ "board": [project_external_id] }))
            .await?;

        Ok(data
            .boards
            .into_iter()
            .flat_map(|b| b.groups)
            .map(Self::group_record)
            .collect())
    }

    async fn list_tasks(&self, project_external_id: &str) -> ImportResult<Vec<SourceRecord>> {
        let data: ItemsData = self
            .query(
                ITEMS_QUERY,
                json!({ "board": [project_external_id], "limit": ITEMS_PAGE_SIZE }),
            )
            .await?;

        let mut records = Vec::new();
        let mut cursor = None;
        for board in data.boards {
            records.extend(board.items_page.items.into_iter().map(Self::item_record));
            cursor = board.items_page.cursor;
        }

        let mut seen_cursors = HashSet::new();
        while let Some(next) = cursor.take() {
            if !seen_cursors.insert(next.clone()) {
                warn!("Item cursor repeated for board {}, stopping", project_external_id);
                break;
            }
            let data: NextItemsData = self
                .query(
                    NEXT_ITEMS_QUERY,
                    json!({ "cursor": next, "limit": ITEMS_PAGE_SIZE }),
                )
                .await?;
            records.extend(data.next_items_page.items.into_iter().map(Self::item_record));
            cursor = data.next_items_page.cursor;
        }

        debug!(
            "Fetched {} items for board {}",
            records.len(),
            project_external_id
        );
        Ok(records)
    }

    async fn list_comments(&self, task_external_id: &str) -> ImportResult<Vec<SourceRecord>> {
        let mut records = Vec::new();
        let mut page = 1;
        let mut seen = HashSet::new();

        loop {
            let data: UpdatesData = self
                .query(
                    UPDATES_QUERY,
                    json!({ "item": [task_external_id], "limit": UPDATES_PAGE_SIZE, "page": page }),
                )
                .await?;
            let updates: Vec<MondayUpdate> =
                data.items.into_iter().flat_map(|i| i.updates).collect();
            let fetched = updates.len();
            let fresh: Vec<MondayUpdate> = updates
                .into_iter()
                .filter(|u| seen.insert(u.id.clone()))
                .collect();

            if fetched > 0 && fresh.is_empty() {
                warn!("Update page {} repeated earlier updates, stopping", page);
                break;
            }
            records.extend(fresh.into_iter().map(Self::update_record));

            if fetched < UPDATES_PAGE_SIZE {
                break;
            }
            page += 1;
        }

        Ok(records)
    }
}
