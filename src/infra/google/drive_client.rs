use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::core::folders::{
    Corpus, DriveClient, DriveError, DriveItem, FilePage, ListRequest, NewFile, SharedDrive,
};

const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3";
const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3";

const ITEM_FIELDS: &str = "id,name,driveId,ownedByMe,parents,mimeType";

/// Drive v3 client bound to one access token.
pub struct DriveApiClient {
    client: Client,
    token: String,
    api_url: String,
    upload_url: String,
}

impl DriveApiClient {
    pub fn new(client: Client, token: String) -> Self {
        Self {
            client,
            token,
            api_url: DRIVE_API_URL.to_string(),
            upload_url: DRIVE_UPLOAD_URL.to_string(),
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, DriveError> {
        let resp = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| DriveError::Api(e.to_string()))?;

        let resp = check_status(resp, what).await?;
        resp.json().await.map_err(|e| DriveError::Api(e.to_string()))
    }
}

async fn check_status(resp: Response, what: &str) -> Result<Response, DriveError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(DriveError::NotFound(what.to_string()));
    }
    Err(DriveError::Api(format!(
        "Drive returned {} for {}: {}",
        status, what, body
    )))
}

/// Query parameters for `files.list`.
pub fn list_params(request: &ListRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("q", request.query.clone()),
        ("orderBy", request.order_by.clone()),
        ("pageSize", request.page_size.to_string()),
        (
            "fields",
            format!("nextPageToken,files({})", ITEM_FIELDS),
        ),
        ("supportsAllDrives", "true".to_string()),
        ("includeItemsFromAllDrives", "true".to_string()),
    ];

    match &request.corpus {
        Corpus::User => params.push(("corpora", "user".to_string())),
        Corpus::Drive(drive_id) => {
            params.push(("corpora", "drive".to_string()));
            params.push(("driveId", drive_id.clone()));
        }
    }

    params
}

/// `multipart/related` body for an upload: JSON metadata, then the media.
pub fn multipart_body(file: &NewFile, boundary: &str) -> Vec<u8> {
    let metadata = json!({
        "name": file.name,
        "mimeType": file.mime_type,
        "parents": [file.parent_id],
    });

    let mut body = Vec::with_capacity(file.bytes.len() + 512);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{m}\r\n--{b}\r\nContent-Type: {t}\r\n\r\n",
            b = boundary,
            m = metadata,
            t = file.mime_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}

#[async_trait]
impl DriveClient for DriveApiClient {
    async fn list_children(&self, request: &ListRequest) -> Result<FilePage, DriveError> {
        let req = self
            .client
            .get(format!("{}/files", self.api_url))
            .query(&list_params(request));

        let list: ApiFileList = self.send_json(req, "files.list").await?;
        Ok(FilePage {
            files: list.files.into_iter().map(ApiFile::into_item).collect(),
            next_page_token: list.next_page_token,
        })
    }

    async fn get_item(&self, item_id: &str) -> Result<DriveItem, DriveError> {
        let req = self
            .client
            .get(format!("{}/files/{}", self.api_url, item_id))
            .query(&[("fields", ITEM_FIELDS), ("supportsAllDrives", "true")]);

        let file: ApiFile = self.send_json(req, item_id).await?;
        Ok(file.into_item())
    }

    async fn get_drive_name(&self, drive_id: &str) -> Result<String, DriveError> {
        let req = self
            .client
            .get(format!("{}/drives/{}", self.api_url, drive_id))
            .query(&[("fields", "name")]);

        let drive: ApiDrive = self.send_json(req, drive_id).await?;
        Ok(drive.name.unwrap_or_default())
    }

    async fn list_drives(&self) -> Result<Vec<SharedDrive>, DriveError> {
        let req = self
            .client
            .get(format!("{}/drives", self.api_url))
            .query(&[("pageSize", "100"), ("fields", "drives(id,name)")]);

        let list: ApiDriveList = self.send_json(req, "drives.list").await?;
        Ok(list
            .drives
            .into_iter()
            .filter_map(|d| {
                Some(SharedDrive {
                    id: d.id?,
                    name: d.name.unwrap_or_default(),
                })
            })
            .collect())
    }

    async fn create_file(&self, file: NewFile) -> Result<DriveItem, DriveError> {
        let boundary = format!("cat_caption_{:016x}", rand::random::<u64>());
        let body = multipart_body(&file, &boundary);

        let req = self
            .client
            .post(format!("{}/files", self.upload_url))
            .query(&[
                ("uploadType", "multipart"),
                ("supportsAllDrives", "true"),
                ("fields", ITEM_FIELDS),
            ])
            .header(
                "Content-Type",
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body);

        let created: ApiFile = self.send_json(req, "files.create").await?;
        Ok(created.into_item())
    }
}

// ===== API DTOs =====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFileList {
    #[serde(default)]
    files: Vec<ApiFile>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiFile {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    mime_type: String,
    drive_id: Option<String>,
    #[serde(default)]
    parents: Vec<String>,
    owned_by_me: Option<bool>,
}

impl ApiFile {
    fn into_item(self) -> DriveItem {
        DriveItem {
            id: self.id,
            name: self.name,
            mime_type: self.mime_type,
            drive_id: self.drive_id,
            parents: self.parents,
            owned_by_me: self.owned_by_me,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiDrive {
    id: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDriveList {
    #[serde(default)]
    drives: Vec<ApiDrive>,
}
