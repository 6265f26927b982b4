use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};

use crate::core::cats::{CatError, CatImage, CatImageApi, CatImageRequest, CataasReply};

pub const DEFAULT_BASE_URL: &str = "https://cataas.com";

/// Body marker the API uses when no image matches.
const NOT_FOUND_MARKER: &str = "Cat not found";

/// Fallback when the image response carries no content type.
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Largest image body we accept for a download.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// HTTP client for cataas.com.
pub struct CataasClient {
    client: Client,
    base_url: String,
}

impl CataasClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// Resolves a reply URL, which the API sometimes sends as a bare path.
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if url.starts_with('/') {
        format!("{}{}", base, url)
    } else {
        format!("{}/{}", base, url)
    }
}

/// Resolves `url` for a download and refuses anything outside the API's origin.
pub fn checked_download_url(base_url: &str, url: &str) -> Result<Url, CatError> {
    let base = Url::parse(base_url).map_err(|e| CatError::Api(e.to_string()))?;
    // Anything with its own scheme is taken as-is, bare paths hang off the base.
    let target = match Url::parse(url) {
        Ok(absolute) => absolute,
        Err(_) => Url::parse(&resolve_url(base_url, url))
            .map_err(|e| CatError::Api(format!("bad image url: {}", e)))?,
    };

    let same_origin = target.scheme() == base.scheme()
        && target.host_str() == base.host_str()
        && target.port_or_known_default() == base.port_or_known_default();
    if !same_origin {
        return Err(CatError::Api(format!(
            "refusing to download from {}",
            target.origin().ascii_serialization()
        )));
    }
    Ok(target)
}

/// Maps a cat response to a reply or a `CatError`.
pub fn interpret_cat_response(
    status: StatusCode,
    body: &str,
    base_url: &str,
) -> Result<CataasReply, CatError> {
    if status == StatusCode::NOT_FOUND && body.contains(NOT_FOUND_MARKER) {
        return Err(CatError::NoSuchCat);
    }

    if !status.is_success() {
        return Err(CatError::Api(format!("cataas returned {}", status)));
    }

    let mut reply: CataasReply =
        serde_json::from_str(body).map_err(|e| CatError::Api(e.to_string()))?;
    reply.url = resolve_url(base_url, &reply.url);
    Ok(reply)
}

#[async_trait]
impl CatImageApi for CataasClient {
    async fn fetch_cat(&self, request: &CatImageRequest) -> Result<CataasReply, CatError> {
        let resp = self
            .client
            .get(request.to_url(&self.base_url))
            .send()
            .await
            .map_err(|e| CatError::Api(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CatError::Api(e.to_string()))?;

        interpret_cat_response(status, &body, &self.base_url)
    }

    async fn list_tags(&self) -> Result<Vec<String>, CatError> {
        let resp = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| CatError::Api(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatError::Api(format!(
                "cataas returned {} for tags",
                resp.status()
            )));
        }

        let tags: Vec<String> = resp
            .json()
            .await
            .map_err(|e| CatError::Api(e.to_string()))?;

        // The vocabulary contains blank entries.
        Ok(tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect())
    }

    async fn download(&self, url: &str) -> Result<CatImage, CatError> {
        let target = checked_download_url(&self.base_url, url)?;
        let mut resp = self
            .client
            .get(target)
            .header("Accept", "image/*")
            .send()
            .await
            .map_err(|e| CatError::Api(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(CatError::Api(format!(
                "cataas returned {} for image download",
                resp.status()
            )));
        }

        let mime_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

        if resp.content_length().unwrap_or(0) > MAX_IMAGE_BYTES as u64 {
            return Err(CatError::Api("image is too large".to_string()));
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = resp
            .chunk()
            .await
            .map_err(|e| CatError::Api(e.to_string()))?
        {
            if bytes.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(CatError::Api("image is too large".to_string()));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(CatImage { bytes, mime_type })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    const BASE: &str = "https://cataas.com";

    #[test]
    fn not_found_with_marker_is_no_such_cat() {
        let result = interpret_cat_response(StatusCode::NOT_FOUND, "Cat not found", BASE);
        assert!(matches!(result, Err(CatError::NoSuchCat)));
    }

    #[test]
    fn other_errors_are_api_errors() {
        let result = interpret_cat_response(StatusCode::NOT_FOUND, "<html>nope</html>", BASE);
        assert!(matches!(result, Err(CatError::Api(_))));

        let result = interpret_cat_response(StatusCode::BAD_GATEWAY, "Cat not found", BASE);
        assert!(matches!(result, Err(CatError::Api(_))));
    }

    #[test]
    fn reply_url_is_resolved() {
        let body = r#"{"id":"abc","tags":["cute"],"url":"/cat/abc/says/hola","mimetype":"image/jpeg","created_at":"2022-01-01T00:00:00.000Z"}"#;
        let reply = interpret_cat_response(StatusCode::OK, body, BASE).unwrap();
        assert_eq!(reply.id, "abc");
        assert_eq!(reply.tags, vec!["cute".to_string()]);
        assert_eq!(reply.url, "https://cataas.com/cat/abc/says/hola");
        assert_eq!(reply.mimetype.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn malformed_json_is_api_error() {
        let result = interpret_cat_response(StatusCode::OK, "{not json", BASE);
        assert!(matches!(result, Err(CatError::Api(_))));
    }

    /// Serves one canned response per connection on a throwaway local port.
    fn serve_once(head: &'static str, body_len: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut request = [0u8; 1024];
                let _ = stream.read(&mut request);
                let _ = stream.write_all(head.as_bytes());
                // The client hangs up once it has seen enough.
                let _ = stream.write_all(&vec![b'x'; body_len]);
            }
        });
        format!("http://{}", addr)
    }

    fn local_client(base: &str) -> CataasClient {
        CataasClient::new(Client::builder().no_proxy().build().unwrap(), base)
    }

    #[test]
    fn download_urls_must_share_the_api_origin() {
        for foreign in [
            "https://other.example/cat.png",
            "http://cataas.com/cat/abc",
            "https://cataas.com:8443/cat/abc",
            "http://127.0.0.1:8080/latest/meta-data",
            "https://cataas.com.evil.example/cat/abc",
            "file:///etc/passwd",
        ] {
            assert!(
                matches!(checked_download_url(BASE, foreign), Err(CatError::Api(_))),
                "{} was accepted",
                foreign
            );
        }

        let relative = checked_download_url("https://cataas.com/", "cat/x").unwrap();
        assert_eq!(relative.as_str(), "https://cataas.com/cat/x");
        let absolute = checked_download_url(BASE, "https://cataas.com:443/cat/abc?width=10").unwrap();
        assert_eq!(absolute.as_str(), "https://cataas.com/cat/abc?width=10");
    }

    #[tokio::test]
    async fn download_refuses_internal_hosts() {
        let client = local_client(BASE);
        let result = client.download("http://127.0.0.1:1/latest/meta-data").await;
        assert!(matches!(result, Err(CatError::Api(_))));
    }

    #[tokio::test]
    async fn download_reads_same_origin_images() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png; charset=binary\r\nContent-Length: 4\r\nConnection: close\r\n\r\n",
            4,
        );
        let image = local_client(&base).download("/cat/abc").await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.bytes, b"xxxx");
    }

    #[tokio::test]
    async fn download_rejects_declared_oversized_bodies() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nContent-Length: 10485760\r\nConnection: close\r\n\r\n",
            0,
        );
        let result = local_client(&base).download("/cat/abc").await;
        assert!(matches!(result, Err(CatError::Api(_))));
    }

    #[tokio::test]
    async fn download_stops_reading_past_the_cap() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: image/png\r\nConnection: close\r\n\r\n",
            MAX_IMAGE_BYTES + 1,
        );
        let result = local_client(&base).download("/cat/abc").await;
        assert!(matches!(result, Err(CatError::Api(_))));
    }

    #[test]
    fn client_trims_base_url() {
        let client = CataasClient::new(Client::new(), "https://cataas.com/");
        assert_eq!(client.base_url(), "https://cataas.com");
    }
}
