//! Firestore document client.
//!
//! Read-only access to documents over the Firestore REST API. Requests are
//! authorized with the caller's ID token so security rules see the user.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::config::{FIRESTORE_URL, LIST_PAGE_SIZE};
use crate::core::error::{FetchError, FirestoreError};
use crate::models::{Document, FromDocument, ListDocumentsResponse};
use crate::utils::fetch;

/// Document database handle of the backend client.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    project_id: String,
}

fn map_fetch_error(path: &str, err: FetchError) -> FirestoreError {
    match err {
        FetchError::HttpError { status: 404, .. } => FirestoreError::NotFound(path.to_string()),
        FetchError::HttpError {
            status: 401 | 403, ..
        } => FirestoreError::PermissionDenied,
        other => FirestoreError::Fetch(other),
    }
}

/// URL of one page of a collection listing.
fn page_url(base: &str, page_token: Option<&str>) -> String {
    match page_token {
        Some(token) => format!(
            "{}?pageSize={}&pageToken={}",
            base,
            LIST_PAGE_SIZE,
            utf8_percent_encode(token, NON_ALPHANUMERIC)
        ),
        None => format!("{}?pageSize={}", base, LIST_PAGE_SIZE),
    }
}

impl FirestoreClient {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
        }
    }

    /// Root of the default database's document tree.
    pub fn documents_root(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents",
            FIRESTORE_URL, self.project_id
        )
    }

    pub fn document_url(&self, path: &str) -> String {
        format!("{}/{}", self.documents_root(), path.trim_matches('/'))
    }

    pub async fn get_document(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<Document, FirestoreError> {
        fetch::get_json(&self.document_url(path), token)
            .await
            .map_err(|e| map_fetch_error(path, e))
    }

    /// List a collection, following page tokens until exhausted.
    pub async fn list_documents(
        &self,
        collection: &str,
        token: Option<&str>,
    ) -> Result<Vec<Document>, FirestoreError> {
        let base = self.document_url(collection);
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let url = page_url(&base, page_token.as_deref());
            let page: ListDocumentsResponse = fetch::get_json(&url, token)
                .await
                .map_err(|e| map_fetch_error(collection, e))?;
            documents.extend(page.documents);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => return Ok(documents),
            }
        }
    }

    /// Fetch and decode one document.
    pub async fn get<T: FromDocument>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, FirestoreError> {
        T::from_document(&self.get_document(path, token).await?)
    }

    /// Fetch and decode a collection. Documents that fail to decode are skipped.
    pub async fn list<T: FromDocument>(
        &self,
        collection: &str,
        token: Option<&str>,
    ) -> Result<Vec<T>, FirestoreError> {
        let documents = self.list_documents(collection, token).await?;
        Ok(documents
            .iter()
            .filter_map(|doc| match T::from_document(doc) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("skipping {}: {}", doc.name, e);
                    None
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_urls() {
        let client = FirestoreClient::new("demo");
        assert_eq!(
            client.documents_root(),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents"
        );
        assert_eq!(
            client.document_url("/users/u1/savedPosts/"),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents/users/u1/savedPosts"
        );
    }

    #[test]
    fn test_page_url_escapes_token() {
        assert_eq!(page_url("https://x/docs", None), "https://x/docs?pageSize=100");
        assert_eq!(
            page_url("https://x/docs", Some("a+b/c=")),
            "https://x/docs?pageSize=100&pageToken=a%2Bb%2Fc%3D"
        );
    }

    #[test]
    fn test_status_mapping() {
        let not_found = FetchError::HttpError {
            status: 404,
            body: String::new(),
        };
        assert_eq!(
            map_fetch_error("folders/x", not_found),
            FirestoreError::NotFound("folders/x".to_string())
        );

        let denied = FetchError::HttpError {
            status: 403,
            body: String::new(),
        };
        assert_eq!(map_fetch_error("folders/x", denied), FirestoreError::PermissionDenied);

        assert_eq!(
            map_fetch_error("folders/x", FetchError::Timeout),
            FirestoreError::Fetch(FetchError::Timeout)
        );
    }
}
