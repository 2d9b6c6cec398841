//! Firestore REST document representation and the domain records read from it.
//!
//! Firestore encodes every field as a single-key object naming its type
//! (`{"stringValue": "..."}`), which maps directly onto an externally
//! tagged serde enum.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::FirestoreError;

/// A typed Firestore field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// 64-bit integers are sent as decimal strings.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(s) | Self::TimestampValue(s) | Self::ReferenceValue(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::BooleanValue(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::IntegerValue(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::ArrayValue(a) => Some(&a.values),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::NullValue(()))
    }
}

/// A document as returned by `GET .../documents/{path}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name: `projects/{p}/databases/(default)/documents/{path}`.
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

/// Response of a collection listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Document {
    /// Last path segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    fn required_str(&self, field: &'static str) -> Result<String, FirestoreError> {
        self.get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(FirestoreError::Field {
                field,
                expected: "string",
            })
    }

    fn optional_str(&self, field: &str) -> Option<String> {
        self.get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    fn string_list(&self, field: &str) -> Vec<String> {
        self.get(field)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Decoding of a domain record from a Firestore document.
pub trait FromDocument: Sized {
    fn from_document(doc: &Document) -> Result<Self, FirestoreError>;
}

/// Public profile stored at `users/{uid}`.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

impl UserProfile {
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .or(Some(self.email.as_str()).filter(|e| !e.is_empty()))
            .unwrap_or(&self.uid)
    }
}

impl FromDocument for UserProfile {
    fn from_document(doc: &Document) -> Result<Self, FirestoreError> {
        Ok(Self {
            uid: doc.id().to_string(),
            email: doc.optional_str("email").unwrap_or_default(),
            display_name: doc.optional_str("displayName"),
            bio: doc.optional_str("bio"),
        })
    }
}

/// A post saved by a user, stored at `users/{uid}/savedPosts/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPost {
    pub id: String,
    pub title: String,
    /// Markdown body.
    pub body: String,
    pub author: Option<String>,
    pub saved_at: Option<String>,
}

impl FromDocument for SavedPost {
    fn from_document(doc: &Document) -> Result<Self, FirestoreError> {
        Ok(Self {
            id: doc.id().to_string(),
            title: doc.required_str("title")?,
            body: doc.optional_str("body").unwrap_or_default(),
            author: doc.optional_str("author"),
            saved_at: doc.optional_str("savedAt"),
        })
    }
}

/// A folder of posts, stored at `folders/{id}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub id: String,
    pub name: String,
    /// Owner uid.
    pub owner: String,
    /// Titles or ids of the posts in this folder.
    pub posts: Vec<String>,
    /// Emails the owner shared this folder with.
    pub shared_with: Vec<String>,
}

/// What a visitor may do with a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderAccess {
    Owner,
    Shared,
    Denied,
}

impl Folder {
    pub fn access_for(&self, uid: Option<&str>, email: &str) -> FolderAccess {
        if uid.is_some_and(|uid| uid == self.owner) {
            FolderAccess::Owner
        } else if !email.is_empty()
            && self
                .shared_with
                .iter()
                .any(|shared| shared.eq_ignore_ascii_case(email))
        {
            FolderAccess::Shared
        } else {
            FolderAccess::Denied
        }
    }
}

impl FromDocument for Folder {
    fn from_document(doc: &Document) -> Result<Self, FirestoreError> {
        Ok(Self {
            id: doc.id().to_string(),
            name: doc.required_str("name")?,
            owner: doc.required_str("owner")?,
            posts: doc.string_list("posts"),
            shared_with: doc.string_list("sharedWith"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder_doc() -> Document {
        serde_json::from_str(
            r#"{
                "name": "projects/demo/databases/(default)/documents/folders/f1",
                "fields": {
                    "name": {"stringValue": "Reading list"},
                    "owner": {"stringValue": "u1"},
                    "posts": {"arrayValue": {"values": [
                        {"stringValue": "p1"},
                        {"stringValue": "p2"}
                    ]}},
                    "sharedWith": {"arrayValue": {"values": [
                        {"stringValue": "Bob@Example.com"}
                    ]}},
                    "count": {"integerValue": "2"},
                    "archived": {"booleanValue": false},
                    "note": {"nullValue": null}
                },
                "createTime": "2024-01-01T00:00:00Z",
                "updateTime": "2024-01-02T00:00:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_value_decoding() {
        let doc = folder_doc();
        assert_eq!(doc.id(), "f1");
        assert_eq!(doc.fields["count"].as_i64(), Some(2));
        assert_eq!(doc.fields["archived"].as_bool(), Some(false));
        assert!(doc.fields["note"].is_null());
        assert_eq!(doc.get("note"), None);
        assert_eq!(doc.fields["posts"].as_array().map(<[Value]>::len), Some(2));
    }

    #[test]
    fn test_empty_array_and_map() {
        let value: Value = serde_json::from_str(r#"{"arrayValue": {}}"#).unwrap();
        assert_eq!(value.as_array(), Some(&[][..]));

        let value: Value = serde_json::from_str(r#"{"mapValue": {}}"#).unwrap();
        assert_eq!(value, Value::MapValue(MapValue::default()));
    }

    #[test]
    fn test_folder_from_document() {
        let folder = Folder::from_document(&folder_doc()).unwrap();
        assert_eq!(folder.id, "f1");
        assert_eq!(folder.name, "Reading list");
        assert_eq!(folder.owner, "u1");
        assert_eq!(folder.posts, vec!["p1", "p2"]);
        assert_eq!(folder.shared_with, vec!["Bob@Example.com"]);
    }

    #[test]
    fn test_folder_access() {
        let folder = Folder::from_document(&folder_doc()).unwrap();
        assert_eq!(folder.access_for(Some("u1"), "ada@example.com"), FolderAccess::Owner);
        assert_eq!(folder.access_for(Some("u2"), "bob@example.com"), FolderAccess::Shared);
        assert_eq!(folder.access_for(None, "bob@example.com"), FolderAccess::Shared);
        assert_eq!(folder.access_for(Some("u3"), "eve@example.com"), FolderAccess::Denied);
        assert_eq!(folder.access_for(None, ""), FolderAccess::Denied);
    }

    #[test]
    fn test_missing_required_field() {
        let doc: Document = serde_json::from_str(
            r#"{"name": "projects/p/databases/(default)/documents/folders/f2",
                "fields": {"name": {"integerValue": "5"}}}"#,
        )
        .unwrap();
        assert_eq!(
            Folder::from_document(&doc),
            Err(FirestoreError::Field {
                field: "name",
                expected: "string"
            })
        );
    }

    #[test]
    fn test_user_profile_and_saved_post() {
        let doc: Document = serde_json::from_str(
            r#"{"name": "projects/p/databases/(default)/documents/users/u42",
                "fields": {"email": {"stringValue": "ada@example.com"},
                           "displayName": {"stringValue": ""}}}"#,
        )
        .unwrap();
        let profile = UserProfile::from_document(&doc).unwrap();
        assert_eq!(profile.uid, "u42");
        assert_eq!(profile.display_name, None);
        assert_eq!(profile.title(), "ada@example.com");

        let doc: Document = serde_json::from_str(
            r#"{"name": "projects/p/databases/(default)/documents/users/u42/savedPosts/p1",
                "fields": {"title": {"stringValue": "Hello"},
                           "body": {"stringValue": "**hi**"},
                           "savedAt": {"timestampValue": "2024-03-01T10:00:00Z"}}}"#,
        )
        .unwrap();
        let post = SavedPost::from_document(&doc).unwrap();
        assert_eq!(post.id, "p1");
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "**hi**");
        assert_eq!(post.saved_at.as_deref(), Some("2024-03-01T10:00:00Z"));
        assert_eq!(post.author, None);
    }

    #[test]
    fn test_list_response_without_documents() {
        let resp: ListDocumentsResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.documents.is_empty());
        assert_eq!(resp.next_page_token, None);
    }
}
