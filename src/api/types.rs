//! API response type definitions.
//!
//! Only the fields the archiver acts on are typed. Everything else the
//! server sends is kept in flattened maps so dumped records stay complete.

use std::fmt;

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// Identifier of a post, comment, media item or user.
///
/// The API mostly sends integers, but nothing guarantees their range or that
/// they are numbers at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(Number),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(Number::from(n))
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// Opaque pagination marker taken from a page's `paging` envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(Value);

impl Cursor {
    pub fn new(value: impl Into<String>) -> Self {
        Cursor(Value::String(value.into()))
    }

    /// Form value used for the `before` request parameter.
    pub fn as_param(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

/// Response of `session/from_password`.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub session: Option<Value>,
}

/// One page of `feed/recent`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub paging: Paging,
}

/// Paging envelope: the cursor that produced this page and the next one.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    #[serde(rename = "self")]
    pub current: PageMarker,
    pub next: PageMarker,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMarker {
    #[serde(default)]
    pub before: Option<Cursor>,
}

/// A member of the account's family network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// A feed post with its comments.
///
/// `fields` holds the record exactly as received, `media` and `id`
/// included, and is what gets written back out. Only `comments` is moved
/// out of it, and it is written back only if the server sent a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Post {
    pub id: RecordId,
    pub media: Option<MediaReference>,
    pub comments: Vec<Comment>,
    pub fields: Map<String, Value>,
    has_comments: bool,
}

impl TryFrom<Map<String, Value>> for Post {
    type Error = serde_json::Error;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = record_id(&fields)?;
        let media = media_reference(fields.get("media"))?;

        let (comments, has_comments) = match fields.remove("comments") {
            Some(Value::Array(items)) => (
                items
                    .into_iter()
                    .map(Comment::deserialize)
                    .collect::<Result<Vec<_>, _>>()?,
                true,
            ),
            Some(other) => {
                fields.insert("comments".to_string(), other);
                (Vec::new(), false)
            }
            None => (Vec::new(), false),
        };

        Ok(Self {
            id,
            media,
            comments,
            fields,
            has_comments,
        })
    }
}

impl Serialize for Post {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        if self.has_comments {
            map.serialize_entry("comments", &self.comments)?;
        }
        map.end()
    }
}

/// A comment on a post. Serializes back to the record as received.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Comment {
    pub id: RecordId,
    pub media: Option<MediaReference>,
    pub fields: Map<String, Value>,
}

impl TryFrom<Map<String, Value>> for Comment {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(&fields)?,
            media: media_reference(fields.get("media"))?,
            fields,
        })
    }
}

impl Serialize for Comment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Pointer to binary content that has to be fetched separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaReference {
    pub id: RecordId,
    pub media_key: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MediaReference {
    pub fn new(id: impl Into<RecordId>, media_key: &str, mime_type: &str) -> Self {
        Self {
            id: id.into(),
            media_key: media_key.to_string(),
            mime_type: mime_type.to_string(),
            extra: Map::new(),
        }
    }
}

fn record_id(fields: &Map<String, Value>) -> Result<RecordId, serde_json::Error> {
    match fields.get("id") {
        Some(value) => RecordId::deserialize(value),
        None => Err(serde_json::Error::missing_field("id")),
    }
}

/// `null`, `{}` and a missing key all mean "no media attached".
fn media_reference(value: Option<&Value>) -> Result<Option<MediaReference>, serde_json::Error> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(value) => MediaReference::deserialize(value).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_media_variants() {
        let post: Post = serde_json::from_str(
            r#"{
                "id": 1,
                "body": "hello",
                "comments": [
                    {"id": 2, "media": null},
                    {"id": 3, "media": {}},
                    {"id": 4, "media": {"id": 9, "media_key": "k9", "type": "video/mp4"}}
                ]
            }"#,
        )
        .unwrap();

        assert!(post.media.is_none());
        assert_eq!(post.fields["body"], "hello");
        assert!(post.comments[0].media.is_none());
        assert!(post.comments[1].media.is_none());
        let media = post.comments[2].media.as_ref().unwrap();
        assert_eq!(media.id, RecordId::from(9i64));
        assert_eq!(media.media_key, "k9");
        assert_eq!(media.mime_type, "video/mp4");
    }

    #[test]
    fn test_post_without_comments_key() {
        let post: Post = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert_eq!(post.id, RecordId::Text("abc".into()));
        assert!(post.comments.is_empty());
    }

    #[test]
    fn test_post_serialization_keeps_unknown_fields() {
        let input = r#"{"id":5,"created":1700000000,"media":{"id":6,"media_key":"k","type":"image/png","width":640},"comments":[]}"#;
        let post: Post = serde_json::from_str(input).unwrap();
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value["created"], 1700000000);
        assert_eq!(value["media"]["width"], 640);
        assert_eq!(value["media"]["type"], "image/png");
    }

    #[test]
    fn test_post_round_trip_is_unchanged() {
        let inputs = [
            r#"{"id":1,"media":null}"#,
            r#"{"id":2}"#,
            r#"{"id":3,"media":{},"body":"x"}"#,
            r#"{"id":4,"comments":null}"#,
            r#"{"id":5,"comments":[{"id":6,"media":null},{"id":7,"media":{}},{"id":8}]}"#,
        ];

        for input in inputs {
            let expected: Value = serde_json::from_str(input).unwrap();
            let post: Post = serde_json::from_str(input).unwrap();
            assert_eq!(serde_json::to_value(&post).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_post_requires_id() {
        let err = serde_json::from_str::<Post>(r#"{"body":"x"}"#).unwrap_err();
        assert!(err.to_string().contains("id"));
        assert!(serde_json::from_str::<Post>(r#"{"id":1,"comments":[{"body":"y"}]}"#).is_err());
    }

    #[test]
    fn test_record_id_outside_i64_range() {
        let page: FeedPage = serde_json::from_str(
            r#"{
                "users": [{"id": 1.5}],
                "posts": [{"id": 18446744073709551615}],
                "paging": {"self": {}, "next": {}}
            }"#,
        )
        .unwrap();

        assert_eq!(page.posts[0].id.to_string(), "18446744073709551615");
        assert_eq!(page.users[0].id.to_string(), "1.5");
        assert_eq!(
            serde_json::to_value(&page.posts[0]).unwrap()["id"],
            serde_json::json!(u64::MAX)
        );
    }

    #[test]
    fn test_feed_page_requires_paging() {
        let err = serde_json::from_str::<FeedPage>(r#"{"users": [], "posts": []}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_paging_null_cursor() {
        let page: FeedPage = serde_json::from_str(
            r#"{"posts": [], "paging": {"self": {"before": null}, "next": {"before": 1234}}}"#,
        )
        .unwrap();
        assert!(page.paging.current.before.is_none());
        assert_eq!(page.paging.next.before.unwrap().as_param(), "1234");
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::from(42i64).to_string(), "42");
        assert_eq!(RecordId::from("x-1").to_string(), "x-1");
    }
}
