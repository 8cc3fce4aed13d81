use super::common::FlexibleString;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::ops::Deref;

/// `{ status, data }` wrapper returned by the signing service.
#[derive(Debug, Deserialize)]
pub struct SignerEnvelope<T> {
    #[serde(default)]
    pub status: bool,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub sn: String,
    pub device_id: String,
    pub android_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SignatureData {
    pub sn: String,
}

/// `{ data }` wrapper returned by every vendor endpoint.
#[derive(Debug, Deserialize)]
pub struct VendorEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
}

// The vendor sends `null` for lists it has nothing for.
fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A vendor record as received, plus a typed view of the fields the console
/// reads. Serializes back to exactly the JSON the vendor sent.
#[derive(Debug, Clone)]
pub struct Record<T> {
    fields: T,
    raw: Value,
}

impl<T> Record<T> {
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl<T> Deref for Record<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.fields
    }
}

impl<T> Serialize for Record<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.raw.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Record<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let fields = T::deserialize(&raw).map_err(serde::de::Error::custom)?;
        Ok(Record { fields, raw })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Corner {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankVo {
    #[serde(default)]
    pub hot_code: Option<FlexibleString>,
}

/// Console-facing fields of a drama in listings, rankings, columns and
/// search hits.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookFields {
    #[serde(default)]
    pub book_id: FlexibleString,
    #[serde(default)]
    pub book_name: Option<String>,
    #[serde(default)]
    pub chapter_count: Option<FlexibleString>,
    #[serde(default)]
    pub play_count: Option<FlexibleString>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub introduction: Option<String>,
    #[serde(default)]
    pub protagonist: Option<String>,
    #[serde(default)]
    pub corner: Option<Corner>,
    /// Release time in epoch milliseconds (coming-soon list only).
    #[serde(default)]
    pub book_shelf_time: Option<i64>,
    #[serde(default)]
    pub rank_vo: Option<RankVo>,
}

impl BookFields {
    pub fn name(&self) -> &str {
        self.book_name.as_deref().unwrap_or("-")
    }

    pub fn intro(&self) -> &str {
        self.introduction.as_deref().unwrap_or("")
    }

    pub fn badge(&self) -> Option<&str> {
        self.corner
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub fn tag_line(&self) -> String {
        if self.tags.is_empty() {
            "-".to_string()
        } else {
            self.tags.join(", ")
        }
    }
}

pub type Book = Record<BookFields>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterFields {
    #[serde(default)]
    pub chapter_id: FlexibleString,
    #[serde(default)]
    pub chapter_index: Option<u32>,
    #[serde(default)]
    pub chapter_name: Option<String>,
}

pub type Chapter = Record<ChapterFields>;

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct RecordPage<T> {
    #[serde(default = "Vec::new", deserialize_with = "nullable_vec")]
    pub records: Vec<T>,
}

/// `/he001/theater` paged by `pageNo`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TheaterPage {
    #[serde(default)]
    pub new_theater_list: Option<RecordPage<Book>>,
}

impl TheaterPage {
    pub fn into_records(self) -> Vec<Book> {
        self.new_theater_list.map(|p| p.records).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyPage {
    #[serde(default)]
    pub classify_book_list: Option<RecordPage<Book>>,
}

impl ClassifyPage {
    pub fn into_records(self) -> Vec<Book> {
        self.classify_book_list.map(|p| p.records).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestList {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub suggest_list: Vec<Book>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub book_list: Vec<Book>,
}

/// Home page columns (for-you and VIP views).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBoard {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub column_vo_list: Vec<Column>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveList {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub reserve_book_list: Vec<Book>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankType {
    pub rank_type: u8,
    #[serde(default)]
    pub rank_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankBoard {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub rank_list: Vec<Book>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub rank_type_vo_list: Vec<RankType>,
}

impl RankBoard {
    pub fn title_for(&self, rank_type: u8) -> &str {
        self.rank_type_vo_list
            .iter()
            .find(|r| r.rank_type == rank_type)
            .and_then(|r| r.rank_name.as_deref())
            .unwrap_or("Rank")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterBatch {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub chapter_list: Vec<Chapter>,
}
