use serde::Serialize;
use serde_json::Value;

/// Rows per classify page.
pub const CLASSIFY_PAGE_SIZE: u32 = 15;

/// Play-source tags the app sends when it opens a drama from search results.
pub const PLAY_SOURCE: &str = "ssym_ssjg";
pub const PLAY_SOURCE_NAME: &str = "搜索页面搜索结果";

/// Envelope posted to the signing service's `/sign` endpoint.
#[derive(Debug, Serialize)]
pub struct SignRequest<'a> {
    pub body: &'a Value,
    pub device_id: &'a str,
    pub android_id: &'a str,
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub keyword: String,
}

/// Body of the "latest" theater channel, one page at a time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TheaterPageRequest {
    pub new_channel_style: u8,
    pub is_need_rank: u8,
    pub page_no: u32,
    pub index: u32,
    pub channel_id: u32,
}

impl TheaterPageRequest {
    pub fn latest(page_no: u32) -> Self {
        TheaterPageRequest {
            new_channel_style: 1,
            is_need_rank: 1,
            page_no,
            index: 1,
            channel_id: 43,
        }
    }
}

/// Home page body, used by both the "for you" and the VIP columns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageRequest {
    pub home_page_style: u8,
    pub is_need_rank: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_need_new_channel: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(rename = "type")]
    pub page_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<u32>,
}

impl HomePageRequest {
    pub fn for_you() -> Self {
        HomePageRequest {
            home_page_style: 0,
            is_need_rank: 1,
            is_need_new_channel: Some(1),
            index: None,
            page_type: 0,
            channel_id: None,
        }
    }

    pub fn vip() -> Self {
        HomePageRequest {
            home_page_style: 0,
            is_need_rank: 1,
            is_need_new_channel: None,
            index: Some(4),
            page_type: 0,
            channel_id: Some(205),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReserveBookRequest {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    pub rank_type: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyRequest {
    pub type_list: Vec<Value>,
    pub show_labels: bool,
    pub page_no: u32,
    pub page_size: u32,
}

impl ClassifyRequest {
    pub fn page(page_no: u32) -> Self {
        ClassifyRequest {
            type_list: Vec::new(),
            show_labels: true,
            page_no,
            page_size: CLASSIFY_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterBatchRequest {
    pub boundary_index: u32,
    pub index: u32,
    pub currency_play_source: &'static str,
    pub currency_play_source_name: &'static str,
    pub pre_load: bool,
    pub book_id: String,
}

impl ChapterBatchRequest {
    pub fn starting_at(book_id: &str, index: u32) -> Self {
        ChapterBatchRequest {
            boundary_index: 0,
            index,
            currency_play_source: PLAY_SOURCE,
            currency_play_source_name: PLAY_SOURCE_NAME,
            pre_load: false,
            book_id: book_id.to_string(),
        }
    }
}
