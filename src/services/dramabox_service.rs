use crate::config::AppConfig;
use crate::models::common::Session;
use crate::models::requests::{
    ChapterBatchRequest, ClassifyRequest, HomePageRequest, RankRequest, ReserveBookRequest,
    SearchRequest, TheaterPageRequest,
};
use crate::models::responses::{
    Book, Chapter, ChapterBatch, ClassifyPage, Column, ColumnBoard, RankBoard, ReserveList,
    SuggestList, TheaterPage, VendorEnvelope,
};
use crate::services::signer::{AuthError, SignError, SignerClient};
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const SEARCH_SUGGEST_PATH: &str = "/search/suggest";
pub const THEATER_PATH: &str = "/he001/theater";
pub const RESERVE_BOOK_PATH: &str = "/he001/reserveBook";
pub const RANK_PATH: &str = "/he001/rank";
pub const CLASSIFY_PATH: &str = "/he001/classify";
pub const CHAPTER_BATCH_PATH: &str = "/chapterv2/batch/load";

/// Offset of the vendor's clock, in hours east of UTC.
pub const VENDOR_UTC_OFFSET_HOURS: i64 = 7;
pub const VENDOR_TIME_ZONE: &str = "+0700";

// Identity of the Android build the vendor expects to be talking to.
const CLIENT_HEADERS: &[(&str, &str)] = &[
    ("version", "492"),
    ("vn", "4.9.2"),
    ("package-name", "com.storymatrix.drama"),
    ("p", "51"),
    ("cid", "DALPF1068349"),
    ("apn", "1"),
    ("time-zone", VENDOR_TIME_ZONE),
    ("userid", "385170795"),
    ("language", "in"),
    ("current-language", "in"),
];

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Signature Failed")]
    SignatureFailed(#[from] SignError),

    #[error("Empty Data")]
    EmptyData,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

/// Render `now` on the vendor's UTC+7 clock as `YYYY-MM-DD HH:MM:SS.mmm +0700`.
pub fn vendor_local_time(now: DateTime<Utc>) -> String {
    let shifted = now.naive_utc() + chrono::Duration::hours(VENDOR_UTC_OFFSET_HOURS);
    format!(
        "{} {}",
        shifted.format("%Y-%m-%d %H:%M:%S%.3f"),
        VENDOR_TIME_ZONE
    )
}

/// Whether a vendor `data` field carries anything worth returning.
pub fn has_payload(data: &Value) -> bool {
    match data {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Number(_) => true,
    }
}

/// Signed access to the vendor catalog for one session.
pub struct DramaboxService {
    http: Client,
    signer: SignerClient,
    base_url: String,
    timeout: Duration,
    session: Session,
}

impl DramaboxService {
    pub fn new(http: Client, signer: SignerClient, config: &AppConfig, session: Session) -> Self {
        DramaboxService {
            http,
            signer,
            base_url: config.vendor_base_url.clone(),
            timeout: config.request_timeout,
            session,
        }
    }

    /// Bootstrap a session through the signing service and wrap it in a
    /// ready-to-use service. Fails once, without retrying.
    pub async fn connect(config: &AppConfig) -> Result<Self, AuthError> {
        let http = Client::builder().gzip(true).build()?;
        let signer = SignerClient::new(
            http.clone(),
            config.signer_base_url.clone(),
            config.request_timeout,
        );
        let session = signer.bootstrap_session().await?;
        Ok(Self::new(http, signer, config, session))
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn headers(&self, signature: &str, now: DateTime<Utc>) -> Result<HeaderMap, RequestError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("okhttp/4.10.0"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        for &(name, value) in CLIENT_HEADERS {
            headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        headers.insert("tn", HeaderValue::from_str(&self.session.bearer())?);
        headers.insert("device-id", HeaderValue::from_str(self.session.device_id())?);
        headers.insert("android-id", HeaderValue::from_str(self.session.install_id())?);
        headers.insert("local-time", HeaderValue::from_str(&vendor_local_time(now))?);
        headers.insert("sn", HeaderValue::from_str(signature)?);
        Ok(headers)
    }

    /// Sign `body`, POST it to `{vendor}{path}` and return the non-empty
    /// `data` payload. Never retries; a failed signature means no vendor call.
    pub async fn call(&self, path: &str, body: &Value) -> Result<Value, RequestError> {
        let signature = self.signer.sign(&self.session, body).await?;
        let headers = self.headers(&signature, Utc::now())?;
        let url = format!("{}{}", self.base_url, path);

        info!("POST {}", url);

        // Content-Type is already in the header map, so the body is sent raw.
        let envelope = self
            .http
            .post(&url)
            .headers(headers)
            .body(serde_json::to_vec(body)?)
            .timeout(self.timeout)
            .send()
            .await?
            .json::<VendorEnvelope>()
            .await?;

        match envelope.data {
            Some(data) if has_payload(&data) => Ok(data),
            _ => {
                debug!("{} answered without data", path);
                Err(RequestError::EmptyData)
            }
        }
    }

    async fn fetch<B, R>(&self, path: &str, body: &B) -> Result<R, RequestError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let data = self.call(path, &body).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn search(&self, keyword: &str) -> Result<Vec<Book>, RequestError> {
        let body = SearchRequest {
            keyword: keyword.to_string(),
        };
        let list: SuggestList = self.fetch(SEARCH_SUGGEST_PATH, &body).await?;
        Ok(list.suggest_list)
    }

    /// One page of the "latest" channel.
    pub async fn latest_page(&self, page_no: u32) -> Result<Vec<Book>, RequestError> {
        let page: TheaterPage = self
            .fetch(THEATER_PATH, &TheaterPageRequest::latest(page_no))
            .await?;
        Ok(page.into_records())
    }

    pub async fn for_you(&self) -> Result<Vec<Column>, RequestError> {
        let board: ColumnBoard = self.fetch(THEATER_PATH, &HomePageRequest::for_you()).await?;
        Ok(board.column_vo_list)
    }

    pub async fn vip(&self) -> Result<Vec<Column>, RequestError> {
        let board: ColumnBoard = self.fetch(THEATER_PATH, &HomePageRequest::vip()).await?;
        Ok(board.column_vo_list)
    }

    pub async fn coming_soon(&self) -> Result<Vec<Book>, RequestError> {
        let list: ReserveList = self.fetch(RESERVE_BOOK_PATH, &ReserveBookRequest {}).await?;
        Ok(list.reserve_book_list)
    }

    pub async fn rank(&self, rank_type: u8) -> Result<RankBoard, RequestError> {
        self.fetch(RANK_PATH, &RankRequest { rank_type }).await
    }

    pub async fn classify_page(&self, page_no: u32) -> Result<Vec<Book>, RequestError> {
        let page: ClassifyPage = self
            .fetch(CLASSIFY_PATH, &ClassifyRequest::page(page_no))
            .await?;
        Ok(page.into_records())
    }

    /// Up to five chapters of `book_id`, starting at chapter `index`.
    pub async fn chapter_batch(
        &self,
        book_id: &str,
        index: u32,
    ) -> Result<Vec<Chapter>, RequestError> {
        let batch: ChapterBatch = self
            .fetch(
                CHAPTER_BATCH_PATH,
                &ChapterBatchRequest::starting_at(book_id, index),
            )
            .await?;
        Ok(batch.chapter_list)
    }
}
