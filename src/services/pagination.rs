//! Fetch loops over the vendor's paged endpoints.
//!
//! [`pages`] is the shared backbone: a lazy stream that walks a cursor and
//! stops after the first empty page or failed call. The drivers on top of it
//! decide what to do with each page and when to stop early.

use crate::models::responses::{Book, Chapter};
use crate::services::dramabox_service::{DramaboxService, RequestError};
use futures_util::stream::{self, Stream, StreamExt};
use log::{info, warn};
use std::future::Future;
use std::time::Duration;

pub const FIRST_PAGE: u32 = 1;
pub const PAGE_STEP: u32 = 1;
/// The chapter endpoint hands out five chapters per batch.
pub const CHAPTER_STEP: u32 = 5;
pub const BATCH_DELAY: Duration = Duration::from_millis(200);

/// Records fetched at one cursor position.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub cursor: u32,
    pub records: Vec<T>,
}

/// Why a driver stopped asking for more.
#[derive(Debug)]
pub enum StopReason {
    /// The vendor returned an empty page.
    Exhausted,
    /// The caller said no to "load more?".
    Declined,
    /// A call failed (signature, empty data, transport or shape).
    Failed(RequestError),
}

impl StopReason {
    pub fn is_failure(&self) -> bool {
        matches!(self, StopReason::Failed(_))
    }
}

/// Answers "load more?" after a page has been shown.
pub trait Continuation {
    fn load_more(&mut self, shown: u32) -> bool;
}

impl<F> Continuation for F
where
    F: FnMut(u32) -> bool,
{
    fn load_more(&mut self, shown: u32) -> bool {
        self(shown)
    }
}

/// Summary of a page-by-page run.
#[derive(Debug)]
pub struct PageRun {
    pub pages: u32,
    pub last_cursor: Option<u32>,
    pub stop: StopReason,
}

/// Everything an accumulating run collected.
#[derive(Debug)]
pub struct Harvest<T> {
    pub items: Vec<T>,
    /// Vendor calls made, including the one that ended the run.
    pub calls: u32,
    pub stop: StopReason,
}

/// Lazily fetch `start`, `start + step`, ... until a page comes back empty
/// or a call fails. A failure is yielded once as the last item.
///
/// Nothing is fetched until the stream is polled; calling this again starts
/// a fresh walk from `start`.
pub fn pages<T, F, Fut>(
    start: u32,
    step: u32,
    fetch: F,
) -> impl Stream<Item = Result<Page<T>, RequestError>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Vec<T>, RequestError>>,
{
    stream::unfold((fetch, Some(start)), move |(mut fetch, cursor)| async move {
        let cursor = cursor?;
        match fetch(cursor).await {
            Ok(records) if records.is_empty() => None,
            Ok(records) => Some((Ok(Page { cursor, records }), (fetch, Some(cursor + step)))),
            Err(e) => Some((Err(e), (fetch, None))),
        }
    })
}

/// Hand each page to `on_page`, then ask `more` whether to keep going.
pub async fn drive_pages<T, S, C, V>(pages: S, more: &mut C, mut on_page: V) -> PageRun
where
    S: Stream<Item = Result<Page<T>, RequestError>>,
    C: Continuation + ?Sized,
    V: FnMut(&Page<T>),
{
    let mut pages = std::pin::pin!(pages);
    let mut run = PageRun {
        pages: 0,
        last_cursor: None,
        stop: StopReason::Exhausted,
    };

    while let Some(next) = pages.next().await {
        match next {
            Ok(page) => {
                run.pages += 1;
                run.last_cursor = Some(page.cursor);
                on_page(&page);
                if !more.load_more(page.cursor) {
                    run.stop = StopReason::Declined;
                    break;
                }
            }
            Err(e) => {
                warn!("Pagination ended by a failed call: {}", e);
                run.stop = StopReason::Failed(e);
                break;
            }
        }
    }

    run
}

/// Concatenate every batch in order, pausing `delay` after each one.
pub async fn accumulate<T, S, V>(batches: S, delay: Duration, mut on_batch: V) -> Harvest<T>
where
    S: Stream<Item = Result<Page<T>, RequestError>>,
    V: FnMut(&Page<T>, usize),
{
    let mut batches = std::pin::pin!(batches);
    let mut harvest = Harvest {
        items: Vec::new(),
        calls: 0,
        stop: StopReason::Exhausted,
    };

    loop {
        harvest.calls += 1;
        match batches.next().await {
            Some(Ok(batch)) => {
                on_batch(&batch, harvest.items.len() + batch.records.len());
                harvest.items.extend(batch.records);
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            Some(Err(e)) => {
                warn!("Batch loading ended by a failed call: {}", e);
                harvest.stop = StopReason::Failed(e);
                break;
            }
            None => break,
        }
    }

    harvest
}

/// Pages of the "latest" channel, `pageNo` 1, 2, 3, ...
pub fn latest_pages(
    service: &DramaboxService,
) -> impl Stream<Item = Result<Page<Book>, RequestError>> + '_ {
    pages(FIRST_PAGE, PAGE_STEP, move |page| service.latest_page(page))
}

/// Classify pages of fixed size, `pageNo` 1, 2, 3, ...
pub fn classify_pages(
    service: &DramaboxService,
) -> impl Stream<Item = Result<Page<Book>, RequestError>> + '_ {
    pages(FIRST_PAGE, PAGE_STEP, move |page| service.classify_page(page))
}

/// Every chapter of `book_id`, walking `index` 1, 6, 11, ...
pub async fn scrape_chapters<V>(
    service: &DramaboxService,
    book_id: &str,
    delay: Duration,
    on_batch: V,
) -> Harvest<Chapter>
where
    V: FnMut(&Page<Chapter>, usize),
{
    info!("Loading chapters of book {}", book_id);
    let batches = pages(FIRST_PAGE, CHAPTER_STEP, move |index| {
        service.chapter_batch(book_id, index)
    });
    accumulate(batches, delay, on_batch).await
}
