use crate::cli::output::{divider, preview, release_time, OutputDir};
use crate::cli::prompt::{ask, LoadMorePrompt};
use crate::models::responses::{Book, Column};
use crate::services::dramabox_service::DramaboxService;
use crate::services::pagination::{
    classify_pages, drive_pages, latest_pages, scrape_chapters, Page, StopReason, BATCH_DELAY,
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::time::Duration;

/// Rank categories offered by the vendor; anything else falls back to 2.
pub const DEFAULT_RANK_TYPE: u8 = 2;

pub fn parse_rank_type(choice: &str) -> u8 {
    match choice.trim() {
        "1" => 1,
        "2" => 2,
        "3" => 3,
        _ => DEFAULT_RANK_TYPE,
    }
}

fn print_listing(book: &Book, intro_chars: usize) {
    match book.badge() {
        Some(badge) => println!("[{}] [{}] {}", badge, book.book_id, book.name()),
        None => println!("[{}] {}", book.book_id, book.name()),
    }
    println!(
        "   Views: {} | Eps: {}",
        book.play_count.clone().unwrap_or_default(),
        book.chapter_count.clone().unwrap_or_default()
    );
    println!("   Tags:  {}", book.tag_line());
    if intro_chars > 0 {
        println!("   Intro: {}...", preview(book.intro(), intro_chars));
    }
    divider();
}

/// Print every column and return its books flattened in display order.
fn print_columns(columns: &[Column], with_badges: bool) -> Vec<Book> {
    let mut all_books = Vec::new();
    for column in columns {
        println!("\n=== {} ===", column.title.as_deref().unwrap_or(""));
        if column.book_list.is_empty() {
            println!("- Kosong -");
            continue;
        }
        for book in &column.book_list {
            if with_badges {
                print_listing(book, 0);
            } else {
                println!(
                    "[{}] {} | Eps: {}",
                    book.book_id,
                    book.name(),
                    book.chapter_count.clone().unwrap_or_default()
                );
            }
            all_books.push(book.clone());
        }
    }
    all_books
}

// Search hits are shown as the vendor sent them.
fn render_hits(hits: &[Book]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(hits)
}

fn report_end(stop: &StopReason, exhausted: &str) {
    match stop {
        StopReason::Declined => {}
        StopReason::Exhausted => println!("{}", exhausted),
        StopReason::Failed(e) => {
            info!("Listing stopped: {}", e);
            println!("{}", exhausted);
        }
    }
}

pub async fn search(service: &DramaboxService, out: &OutputDir) -> std::io::Result<()> {
    println!("\n[ Search Drama ]");
    let keyword = ask("Keyword")?;

    match service.search(&keyword).await {
        Ok(hits) if !hits.is_empty() => {
            match render_hits(&hits) {
                Ok(text) => println!("{}", text),
                Err(e) => error!("Could not render search results: {}", e),
            }
            out.save_and_report("result_search.json", &hits);
        }
        Ok(_) => println!("Empty result."),
        Err(e) => {
            info!("Search failed: {}", e);
            println!("Empty result.");
        }
    }
    Ok(())
}

pub async fn latest(service: &DramaboxService, out: &OutputDir) {
    println!("\n[ Latest / Telah Tayang ]");
    let mut more = LoadMorePrompt::new("Load more?");

    let run = drive_pages(latest_pages(service), &mut more, |page: &Page<Book>| {
        println!("\n--- Page {} ---", page.cursor);
        for book in &page.records {
            print_listing(book, 60);
        }
        out.save_and_report(&format!("latest_page_{}.json", page.cursor), &page.records);
    })
    .await;

    report_end(&run.stop, "No more data.");
}

pub async fn for_you(service: &DramaboxService, out: &OutputDir) {
    println!("\n[ For You / Recommended ]");
    match service.for_you().await {
        Ok(columns) => {
            let books = print_columns(&columns, false);
            out.save_and_report("result_foryou.json", &books);
        }
        Err(e) => {
            info!("For-you failed: {}", e);
            println!("Empty result.");
        }
    }
}

pub async fn coming_soon(service: &DramaboxService, out: &OutputDir) {
    println!("\n[ Coming Soon / Akan Tayang ]");
    match service.coming_soon().await {
        Ok(books) if !books.is_empty() => {
            for book in &books {
                println!("[{}] {}", book.book_id, book.name());
                println!(
                    "   Rilis: {}",
                    book.book_shelf_time
                        .map(release_time)
                        .unwrap_or_else(|| "-".to_string())
                );
                println!(
                    "   Eps:   {} | Tags: {}",
                    book.chapter_count.clone().unwrap_or_default(),
                    book.tag_line()
                );
                println!("   Intro: {}...", preview(book.intro(), 80));
                divider();
            }
            out.save_and_report("result_coming_soon.json", &books);
        }
        Ok(_) => println!("Empty result."),
        Err(e) => {
            info!("Coming-soon failed: {}", e);
            println!("Empty result.");
        }
    }
}

pub async fn rank(service: &DramaboxService, out: &OutputDir) -> std::io::Result<()> {
    println!("\n[ Rank / Peringkat ]");
    println!("1. Sedang Tren");
    println!("2. Pencarian Populer");
    println!("3. Terbaru");
    let rank_type = parse_rank_type(&ask("Pilih Kategori Rank (1-3)")?);

    match service.rank(rank_type).await {
        Ok(board) if !board.rank_list.is_empty() => {
            println!("\n=== {} ===", board.title_for(rank_type));
            for (position, book) in board.rank_list.iter().enumerate() {
                println!("#{} [{}] {}", position + 1, book.book_id, book.name());
                let hot = book
                    .rank_vo
                    .as_ref()
                    .and_then(|r| r.hot_code.clone())
                    .unwrap_or_default();
                println!("   Hot:   {}", hot);
                println!(
                    "   Eps:   {} | Cast: {}",
                    book.chapter_count.clone().unwrap_or_default(),
                    book.protagonist.as_deref().unwrap_or("-")
                );
                println!("   Tags:  {}", book.tag_line());
                println!("   Intro: {}...", preview(book.intro(), 80));
                divider();
            }
            out.save_and_report(&format!("rank_type_{}.json", rank_type), &board.rank_list);
        }
        Ok(_) => println!("Empty Rank Result."),
        Err(e) => {
            info!("Rank failed: {}", e);
            println!("Empty Rank Result.");
        }
    }
    Ok(())
}

pub async fn vip(service: &DramaboxService, out: &OutputDir) {
    println!("\n[ VIP / Weekly Selection ]");
    match service.vip().await {
        Ok(columns) if !columns.is_empty() => {
            let books = print_columns(&columns, true);
            out.save_and_report("result_vip.json", &books);
        }
        Ok(_) => println!("Empty VIP result."),
        Err(e) => {
            info!("VIP failed: {}", e);
            println!("Empty VIP result.");
        }
    }
}

pub async fn classify(service: &DramaboxService, out: &OutputDir) {
    println!("\n[ Classify / Jelajah Kategori ]");
    let mut more = LoadMorePrompt::new("Load page selanjutnya?");

    let run = drive_pages(classify_pages(service), &mut more, |page: &Page<Book>| {
        println!("\n--- Page {} ---", page.cursor);
        for book in &page.records {
            print_listing(book, 60);
        }
        out.save_and_report(&format!("classify_page_{}.json", page.cursor), &page.records);
    })
    .await;

    report_end(&run.stop, "End of list.");
}

pub async fn episodes(service: &DramaboxService, out: &OutputDir) -> std::io::Result<()> {
    println!("\n[ Get Unlimited Episodes ]");
    let book_id = ask("Book ID")?;
    let book_id = book_id.trim();
    println!("Starting scraper for ID: {}...", book_id);

    let spinner = ProgressBar::new_spinner();
    match ProgressStyle::with_template("{spinner} {msg}") {
        Ok(style) => spinner.set_style(style),
        Err(e) => error!("Bad spinner template: {}", e),
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("Fetching batch starting at 1...");

    let harvest = scrape_chapters(service, book_id, BATCH_DELAY, |batch, total| {
        spinner.set_message(format!(
            "Fetched batch at {} ({} episodes so far)...",
            batch.cursor, total
        ));
    })
    .await;
    spinner.finish_with_message("Done.");

    if let StopReason::Failed(e) = &harvest.stop {
        info!("Episode scrape stopped: {}", e);
    }
    println!("\nTotal Episodes: {}", harvest.items.len());
    out.save_and_report("result_episode.json", &harvest.items);
    Ok(())
}
