use crate::cli::output::OutputDir;
use crate::cli::views;
use crate::services::dramabox_service::DramaboxService;
use dialoguer::Select;
use log::info;

const MENU_ITEMS: &[&str] = &[
    "Search Drama",
    "Latest / Newest",
    "For You / Recommended",
    "Coming Soon",
    "Top Ranking / Charts",
    "VIP / Weekly Selection",
    "Classify / Jelajah Kategori",
    "Get Episodes",
    "Exit",
];

/// Main interactive menu. Runs views one after another until "Exit".
///
/// View failures are printed by the views themselves; only a broken
/// terminal ends the loop with an error.
pub async fn main_menu(service: &DramaboxService, out: &OutputDir) -> std::io::Result<()> {
    loop {
        println!("\n--- MAIN MENU ---");
        let selection = Select::new()
            .items(MENU_ITEMS)
            .default(0)
            .interact()?;

        info!("Menu selection: {}", MENU_ITEMS[selection]);
        match selection {
            0 => views::search(service, out).await?,
            1 => views::latest(service, out).await,
            2 => views::for_you(service, out).await,
            3 => views::coming_soon(service, out).await,
            4 => views::rank(service, out).await?,
            5 => views::vip(service, out).await,
            6 => views::classify(service, out).await,
            7 => views::episodes(service, out).await?,
            8 => break,
            _ => println!("Invalid selection."),
        }
    }
    Ok(())
}
