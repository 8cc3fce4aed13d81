pub mod menu;
pub mod output;
pub mod prompt;
pub mod views;
