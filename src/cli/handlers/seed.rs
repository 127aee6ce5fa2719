//! Seed command handler

use crate::config::Settings;
use crate::db::seed;
use crate::error::AppResult;
use crate::state::AppState;

pub struct SeedCommandHandler {
    settings: Settings,
}

impl SeedCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Connects, applies migrations if `database.auto_migrate` is set, then
    /// inserts the sample data.
    pub async fn execute(self) -> AppResult<()> {
        let state = AppState::connect(self.settings).await?;
        let report = seed::seed(&state.repositories).await?;

        println!(
            "Categories: {} created, {} refreshed",
            report.categories_created, report.categories_updated
        );
        if report.recipes_created == 0 {
            println!("Recipes: table not empty, nothing inserted");
        } else {
            println!("Recipes: {} created", report.recipes_created);
        }
        Ok(())
    }
}
