//! Stats command handler

use crate::config::Settings;
use crate::error::AppResult;
use crate::repositories::RecordCounts;
use crate::state::AppState;

pub struct StatsCommandHandler {
    settings: Settings,
}

impl StatsCommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn execute(self) -> AppResult<()> {
        let state = AppState::connect(self.settings).await?;
        let recipes = state.services.recipes.counts().await?;
        let categories = state.services.categories.counts().await?;

        println!("{}", render("recipes", recipes));
        println!("{}", render("categories", categories));
        Ok(())
    }
}

fn render(label: &str, counts: RecordCounts) -> String {
    format!(
        "{:<12} {:>6} active {:>6} deleted {:>6} total",
        label,
        counts.active,
        counts.deleted,
        counts.total()
    )
}
