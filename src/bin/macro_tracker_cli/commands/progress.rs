// ABOUTME: Progress command for macro-tracker
// ABOUTME: Runs the progress tracker for a tab and prints the resulting state

use macro_tracker::{context::AppContext, intelligence::ProgressTab};

use crate::helpers::display::display_progress;

/// Calculate and print progress for a tab
pub async fn show(context: &AppContext, tab: ProgressTab) {
    let tracker = context.tracker();
    tracker.select_tab(tab).await;
    display_progress(&tracker.state());
}
