//! Interactive audit log browser.

use chrono::NaiveDate;
use dialoguer::{Input, Select};

use crate::output::{self, OutputFormat};
use ouvidoria_client::AuditLogClient;
use ouvidoria_console::{
    AuditLogView, ExportOrchestrator, FetchOutcome, PageChange, SearchDebouncer,
};
use ouvidoria_core::error::AppError;
use ouvidoria_core::types::query::DATE_FORMAT;
use ouvidoria_core::types::{ActionFilter, PageSize};

use super::{list, prompt_error, summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Next,
    Previous,
    GoTo,
    Search,
    Action,
    Dates,
    PageSize,
    ClearFilters,
    Summary,
    Export,
    Retry,
    Quit,
}

impl MenuItem {
    fn label(self) -> &'static str {
        match self {
            Self::Next => "Next page",
            Self::Previous => "Previous page",
            Self::GoTo => "Go to page",
            Self::Search => "Search",
            Self::Action => "Filter by action",
            Self::Dates => "Filter by date range",
            Self::PageSize => "Page size",
            Self::ClearFilters => "Clear filters",
            Self::Summary => "Summary",
            Self::Export => "Export CSV",
            Self::Retry => "Retry",
            Self::Quit => "Quit",
        }
    }
}

/// Execute the browse command
pub async fn execute(config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (client, mut view) = super::connect(&config)?;
    let orchestrator = ExportOrchestrator::from_config(&config.export);
    let (mut debouncer, mut settled) =
        SearchDebouncer::from_millis(config.listing.search_debounce_ms);

    if let Err(e) = view.load_action_options(&client).await {
        tracing::warn!(error = %e, "Action options unavailable");
    }
    refresh(&mut view, &client).await;

    loop {
        render(&mut view);

        let menu = menu(&view);
        let labels: Vec<&str> = menu.iter().map(|m| m.label()).collect();
        let choice = Select::new()
            .with_prompt("Audit log")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match menu[choice] {
            MenuItem::Next => {
                if view.next_page().needs_fetch() {
                    refresh(&mut view, &client).await;
                }
            }
            MenuItem::Previous => {
                if view.previous_page().needs_fetch() {
                    refresh(&mut view, &client).await;
                }
            }
            MenuItem::GoTo => {
                let page: u64 = Input::new()
                    .with_prompt("Page")
                    .interact_text()
                    .map_err(prompt_error)?;
                let change = view.go_to_page(page);
                if change == PageChange::Reset {
                    output::print_warning(&format!("Page {} is out of range", page));
                }
                if change.needs_fetch() {
                    refresh(&mut view, &client).await;
                }
            }
            MenuItem::Search => {
                let text: String = Input::new()
                    .with_prompt("Search")
                    .with_initial_text(view.criteria().search.clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                // single-shot: the prompt hands over a finished line, so the
                // debouncer never merges keystrokes here and only adds its delay
                debouncer.input(text);
                if let Some(term) = settled.recv().await {
                    if view.set_search(term) {
                        refresh(&mut view, &client).await;
                    }
                }
            }
            MenuItem::Action => {
                let filter = prompt_action(&view)?;
                if view.set_action(filter) {
                    refresh(&mut view, &client).await;
                }
            }
            MenuItem::Dates => {
                let from = prompt_date("From (YYYY-MM-DD, blank for open)")?;
                let to = prompt_date("To (YYYY-MM-DD, blank for open)")?;
                if view.set_date_range(from, to) {
                    refresh(&mut view, &client).await;
                }
            }
            MenuItem::PageSize => {
                let sizes: Vec<PageSize> = PageSize::all().collect();
                let labels: Vec<String> = sizes.iter().map(|s| s.to_string()).collect();
                let current = sizes
                    .iter()
                    .position(|s| *s == view.pagination().page_size())
                    .unwrap_or(0);
                let index = Select::new()
                    .with_prompt("Entries per page")
                    .items(&labels)
                    .default(current)
                    .interact()
                    .map_err(prompt_error)?;
                if view.set_page_size(sizes[index]) {
                    refresh(&mut view, &client).await;
                }
            }
            MenuItem::ClearFilters => {
                if view.clear_filters() {
                    refresh(&mut view, &client).await;
                }
            }
            MenuItem::Summary => {
                if view.load_summary(&client).await == FetchOutcome::Applied {
                    summary::print_summary(&view, OutputFormat::Table, false);
                }
            }
            MenuItem::Export => {
                let today = chrono::Local::now().date_naive();
                if let Err(e) = view.export(&client, &orchestrator, today).await {
                    tracing::debug!(error = %e, "Export failed");
                }
            }
            MenuItem::Retry => refresh(&mut view, &client).await,
            MenuItem::Quit => break,
        }
    }

    debouncer.cancel();
    Ok(())
}

async fn refresh(view: &mut AuditLogView, client: &AuditLogClient) {
    println!("Loading...");
    let outcome = view.refresh(client).await;
    tracing::debug!(?outcome, "Listing refreshed");
}

fn menu(view: &AuditLogView) -> Vec<MenuItem> {
    let mut items = Vec::with_capacity(12);
    if view.can_retry() {
        items.push(MenuItem::Retry);
    }
    if let Some(page) = view.page() {
        if page.has_next() {
            items.push(MenuItem::Next);
        }
        if page.has_previous() {
            items.push(MenuItem::Previous);
        }
        if page.total_pages > 1 {
            items.push(MenuItem::GoTo);
        }
    }
    items.extend([
        MenuItem::Search,
        MenuItem::Action,
        MenuItem::Dates,
        MenuItem::PageSize,
    ]);
    if !view.criteria().is_default() {
        items.push(MenuItem::ClearFilters);
    }
    items.extend([MenuItem::Summary, MenuItem::Export, MenuItem::Quit]);
    items
}

fn render(view: &mut AuditLogView) {
    println!();
    let criteria = view.criteria();
    if !criteria.is_default() {
        let range = &criteria.date_range;
        println!(
            "Filters: action={} from={} to={} search={:?}",
            criteria.action,
            range.from.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            range.to.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            criteria.search_term().unwrap_or_default(),
        );
    }
    list::print_page(view, OutputFormat::Table);
    for notice in view.notifications_mut().drain() {
        output::print_notification(&notice);
    }
}

fn prompt_action(view: &AuditLogView) -> Result<ActionFilter, AppError> {
    let options = view.action_options();
    let mut labels = vec!["All actions".to_string()];
    labels.extend(options.iter().map(|o| o.label.clone()));
    let index = Select::new()
        .with_prompt("Action")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;
    Ok(match index.checked_sub(1).and_then(|i| options.get(i)) {
        Some(option) => ActionFilter::parse(&option.value),
        None => ActionFilter::All,
    })
}

fn prompt_date(prompt: &str) -> Result<Option<NaiveDate>, AppError> {
    loop {
        let raw: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => return Ok(Some(date)),
            Err(e) => output::print_error(&format!("Invalid date '{}': {}", raw, e)),
        }
    }
}
