//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `pantheon_core` linkage.
//! - Optionally render the first batch of a catalog file as text.
//!
//! Usage: `pantheon_cli [catalog.json] [page-url]`

use pantheon_core::{
    CatalogApp, CatalogConfig, FileRecordSource, MemoryKvRepository, MemoryNavigator,
    MemorySurface,
};
use std::process::ExitCode;

const DEFAULT_PAGE_URL: &str = "https://pantheon.local/index.html";

fn main() -> ExitCode {
    println!("pantheon_core ping={}", pantheon_core::ping());
    println!("pantheon_core version={}", pantheon_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let page_url = args.next().unwrap_or_else(|| DEFAULT_PAGE_URL.to_string());

    let navigator = match MemoryNavigator::parse(&page_url) {
        Ok(navigator) => navigator,
        Err(err) => {
            eprintln!("invalid page url `{page_url}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = CatalogApp::new(
        CatalogConfig::from_env(),
        MemorySurface::new(),
        MemoryKvRepository::new(),
        navigator,
    );
    if let Err(err) = app.start(&FileRecordSource::new(&data_path)) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let surface = app.surface();
    if let Some(message) = &surface.not_found_message {
        println!("{message}");
        return ExitCode::SUCCESS;
    }
    for rendered in &surface.cards {
        let card = &rendered.card;
        println!("{} {:<12} {} ({})", card.stars, card.name, card.title, card.id);
    }
    if surface.load_more_visible {
        println!("... {} more", app.visible().len().saturating_sub(surface.cards.len()));
    }
    if let Some(detail) = &surface.detail {
        println!("[detail] {} - {}", detail.name, detail.title);
    }
    ExitCode::SUCCESS
}
