mod app;

use app::{MyApp, open_store};
use flashcards_app::config::{AppConfig, LogConfig};
use flashcards_app::routes::Route;

fn main() -> eframe::Result<()> {
    let loaded = AppConfig::load();
    let level = match &loaded {
        Ok(config) => config.log.level.clone(),
        Err(_) => LogConfig::default().level,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Ignoring config at {}: {}", AppConfig::config_path().display(), e);
        AppConfig::default()
    });

    // An optional first argument opens a screen directly, e.g. "/session?deck=HSK1"
    let start = match std::env::args().nth(1) {
        Some(path) => Route::parse(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring start route '{}': {}", path, e);
            Route::Home
        }),
        None => Route::Home,
    };

    let (store, decks) = match open_store(&config) {
        Ok(opened) => opened,
        Err(e) => {
            log::error!("Failed to open deck storage: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Loaded {} decks", decks.len());
    for deck in &decks.decks {
        log::debug!("  - {} ({} cards)", deck.name, deck.cards.len());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };
    eframe::run_native(
        "Hanzi Flashcards",
        options,
        Box::new(|_cc| Ok(Box::new(MyApp::new(store, decks, start)))),
    )
}
