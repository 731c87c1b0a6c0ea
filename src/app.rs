//! Main application UI and state management.
//! Handles deck selection, the card editor, and study sessions.

use chrono::{DateTime, Local};
use eframe::egui;
use flashcards_app::config::AppConfig;
use flashcards_app::database::{DeckStore, SqliteStorage};
use flashcards_app::error::Result;
use flashcards_app::export::json::{export_json_to_path, import_json};
use flashcards_app::input::{KeyLatch, StudyAction, is_shortcut};
use flashcards_app::models::{CardField, DeckId, DeckSet, Phase, StudySession};
use flashcards_app::routes::{Mode, Route};

/// Name of the deck created from cards saved by the old single-deck editor.
pub const LEGACY_DECK_NAME: &str = "My Cards";

/// What the study screen is showing.
enum SessionView {
    Active(StudySession),
    EmptyDeck(DeckId),
    MissingDeck,
}

/// Where to go after the current frame.
enum Navigation {
    To(Route),
    Editor(DeckId),
    Session(DeckId),
}

/// Application screen states
enum AppScreen {
    Home,
    DeckSelection(Mode),
    Editor(Option<DeckId>),
    Session(SessionView),
}

/// Main application state
pub struct MyApp {
    store: DeckStore<SqliteStorage>,
    all_decks: DeckSet,
    current_screen: AppScreen,

    selected_deck: Option<DeckId>,
    new_deck_name: String,
    pending_delete: Option<DeckId>,
    key_latch: KeyLatch,

    last_saved: Option<DateTime<Local>>,
    show_export_dialog: bool,
    result_message: Option<String>,
}

impl eframe::App for MyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}

/// Central panel that is disabled while a blocking prompt is open.
fn central_panel(ctx: &egui::Context, enabled: bool, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_enabled_ui(enabled, add_contents);
    });
}

impl MyApp {
    /// Draws one frame.
    fn ui(&mut self, ctx: &egui::Context) {
        let mut screen = std::mem::replace(&mut self.current_screen, AppScreen::Home);
        let next = match &mut screen {
            AppScreen::Home => self.render_home_screen(ctx),
            AppScreen::DeckSelection(mode) => self.render_deck_selection(ctx, *mode),
            AppScreen::Editor(deck) => self.render_editor(ctx, *deck),
            AppScreen::Session(view) => self.render_session(ctx, view),
        };
        self.current_screen = screen;
        match next {
            Some(Navigation::To(route)) => self.navigate(route),
            Some(Navigation::Editor(id)) => self.open_editor(id),
            Some(Navigation::Session(id)) => self.open_session(id),
            None => {}
        }

        self.render_dialogs(ctx);
    }

    /// Creates the application with the persisted decks loaded.
    pub fn new(store: DeckStore<SqliteStorage>, decks: DeckSet, start: Route) -> Self {
        let mut app = Self {
            store,
            all_decks: decks,
            current_screen: AppScreen::Home,
            selected_deck: None,
            new_deck_name: String::new(),
            pending_delete: None,
            key_latch: KeyLatch::default(),
            last_saved: None,
            show_export_dialog: false,
            result_message: None,
        };
        app.navigate(start);
        app
    }

    /// Switches screens. Decks named in a route resolve to the first deck with that name.
    fn navigate(&mut self, route: Route) {
        log::info!("Navigating to {}", route);
        self.pending_delete = None;
        self.current_screen = match route {
            Route::Home => AppScreen::Home,
            Route::DeckSelection { mode } => AppScreen::DeckSelection(mode),
            Route::Editor { deck } => AppScreen::Editor(self.resolve_deck_name(&deck)),
            Route::Session { deck } => {
                AppScreen::Session(self.start_session(self.resolve_deck_name(&deck)))
            }
        };
    }

    fn resolve_deck_name(&self, name: &str) -> Option<DeckId> {
        if self.all_decks.count_named(name) > 1 {
            log::warn!("Several decks are named '{}', opening the first", name);
        }
        self.all_decks.find_by_name(name).map(|d| d.id)
    }

    fn open_editor(&mut self, id: DeckId) {
        log::info!("Opening editor for deck {}", id);
        self.pending_delete = None;
        self.current_screen = AppScreen::Editor(Some(id));
    }

    fn open_session(&mut self, id: DeckId) {
        self.pending_delete = None;
        self.current_screen = AppScreen::Session(self.start_session(Some(id)));
    }

    /// Shuffles a fresh session. Re-entering the screen always reshuffles.
    fn start_session(&mut self, id: Option<DeckId>) -> SessionView {
        self.key_latch = KeyLatch::default();
        let Some(deck) = id.and_then(|id| self.all_decks.find(id)) else {
            return SessionView::MissingDeck;
        };
        match StudySession::start(deck) {
            Ok(session) => SessionView::Active(session),
            Err(e) => {
                log::info!("{}", e);
                SessionView::EmptyDeck(deck.id)
            }
        }
    }

    /// Records the outcome of a store write.
    fn persisted<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                self.last_saved = Some(Local::now());
                Some(value)
            }
            Err(e) => {
                log::error!("Failed to save decks: {}", e);
                self.result_message = Some(format!("Saving failed: {}", e));
                None
            }
        }
    }

    fn render_status_line(&self, ui: &mut egui::Ui) {
        let text = match self.last_saved {
            Some(time) => format!("Last saved {}", time.format("%H:%M:%S")),
            None => "No changes saved yet".to_string(),
        };
        ui.small(text);
    }

    /// Renders the home screen
    fn render_home_screen(&mut self, ctx: &egui::Context) -> Option<Navigation> {
        let mut next = None;
        central_panel(ctx, self.pending_delete.is_none(), |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("Hanzi Flashcards");
                ui.add_space(20.0);

                if ui.button("Start Session").clicked() {
                    let mode = Mode::Session;
                    next = Some(Navigation::To(Route::DeckSelection { mode }));
                }
                if ui.button("Edit Decks").clicked() {
                    next = Some(Navigation::To(Route::DeckSelection { mode: Mode::Editor }));
                }

                ui.add_space(20.0);
                ui.horizontal(|ui| {
                    if ui.button("Export Deck").clicked() {
                        self.show_export_dialog = true;
                    }
                    if ui.button("Import Deck").clicked() {
                        self.handle_import();
                    }
                });

                ui.add_space(20.0);
                self.render_status_line(ui);
            });
        });
        next
    }

    /// Renders the deck list used to pick a deck to study or edit
    fn render_deck_selection(&mut self, ctx: &egui::Context, mode: Mode) -> Option<Navigation> {
        let mut next = None;
        // Stored and applied after the UI pass to avoid borrowing conflicts
        let mut action_select: Option<DeckId> = None;
        let mut action_delete: Option<DeckId> = None;
        let mut action_create = false;
        let mut action_open: Option<DeckId> = None;

        central_panel(ctx, self.pending_delete.is_none(), |ui| {
            ui.heading(match mode {
                Mode::Session => "Select a Deck to Study",
                Mode::Editor => "Select a Deck to Edit",
            });
            ui.separator();

            if self.all_decks.is_empty() && mode == Mode::Session {
                ui.colored_label(
                    egui::Color32::RED,
                    "No decks available. Please go create a deck first.",
                );
            }

            egui::ScrollArea::vertical()
                .id_source("decks_list")
                .max_height(300.0)
                .show(ui, |ui| {
                    for deck in &self.all_decks.decks {
                        let is_selected = self.selected_deck == Some(deck.id);
                        ui.horizontal(|ui| {
                            if ui
                                .selectable_label(
                                    is_selected,
                                    format!("{} ({} cards)", deck.name, deck.cards.len()),
                                )
                                .clicked()
                            {
                                action_select = Some(deck.id);
                            }
                            if mode == Mode::Editor && ui.button("Delete").clicked() {
                                action_delete = Some(deck.id);
                            }
                        });
                    }
                });

            if mode == Mode::Editor {
                ui.separator();
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.new_deck_name)
                            .hint_text("New Deck Name"),
                    );
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Create Deck").clicked() || submitted {
                        action_create = true;
                    }
                });
            }

            let selected = self.selected_deck.and_then(|id| self.all_decks.find(id));
            let is_deck_empty = selected.is_some_and(|d| d.is_empty());
            if mode == Mode::Session && is_deck_empty {
                ui.colored_label(
                    egui::Color32::RED,
                    "This deck has no cards. Please go create some in the editor.",
                );
            }

            ui.add_space(10.0);
            let can_open = selected.is_some() && !(mode == Mode::Session && is_deck_empty);
            let label = match mode {
                Mode::Session => "Start Session",
                Mode::Editor => "Edit Deck",
            };
            if ui.add_enabled(can_open, egui::Button::new(label)).clicked() {
                action_open = self.selected_deck;
            }

            ui.add_space(20.0);
            if ui.button("Home").clicked() {
                next = Some(Navigation::To(Route::Home));
            }
        });

        if let Some(id) = action_select {
            self.selected_deck = Some(id);
        }
        if let Some(id) = action_delete {
            // The deck is only removed once the confirmation window says yes
            if self.pending_delete.is_none() {
                self.pending_delete = Some(id);
            }
        }
        if action_create {
            let name = std::mem::take(&mut self.new_deck_name);
            let result = self.store.create_deck(&mut self.all_decks, &name);
            if let Some(Some(id)) = self.persisted(result) {
                self.selected_deck = Some(id);
            }
        }
        if let Some(id) = action_open {
            next = Some(match mode {
                Mode::Session => Navigation::Session(id),
                Mode::Editor => Navigation::Editor(id),
            });
        }
        next
    }

    /// Renders the card editor for one deck
    fn render_editor(
        &mut self,
        ctx: &egui::Context,
        deck_id: Option<DeckId>,
    ) -> Option<Navigation> {
        let mut next = None;
        let mut edits: Vec<(usize, CardField, String)> = Vec::new();
        let mut action_delete: Option<usize> = None;
        let mut action_add = false;

        central_panel(ctx, self.pending_delete.is_none(), |ui| {
            let Some(deck) = deck_id.and_then(|id| self.all_decks.find(id)) else {
                ui.heading("Deck does not exist");
                if ui.button("Back to Deck Selection").clicked() {
                    next = Some(Navigation::To(Route::DeckSelection { mode: Mode::Editor }));
                }
                return;
            };

            ui.heading(format!("Edit Flashcards: {}", deck.name));
            ui.separator();

            egui::ScrollArea::vertical()
                .id_source("cards_list")
                .max_height(500.0)
                .show(ui, |ui| {
                    for (i, card) in deck.cards.iter().enumerate() {
                        ui.push_id(i, |ui| {
                            ui.group(|ui| {
                                for field in CardField::ALL {
                                    let mut text = card.get(field).to_string();
                                    let response = ui.add(
                                        egui::TextEdit::singleline(&mut text)
                                            .hint_text(field.label())
                                            .desired_width(f32::INFINITY),
                                    );
                                    if response.changed() {
                                        edits.push((i, field, text));
                                    }
                                }
                                if ui.button("Delete").clicked() {
                                    action_delete = Some(i);
                                }
                            });
                        });
                    }
                });

            if ui.button("Add Card").clicked() {
                action_add = true;
            }

            ui.add_space(10.0);
            self.render_status_line(ui);
            ui.horizontal(|ui| {
                if ui.button("Home").clicked() {
                    next = Some(Navigation::To(Route::Home));
                }
                if ui.button("Back to Deck Selection").clicked() {
                    next = Some(Navigation::To(Route::DeckSelection { mode: Mode::Editor }));
                }
            });
        });

        if let Some(id) = deck_id {
            for (index, field, value) in edits {
                let result = self.store.update_card(&mut self.all_decks, id, index, field, &value);
                self.persisted(result);
            }
            if let Some(index) = action_delete {
                let result = self.store.delete_card(&mut self.all_decks, id, index);
                self.persisted(result);
            }
            if action_add {
                let result = self.store.add_card(&mut self.all_decks, id);
                self.persisted(result);
            }
        }
        next
    }

    /// Renders the study screen with the progressive reveal
    fn render_session(
        &mut self,
        ctx: &egui::Context,
        view: &mut SessionView,
    ) -> Option<Navigation> {
        let mut next = None;

        if let SessionView::Active(session) = view {
            let events = ctx.input(|i| i.events.clone());
            for action in self.key_latch.actions_for(&events) {
                match action {
                    StudyAction::Advance => session.advance(),
                    StudyAction::Retreat => session.retreat(),
                };
            }
            // Shortcut keys are consumed here, otherwise a focused button would also
            // take Space/Enter as a click
            ctx.input_mut(|i| i.events.retain(|e| !is_shortcut(e)));
        }

        central_panel(ctx, self.pending_delete.is_none(), |ui| {
            match view {
                SessionView::MissingDeck => {
                    ui.heading("Deck does not exist");
                    if ui.button("Back to Deck Selection").clicked() {
                        let mode = Mode::Session;
                        next = Some(Navigation::To(Route::DeckSelection { mode }));
                    }
                }
                SessionView::EmptyDeck(id) => {
                    ui.heading("This deck has no cards");
                    if ui.button("Go to Editor").clicked() {
                        next = Some(Navigation::Editor(*id));
                    }
                }
                SessionView::Active(session) => {
                    ui.heading(format!("Studying: {}", session.deck_name()));
                    ui.label(session.progress_label());
                    ui.add_space(20.0);

                    ui.group(|ui| {
                        ui.set_min_height(200.0);
                        ui.vertical_centered(|ui| {
                            let reveal = session.reveal();
                            ui.add_space(20.0);
                            ui.heading(reveal.english);
                            if let Some(pinyin) = reveal.pinyin {
                                ui.heading(pinyin);
                            }
                            if let Some(character) = reveal.character {
                                ui.label(egui::RichText::new(character).size(48.0));
                            }
                            ui.add_space(20.0);
                        });
                    });

                    ui.add_space(20.0);
                    ui.horizontal(|ui| {
                        if session.can_retreat() && ui.button("◀ Back").clicked() {
                            session.retreat();
                        }
                        if session.can_advance() {
                            let label = if session.phase() == Phase::Character {
                                "Next Card ▶"
                            } else {
                                "Next ▶"
                            };
                            if ui.button(label).clicked() {
                                session.advance();
                            }
                        }
                    });
                }
            }

            ui.add_space(20.0);
            if ui.button("Home").clicked() {
                next = Some(Navigation::To(Route::Home));
            }
        });

        next
    }

    /// Renders the delete confirmation, export picker and result windows
    fn render_dialogs(&mut self, ctx: &egui::Context) {
        if let Some(id) = self.pending_delete {
            let name = self
                .all_decks
                .find(id)
                .map(|d| d.name.clone())
                .unwrap_or_default();
            let mut answer: Option<bool> = None;

            egui::Window::new("Delete deck?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(format!("Are you sure you want to delete the deck \"{}\"?", name));
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            answer = Some(false);
                        }
                        if ui.button("Yes").clicked() {
                            answer = Some(true);
                        }
                    });
                });

            match answer {
                Some(true) => {
                    self.pending_delete = None;
                    let result = self.store.delete_deck(&mut self.all_decks, id);
                    self.persisted(result);
                    if self.selected_deck == Some(id) {
                        self.selected_deck = None;
                    }
                }
                Some(false) => self.pending_delete = None,
                None => {}
            }
        }

        if self.show_export_dialog {
            let mut export_deck: Option<DeckId> = None;
            let mut should_cancel = false;

            egui::Window::new("Export Deck")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Select a deck to export:");
                    ui.separator();

                    for deck in &self.all_decks.decks {
                        if ui
                            .button(format!("{} ({} cards)", deck.name, deck.cards.len()))
                            .clicked()
                        {
                            export_deck = Some(deck.id);
                        }
                    }

                    ui.separator();
                    if ui.button("Cancel").clicked() {
                        should_cancel = true;
                    }
                });

            if let Some(id) = export_deck {
                self.handle_export(id);
            }
            if should_cancel {
                self.show_export_dialog = false;
            }
        }

        if let Some(message) = &self.result_message {
            let mut close = false;
            egui::Window::new("Import/Export Result")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            if close {
                self.result_message = None;
            }
        }
    }

    /// Handles deck export to a JSON file
    fn handle_export(&mut self, id: DeckId) {
        self.show_export_dialog = false;
        let Some(deck) = self.all_decks.find(id) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(format!("{}.json", deck.name))
            .add_filter("JSON files", &["json"])
            .save_file()
        else {
            return;
        };

        self.result_message = Some(match export_json_to_path(deck, &path) {
            Ok(()) => format!("Deck '{}' exported successfully!", deck.name),
            Err(e) => {
                log::error!("Export failed: {}", e);
                format!("Export failed: {}", e)
            }
        });
    }

    /// Handles deck import from a JSON file
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        match import_json(&path) {
            Ok(deck) => {
                let name = deck.name.clone();
                let count = deck.cards.len();
                let result = self.store.insert_deck(&mut self.all_decks, deck);
                if self.persisted(result).is_some() {
                    self.result_message = Some(format!(
                        "Deck '{}' imported successfully with {} cards!",
                        name, count
                    ));
                }
            }
            Err(e) => {
                log::warn!("Import of {} failed: {}", path.display(), e);
                self.result_message = Some(format!(
                    "Import failed: {}\n\n\
                     Please check if the file has correct structure:\n\
                     {{\n  \"name\": \"Deck Name\",\n  \"cards\": [...]\n}}",
                    e
                ));
            }
        }
    }
}

/// Opens the store at the configured location and loads the decks, folding in any
/// cards left by the single-deck editor.
pub fn open_store(config: &AppConfig) -> Result<(DeckStore<SqliteStorage>, DeckSet)> {
    std::fs::create_dir_all(config.data_dir())?;
    let mut store = DeckStore::new(SqliteStorage::open(&config.database_path())?);
    let mut decks = store.load()?;
    if let Err(e) = store.migrate_legacy_cards(&mut decks, LEGACY_DECK_NAME) {
        log::warn!("Could not migrate legacy cards: {}", e);
    }
    Ok((store, decks))
}
