/*!
 * Desktop front end for continent-explorer
 *
 * Click a continent to see its statistics and a card per country. With
 * enrichment on, each card also shows the capital and the flag image,
 * fetched in the background while a spinner is shown.
 *
 * Platform support: Windows, macOS, Linux
 */

use anyhow::Result;
use continent_explorer::render::{TITLE, countries_heading, stats_lines};
use continent_explorer::stats::ContinentSummary;
use continent_explorer::{
    BatchOutcome, BatchRequest, Client, CountryEntry, Dataset, Explorer, Mode, storage,
};
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

fn main() -> Result<()> {
    // Enable logging for better debugging
    env_logger::init();

    let dataset = Dataset::bundled()?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title(TITLE),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(|cc| {
            // http + svg loaders so flag URLs render as images
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(ExplorerApp::new(dataset)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Main application state
struct ExplorerApp {
    explorer: Explorer,
    client: Client,
    locale: String,
    search: String,

    // Export
    export_dir: PathBuf,
    status_message: String,

    // Background batches; stale ones are dropped by `Explorer::complete`
    outcome_sender: mpsc::Sender<BatchOutcome>,
    outcome_receiver: mpsc::Receiver<BatchOutcome>,
}

impl ExplorerApp {
    fn new(dataset: Dataset) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel();
        Self {
            explorer: Explorer::new(dataset, Mode::Enriched),
            client: Client::default(),
            locale: "en".to_string(),
            search: String::new(),
            export_dir: dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")),
            status_message: String::new(),
            outcome_sender,
            outcome_receiver,
        }
    }

    fn on_continent_click(&mut self, code: &str) {
        self.status_message.clear();
        if let Some(req) = self.explorer.select(code) {
            self.spawn_batch(req);
        }
    }

    fn spawn_batch(&self, req: BatchRequest) {
        let client = self.client.clone();
        let sender = self.outcome_sender.clone();
        thread::spawn(move || {
            let outcome = req.run(&client);
            let _ = sender.send(outcome);
        });
    }

    fn check_batch_results(&mut self) {
        while let Ok(outcome) = self.outcome_receiver.try_recv() {
            self.explorer.complete(outcome);
        }
    }

    fn toggle_mode(&mut self, enriched: bool) {
        let mode = if enriched { Mode::Enriched } else { Mode::Plain };
        self.explorer.set_mode(mode);
        self.status_message.clear();
    }

    fn export(&mut self) {
        let rows = self.explorer.countries();
        let Some(path) = rfd::FileDialog::new()
            .set_directory(&self.export_dir)
            .set_file_name("countries.csv")
            .add_filter("CSV", &["csv"])
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let res = if is_json {
            storage::save_json(rows, &path)
        } else {
            storage::save_csv(rows, &path)
        };
        self.status_message = match res {
            Ok(()) => format!("Saved {} rows to {}", rows.len(), path.display()),
            Err(err) => format!("Failed to save: {}", err),
        };
        if let Some(dir) = path.parent() {
            self.export_dir = dir.to_path_buf();
        }
    }

    fn country_card(ui: &mut egui::Ui, entry: &CountryEntry) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(180.0);
            ui.vertical(|ui| {
                let c = entry.country();
                ui.strong(&c.name);
                ui.label(format!("Code: {}", c.code));
                if let Some(capital) = entry.capital() {
                    ui.label(format!("Capital: {}", capital));
                }
                if let Some(flag) = entry.flag() {
                    let image = ui.add(
                        egui::Image::new(flag)
                            .max_width(160.0)
                            .max_height(107.0)
                            .show_loading_spinner(true),
                    );
                    image.on_hover_text(flag);
                    ui.hyperlink_to("Open flag", flag);
                }
            });
        });
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_batch_results();

        // Request repaint if loading (for spinner animation)
        if self.explorer.is_loading() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(TITLE);
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    ui.label("Search:");
                    if ui.text_edit_singleline(&mut self.search).changed() {
                        self.explorer.set_search_term(self.search.clone());
                    }

                    let mut enriched = self.explorer.mode() == Mode::Enriched;
                    if ui
                        .checkbox(&mut enriched, "Capitals and flags")
                        .on_hover_text("Fetch details for every country from restcountries.com")
                        .changed()
                    {
                        self.toggle_mode(enriched);
                    }

                    ui.label("Locale:");
                    egui::ComboBox::from_id_salt("locale")
                        .selected_text(&self.locale)
                        .show_ui(ui, |ui| {
                            for tag in ["en", "de", "fr", "es", "it", "pt", "nl"] {
                                ui.selectable_value(&mut self.locale, tag.to_string(), tag);
                            }
                        });
                });

                ui.add_space(5.0);

                // Continent buttons
                let selected = self.explorer.selected_continent().map(|c| c.code.clone());
                let mut clicked = None;
                ui.horizontal_wrapped(|ui| {
                    for c in self.explorer.visible_continents() {
                        let active = selected.as_deref() == Some(c.code.as_str());
                        if ui.selectable_label(active, &c.name).clicked() {
                            clicked = Some(c.code.clone());
                        }
                    }
                });
                if let Some(code) = clicked {
                    self.on_continent_click(&code);
                }

                ui.add_space(10.0);

                if self.explorer.is_loading() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                    return;
                }

                if let Some(msg) = self.explorer.error_message() {
                    ui.colored_label(egui::Color32::RED, msg);
                }

                let Some(continent) = self.explorer.selected_continent().cloned() else {
                    return;
                };

                let summary = ContinentSummary::new(&continent, self.explorer.countries());
                ui.group(|ui| {
                    ui.heading(&continent.name);
                    for line in stats_lines(&summary, &continent, &self.locale) {
                        ui.label(line);
                    }
                });

                if self.explorer.error_message().is_some() {
                    return;
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label(countries_heading(&summary));
                    if ui.button("Export...").clicked() {
                        self.export();
                    }
                });
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }

                ui.horizontal_wrapped(|ui| {
                    for entry in self.explorer.countries() {
                        Self::country_card(ui, entry);
                    }
                });
            });
        });
    }
}
