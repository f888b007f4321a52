//! Main application state and UI coordination

use eframe::egui;

use crate::core::{
    config::AppConfig,
    document::Theme,
    session::EditorSession,
    store::FileStorage,
};
use crate::export::{
    logo::load_logo,
    print::{BrowserPrintSurface, PrintSettings},
};
use crate::ui::{editor::EditorPanel, preview::PreviewPanel};

/// Main application state
pub struct TrabalhosApp {
    /// The document being edited and its storage
    pub session: EditorSession<FileStorage>,
    /// Application configuration
    pub config: AppConfig,
    /// Page layout and logo for exported documents
    pub print_settings: PrintSettings,
    /// Where print exports are opened
    surface: BrowserPrintSurface,
    /// Whether the preview panel is visible
    pub show_preview: bool,
    /// Theme currently applied to the egui visuals
    applied_theme: Option<Theme>,
}

impl TrabalhosApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self::configure_fonts(&cc.egui_ctx, config.editor.font_size);

        let data_dir = config.data_dir();
        tracing::info!("Document storage: {}", data_dir.display());
        let session = EditorSession::open(FileStorage::new(data_dir), config.template.clone());

        let print_settings = PrintSettings {
            margin_mm: config.export.margin_mm,
            logo: load_logo(config.export.logo_path.as_deref()),
        };

        Self {
            session,
            surface: BrowserPrintSurface::new(config.output_dir()),
            print_settings,
            show_preview: config.editor.show_preview,
            applied_theme: None,
            config,
        }
    }

    /// Apply the configured body font size
    fn configure_fonts(ctx: &egui::Context, size: f32) {
        ctx.style_mut(|style| {
            for text_style in [egui::TextStyle::Body, egui::TextStyle::Button] {
                if let Some(font) = style.text_styles.get_mut(&text_style) {
                    font.size = size;
                }
            }
        });
    }

    /// Switch egui visuals when the document theme changes
    fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.session.theme();
        if self.applied_theme == Some(theme) {
            return;
        }
        ctx.set_visuals(match theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        });
        self.applied_theme = Some(theme);
    }

    /// Render, build and send the document to the browser for printing
    pub fn export_to_print(&self) {
        self.session
            .export_to_print(&self.surface, &self.print_settings);
    }

    /// Ask for a destination and write the standalone HTML there
    pub fn export_to_file(&self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("HTML", &["html", "htm"])
            .set_file_name("trabalho.html")
            .save_file()
        else {
            return;
        };

        if let Err(e) = self.session.export_to_file(&path, &self.print_settings) {
            tracing::error!("Failed to export document: {}", e);
        }
    }

    /// Render the top toolbar
    fn render_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.heading("Trabalhos — PDF");
                    ui.weak("Editor rápido ● Guardar ● Gerar PDF");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut theme = self.session.theme();
                    egui::ComboBox::from_id_salt("theme_select")
                        .selected_text(theme.label())
                        .show_ui(ui, |ui| {
                            for option in [Theme::Light, Theme::Dark] {
                                ui.selectable_value(&mut theme, option, option.label());
                            }
                        });
                    if theme != self.session.theme() {
                        self.session.set_theme(theme);
                    }

                    if ui.button("Salvar em PDF").on_hover_text("Ctrl+P").clicked() {
                        self.export_to_print();
                    }
                    if ui
                        .button("Exportar HTML…")
                        .on_hover_text("Ctrl+Shift+S")
                        .clicked()
                    {
                        self.export_to_file();
                    }
                    if ui.button("Repor template").clicked() {
                        self.session.reset_to_template();
                    }
                    ui.toggle_value(&mut self.show_preview, "Pré-visualização");
                });
            });
            ui.add_space(6.0);
        });
    }
}

impl eframe::App for TrabalhosApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        // Handle keyboard shortcuts
        let (print, save_as) = ctx.input(|i| {
            let command = i.modifiers.command;
            (
                command && !i.modifiers.shift && i.key_pressed(egui::Key::P),
                command && i.modifiers.shift && i.key_pressed(egui::Key::S),
            )
        });
        if print {
            self.export_to_print();
        }
        if save_as {
            self.export_to_file();
        }

        self.render_toolbar(ctx);

        if self.show_preview {
            egui::SidePanel::right("preview_panel")
                .resizable(true)
                .default_width(ctx.screen_rect().width() / 2.0)
                .min_width(300.0)
                .show(ctx, |ui| {
                    PreviewPanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            EditorPanel::show(ui, self);
        });

        // Persist whatever the form changed this frame
        self.session.sync();
    }
}
