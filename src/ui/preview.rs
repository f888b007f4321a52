//! Live preview of the rendered paper

use eframe::egui::{self, Color32, RichText};

use crate::app::TrabalhosApp;
use crate::export::render::{RenderedDocument, INDEX_HEADING};

const MUTED: Color32 = Color32::from_rgb(107, 114, 128);

/// Preview panel mirroring the print layout
pub struct PreviewPanel;

impl PreviewPanel {
    /// Show the preview panel
    pub fn show(ui: &mut egui::Ui, app: &mut TrabalhosApp) {
        let rendered = app.session.render();
        let logo_uri = app
            .config
            .export
            .logo_path
            .as_ref()
            .filter(|_| app.print_settings.logo.is_some())
            .map(|path| format!("file://{}", path.display()));

        egui::ScrollArea::vertical()
            .id_salt("preview_scroll")
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                Self::show_header(ui, &rendered, logo_uri);
                ui.separator();
                Self::show_body(ui, &rendered);

                ui.add_space(18.0);
                ui.label(
                    RichText::new("Sugestão: ao imprimir escolha «Salvar como PDF» e formato A4.")
                        .small()
                        .color(MUTED),
                );
            });
    }

    fn show_header(ui: &mut egui::Ui, rendered: &RenderedDocument, logo_uri: Option<String>) {
        ui.vertical_centered(|ui| {
            if let Some(uri) = logo_uri {
                ui.add(egui::Image::new(uri).max_size(egui::vec2(60.0, 60.0)));
            }
            ui.add_space(8.0);
            ui.label(RichText::new(&rendered.header.title).size(22.0).strong());
            if !rendered.header.byline.is_empty() {
                ui.label(RichText::new(&rendered.header.byline).color(MUTED));
            }
            ui.add_space(6.0);
            ui.label(RichText::new(&rendered.header.date).color(MUTED));
        });
        ui.add_space(12.0);
    }

    fn show_body(ui: &mut egui::Ui, rendered: &RenderedDocument) {
        ui.add_space(10.0);
        ui.label(RichText::new(INDEX_HEADING).size(18.0).strong());
        for (i, item) in rendered.index.iter().enumerate() {
            ui.label(format!("{}. {}", i + 1, item));
        }

        for section in &rendered.sections {
            ui.add_space(12.0);
            ui.label(RichText::new(section.heading).size(18.0).strong());
            for line in section.lines() {
                ui.label(line);
            }
        }
    }
}
