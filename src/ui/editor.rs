//! Form panel for the paper fields

use eframe::egui;

use crate::app::TrabalhosApp;
use crate::core::document::Field;

/// Form editing every field of the document
pub struct EditorPanel;

impl EditorPanel {
    /// Show the editor panel
    pub fn show(ui: &mut egui::Ui, app: &mut TrabalhosApp) {
        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                Self::single_line(ui, app, Field::Title, "");

                ui.add_space(8.0);
                ui.columns(2, |columns| {
                    Self::single_line(&mut columns[0], app, Field::Author, "Nome do aluno");
                    Self::single_line(&mut columns[1], app, Field::ClassName, "Ex.: 11.º A");
                });

                ui.add_space(8.0);
                Self::single_line(ui, app, Field::DocDate, "");

                for field in Field::ALL.into_iter().filter(|f| f.is_multiline()) {
                    ui.add_space(8.0);
                    Self::multi_line(ui, app, field);
                }
            });
    }

    fn single_line(ui: &mut egui::Ui, app: &mut TrabalhosApp, field: Field, hint: &str) {
        ui.label(field.label());
        ui.add(
            egui::TextEdit::singleline(app.session.field_mut(field))
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        );
    }

    fn multi_line(ui: &mut egui::Ui, app: &mut TrabalhosApp, field: Field) {
        let rows = match field {
            Field::Body => 10,
            _ => 4,
        };
        ui.label(field.label());
        ui.add(
            egui::TextEdit::multiline(app.session.field_mut(field))
                .desired_rows(rows)
                .desired_width(f32::INFINITY),
        );
    }
}
