use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{CATEGORY_FILTERS, RANGE_FILTERS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter the data");
    ui.separator();

    // Arc clone so the dataset stays readable while the state is mutated.
    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Multi-selects ----
            for col in CATEGORY_FILTERS {
                let Some(all_values) = dataset.unique_values.get(col) else {
                    continue;
                };

                let n_selected = state
                    .criteria
                    .categories
                    .get(col)
                    .map_or(0, |s| s.len());
                let header_text = format!("{col}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(col);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(col);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .criteria
                                .categories
                                .get(col)
                                .is_some_and(|s| s.contains(val));
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(col, val);
                            }
                        }
                    });
            }

            ui.separator();

            // ---- Range sliders ----
            for col in RANGE_FILTERS {
                let Some((lo, hi)) = dataset.numeric_bounds(col) else {
                    continue;
                };
                let current = state.criteria.ranges.get(col).copied();
                let (mut min, mut max) = current.map_or((lo, hi), |r| (r.min, r.max));

                ui.strong(format!("{col} range"));
                let changed_min = ui
                    .add(egui::Slider::new(&mut min, lo..=hi).step_by(1.0).text("min"))
                    .changed();
                let changed_max = ui
                    .add(egui::Slider::new(&mut max, lo..=hi).step_by(1.0).text("max"))
                    .changed();
                if changed_min || changed_max {
                    state.set_range(col, min, max);
                }
                ui.add_space(6.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dataset.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(view)) = (&state.dataset, &state.view) {
            ui.label(format!(
                "{} employees loaded, {} match the filters",
                ds.len(),
                view.row_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee data")
        .add_filter("Supported files", &["csv", "parquet", "pq", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let target = rfd::FileDialog::new()
        .set_title("Export filtered data")
        .set_file_name(state.export_file_name())
        .add_filter("CSV", &["csv"])
        .save_file();

    let Some(path) = target else {
        return;
    };
    match state.export_to(&path) {
        Ok(()) => state.status_message = None,
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}
