use std::ops::RangeInclusive;

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, PlotUi,
    Points,
};

use crate::analysis::correlation::CorrelationMatrix;
use crate::analysis::crosstab::CrossTab;
use crate::analysis::describe::{ColumnSummary, SplitBoxStats};
use crate::analysis::grouped::{GroupedCounts, Histogram};
use crate::analysis::pivot::PivotTable;
use crate::color::{self, ColorMap};
use crate::data::model::Dataset;
use crate::state::{AppState, Tab};
use crate::view_model::ViewModel;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Central panel: tabs
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, Tab::Macro, "Macro Analysis");
        ui.selectable_value(&mut state.tab, Tab::Micro, "Micro Analysis");
        ui.selectable_value(&mut state.tab, Tab::Data, "Data & Download");
    });
    ui.separator();

    let (Some(dataset), Some(view)) = (state.dataset.as_deref(), state.view.as_ref()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a file to analyse attrition  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .id_salt("tab_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.tab {
            Tab::Macro => macro_tab(ui, view),
            Tab::Micro => micro_tab(ui, view),
            Tab::Data => data_tab(ui, dataset, view),
        });
}

fn macro_tab(ui: &mut Ui, view: &ViewModel) {
    ui.heading("Macro Trends & Overview");

    ui.label("The overall percentage of employees who left the organization.");
    ui.label(RichText::new("Overall Attrition Rate (%)").strong());
    ui.label(RichText::new(format!("{:.2}", view.attrition.rate())).size(32.0).strong());
    ui.separator();

    ui.strong("Attrition Distribution: employees who left vs. stayed");
    outcome_distribution(ui, view);

    for grouped in view.grouped.iter().take(2) {
        ui.strong(format!("Attrition by {}", grouped.column));
        grouped_bars(ui, grouped);
    }

    ui.strong("Attrition by Age Group");
    stacked_histogram(ui, &view.age_histogram);

    for grouped in view.grouped.iter().skip(2).take(4) {
        ui.strong(format!("Attrition by {}", grouped.column));
        grouped_bars(ui, grouped);
    }

    for boxes in view.boxes.iter().take(2) {
        ui.strong(format!("{} by Attrition", boxes.column));
        box_pair(ui, boxes);
    }
}

fn micro_tab(ui: &mut Ui, view: &ViewModel) {
    ui.heading("Micro-Level Insights & Correlations");

    ui.strong("Age vs. Monthly Income");
    scatter(ui, view);

    if let Some(years) = view.boxes.first() {
        ui.strong(format!("{} Distribution by Attrition", years.column));
        box_pair(ui, years);
    }

    for grouped in view.grouped.iter().skip(6) {
        ui.strong(format!("{} Distribution", grouped.column));
        grouped_bars(ui, grouped);
    }

    for boxes in view.boxes.iter().skip(2) {
        ui.strong(format!("{} by Attrition", boxes.column));
        box_pair(ui, boxes);
    }

    ui.strong("Heatmap: Correlation Between Features");
    heatmap(ui, &view.correlation);
    ui.separator();

    ui.strong("Cross Tab: Attrition vs Marital Status");
    crosstab_table(ui, &view.marital_crosstab);
    ui.separator();

    ui.strong("Pivot Table: Average Income by Role & Department");
    pivot_table(ui, &view.income_pivot);
}

fn data_tab(ui: &mut Ui, dataset: &Dataset, view: &ViewModel) {
    ui.heading("Explore Data Directly");
    ui.label(format!("{} rows match the applied filters.", view.row_count()));
    raw_table(ui, dataset, &view.indices);
    ui.separator();

    ui.strong("Summary Statistics");
    summary_table(ui, &view.summary);
    ui.separator();

    ui.strong("Column-wise Null Value Count");
    egui::Grid::new("null_counts").striped(true).show(ui, |ui: &mut Ui| {
        for (column, count) in &view.nulls {
            ui.label(column);
            ui.label(count.to_string());
            ui.end_row();
        }
    });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// X-axis formatter naming categories drawn at integer positions.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let rounded = mark.value.round();
        if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        labels.get(rounded as usize).cloned().unwrap_or_default()
    }
}

fn category_plot(id: impl std::hash::Hash, labels: Vec<String>, ui: &mut Ui, add: impl FnOnce(&mut PlotUi)) {
    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_formatter(category_axis(labels))
        .show(ui, add);
}

fn outcome_distribution(ui: &mut Ui, view: &ViewModel) {
    let labels = vec![color::outcome_label(false).to_string(), color::outcome_label(true).to_string()];
    category_plot("attrition_distribution", labels, ui, |plot_ui| {
        for (x, left, count) in [(0.0, false, view.attrition.stayed()), (1.0, true, view.attrition.attrited)] {
            let bar = Bar::new(x, count as f64).width(0.6);
            plot_ui.bar_chart(
                BarChart::new(vec![bar])
                    .name(color::outcome_label(left))
                    .color(color::outcome_color(left)),
            );
        }
    });
}

fn grouped_bars(ui: &mut Ui, grouped: &GroupedCounts) {
    let labels: Vec<String> = grouped.groups.iter().map(|g| g.value.to_string()).collect();
    let series = |left: bool| {
        let bars = grouped
            .groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let offset = if left { 0.2 } else { -0.2 };
                let count = if left { g.left } else { g.stayed };
                Bar::new(i as f64 + offset, count as f64)
                    .width(0.4)
                    .name(g.value.to_string())
            })
            .collect();
        BarChart::new(bars)
            .name(color::outcome_label(left))
            .color(color::outcome_color(left))
    };

    category_plot(format!("grouped_{}", grouped.column), labels, ui, |plot_ui| {
        plot_ui.bar_chart(series(false));
        plot_ui.bar_chart(series(true));
    });
}

fn stacked_histogram(ui: &mut Ui, hist: &Histogram) {
    let width = hist.bin_width();
    let bars = |counts: &[usize]| -> Vec<Bar> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &n)| Bar::new(hist.bin_center(i), n as f64).width(width))
            .collect()
    };
    let stayed = BarChart::new(bars(hist.stayed.as_slice()))
        .name(color::outcome_label(false))
        .color(color::outcome_color(false));
    let left = BarChart::new(bars(hist.left.as_slice()))
        .name(color::outcome_label(true))
        .color(color::outcome_color(true))
        .stack_on(&[&stayed]);

    Plot::new(format!("histogram_{}", hist.column))
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .x_axis_label(hist.column.clone())
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(stayed);
            plot_ui.bar_chart(left);
        });
}

fn box_pair(ui: &mut Ui, boxes: &SplitBoxStats) {
    let labels = vec![color::outcome_label(false).to_string(), color::outcome_label(true).to_string()];
    category_plot(format!("box_{}", boxes.column), labels, ui, |plot_ui| {
        for (x, left, stats) in [(0.0, false, boxes.stayed), (1.0, true, boxes.left)] {
            let Some(s) = stats else {
                continue;
            };
            let elem = BoxElem::new(
                x,
                BoxSpread::new(s.lower_whisker, s.q1, s.median, s.q3, s.upper_whisker),
            )
            .name(format!("n = {}", s.count))
            .box_width(0.5);
            plot_ui.box_plot(
                BoxPlot::new(vec![elem])
                    .name(color::outcome_label(left))
                    .color(color::outcome_color(left)),
            );
        }
    });
}

fn scatter(ui: &mut Ui, view: &ViewModel) {
    let series = [
        (false, &view.scatter.stayed, view.scatter.stayed_trend),
        (true, &view.scatter.left, view.scatter.left_trend),
    ];
    let x_bounds = series
        .iter()
        .flat_map(|(_, pts, _)| pts.iter().map(|p| p[0]))
        .fold(None, |acc: Option<(f64, f64)>, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        });

    Plot::new("age_income_scatter")
        .legend(Legend::default())
        .height(CHART_HEIGHT * 1.5)
        .allow_scroll(false)
        .x_axis_label("Age")
        .y_axis_label("MonthlyIncome")
        .show(ui, |plot_ui| {
            for (left, points, trend) in series {
                let c = color::outcome_color(left);
                plot_ui.points(
                    Points::new(PlotPoints::from(points.clone()))
                        .radius(2.5)
                        .color(c)
                        .name(color::outcome_label(left)),
                );
                if let (Some(fit), Some((lo, hi))) = (trend, x_bounds) {
                    let ends = vec![[lo, fit.at(lo)], [hi, fit.at(hi)]];
                    plot_ui.line(Line::new(PlotPoints::from(ends)).color(c).width(2.0));
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "–".to_string(), |v| format!("{v:.2}"))
}

fn heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    ScrollArea::horizontal().id_salt("heatmap_scroll").show(ui, |ui: &mut Ui| {
        egui::Grid::new("correlation_heatmap").show(ui, |ui: &mut Ui| {
            ui.label("");
            for c in &matrix.columns {
                ui.label(RichText::new(c).small());
            }
            ui.end_row();
            for (name, row) in matrix.columns.iter().zip(&matrix.values) {
                ui.label(RichText::new(name).small());
                for &r in row {
                    let text = if r.is_nan() { "–".to_string() } else { format!("{r:.2}") };
                    ui.label(
                        RichText::new(text)
                            .monospace()
                            .color(egui::Color32::BLACK)
                            .background_color(color::diverging(r)),
                    );
                }
                ui.end_row();
            }
        });
    });
}

fn crosstab_table(ui: &mut Ui, tab: &CrossTab) {
    if tab.rows.is_empty() {
        ui.label("No rows match the filters.");
        return;
    }
    let colors = ColorMap::new(&tab.categories);
    egui::Grid::new("crosstab").striped(true).show(ui, |ui: &mut Ui| {
        ui.strong("Attrition");
        for c in &tab.categories {
            ui.label(RichText::new(c.to_string()).strong().color(colors.color_for(c)));
        }
        ui.end_row();
        for row in &tab.rows {
            ui.label(RichText::new(color::outcome_label(row.left)).color(color::outcome_color(row.left)));
            for share in &row.shares {
                ui.label(format!("{share:.3}"));
            }
            ui.end_row();
        }
    });
}

fn pivot_table(ui: &mut Ui, pivot: &PivotTable) {
    if pivot.is_empty() {
        ui.label("No rows match the filters.");
        return;
    }
    ScrollArea::horizontal().id_salt("pivot_scroll").show(ui, |ui: &mut Ui| {
        egui::Grid::new("pivot").striped(true).show(ui, |ui: &mut Ui| {
            ui.strong(format!("{} \\ {}", pivot.index, pivot.columns));
            for c in &pivot.column_labels {
                ui.strong(c.to_string());
            }
            ui.end_row();
            for (label, row) in pivot.row_labels.iter().zip(&pivot.cells) {
                ui.label(label.to_string());
                for cell in row {
                    ui.label(fmt_opt(*cell));
                }
                ui.end_row();
            }
        });
    });
}

fn summary_table(ui: &mut Ui, summary: &[ColumnSummary]) {
    ScrollArea::horizontal().id_salt("summary_scroll").show(ui, |ui: &mut Ui| {
        egui::Grid::new("summary").striped(true).show(ui, |ui: &mut Ui| {
            for head in ["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
                ui.strong(head);
            }
            ui.end_row();
            for s in summary {
                ui.label(&s.column);
                ui.label(s.count.to_string());
                for v in [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
                    ui.label(fmt_opt(v));
                }
                ui.end_row();
            }
        });
    });
}

fn raw_table(ui: &mut Ui, dataset: &Dataset, indices: &[usize]) {
    ScrollArea::horizontal().id_salt("raw_scroll").show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(360.0)
            .columns(Column::auto().at_least(70.0), dataset.columns.len())
            .header(20.0, |mut header| {
                for name in &dataset.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, indices.len(), |mut row| {
                    let record = &dataset.records[indices[row.index()]];
                    for cell in &record.cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell.to_field());
                        });
                    }
                });
            });
    });
}
