// src/gui.rs
use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use crate::store::{SegmentStore, ViewerState};

/// Fixed padding added above and below the global signal min/max.
const Y_MARGIN: f64 = 1000.0;

pub struct LabelerApp {
    store: SegmentStore,
    viewer: ViewerState,
}

impl LabelerApp {
    pub fn new(mut store: SegmentStore, starting_segment: usize) -> Self {
        let mut viewer = ViewerState::new(starting_segment, store.segment_count());
        let stored = store.get_artifact_label(starting_segment);
        viewer.refresh(stored, store.scheme());
        Self { store, viewer }
    }

    /// Refresh the selector from the stored label after the cursor moved.
    fn enter_segment(&mut self) {
        let stored = self.store.get_artifact_label(self.viewer.current());
        self.viewer.refresh(stored, self.store.scheme());
    }

    fn commit(&mut self, label: i64) {
        self.store.set_artifact_label(self.viewer.current(), label);
        self.viewer.selected = Some(label);
    }

    // Right/Left navigate, Space cycles the selector, Enter commits it.
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) && self.viewer.next() {
            self.enter_segment();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) && self.viewer.prev() {
            self.enter_segment();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.viewer.toggle(self.store.scheme());
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            if let Some(label) = self.viewer.selected {
                self.commit(label);
            }
        }
    }

    fn segment_plot(&self, ui: &mut egui::Ui) {
        let segment = self.viewer.current();
        let points_per_segment = self.store.segment_points();
        let rate = self.store.sampling_rate() as f64;
        let samples = self.store.signal().samples();

        let start = segment * points_per_segment;
        let end = (start + points_per_segment).min(samples.len());
        let start = start.min(end);

        let points = PlotPoints::from_iter(
            samples[start..end]
                .iter()
                .enumerate()
                .map(|(k, s)| [(start + k) as f64 / rate, s.value]),
        );

        let x_min = (segment * self.store.segment_length()) as f64;
        let x_max = x_min + self.store.segment_length() as f64;
        let (y_min, y_max) = self.store.signal().value_bounds();

        Plot::new(format!("ecg-segment-{segment}"))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .include_x(x_min)
            .include_x(x_max)
            .include_y(y_min - Y_MARGIN)
            .include_y(y_max + Y_MARGIN)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(egui::Color32::RED).width(0.8));
            });
    }
}

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        let scheme = self.store.scheme();
        let (_, activity_label) = self.store.activity();
        let electrode_label = self.store.electrode();

        egui::SidePanel::right("controls")
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("ACTIVITY TYPE");
                ui.label(activity_label);
                ui.separator();
                ui.label("ELECTRODE TYPE");
                ui.label(electrode_label);
                ui.separator();
                ui.label("CATEGORY");
                for category in scheme.categories {
                    let checked = self.viewer.selected == Some(category.code);
                    if ui.radio(checked, category.label).clicked() {
                        self.commit(category.code);
                    }
                }
            });

        egui::TopBottomPanel::bottom("navigation").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("PREVIOUS").clicked() && self.viewer.prev() {
                    self.enter_segment();
                }
                if ui.button("NEXT").clicked() && self.viewer.next() {
                    self.enter_segment();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!(
                "ECG    SEGMENT {}/{}",
                self.viewer.current() + 1,
                self.viewer.count()
            ));
            self.segment_plot(ui);
        });
    }
}
