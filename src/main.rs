// src/main.rs
mod cli;
mod gui;
mod store;

use std::process::ExitCode;

use anyhow::anyhow;
use eframe::egui;

use crate::store::SegmentStore;

fn main() -> ExitCode {
    env_logger::init();
    let args = cli::parse(std::env::args().skip(1));

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
    }
}

fn run(args: cli::Args) -> anyhow::Result<()> {
    let store = SegmentStore::open(
        &args.input,
        args.sampling_rate,
        args.segment_length,
        args.scheme,
    )?;

    let title = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ecglabel".to_owned());
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1100.0, 620.0])
        .with_min_inner_size([800.0, 480.0])
        .with_title(title);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app = gui::LabelerApp::new(store, args.starting_segment);
    eframe::run_native(
        "ecglabel",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("{err}"))
}
