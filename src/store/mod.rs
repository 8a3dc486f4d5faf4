// src/store/mod.rs
pub mod error;
pub mod scheme;
pub mod segment;
pub mod signal;
pub mod table;
pub mod viewer;

pub use error::InputError;
pub use scheme::{ActivityKeyword, Category, DefaultFill, LabelScheme, SelectorRule};
pub use segment::{electrode_label, SegmentStore};
pub use signal::{Sample, Signal};
pub use table::{LabelRow, LabelTable};
pub use viewer::ViewerState;
