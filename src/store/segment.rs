use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::store::error::InputError;
use crate::store::scheme::LabelScheme;
use crate::store::signal::Signal;
use crate::store::table::LabelTable;

/// Owns the loaded signal and its label table, and keeps the table's on-disk
/// copy synchronized on every mutation.
pub struct SegmentStore {
    signal: Signal,
    table: LabelTable,
    table_path: PathBuf,
    scheme: &'static LabelScheme,
    activity: (i64, &'static str),
    electrode: &'static str,
    sampling_rate: usize,
    segment_length: usize,
}

impl SegmentStore {
    /// Read the signal file, then either reload the persisted label table or
    /// create (and immediately write) a fresh one.
    ///
    /// The derived table path doubles as the cache key: if the file exists it
    /// is loaded verbatim, with no revalidation against the current signal or
    /// parameters.
    pub fn open(
        input: &Path,
        sampling_rate: usize,
        segment_length: usize,
        scheme: &'static LabelScheme,
    ) -> Result<Self, InputError> {
        let signal = Signal::from_file(input)?;
        info!(
            "loaded {} samples spanning {:.1} s from {}",
            signal.len(),
            signal.timestamp_span(),
            input.display()
        );

        let file_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let stem = file_name.split('.').next().unwrap_or_default();
        let activity = scheme.activity_for(file_name);
        let electrode = electrode_label(file_name);

        let labels_dir = labels_dir(input);
        let table_path =
            labels_dir.join(scheme.table_file_name(stem, sampling_rate, segment_length));

        let table = if table_path.exists() {
            info!("reloading label table {}", table_path.display());
            LabelTable::load(&table_path)?
        } else {
            fs::create_dir_all(&labels_dir)?;
            let table = LabelTable::build(
                signal.len(),
                sampling_rate * segment_length,
                activity.0,
                scheme.default_artifact(activity.0),
            );
            table.save(&table_path)?;
            info!(
                "created label table {} ({} segments)",
                table_path.display(),
                table.len()
            );
            table
        };

        Ok(Self {
            signal,
            table,
            table_path,
            scheme,
            activity,
            electrode,
            sampling_rate,
            segment_length,
        })
    }

    pub fn signal(&self) -> &Signal {
        &self.signal
    }

    pub fn scheme(&self) -> &'static LabelScheme {
        self.scheme
    }

    pub fn label_table_path(&self) -> &Path {
        &self.table_path
    }

    pub fn table(&self) -> &LabelTable {
        &self.table
    }

    pub fn sampling_rate(&self) -> usize {
        self.sampling_rate
    }

    /// Segment length in seconds.
    pub fn segment_length(&self) -> usize {
        self.segment_length
    }

    /// Samples per segment.
    pub fn segment_points(&self) -> usize {
        self.sampling_rate * self.segment_length
    }

    /// Number of full segments in the signal, independent of the (possibly
    /// stale) persisted table.
    pub fn segment_count(&self) -> usize {
        let points = self.segment_points();
        if points == 0 {
            0
        } else {
            self.signal.len() / points
        }
    }

    /// Activity (code, display label) derived from the input file name.
    pub fn activity(&self) -> (i64, &'static str) {
        self.activity
    }

    /// Electrode display label derived from the input file name.
    pub fn electrode(&self) -> &'static str {
        self.electrode
    }

    /// Stored artifact label for a segment. Under a write-through-on-read
    /// scheme an unset cell is first set to 0 and flushed, so this read can
    /// have a write side effect.
    pub fn get_artifact_label(&mut self, segment: usize) -> Option<i64> {
        match self.table.artifact(segment) {
            Some(label) => Some(label),
            None if self.scheme.write_through_on_read => {
                self.set_artifact_label(segment, 0);
                Some(0)
            }
            None => None,
        }
    }

    /// Update one cell and rewrite the whole label file. A failed write is
    /// reported as a warning; the in-memory table stays authoritative for the
    /// rest of the session.
    pub fn set_artifact_label(&mut self, segment: usize, label: i64) {
        self.table.set_artifact(segment, label);
        if let Err(err) = self.table.save(&self.table_path) {
            warn!(
                "failed to write label file {}: {err}",
                self.table_path.display()
            );
        }
    }
}

/// Labels live in a `labels/` directory next to the input file.
fn labels_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join("labels")
}

/// Electrode material, encoded in the second `_`-separated token of the file
/// name.
pub fn electrode_label(file_name: &str) -> &'static str {
    let token = file_name.split('_').nth(1).unwrap_or_default();
    if token.contains("01") {
        "Ag/AgCl"
    } else if token.contains("02") {
        "Chrome Nickel"
    } else if token.contains("03") {
        "Textile"
    } else {
        "Unknown"
    }
}
