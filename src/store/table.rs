use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::store::error::InputError;

const HEADER: &str = "start;end;activity;artifact";

/// One persisted row: a half-open sample range plus its annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelRow {
    pub start: usize,
    pub end: usize,
    pub activity: i64,
    pub artifact: Option<i64>,
}

/// The per-segment label table, mirrored one-to-one by the label file.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTable {
    rows: Vec<LabelRow>,
}

impl LabelTable {
    /// Fixed-size windowing of the sample index. Boundaries are an arithmetic
    /// progression with step `segment_points`; a trailing partial window is
    /// dropped.
    pub fn build(
        data_size: usize,
        segment_points: usize,
        activity: i64,
        default_artifact: Option<i64>,
    ) -> Self {
        let count = if segment_points == 0 {
            0
        } else {
            data_size / segment_points
        };
        let rows = (0..count)
            .map(|i| {
                let start = i * segment_points;
                LabelRow {
                    start,
                    end: start + segment_points,
                    activity,
                    artifact: default_artifact,
                }
            })
            .collect();
        Self { rows }
    }

    /// Load a persisted table verbatim. The contents are trusted as-is; no
    /// reconciliation against the current signal happens here.
    pub fn load(path: &Path) -> Result<Self, InputError> {
        let contents = fs::read_to_string(path)?;
        let mut rows = Vec::new();
        for line in contents.lines().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            rows.push(parse_row(line)?);
        }
        Ok(Self { rows })
    }

    /// Serialize the whole table, header included, overwriting the file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut out = String::with_capacity(self.rows.len() * 24 + HEADER.len() + 1);
        out.push_str(HEADER);
        out.push('\n');
        for row in &self.rows {
            let _ = write!(out, "{};{};{};", row.start, row.end, row.activity);
            if let Some(artifact) = row.artifact {
                let _ = write!(out, "{artifact}");
            }
            out.push('\n');
        }
        fs::write(path, out)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[LabelRow] {
        &self.rows
    }

    pub fn artifact(&self, segment: usize) -> Option<i64> {
        self.rows.get(segment).and_then(|row| row.artifact)
    }

    pub fn set_artifact(&mut self, segment: usize, label: i64) {
        if let Some(row) = self.rows.get_mut(segment) {
            row.artifact = Some(label);
        }
    }
}

fn parse_row(line: &str) -> Result<LabelRow, InputError> {
    let mut fields = line.split(';');
    let start = parse_usize(fields.next())?;
    let end = parse_usize(fields.next())?;
    let activity = parse_i64(fields.next())?;
    let artifact = match fields.next() {
        None => return Err(InputError::Parse),
        Some(f) if f.trim().is_empty() => None,
        Some(f) => Some(f.trim().parse::<i64>().map_err(|_| InputError::Parse)?),
    };
    Ok(LabelRow {
        start,
        end,
        activity,
        artifact,
    })
}

fn parse_usize(field: Option<&str>) -> Result<usize, InputError> {
    field
        .and_then(|f| f.trim().parse::<usize>().ok())
        .ok_or(InputError::Parse)
}

fn parse_i64(field: Option<&str>) -> Result<i64, InputError> {
    field
        .and_then(|f| f.trim().parse::<i64>().ok())
        .ok_or(InputError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windowing_drops_partial_tail() {
        // 5000 samples at 500 Hz with 5 s segments: exactly two windows.
        let table = LabelTable::build(5000, 2500, 2, Some(1));
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].start, 0);
        assert_eq!(table.rows()[0].end, 2500);
        assert_eq!(table.rows()[1].start, 2500);
        assert_eq!(table.rows()[1].end, 5000);

        // 5001 samples still yields two windows; the tail is dropped.
        assert_eq!(LabelTable::build(5001, 2500, 2, None).len(), 2);
        assert_eq!(LabelTable::build(2499, 2500, 2, None).len(), 0);
    }

    #[test]
    fn boundaries_are_arithmetic_progression() {
        let table = LabelTable::build(10_000, 1000, 0, Some(0));
        for (i, row) in table.rows().iter().enumerate() {
            assert_eq!(row.start, i * 1000);
            assert_eq!(row.end, (i + 1) * 1000);
        }
    }

    #[test]
    fn default_artifact_applies_to_every_row() {
        let filled = LabelTable::build(5000, 1000, 3, Some(1));
        assert!(filled.rows().iter().all(|r| r.artifact == Some(1)));

        let unset = LabelTable::build(5000, 1000, 3, None);
        assert!(unset.rows().iter().all(|r| r.artifact.is_none()));
    }

    #[test]
    fn save_and_load_preserve_unset_cells() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("labels.csv");

        let mut table = LabelTable::build(7500, 2500, 2, None);
        table.set_artifact(1, 3);
        table.save(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "start;end;activity;artifact\n0;2500;2;\n2500;5000;2;3\n5000;7500;2;\n"
        );
        assert_eq!(LabelTable::load(&path).unwrap(), table);
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("labels.csv");
        fs::write(&path, "start;end;activity;artifact\n0;2500;two;\n").unwrap();
        assert!(matches!(LabelTable::load(&path), Err(InputError::Parse)));
    }

    #[test]
    fn set_out_of_range_is_ignored() {
        let mut table = LabelTable::build(5000, 2500, 0, Some(0));
        table.set_artifact(9, 1);
        assert_eq!(table.artifact(9), None);
    }
}
