use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::store::error::InputError;

/// One raw sample as read from the input file.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub timestamp: f64,
    pub value: f64,
}

/// Immutable in-memory copy of one recording.
///
/// Samples are indexed by position only; timestamps are carried along but
/// never used for segment arithmetic.
#[derive(Debug)]
pub struct Signal {
    samples: Vec<Sample>,
    value_bounds: (f64, f64),
}

impl Signal {
    /// Read a headerless two-column `;`-separated file.
    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => InputError::NotFound,
            _ => InputError::Io(err),
        })?;
        let reader = BufReader::new(file);

        let mut samples = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split(';');
            let timestamp = parse_field(fields.next())?;
            let value = parse_field(fields.next())?;
            if fields.next().is_some() {
                return Err(InputError::Parse);
            }
            samples.push(Sample { timestamp, value });
        }

        if samples.is_empty() {
            return Err(InputError::Empty);
        }

        let value_bounds = samples.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), s| (lo.min(s.value), hi.max(s.value)),
        );
        Ok(Self {
            samples,
            value_bounds,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Global (min, max) of the value column, computed once at load.
    pub fn value_bounds(&self) -> (f64, f64) {
        self.value_bounds
    }

    /// Recording span according to the timestamp column. Informational only;
    /// segment arithmetic uses the externally supplied sampling rate.
    pub fn timestamp_span(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => 0.0,
        }
    }
}

fn parse_field(field: Option<&str>) -> Result<f64, InputError> {
    field
        .and_then(|f| f.trim().parse::<f64>().ok())
        .ok_or(InputError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_signal(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write signal");
        file
    }

    #[test]
    fn reads_two_column_file() {
        let file = write_signal("0.000;512\n0.002;-48.5\n0.004;1024\n");
        let signal = Signal::from_file(file.path()).unwrap();
        assert_eq!(signal.len(), 3);
        assert_eq!(signal.samples()[1].value, -48.5);
        assert_eq!(signal.value_bounds(), (-48.5, 1024.0));
        assert!((signal.timestamp_span() - 0.004).abs() < 1e-9);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = Signal::from_file(Path::new("no_such_recording.csv")).unwrap_err();
        assert!(matches!(err, InputError::NotFound));
        assert_eq!(err.to_string(), "File not found.");
    }

    #[test]
    fn malformed_line_is_parse_error() {
        let file = write_signal("0.000;512\nnot a number;1\n");
        assert!(matches!(
            Signal::from_file(file.path()),
            Err(InputError::Parse)
        ));
    }

    #[test]
    fn extra_column_is_parse_error() {
        let file = write_signal("0.000;512;9\n");
        assert!(matches!(
            Signal::from_file(file.path()),
            Err(InputError::Parse)
        ));
    }

    #[test]
    fn blank_file_is_empty() {
        let file = write_signal("\n\n");
        assert!(matches!(
            Signal::from_file(file.path()),
            Err(InputError::Empty)
        ));
    }
}
