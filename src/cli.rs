// src/cli.rs
use std::path::PathBuf;
use std::process;

use crate::store::LabelScheme;

const USAGE: &str = "\
ecglabel [-l segment_length] [-f sampling_rate] [-s starting_segment] [--scheme name] input_file
      - input_file (str)       - input signal file, two `;`-separated columns [timestamp, value]
      - segment_length (int)   - length of a single segment in seconds, defaults to 5 seconds
      - sampling_rate (int)    - sampling frequency of the input file, defaults to 500 frames per second
      - starting_segment (int) - segment number to display, defaults to the first segment
      - scheme (str)           - label scheme, `binary` (OK/Artefact) or `categories`, defaults to binary";

pub struct Args {
    pub input: PathBuf,
    pub segment_length: usize,
    pub sampling_rate: usize,
    pub starting_segment: usize,
    pub scheme: &'static LabelScheme,
}

struct UsageError;

/// Parse the command line, or print the usage block and exit with status 1.
/// `--help` takes the same path, as do malformed numeric arguments.
pub fn parse(args: impl Iterator<Item = String>) -> Args {
    match try_parse(args) {
        Ok(parsed) => parsed,
        Err(UsageError) => {
            println!("\n{USAGE}");
            process::exit(1);
        }
    }
}

fn try_parse(mut args: impl Iterator<Item = String>) -> Result<Args, UsageError> {
    let mut segment_length = 5;
    let mut sampling_rate = 500;
    let mut starting_segment = 0;
    let mut scheme = LabelScheme::binary();
    let mut input = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(UsageError),
            "-l" | "--segment-length" => segment_length = numeric(args.next())?,
            "-f" | "--sampling-rate" => sampling_rate = numeric(args.next())?,
            "-s" | "--starting-segment" => starting_segment = numeric(args.next())?,
            "--scheme" => {
                scheme = args
                    .next()
                    .and_then(|name| LabelScheme::by_name(&name))
                    .ok_or(UsageError)?;
            }
            flag if flag.starts_with('-') => return Err(UsageError),
            positional => {
                // First positional wins, extras are ignored.
                if input.is_none() {
                    input = Some(PathBuf::from(positional));
                }
            }
        }
    }

    Ok(Args {
        input: input.ok_or(UsageError)?,
        segment_length,
        sampling_rate,
        starting_segment,
        scheme,
    })
}

fn numeric(arg: Option<String>) -> Result<usize, UsageError> {
    arg.and_then(|a| a.parse::<usize>().ok()).ok_or(UsageError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_parse_strs(args: &[&str]) -> Result<Args, UsageError> {
        try_parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_apply_without_flags() {
        let args = try_parse_strs(&["p01_01_klud.csv"]).ok().unwrap();
        assert_eq!(args.input, PathBuf::from("p01_01_klud.csv"));
        assert_eq!(args.segment_length, 5);
        assert_eq!(args.sampling_rate, 500);
        assert_eq!(args.starting_segment, 0);
        assert_eq!(args.scheme.name, "binary");
    }

    #[test]
    fn flags_override_defaults() {
        let args = try_parse_strs(&[
            "-l", "10", "-f", "250", "-s", "3", "--scheme", "categories", "rec.csv",
        ])
        .ok()
        .unwrap();
        assert_eq!(args.segment_length, 10);
        assert_eq!(args.sampling_rate, 250);
        assert_eq!(args.starting_segment, 3);
        assert_eq!(args.scheme.name, "categories");
    }

    #[test]
    fn missing_input_is_usage_error() {
        assert!(try_parse_strs(&[]).is_err());
        assert!(try_parse_strs(&["-l", "10"]).is_err());
    }

    #[test]
    fn malformed_numeric_is_usage_error() {
        assert!(try_parse_strs(&["-l", "ten", "rec.csv"]).is_err());
        assert!(try_parse_strs(&["-f", "-500", "rec.csv"]).is_err());
        assert!(try_parse_strs(&["-s"]).is_err());
    }

    #[test]
    fn unknown_flag_and_scheme_are_usage_errors() {
        assert!(try_parse_strs(&["--verbose", "rec.csv"]).is_err());
        assert!(try_parse_strs(&["--scheme", "ternary", "rec.csv"]).is_err());
    }

    #[test]
    fn help_takes_the_usage_path() {
        assert!(try_parse_strs(&["-h"]).is_err());
        assert!(try_parse_strs(&["--help", "rec.csv"]).is_err());
    }
}
