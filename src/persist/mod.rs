//! Saving and loading a pole/zero plot as CSV.
//!
//! The layout is a `Type,Real,Imaginary` header followed by one row per
//! zero and then one row per pole:
//!
//! ```text
//! Type,Real,Imaginary
//! Zero,0.5,0.5
//! Zero,0.5,-0.5
//! Pole,0.9,0.0
//! ```
//!
//! Rows are terminated with CRLF. When loading, the first row is always
//! skipped as the header, and rows whose first field is neither `Zero` nor
//! `Pole` are ignored. A `Zero` or `Pole` row whose coordinates do not parse
//! fails the whole load, so a partially read plot is never returned.

use crate::plane::{ComplexPoint, FilterState, RootKind};
use log::{debug, info};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

pub const HEADER: [&str; 3] = ["Type", "Real", "Imaginary"];

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("unable to access filter file: {0}")]
    Io(#[from] io::Error),
    #[error("malformed filter file: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {field} value '{value}' is not a number")]
    MalformedRecord {
        line: u64,
        field: &'static str,
        value: String,
    },
}

impl PersistError {
    /// True for errors where the file itself could not be opened, read or
    /// written, as opposed to bad content.
    pub fn is_io(&self) -> bool {
        match self {
            PersistError::Io(_) => true,
            PersistError::Csv(e) => e.is_io_error(),
            PersistError::MalformedRecord { .. } => false,
        }
    }
}

/// Writes `state` as CSV to `writer`.
///
/// # Examples
///
/// ```
/// use zplane::persist::save;
/// use zplane::plane::FilterState;
/// use num::Complex;
///
/// let state = FilterState::new(vec![Complex::new(0.5, -0.5)], vec![Complex::new(0.9, 0.0)]);
/// let mut out = Vec::new();
/// save(&state, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Type,Real,Imaginary\r\nZero,0.5,-0.5\r\nPole,0.9,0.0\r\n"
/// );
/// ```
pub fn save<W: Write>(state: &FilterState, writer: W) -> Result<(), PersistError> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(&HEADER)?;
    for kind in &[RootKind::Zero, RootKind::Pole] {
        for root in state.roots(*kind) {
            let re = format!("{:?}", root.re);
            let im = format!("{:?}", root.im);
            wtr.write_record(&[kind.tag(), re.as_str(), im.as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a plot written by [`save`] (or by anything producing the same
/// layout).
pub fn load<R: Read>(reader: R) -> Result<FilterState, PersistError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut state = FilterState::default();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        if idx == 0 {
            continue;
        }
        let kind = match record.get(0).and_then(RootKind::from_tag) {
            Some(kind) => kind,
            None => {
                debug!("skipping row {:?}", record);
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        let re = parse_field(record.get(1), line, "real")?;
        let im = parse_field(record.get(2), line, "imaginary")?;
        state.roots_mut(kind).push(ComplexPoint::new(re, im));
    }
    Ok(state)
}

fn parse_field(
    field: Option<&str>,
    line: u64,
    name: &'static str,
) -> Result<f64, PersistError> {
    let raw = field.unwrap_or("");
    raw.trim()
        .parse::<f64>()
        .map_err(|_| PersistError::MalformedRecord {
            line,
            field: name,
            value: raw.to_string(),
        })
}

/// Saves `state` to the file at `path`, replacing it.
pub fn save_file<P: AsRef<Path>>(state: &FilterState, path: P) -> Result<(), PersistError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    save(state, file)?;
    info!("filter data saved to {}", path.display());
    Ok(())
}

/// Loads a plot from the file at `path`.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FilterState, PersistError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let state = load(io::BufReader::new(file))?;
    info!(
        "filter data loaded from {}: {} zeros, {} poles",
        path.display(),
        state.zeros.len(),
        state.poles.len()
    );
    Ok(state)
}

#[cfg(test)]
mod test {
    use crate::persist::*;
    use num::Complex;
    use rand::{thread_rng, Rng};

    #[test]
    fn test_load_reference_layout() {
        let data = "Type,Real,Imaginary\nZero,0.5,0.5\nZero,0.5,-0.5\nPole,0.9,0.0\n";
        let state = load(data.as_bytes()).unwrap();
        assert_eq!(state.zeros, vec![Complex::new(0.5, 0.5), Complex::new(0.5, -0.5)]);
        assert_eq!(state.poles, vec![Complex::new(0.9, 0.0)]);
    }

    #[test]
    fn test_unknown_rows_are_ignored() {
        let data = "Type,Real,Imaginary\nComment,x,y\nzero,1,1\n\nPole, 0.25 ,-0.1\n";
        let state = load(data.as_bytes()).unwrap();
        assert!(state.zeros.is_empty());
        assert_eq!(state.poles, vec![Complex::new(0.25, -0.1)]);
    }

    #[test]
    fn test_header_is_always_skipped() {
        let data = "Zero,1,1\nZero,0.5,0\n";
        let state = load(data.as_bytes()).unwrap();
        assert_eq!(state.zeros, vec![Complex::new(0.5, 0.0)]);
    }

    #[test]
    fn test_malformed_number_fails_load() {
        let data = "Type,Real,Imaginary\nZero,0.5,0.5\nPole,abc,0.0\n";
        match load(data.as_bytes()) {
            Err(PersistError::MalformedRecord { line, field, value }) => {
                assert_eq!(line, 3);
                assert_eq!(field, "real");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_fails_load() {
        let data = "Type,Real,Imaginary\nZero,0.5\n";
        match load(data.as_bytes()) {
            Err(PersistError::MalformedRecord { field, .. }) => assert_eq!(field, "imaginary"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_round_trip() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let mut state = FilterState::default();
            for _ in 0..rng.gen_range(0, 8) {
                state.zeros.push(Complex::new(rng.gen_range(-1.2, 1.2), rng.gen_range(-1.2, 1.2)));
            }
            for _ in 0..rng.gen_range(0, 8) {
                state.poles.push(Complex::new(rng.gen_range(-1.2, 1.2), rng.gen_range(-1.2, 1.2)));
            }
            let mut buf = Vec::new();
            save(&state, &mut buf).unwrap();
            assert_eq!(load(&buf[..]).unwrap(), state);
        }
    }

    #[test]
    fn test_missing_file_is_io() {
        let err = load_file("/nonexistent/zplane/filter.csv").unwrap_err();
        assert!(err.is_io());
    }
}
