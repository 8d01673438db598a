//! Comma separated scatter coordinate format
//!
//! The format is line oriented:
//! - lines starting with `#` are comments
//! - every other line holds `x,y,z` and may carry extra trailing fields
//! - empty fields are ignored, so `1,,2,3` reads as three values
//!
//! Reading never fails. Lines that cannot be used are skipped and reported,
//! and a missing file simply produces an empty point cloud.

use crate::error::IoError;
use scattercrate_core::{PointCloud, Point3f};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Prefix marking a comment line
pub const COMMENT_PREFIX: &str = "#";

/// Field separator
pub const DELIMITER: char = ',';

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Result of loading a coordinate source
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Accepted points, in source order
    pub cloud: PointCloud<Point3f>,
    /// Everything that went wrong along the way
    pub warnings: Vec<IoError>,
}

impl LoadReport {
    /// Number of lines that were dropped
    pub fn rejected_lines(&self) -> usize {
        self.warnings.iter().filter(|w| w.drops_line()).count()
    }

    /// Discard the warnings and keep the points
    pub fn into_cloud(self) -> PointCloud<Point3f> {
        self.cloud
    }

    fn warn(&mut self, warning: IoError) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Drop a UTF-8 byte order mark at the start of the text
fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text)
}

/// Parse one coordinate; out-of-range magnitudes fail unless spelled as infinity
fn parse_coordinate(token: &str) -> Option<f32> {
    let value = token.parse::<f32>().ok()?;
    if value.is_infinite() {
        let magnitude = token.trim_start_matches(['+', '-']).to_ascii_lowercase();
        if magnitude != "inf" && magnitude != "infinity" {
            return None;
        }
    }
    Some(value)
}

/// Reader for scatter coordinate files
pub struct ScatterTextReader;

impl ScatterTextReader {
    /// Parse coordinates from in-memory text
    pub fn parse_str(text: &str) -> LoadReport {
        let mut report = LoadReport::default();
        for (index, line) in strip_bom(text).lines().enumerate() {
            Self::accept_line(&mut report, index + 1, line);
        }
        report
    }

    /// Parse coordinates from any buffered reader
    ///
    /// A read error ends the load early; points accepted before it are kept.
    pub fn read_from<R: BufRead>(reader: R) -> LoadReport {
        let mut report = LoadReport::default();
        let mut line_number = 0;

        for line_result in reader.lines() {
            match line_result {
                Ok(line) => {
                    line_number += 1;
                    let line = if line_number == 1 { strip_bom(&line) } else { line.as_str() };
                    Self::accept_line(&mut report, line_number, line);
                }
                Err(source) => {
                    report.warn(IoError::Read { line: line_number, source });
                    break;
                }
            }
        }

        report
    }

    /// Read coordinates from a file
    pub fn read_path<P: AsRef<Path>>(path: P) -> LoadReport {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                let report = Self::read_from(BufReader::new(file));
                log::info!(
                    "Loaded {} points from {} ({} lines rejected)",
                    report.cloud.len(),
                    path.display(),
                    report.rejected_lines()
                );
                report
            }
            Err(source) => {
                let mut report = LoadReport::default();
                report.warn(IoError::SourceUnavailable {
                    path: path.display().to_string(),
                    source,
                });
                report
            }
        }
    }

    fn accept_line(report: &mut LoadReport, line_number: usize, line: &str) {
        if line.starts_with(COMMENT_PREFIX) {
            return;
        }

        let fields: Vec<&str> = line
            .split(DELIMITER)
            .filter(|field| !field.is_empty())
            .collect();

        if fields.len() < 3 {
            report.warn(IoError::MalformedLine {
                line: line_number,
                found: fields.len(),
                content: line.to_string(),
            });
            return;
        }

        let mut coords = [0.0f32; 3];
        for (field, (coord, token)) in coords.iter_mut().zip(&fields).enumerate() {
            let token = token.trim();
            match parse_coordinate(token) {
                Some(value) => *coord = value,
                None => report.warn(IoError::InvalidNumber {
                    line: line_number,
                    field: field + 1,
                    token: token.to_string(),
                }),
            }
        }

        report.cloud.push(Point3f::new(coords[0], coords[1], coords[2]));
    }
}
