//! Tabular outputs: the per-radius series and the circle/scale record.
//!
//! Column names follow the laboratory spreadsheet layout, except that the
//! spread columns are called `*_stddev`: older sheets labelled them
//! "variances" while storing a standard deviation.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use coffee_ring_core::{CalibrationScale, Circle};
use serde::{Deserialize, Deserializer, Serialize};

use crate::sampler::{OutOfBounds, RgbRadialProfile};

/// Errors raised while writing report files.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("failed to create '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV write error for '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("JSON write error for '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to flush '{path}': {source}")]
    Flush {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Empty rings carry NaN statistics, which JSON stores as `null`.
fn f64_or_nan<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(de)?.unwrap_or(f64::NAN))
}

/// One row of the radius series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub radius: u32,
    #[serde(rename = "R_gray_values", deserialize_with = "f64_or_nan")]
    pub r_mean: f64,
    #[serde(rename = "R_stddev", deserialize_with = "f64_or_nan")]
    pub r_stddev: f64,
    #[serde(rename = "G_gray_values", deserialize_with = "f64_or_nan")]
    pub g_mean: f64,
    #[serde(rename = "G_stddev", deserialize_with = "f64_or_nan")]
    pub g_stddev: f64,
    #[serde(rename = "B_gray_values", deserialize_with = "f64_or_nan")]
    pub b_mean: f64,
    #[serde(rename = "B_stddev", deserialize_with = "f64_or_nan")]
    pub b_stddev: f64,
    pub samples: usize,
}

/// Circle and calibration record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleRecord {
    pub center_x: i32,
    pub center_y: i32,
    /// Radius the profile was sampled with.
    pub radius_px: u32,
    /// Radius found by the center locator before any override.
    pub detected_radius_px: u32,
    pub scale_mm_per_px: Option<f64>,
}

impl CircleRecord {
    pub fn new(sampled: &Circle, detected: &Circle, scale: Option<CalibrationScale>) -> Self {
        Self {
            center_x: sampled.center.x,
            center_y: sampled.center.y,
            radius_px: sampled.radius,
            detected_radius_px: detected.radius,
            scale_mm_per_px: scale.map(CalibrationScale::mm_per_px),
        }
    }
}

/// Full report for one image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub file_name: String,
    pub circle: CircleRecord,
    pub rows: Vec<ProfileRow>,
    pub truncated_rings: Vec<OutOfBounds>,
}

/// Flatten the three channel profiles into rows `0..=radius`.
pub fn profile_rows(profile: &RgbRadialProfile) -> Vec<ProfileRow> {
    (0..profile.r.len())
        .map(|i| ProfileRow {
            radius: i as u32,
            r_mean: profile.r.mean[i],
            r_stddev: profile.r.stddev[i],
            g_mean: profile.g.mean[i],
            g_stddev: profile.g.stddev[i],
            b_mean: profile.b.mean[i],
            b_stddev: profile.b.stddev[i],
            samples: profile.r.samples[i],
        })
        .collect()
}

impl ProfileReport {
    pub fn new(file_name: impl Into<String>, circle: CircleRecord, profile: &RgbRadialProfile) -> Self {
        Self {
            file_name: file_name.into(),
            circle,
            rows: profile_rows(profile),
            truncated_rings: profile.truncated_rings(),
        }
    }

    /// File stem used for artifact names (`drop_01.png` -> `drop_01`).
    pub fn stem(&self) -> String {
        Path::new(&self.file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }

    pub fn write_rows_csv<W: Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(out);
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_circle_csv<W: Write>(&self, out: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(out);
        wtr.serialize(self.circle)?;
        wtr.flush()?;
        Ok(())
    }

    /// Pretty JSON into `out`, flushed before returning; `path` labels errors.
    pub fn write_json<W: Write>(&self, mut out: W, path: &Path) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut out, self).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        out.flush().map_err(|source| ReportError::Flush {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write `<stem>_RadialProfile.csv`, `<stem>_circle.csv` and
    /// `<stem>_RadialProfile.json` into `dir`; returns the written paths.
    pub fn save(&self, dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
        fs::create_dir_all(dir).map_err(|source| ReportError::Create {
            path: dir.to_path_buf(),
            source,
        })?;
        let stem = self.stem();

        let rows_path = dir.join(format!("{stem}_RadialProfile.csv"));
        self.write_rows_csv(create(&rows_path)?)
            .map_err(|source| ReportError::Csv {
                path: rows_path.clone(),
                source,
            })?;

        let circle_path = dir.join(format!("{stem}_circle.csv"));
        self.write_circle_csv(create(&circle_path)?)
            .map_err(|source| ReportError::Csv {
                path: circle_path.clone(),
                source,
            })?;

        let json_path = dir.join(format!("{stem}_RadialProfile.json"));
        self.write_json(create(&json_path)?, &json_path)?;

        log::info!("saved {} rows for {} to {}", self.rows.len(), self.file_name, dir.display());
        Ok(vec![rows_path, circle_path, json_path])
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ReportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })
}
