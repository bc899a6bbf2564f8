use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::SimResult;
use crate::geo::GeographicPosition;
use crate::sim::Sample;

use super::{csv, kml};

// ---------------------------------------------------------------------------
// Sample sink used by the driver
// ---------------------------------------------------------------------------

/// Receives samples during a run and is finalized once after the last step.
///
/// The driver never calls `finalize` after a failed step, so a sink that
/// only writes in `finalize` never leaves a truncated track behind.
pub trait TrackSink {
    fn record(&mut self, sample: Sample) -> SimResult<()>;
    fn finalize(&mut self) -> SimResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub time_unix: f64,
    pub position: GeographicPosition,
}

/// All points of one vehicle, in time order.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub points: Vec<TrackPoint>,
}

// ---------------------------------------------------------------------------
// In-memory track log
// ---------------------------------------------------------------------------

/// Samples grouped by vehicle id, vehicles kept in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TrackLog {
    tracks: Vec<Track>,
    index: HashMap<String, usize>,
    finalized: bool,
}

impl TrackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: Sample) {
        let point = TrackPoint { time_unix: sample.time_unix, position: sample.position };
        match self.index.get(&sample.id) {
            Some(&idx) => self.tracks[idx].points.push(point),
            None => {
                self.index.insert(sample.id.clone(), self.tracks.len());
                self.tracks.push(Track { id: sample.id, points: vec![point] });
            }
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.index.get(id).map(|&idx| &self.tracks[idx])
    }

    pub fn sample_count(&self) -> usize {
        self.tracks.iter().map(|t| t.points.len()).sum()
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }
}

impl TrackSink for TrackLog {
    fn record(&mut self, sample: Sample) -> SimResult<()> {
        self.push(sample);
        Ok(())
    }

    fn finalize(&mut self) -> SimResult<()> {
        self.finalized = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// File writer: buffers everything, writes KML (and optional CSV) at the end
// ---------------------------------------------------------------------------

/// Buffers samples in memory and writes the track files on `finalize`.
///
/// Every output is rendered and staged next to its target before any target
/// is replaced, so a failure leaves no new track file behind.
pub struct TrackFileWriter {
    kml_path: PathBuf,
    csv_path: Option<PathBuf>,
    log: TrackLog,
}

impl TrackFileWriter {
    pub fn new(kml_path: impl Into<PathBuf>) -> Self {
        Self { kml_path: kml_path.into(), csv_path: None, log: TrackLog::new() }
    }

    pub fn with_csv(mut self, csv_path: impl Into<PathBuf>) -> Self {
        self.csv_path = Some(csv_path.into());
        self
    }

    pub fn log(&self) -> &TrackLog {
        &self.log
    }
}

impl TrackSink for TrackFileWriter {
    fn record(&mut self, sample: Sample) -> SimResult<()> {
        self.log.push(sample);
        Ok(())
    }

    fn finalize(&mut self) -> SimResult<()> {
        let tracks = self.log.tracks();

        let mut outputs = Vec::with_capacity(2);
        let mut kml_buf = Vec::new();
        kml::write_kml(&mut kml_buf, tracks)?;
        outputs.push((self.kml_path.as_path(), kml_buf));

        if let Some(path) = &self.csv_path {
            let mut csv_buf = Vec::new();
            csv::write_csv(&mut csv_buf, tracks)?;
            outputs.push((path.as_path(), csv_buf));
        }

        commit(&outputs)?;
        self.log.finalized = true;
        Ok(())
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Write every buffer to a staging file, then rename them all into place.
/// On failure, staged files and already-renamed targets are removed.
fn commit(outputs: &[(&Path, Vec<u8>)]) -> io::Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for (target, bytes) in outputs {
        let part = staging_path(target);
        if let Err(e) = fs::write(&part, bytes) {
            let _ = fs::remove_file(&part);
            discard(&staged);
            return Err(e);
        }
        staged.push(part);
    }

    for (idx, ((target, _), part)) in outputs.iter().zip(&staged).enumerate() {
        if let Err(e) = fs::rename(part, target) {
            discard(&staged[idx..]);
            for (done, _) in &outputs[..idx] {
                let _ = fs::remove_file(done);
            }
            return Err(e);
        }
    }
    Ok(())
}

fn discard(paths: &[PathBuf]) {
    for path in paths {
        let _ = fs::remove_file(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: &str, t: f64) -> Sample {
        Sample {
            id: id.into(),
            time_unix: t,
            position: GeographicPosition::new(t, -t, 10.0 * t),
        }
    }

    #[test]
    fn groups_by_id_in_first_seen_order() {
        let mut log = TrackLog::new();
        for t in [0.0, 1.0, 2.0] {
            log.record(sample("b", t)).unwrap();
            log.record(sample("a", t)).unwrap();
        }
        let ids: Vec<&str> = log.tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(log.track("a").unwrap().points.len(), 3);
        assert_eq!(log.sample_count(), 6);
        assert_eq!(log.track("b").unwrap().points[2].time_unix, 2.0);
        assert!(log.track("c").is_none());
    }

    #[test]
    fn file_writer_writes_nothing_until_finalized() {
        let dir = std::env::temp_dir();
        let kml = dir.join(format!("trackgen-writer-{}.kml", std::process::id()));
        let csv = dir.join(format!("trackgen-writer-{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&kml);
        let _ = std::fs::remove_file(&csv);

        let mut writer = TrackFileWriter::new(&kml).with_csv(&csv);
        writer.record(sample("m1", 0.0)).unwrap();
        assert!(!kml.exists());

        writer.finalize().unwrap();
        assert!(writer.log().is_finalized());
        let kml_text = std::fs::read_to_string(&kml).unwrap();
        let csv_text = std::fs::read_to_string(&csv).unwrap();
        std::fs::remove_file(&kml).ok();
        std::fs::remove_file(&csv).ok();

        assert!(kml_text.contains("<name>Missile: m1</name>"));
        assert_eq!(csv_text.lines().count(), 2);
        assert!(!staging_path(&kml).exists());
    }

    #[test]
    fn unwritable_csv_leaves_no_kml_behind() {
        let dir = std::env::temp_dir();
        let kml = dir.join(format!("trackgen-partial-{}.kml", std::process::id()));
        let csv = dir.join("trackgen-no-such-dir").join("out.csv");
        let _ = std::fs::remove_file(&kml);

        let mut writer = TrackFileWriter::new(&kml).with_csv(&csv);
        writer.record(sample("m1", 0.0)).unwrap();
        let result = writer.finalize();

        assert!(matches!(result, Err(crate::error::SimError::Io(_))));
        assert!(!kml.exists());
        assert!(!staging_path(&kml).exists());
        assert!(!writer.log().is_finalized());
    }
}
