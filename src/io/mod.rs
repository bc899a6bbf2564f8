pub mod csv;
pub mod kml;
pub mod track;

pub use track::{Track, TrackFileWriter, TrackLog, TrackPoint, TrackSink};
