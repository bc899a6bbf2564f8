use crate::geo::GeographicPosition;

/// One observation of one vehicle at one simulation step.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub id: String,
    pub time_unix: f64,
    pub position: GeographicPosition,
}
