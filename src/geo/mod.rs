pub mod coordinate;
pub mod orientation;

pub use coordinate::{
    ecf_down_vector, ecf_forward_vector, ecf_to_geographic, geographic_to_ecf, GeoError,
    GeographicPosition,
};
pub use orientation::body_forward;
