use std::io::{self, Write};

use super::track::Track;

/// Write tracks as CSV, one row per sample, grouped by vehicle.
///
/// Columns: id, time_unix, longitude_deg, latitude_deg, elevation_m
pub fn write_csv<W: Write>(writer: &mut W, tracks: &[Track]) -> io::Result<()> {
    writeln!(writer, "id,time_unix,longitude_deg,latitude_deg,elevation_m")?;

    for track in tracks {
        let id = quote(&track.id);
        for p in &track.points {
            writeln!(
                writer,
                "{},{:.3},{:.8},{:.8},{:.3}",
                id, p.time_unix, p.position.lon_deg, p.position.lat_deg, p.position.elev_m,
            )?;
        }
    }

    Ok(())
}

fn quote(field: &str) -> String {
    if field.contains(|c: char| matches!(c, ',' | '"' | '\n')) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeographicPosition;
    use crate::io::TrackPoint;

    #[test]
    fn csv_output_has_header_and_rows() {
        let tracks = vec![Track {
            id: "m1".into(),
            points: vec![
                TrackPoint {
                    time_unix: 0.0,
                    position: GeographicPosition::new(-104.5, 39.25, 1806.0),
                },
                TrackPoint {
                    time_unix: 0.5,
                    position: GeographicPosition::new(-104.5, 39.25, 1804.775),
                },
            ],
        }];

        let mut buf = Vec::new();
        write_csv(&mut buf, &tracks).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("id,"));
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[1], "m1,0.000,-104.50000000,39.25000000,1806.000");
    }

    #[test]
    fn ids_with_commas_are_quoted() {
        assert_eq!(quote("a,b"), "\"a,b\"");
        assert_eq!(quote("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote("plain"), "plain");
    }
}
