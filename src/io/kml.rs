use std::io::{self, Write};

use super::track::Track;

/// Write tracks as a KML document.
///
/// Layout: one `missiles` folder holding a folder per vehicle, each with one
/// point placemark per sample named by its unix time. Altitudes are absolute.
pub fn write_kml<W: Write>(writer: &mut W, tracks: &[Track]) -> io::Result<()> {
    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(writer, r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#)?;
    writeln!(writer, "  <Document>")?;
    writeln!(writer, "    <Folder>")?;
    writeln!(writer, "      <name>missiles</name>")?;

    for track in tracks {
        writeln!(writer, "      <Folder>")?;
        writeln!(writer, "        <name>Missile: {}</name>", escape(&track.id))?;
        for p in &track.points {
            writeln!(writer, "        <Placemark>")?;
            writeln!(writer, "          <name>Time: {:?}</name>", p.time_unix)?;
            writeln!(writer, "          <Point>")?;
            writeln!(writer, "            <altitudeMode>absolute</altitudeMode>")?;
            writeln!(
                writer,
                "            <coordinates>{:.8},{:.8},{:.3}</coordinates>",
                p.position.lon_deg, p.position.lat_deg, p.position.elev_m
            )?;
            writeln!(writer, "          </Point>")?;
            writeln!(writer, "        </Placemark>")?;
        }
        writeln!(writer, "      </Folder>")?;
    }

    writeln!(writer, "    </Folder>")?;
    writeln!(writer, "  </Document>")?;
    writeln!(writer, "</kml>")?;
    Ok(())
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
