//! XML playlist rendering
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <Playlist>
//!   <Genre name="Rock">
//!     <music>
//!       <filename>a.mp3</filename>
//!       <title>Highway Song</title>
//!       <link>http://example.com/a.mp3</link>
//!     </music>
//!   </Genre>
//! </Playlist>
//! ```

use crate::metadata::TrackRecord;
use crate::output::report::GenreReport;
use crate::ReportError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

const ROOT: &str = "Playlist";
const GENRE: &str = "Genre";
const TRACK: &str = "music";

/// Renders the report as an indented XML document
pub fn render_xml(report: &GenreReport) -> Result<String, ReportError> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    if report.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(ROOT)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(ROOT)))?;
        for bucket in report.genres() {
            writer.write_event(Event::Start(
                BytesStart::new(GENRE).with_attributes([("name", bucket.name())]),
            ))?;
            for track in bucket.tracks() {
                write_track(&mut writer, track)?;
            }
            writer.write_event(Event::End(BytesEnd::new(GENRE)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
    }

    let mut xml = String::from_utf8(writer.into_inner().into_inner())?;
    xml.push('\n');
    Ok(xml)
}

/// Renders the report and writes it to `path`, replacing any existing file
pub fn write_report(report: &GenreReport, path: &Path) -> Result<(), ReportError> {
    let xml = render_xml(report)?;
    std::fs::write(path, xml)?;
    tracing::info!(
        "Wrote {} tracks in {} genres to {}",
        report.track_count(),
        report.genre_count(),
        path.display()
    );
    Ok(())
}

fn write_track(writer: &mut Writer<Cursor<Vec<u8>>>, track: &TrackRecord) -> Result<(), ReportError> {
    writer.write_event(Event::Start(BytesStart::new(TRACK)))?;
    write_text_element(writer, "filename", track.filename())?;
    write_text_element(writer, "title", track.title())?;
    write_text_element(writer, "link", track.source_url())?;
    writer.write_event(Event::End(BytesEnd::new(TRACK)))?;
    Ok(())
}

fn write_text_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    name: &str,
    text: &str,
) -> Result<(), ReportError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
