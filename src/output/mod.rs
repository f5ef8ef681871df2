//! Output module for the genre playlist
//!
//! This module handles:
//! - Grouping track records into a genre report
//! - Rendering and writing the report as XML
//! - Recording and printing run statistics

mod report;
pub mod stats;
mod xml;

pub use report::{aggregate, GenreBucket, GenreReport};
pub use stats::{print_statistics, RunStatistics, StatisticsSnapshot};
pub use xml::{render_xml, write_report};
