//! Report renderers for bloomscope analyses.

pub mod csv;
pub mod html;

pub use self::csv::{generate_csv, write_csv_report};
pub use html::{generate_html, write_html_report};
