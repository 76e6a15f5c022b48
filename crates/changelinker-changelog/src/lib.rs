//! Changelinker Changelog - Change grouping, reporting and reference linking
//!
//! Changes are built from merge commits or changelog lines, sorted and
//! rendered into grouped markdown by [`DumpMergesReporter`]. A finished
//! document runs through the worker [`Pipeline`] via [`ChangelogLinker`],
//! which turns references into markdown links resolved against the
//! repository URL.

pub mod change;
pub mod formatter;
pub mod link_appender;
pub mod linker;
pub mod parser;
pub mod pattern;
pub mod reporter;
pub mod resolver;
pub mod sorter;
pub mod worker;

pub use change::{Change, ChangeFactory};
pub use formatter::DumpMergesFormatter;
pub use link_appender::LinkAppender;
pub use linker::{ChangelogLinker, LinkedDocument};
pub use parser::parse_changes;
pub use reporter::{render_report, DumpMergesReporter, RenderState, ReportOptions};
pub use resolver::{GitCommitDateTagResolver, NoTagDates, StaticTagDates, TagDateResolver};
pub use sorter::ChangeSorter;
pub use worker::{LinkerSettings, Pipeline, Worker};
