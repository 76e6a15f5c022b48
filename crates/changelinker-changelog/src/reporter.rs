//! Renders changes into grouped markdown sections

use changelinker_core::config::ReportConfig;
use changelinker_core::SortPriority;
use tracing::{debug, instrument};

use crate::change::Change;
use crate::formatter::DumpMergesFormatter;
use crate::resolver::TagDateResolver;
use crate::sorter::ChangeSorter;

/// Headline for changes without a category
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Headline for changes without a package
pub const OTHER_PACKAGE_LABEL: &str = "Other";

/// Last headline emitted per level.
///
/// A new tag headline clears both inner levels, and under a nesting
/// priority a new outer headline clears the inner one, so every section
/// repeats the headlines of its own runs.
///
/// Returned from every [`DumpMergesReporter::report_changes_with_headlines`]
/// call. Pass it back into the next call to keep suppressing repeated
/// headlines in the same buffer, or pass `RenderState::default()` to start a
/// section that repeats its headlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderState {
    pub previous_tag: Option<String>,
    pub previous_category: Option<String>,
    pub previous_package: Option<String>,
}

/// Which headlines a report shows and how they nest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub with_categories: bool,
    pub with_packages: bool,
    pub with_tags: bool,
    pub priority: SortPriority,
    /// Headline for changes without a tag
    pub unreleased_label: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            with_categories: config.in_categories,
            with_packages: config.in_packages,
            with_tags: config.in_tags,
            priority: config.priority,
            unreleased_label: config.unreleased_label.clone(),
        }
    }
}

/// Accumulates report sections and formats them on demand
pub struct DumpMergesReporter {
    resolver: Box<dyn TagDateResolver>,
    formatter: DumpMergesFormatter,
    content: String,
}

impl DumpMergesReporter {
    pub fn new(resolver: Box<dyn TagDateResolver>) -> Self {
        Self {
            resolver,
            formatter: DumpMergesFormatter,
            content: String::new(),
        }
    }

    /// Append one section for the (already sorted) changes.
    ///
    /// A headline is written only when its value differs from the last one
    /// written at that level, so each run of equal values gets one headline.
    #[instrument(skip(self, state, changes, options), fields(count = changes.len()))]
    pub fn report_changes_with_headlines(
        &mut self,
        mut state: RenderState,
        changes: &[Change],
        options: &ReportOptions,
    ) -> RenderState {
        self.content.push('\n');

        for change in changes {
            if options.with_tags {
                self.tag_headline(&mut state, change, options);
            }

            if options.priority == SortPriority::Packages {
                self.package_headline(&mut state, change, options);
                self.category_headline(&mut state, change, options);
            } else {
                self.category_headline(&mut state, change, options);
                self.package_headline(&mut state, change, options);
            }

            let message = if options.with_packages {
                change.message_without_package()
            } else {
                change.message()
            };
            self.content.push_str(message);
            self.content.push('\n');
        }

        self.content.push('\n');
        debug!(buffer_len = self.content.len(), "section reported");
        state
    }

    /// Formatted report; the buffer itself is left untouched
    pub fn content(&self) -> String {
        self.formatter.format(&self.content)
    }

    fn tag_headline(&mut self, state: &mut RenderState, change: &Change, options: &ReportOptions) {
        let tag = change.tag().unwrap_or(&options.unreleased_label);
        if state.previous_tag.as_deref() == Some(tag) {
            return;
        }

        let date = change
            .tag()
            .and_then(|tag| self.resolver.resolve_date_for_tag(tag));
        match date {
            Some(date) => self.content.push_str(&format!("## {} - {}\n", tag, date)),
            None => self.content.push_str(&format!("## {}\n", tag)),
        }
        state.previous_tag = Some(tag.to_string());
        state.previous_category = None;
        state.previous_package = None;
    }

    fn category_headline(&mut self, state: &mut RenderState, change: &Change, options: &ReportOptions) {
        if !options.with_categories {
            return;
        }
        let category = change.category().unwrap_or(UNCATEGORIZED_LABEL);
        if state.previous_category.as_deref() == Some(category) {
            return;
        }

        let depth = if options.priority == SortPriority::Packages { 4 } else { 3 };
        self.push_headline(depth, category);
        state.previous_category = Some(category.to_string());
        if options.priority == SortPriority::Categories {
            state.previous_package = None;
        }
    }

    fn package_headline(&mut self, state: &mut RenderState, change: &Change, options: &ReportOptions) {
        if !options.with_packages {
            return;
        }
        let package = change.package().unwrap_or(OTHER_PACKAGE_LABEL);
        if state.previous_package.as_deref() == Some(package) {
            return;
        }

        let depth = if options.priority == SortPriority::Categories { 4 } else { 3 };
        self.push_headline(depth, package);
        state.previous_package = Some(package.to_string());
        if options.priority == SortPriority::Packages {
            state.previous_category = None;
        }
    }

    fn push_headline(&mut self, depth: usize, text: &str) {
        self.content.push_str(&"#".repeat(depth));
        self.content.push(' ');
        self.content.push_str(text);
        self.content.push('\n');
    }
}

/// Sort the changes by the options' priority and render them as one section
pub fn render_report(
    changes: &[Change],
    options: &ReportOptions,
    resolver: Box<dyn TagDateResolver>,
) -> String {
    let sorted = ChangeSorter::sort(changes, options.priority);
    let mut reporter = DumpMergesReporter::new(resolver);
    reporter.report_changes_with_headlines(RenderState::default(), &sorted, options);
    reporter.content()
}
