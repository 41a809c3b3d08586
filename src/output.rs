use crate::parsers::{DependencyRecord, Freshness};
use colored::Colorize;

/// Column widths for table layout
struct ColumnWidths {
    package: usize,
    requested: usize,
    installed: usize,
    latest: usize,
    status: usize,
    group: usize,
}

/// Renders the reconciled dependency records as a table
pub struct TableRenderer {
    show_colors: bool,
}

impl TableRenderer {
    pub fn new(show_colors: bool) -> Self {
        Self { show_colors }
    }

    /// Render every record, in manifest order
    pub fn render(&self, records: &[DependencyRecord]) {
        if records.is_empty() {
            return;
        }

        let widths = self.calculate_widths(records);
        self.print_header(&widths);
        for record in records {
            self.print_row(record, &widths);
        }
    }

    /// Calculate the maximum width needed for each column
    fn calculate_widths(&self, records: &[DependencyRecord]) -> ColumnWidths {
        let mut widths = ColumnWidths {
            package: "Package".len(),
            requested: "Requested".len(),
            installed: "Installed".len(),
            latest: "Latest".len(),
            status: "Status".len(),
            group: "Group".len(),
        };

        for record in records {
            widths.package = widths.package.max(record.name.len());
            widths.requested = widths.requested.max(cell(&record.requested_version).len());
            widths.installed = widths
                .installed
                .max(opt_cell(record.installed_version.as_deref()).len());
            widths.latest = widths
                .latest
                .max(opt_cell(record.latest_version.as_deref()).len());
            widths.status = widths.status.max(status_text(record.freshness).len());
            widths.group = widths.group.max(opt_cell(record.group.as_deref()).len());
        }

        widths
    }

    /// Print the header
    fn print_header(&self, widths: &ColumnWidths) {
        println!(
            "{:<package_w$}  {:>requested_w$}  {:>installed_w$}  {:>latest_w$}  {:<status_w$}  {:<group_w$}",
            "Package",
            "Requested",
            "Installed",
            "Latest",
            "Status",
            "Group",
            package_w = widths.package,
            requested_w = widths.requested,
            installed_w = widths.installed,
            latest_w = widths.latest,
            status_w = widths.status,
            group_w = widths.group,
        );
    }

    /// Print a single row
    fn print_row(&self, record: &DependencyRecord, widths: &ColumnWidths) {
        let status = status_text(record.freshness);
        let colored_status = self.colorize(status, record.freshness);

        println!(
            "{:<package_w$}  {:>requested_w$}  {:>installed_w$}  {:>latest_w$}  {:<status_w$}  {:<group_w$}",
            record.name,
            cell(&record.requested_version),
            opt_cell(record.installed_version.as_deref()),
            opt_cell(record.latest_version.as_deref()),
            colored_status,
            opt_cell(record.group.as_deref()),
            package_w = widths.package,
            requested_w = widths.requested,
            installed_w = widths.installed,
            latest_w = widths.latest,
            status_w = widths.status,
            group_w = widths.group,
        );
    }

    /// Colorize status text based on freshness
    fn colorize(&self, text: &str, freshness: Option<Freshness>) -> String {
        if !self.show_colors {
            return text.to_string();
        }

        match freshness {
            Some(Freshness::UpToDate) => text.green().to_string(),
            Some(Freshness::Outdated) => text.yellow().to_string(),
            None => text.dimmed().to_string(),
        }
    }
}

fn cell(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn opt_cell(value: Option<&str>) -> &str {
    value.map_or("-", cell)
}

fn status_text(freshness: Option<Freshness>) -> &'static str {
    match freshness {
        Some(Freshness::UpToDate) => "up-to-date",
        Some(Freshness::Outdated) => "outdated",
        None => "unknown",
    }
}
