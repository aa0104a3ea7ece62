use prettytable::{Cell, Row, Table};

use crate::stats::RunStats;

pub fn build_table_title() -> Table {
    let mut table = Table::new();
    table.set_titles(Row::new(vec![Cell::new("metric"), Cell::new("value")]));
    table
}

fn add_row(table: &mut Table, name: &str, value: impl ToString) {
    table.add_row(Row::new(vec![
        Cell::new(name),
        Cell::new(&value.to_string()),
    ]));
}

pub fn build_summary_table(stats: &RunStats) -> Table {
    let mut table = build_table_title();
    add_row(&mut table, "percentile", format!("P{}", stats.percentile));
    add_row(&mut table, "input sources", stats.sources);
    add_row(&mut table, "lines read", stats.lines_read);
    add_row(&mut table, "records accepted", stats.records_accepted);
    add_row(&mut table, "records rejected", stats.records_rejected);
    for (reason, count) in &stats.rejected_by_reason {
        add_row(&mut table, &format!("  rejected ({})", reason), count);
    }
    add_row(&mut table, "unique donors", stats.unique_donors);
    add_row(&mut table, "first sightings", stats.first_sightings);
    add_row(&mut table, "backdated skipped", stats.backdated_skipped);
    add_row(&mut table, "contribution groups", stats.groups);
    add_row(&mut table, "lines emitted", stats.lines_emitted);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows() {
        let mut stats = RunStats::default();
        stats.rejected_by_reason.insert("NAME is empty".to_string(), 4);
        stats.rejected_by_reason.insert("OTHER_ID is not empty".to_string(), 1);
        let table = build_summary_table(&stats);
        assert_eq!(table.len(), 12);
        let rendered = table.to_string();
        assert!(rendered.contains("rejected (NAME is empty)"));
    }
}
