//! 结果打印器
//!
//! 提供表格格式的结果输出

use crate::metrics::MetricsSnapshot;
use prettytable::{format, row, Cell, Row, Table};

/// 结果打印器
#[derive(Default)]
pub struct Printer;

impl Printer {
    pub fn new() -> Self {
        Self
    }

    /// 打印城镇列表
    pub fn print_towns(&self, names: &[String]) -> String {
        if names.is_empty() {
            return "Empty set\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Town"]);
        for name in names {
            table.add_row(Row::new(vec![Cell::new(name)]));
        }

        format!("{}\n{} row(s) in set\n", table, names.len())
    }

    /// 打印道路列表
    pub fn print_roads(&self, labels: &[String]) -> String {
        if labels.is_empty() {
            return "Empty set\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Road"]);
        for label in labels {
            table.add_row(Row::new(vec![Cell::new(label)]));
        }

        format!("{}\n{} row(s) in set\n", table, labels.len())
    }

    /// 打印路径步骤
    pub fn print_path(&self, steps: &[String]) -> String {
        if steps.is_empty() {
            return "未找到路径\n".to_string();
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["#", "Step"]);
        for (i, step) in steps.iter().enumerate() {
            table.add_row(Row::new(vec![
                Cell::new(&(i + 1).to_string()),
                Cell::new(step),
            ]));
        }

        format!("{}\n{} step(s)\n", table, steps.len())
    }

    /// 打印图统计信息
    pub fn print_stats(&self, town_count: usize, road_count: usize) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Town Count", town_count.to_string()]);
        table.add_row(row!["Road Count", road_count.to_string()]);
        table.to_string()
    }

    /// 打印指标快照
    pub fn print_metrics(&self, snapshot: &MetricsSnapshot) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Metric", "Value"]);
        table.add_row(row!["Path Queries", snapshot.total_queries.to_string()]);
        table.add_row(row!["  Found", snapshot.found_queries.to_string()]);
        table.add_row(row!["  Empty", snapshot.empty_queries.to_string()]);
        table.add_row(row![
            "  Avg Duration (ms)",
            format!("{:.3}", snapshot.avg_query_duration_ms)
        ]);
        table.add_row(row!["Towns Inserted", snapshot.towns_inserted.to_string()]);
        table.add_row(row!["Towns Removed", snapshot.towns_removed.to_string()]);
        table.add_row(row!["Roads Inserted", snapshot.roads_inserted.to_string()]);
        table.add_row(row!["Roads Removed", snapshot.roads_removed.to_string()]);
        table.add_row(row!["Lines Imported", snapshot.lines_imported.to_string()]);
        table.add_row(row!["Import Errors", snapshot.import_errors.to_string()]);
        table.add_row(row!["Uptime (s)", snapshot.uptime_seconds.to_string()]);
        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_towns_empty() {
        let printer = Printer::new();
        assert_eq!(printer.print_towns(&[]), "Empty set\n");
    }

    #[test]
    fn test_print_towns_table() {
        let printer = Printer::new();
        let output = printer.print_towns(&["Alton".to_string(), "Boone".to_string()]);
        assert!(output.contains("Alton"));
        assert!(output.contains("Boone"));
        assert!(output.contains("2 row(s) in set"));
    }

    #[test]
    fn test_print_path() {
        let printer = Printer::new();
        let output =
            printer.print_path(&["Alton via Main St to Boone 5 mi".to_string()]);
        assert!(output.contains("Main St"));
        assert!(output.contains("1 step(s)"));

        assert_eq!(printer.print_path(&[]), "未找到路径\n");
    }

    #[test]
    fn test_print_stats() {
        let printer = Printer::new();
        let output = printer.print_stats(3, 2);
        assert!(output.contains("Town Count"));
        assert!(output.contains("3"));
    }
}
