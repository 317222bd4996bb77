//! 结果打印器
//!
//! 提供表格和垂直格式的结果输出

use crate::algorithm::PathResult;
use crate::graph::{EdgeId, Graph};
use crate::types::{Capacity, VertexRole};
use prettytable::{format, row, Cell, Row, Table};

/// 打印模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// 表格模式
    Table,
    /// 垂直模式
    Vertical,
}

/// 结果打印器
pub struct Printer {
    mode: PrintMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(PrintMode::Table)
    }
}

impl Printer {
    pub fn new(mode: PrintMode) -> Self {
        Self { mode }
    }

    /// 设置打印模式
    pub fn set_mode(&mut self, mode: PrintMode) {
        self.mode = mode;
    }

    /// 打印查询结果
    pub fn print_result(&self, columns: &[String], rows: &[Vec<String>], elapsed_ms: u64) -> String {
        if columns.is_empty() || rows.is_empty() {
            return format!("Empty set ({} ms)\n", elapsed_ms);
        }

        let output = match self.mode {
            PrintMode::Table => self.format_table(columns, rows),
            PrintMode::Vertical => self.format_vertical(columns, rows),
        };

        format!("{}\n{} row(s) in set ({} ms)\n", output, rows.len(), elapsed_ms)
    }

    /// 打印枚举出的路径，按发现顺序，标出瓶颈最大者
    pub fn print_paths(&self, paths: &[PathResult], elapsed_ms: u64) -> String {
        let widest = crate::algorithm::PathFinder::widest(paths);
        let columns = columns(&["#", "Path", "Hops", "Bottleneck", "Widest"]);
        let rows: Vec<Vec<String>> = paths
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let is_widest = widest.map_or(false, |w| std::ptr::eq(w, p));
                vec![
                    (i + 1).to_string(),
                    p.vertices.join(" -> "),
                    p.length().to_string(),
                    format_capacity(p.bottleneck),
                    if is_widest { "*".to_string() } else { String::new() },
                ]
            })
            .collect();
        self.print_result(&columns, &rows, elapsed_ms)
    }

    /// 打印一组边（如最小割）
    pub fn print_edges(&self, graph: &Graph, edges: &[EdgeId], elapsed_ms: u64) -> String {
        let columns = columns(&["Origin", "Destination", "Capacity", "Flow"]);
        let rows: Vec<Vec<String>> = edges
            .iter()
            .filter_map(|&id| graph.edge(id))
            .map(|e| {
                vec![
                    graph.code(e.src()).unwrap_or("?").to_string(),
                    graph.code(e.dst()).unwrap_or("?").to_string(),
                    format_capacity(e.capacity()),
                    format_capacity(e.flow()),
                ]
            })
            .collect();
        self.print_result(&columns, &rows, elapsed_ms)
    }

    /// 表格格式
    fn format_table(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);

        let header: Vec<Cell> = columns.iter().map(|c| Cell::new(c)).collect();
        table.set_titles(Row::new(header));

        for row_data in rows {
            let cells: Vec<Cell> = row_data.iter().map(|v| Cell::new(v)).collect();
            table.add_row(Row::new(cells));
        }

        table.to_string()
    }

    /// 垂直格式
    fn format_vertical(&self, columns: &[String], rows: &[Vec<String>]) -> String {
        let max_col_width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
        let mut output = String::new();

        for (i, row_data) in rows.iter().enumerate() {
            output.push_str(&format!(
                "*************************** {}. row ***************************\n",
                i + 1
            ));

            for (j, col) in columns.iter().enumerate() {
                let value = row_data.get(j).map(|s| s.as_str()).unwrap_or("");
                output.push_str(&format!("{:>width$}: {}\n", col, value, width = max_col_width));
            }
        }

        output
    }

    /// 打印网络统计信息
    pub fn print_stats(&self, graph: &Graph) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BOX_CHARS);
        table.set_titles(row!["Property", "Value"]);
        table.add_row(row!["Vertex Count", graph.vertex_count().to_string()]);
        table.add_row(row!["Edge Count", graph.edge_count().to_string()]);
        for role in [VertexRole::Reservoir, VertexRole::PumpingStation, VertexRole::City] {
            table.add_row(row![
                format!("{} count", role),
                graph.vertices_with_role(role).len().to_string()
            ]);
        }
        table.to_string()
    }
}

fn columns(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// 容量格式化：整数值不带小数
pub fn format_capacity(value: Capacity) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.3}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::PathFinder;

    #[test]
    fn test_format_capacity() {
        assert_eq!(format_capacity(8.0), "8");
        assert_eq!(format_capacity(2.5), "2.500");
        assert_eq!(format_capacity(f64::INFINITY), "inf");
    }

    #[test]
    fn test_print_empty_and_vertical() {
        let printer = Printer::default();
        assert_eq!(printer.print_result(&[], &[], 3), "Empty set (3 ms)\n");

        let mut printer = Printer::default();
        printer.set_mode(PrintMode::Vertical);
        let out = printer.print_result(&columns(&["a", "bb"]), &[vec!["1".into(), "2".into()]], 0);
        assert!(out.contains(" a: 1"));
        assert!(out.contains("bb: 2"));
        assert!(out.contains("1 row(s) in set"));
    }

    #[test]
    fn test_print_paths_marks_widest() {
        let mut graph = Graph::new();
        graph.add_vertex("R", VertexRole::Reservoir).unwrap();
        graph.add_vertex("C", VertexRole::City).unwrap();
        graph.add_edge_by_code("R", "C", 2.0).unwrap();
        graph.add_edge_by_code("R", "C", 9.0).unwrap();

        let paths = PathFinder::new(&graph).all_paths_by_code("R", "C");
        let mut printer = Printer::default();
        printer.set_mode(PrintMode::Vertical);
        let out = printer.print_paths(&paths, 1);
        assert!(out.contains("R -> C"));
        assert!(out.contains("2 row(s) in set"));
        assert_eq!(out.matches("Widest: *").count(), 1);
    }
}
