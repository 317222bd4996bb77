//! 数据导入模块
//!
//! 从 CSV 批量导入供水网络：节点文件与管道文件
//!
//! 节点文件表头 `code,role`，role 取 reservoir / station / city；
//! 管道文件表头 `origin,destination,capacity[,bidirectional]`。
//! 多余的列会被忽略。

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::types::{Capacity, VertexRole};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

impl ImportStats {
    fn merge(&mut self, other: &ImportStats) {
        self.vertices_imported += other.vertices_imported;
        self.edges_imported += other.edges_imported;
        self.errors += other.errors;
        self.duration_ms += other.duration_ms;
    }
}

/// 节点记录
#[derive(Debug, Deserialize)]
struct NodeRecord {
    code: String,
    role: String,
}

/// 管道记录
#[derive(Debug, Deserialize)]
struct PipeRecord {
    origin: String,
    destination: String,
    capacity: Capacity,
    #[serde(default)]
    bidirectional: Option<String>,
}

fn parse_flag(raw: Option<&str>) -> Result<bool> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("0") | Some("false") | Some("no") => Ok(false),
        Some("1") | Some("true") | Some("yes") => Ok(true),
        Some(other) => Err(Error::ImportError(format!("无效的双向标记: {}", other))),
    }
}

/// 网络加载器
#[derive(Debug, Default, Clone)]
pub struct NetworkLoader {
    strict: bool,
}

impl NetworkLoader {
    /// 创建加载器（宽松模式：坏记录计数并跳过）
    pub fn new() -> Self {
        Self::default()
    }

    /// 严格模式：遇到坏记录立即失败
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// 从节点文件和管道文件加载
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        graph: &mut Graph,
        nodes: P,
        pipes: Q,
    ) -> Result<ImportStats> {
        let mut stats = self.load_nodes(graph, nodes)?;
        stats.merge(&self.load_pipes(graph, pipes)?);

        info!(
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            "网络加载完成"
        );
        Ok(stats)
    }

    /// 从 CSV 文件导入节点
    pub fn load_nodes<P: AsRef<Path>>(&self, graph: &mut Graph, path: P) -> Result<ImportStats> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        self.import_nodes(graph, reader)
    }

    /// 从 CSV 文件导入管道
    pub fn load_pipes<P: AsRef<Path>>(&self, graph: &mut Graph, path: P) -> Result<ImportStats> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        self.import_pipes(graph, reader)
    }

    /// 从任意输入流导入节点
    pub fn load_nodes_from_reader<R: Read>(&self, graph: &mut Graph, rdr: R) -> Result<ImportStats> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        self.import_nodes(graph, reader)
    }

    /// 从任意输入流导入管道
    pub fn load_pipes_from_reader<R: Read>(&self, graph: &mut Graph, rdr: R) -> Result<ImportStats> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);
        self.import_pipes(graph, reader)
    }

    fn import_nodes<R: Read>(&self, graph: &mut Graph, mut reader: csv::Reader<R>) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();

        for (line, record) in reader.deserialize::<NodeRecord>().enumerate() {
            let outcome = record
                .map_err(Error::from)
                .and_then(|r| {
                    let role: VertexRole = r.role.parse()?;
                    graph.add_vertex(r.code, role)
                });
            match outcome {
                Ok(_) => stats.vertices_imported += 1,
                Err(e) => self.reject(&mut stats, "节点", line + 2, e)?,
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        Ok(stats)
    }

    fn import_pipes<R: Read>(&self, graph: &mut Graph, mut reader: csv::Reader<R>) -> Result<ImportStats> {
        let start = Instant::now();
        let mut stats = ImportStats::default();

        for (line, record) in reader.deserialize::<PipeRecord>().enumerate() {
            let outcome = record.map_err(Error::from).and_then(|r| {
                let both_ways = parse_flag(r.bidirectional.as_deref())?;
                let src = graph
                    .find_vertex(&r.origin)
                    .ok_or_else(|| Error::VertexNotFound(r.origin.clone()))?;
                let dst = graph
                    .find_vertex(&r.destination)
                    .ok_or_else(|| Error::VertexNotFound(r.destination.clone()))?;
                if both_ways {
                    graph.add_bidirectional_edge(src, dst, r.capacity)?;
                    Ok(2)
                } else {
                    graph.add_edge(src, dst, r.capacity)?;
                    Ok(1)
                }
            });
            match outcome {
                Ok(n) => stats.edges_imported += n,
                Err(e) => self.reject(&mut stats, "管道", line + 2, e)?,
            }
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        Ok(stats)
    }

    /// 处理坏记录：严格模式下返回错误，否则记录并计数
    fn reject(&self, stats: &mut ImportStats, kind: &str, line: usize, err: Error) -> Result<()> {
        if self.strict {
            return Err(Error::ImportError(format!("{}第 {} 行: {}", kind, line, err)));
        }
        warn!(kind, line, error = %err, "跳过无效记录");
        stats.errors += 1;
        Ok(())
    }
}

/// 从两个 CSV 文件构建新图
pub fn load_network<P: AsRef<Path>, Q: AsRef<Path>>(
    nodes: P,
    pipes: Q,
    strict: bool,
) -> Result<(Graph, ImportStats)> {
    let mut graph = Graph::new();
    let stats = NetworkLoader::new()
        .strict(strict)
        .load(&mut graph, nodes, pipes)?;
    Ok((graph, stats))
}
