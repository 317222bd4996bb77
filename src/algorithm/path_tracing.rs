//! 路径追踪算法
//!
//! DFS 回溯枚举两点之间的所有简单路径，并记录每条路径的瓶颈残量，
//! 用于解释水流如何到达目的地

use super::augmenting_path::find_augmenting_path;
use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::Capacity;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 路径结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// 路径上的顶点编码序列
    pub vertices: Vec<String>,
    /// 路径上的边序列
    pub edges: Vec<EdgeId>,
    /// 路径瓶颈：边残量（容量 - 流量）的最小值
    pub bottleneck: Capacity,
}

impl PathResult {
    /// 路径边数
    pub fn length(&self) -> usize {
        self.edges.len()
    }
}

/// 路径查找器
pub struct PathFinder<'g> {
    graph: &'g Graph,
}

impl<'g> PathFinder<'g> {
    /// 创建路径查找器
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// 枚举 start 到 end 的所有简单路径（按发现顺序）
    pub fn all_paths(&self, start: VertexId, end: VertexId) -> Vec<PathResult> {
        self.enumerate(start, end, None)
    }

    /// 枚举边数不超过 max_depth 的简单路径
    pub fn all_paths_within(&self, start: VertexId, end: VertexId, max_depth: usize) -> Vec<PathResult> {
        self.enumerate(start, end, Some(max_depth))
    }

    /// 通过编码枚举，编码不存在时返回空
    pub fn all_paths_by_code(&self, start: &str, end: &str) -> Vec<PathResult> {
        match (self.graph.find_vertex(start), self.graph.find_vertex(end)) {
            (Some(s), Some(t)) => self.all_paths(s, t),
            _ => Vec::new(),
        }
    }

    /// 两点在当前残量图中是否连通
    pub fn is_reachable(&self, start: VertexId, end: VertexId) -> bool {
        find_augmenting_path(self.graph, start, end).is_some()
    }

    /// 瓶颈最大的路径；并列时取先发现者
    pub fn widest(paths: &[PathResult]) -> Option<&PathResult> {
        let mut best: Option<&PathResult> = None;
        for p in paths {
            if best.map_or(true, |b| p.bottleneck > b.bottleneck) {
                best = Some(p);
            }
        }
        best
    }

    fn enumerate(&self, start: VertexId, end: VertexId, max_depth: Option<usize>) -> Vec<PathResult> {
        let mut results = Vec::new();
        if start == end || !self.graph.contains_vertex(end) {
            return results;
        }
        let Some(code) = self.graph.code(start) else {
            return results;
        };

        let mut path = PathResult {
            vertices: vec![code.to_string()],
            edges: Vec::new(),
            bottleneck: Capacity::INFINITY,
        };
        let mut visited = HashSet::new();
        visited.insert(start);

        self.dfs_all_paths(
            start,
            end,
            max_depth,
            Capacity::INFINITY,
            &mut visited,
            &mut path,
            &mut results,
        );

        results
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs_all_paths(
        &self,
        current: VertexId,
        end: VertexId,
        remaining_depth: Option<usize>,
        min_so_far: Capacity,
        visited: &mut HashSet<VertexId>,
        path: &mut PathResult,
        results: &mut Vec<PathResult>,
    ) {
        if current == end {
            let mut found = path.clone();
            found.bottleneck = min_so_far;
            results.push(found);
            return;
        }

        if remaining_depth == Some(0) {
            return;
        }

        for edge in self.graph.outgoing_edges(current) {
            let neighbor = edge.dst();
            if visited.contains(&neighbor) {
                continue;
            }
            let Some(code) = self.graph.code(neighbor) else {
                continue;
            };

            visited.insert(neighbor);
            path.vertices.push(code.to_string());
            path.edges.push(edge.id());

            self.dfs_all_paths(
                neighbor,
                end,
                remaining_depth.map(|d| d - 1),
                min_so_far.min(edge.residual()),
                visited,
                path,
                results,
            );

            path.edges.pop();
            path.vertices.pop();
            visited.remove(&neighbor);
        }
    }
}
