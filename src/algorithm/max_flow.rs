//! 最大流算法
//!
//! 实现 Edmonds-Karp 算法（基于 BFS 的 Ford-Fulkerson），
//! 用于分析供水网络从水源到城市的最大输水量

use super::augmenting_path::{find_augmenting_path, residual_reachable};
use crate::error::Result;
use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::{Capacity, VertexRole, EPSILON};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// 超级源点编码前缀
const SUPER_SOURCE_CODE: &str = "__super_source__";

/// 最大流结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxFlow {
    /// 最大流量值
    pub value: Capacity,
    /// 增广次数
    pub augmentations: usize,
    /// 流量分配（边 -> 流量），只含正流量
    pub flow: HashMap<EdgeId, Capacity>,
    /// 最小割的源侧顶点集
    pub source_side: HashSet<VertexId>,
}

impl MaxFlow {
    fn empty() -> Self {
        Self {
            value: 0.0,
            augmentations: 0,
            flow: HashMap::new(),
            source_side: HashSet::new(),
        }
    }
}

/// 聚合查询中选出的最佳水源
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceFlow {
    pub source: VertexId,
    pub value: Capacity,
}

/// Edmonds-Karp 最大流算法
///
/// 流量直接写入图的边上；再次计算前需调用 [`Graph::reset_flows`]，
/// 聚合查询会自行重置。
pub struct EdmondsKarp<'g> {
    graph: &'g mut Graph,
}

impl<'g> EdmondsKarp<'g> {
    /// 创建算法实例
    pub fn new(graph: &'g mut Graph) -> Self {
        Self { graph }
    }

    /// 只读访问底层图
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    /// 计算从 source 到 sink 的最大流
    ///
    /// 源汇相同、任一端点不存在或不连通时结果为 0。
    /// 源汇相同或端点不存在时没有割，`source_side` 为空。
    pub fn max_flow(&mut self, source: VertexId, sink: VertexId) -> MaxFlow {
        if source == sink || !self.graph.contains_vertex(source) || !self.graph.contains_vertex(sink)
        {
            return MaxFlow::empty();
        }

        let mut total = 0.0;
        let mut augmentations = 0;

        // 重复 BFS 找增广路径，直到不存在为止
        while let Some(path) = find_augmenting_path(self.graph, source, sink) {
            let bottleneck = path.bottleneck(self.graph);
            if bottleneck <= 0.0 {
                break;
            }
            path.augment(self.graph, bottleneck);
            total += bottleneck;
            augmentations += 1;
            debug!(hops = path.len(), bottleneck, total, "增广路径");
        }

        let flow = self
            .graph
            .edges()
            .filter(|e| e.has_flow())
            .map(|e| (e.id(), e.flow()))
            .collect();
        let source_side = residual_reachable(self.graph, source);

        debug!(
            source = self.graph.code(source).unwrap_or_default(),
            sink = self.graph.code(sink).unwrap_or_default(),
            value = total,
            augmentations,
            "最大流计算完成"
        );

        MaxFlow {
            value: total,
            augmentations,
            flow,
            source_side,
        }
    }

    /// 通过编码计算最大流，编码不存在时返回 0
    pub fn max_flow_between(&mut self, source: &str, sink: &str) -> Capacity {
        match (self.graph.find_vertex(source), self.graph.find_vertex(sink)) {
            (Some(s), Some(t)) => self.max_flow(s, t).value,
            _ => 0.0,
        }
    }

    /// 最小割边：从源侧指向汇侧的边
    ///
    /// 需在 `max_flow` 之后、重置流量之前调用；这些边均已饱和，
    /// 容量之和等于最大流量。
    pub fn min_cut_edges(&self, result: &MaxFlow) -> Vec<EdgeId> {
        if result.source_side.is_empty() {
            return Vec::new();
        }
        self.graph
            .edges()
            .filter(|e| {
                result.source_side.contains(&e.src()) && !result.source_side.contains(&e.dst())
            })
            .map(|e| e.id())
            .collect()
    }

    /// 对 target 逐个尝试每个水库作为水源，返回最大流最高者
    ///
    /// 泵站和城市不产水，不参与候选。每次尝试前重置流量，
    /// 结束后图处于重置状态。并列时取顶点顺序靠前者。
    pub fn best_source(&mut self, target: VertexId) -> Option<SourceFlow> {
        if !self.graph.contains_vertex(target) {
            return None;
        }

        let candidates: Vec<VertexId> = self
            .graph
            .vertices_with_role(VertexRole::Reservoir)
            .into_iter()
            .filter(|&id| id != target)
            .collect();

        let mut best: Option<SourceFlow> = None;
        for &source in &candidates {
            self.graph.reset_flows();
            let value = self.max_flow(source, target).value;
            if best.map_or(true, |b| value > b.value + b.value * EPSILON) {
                best = Some(SourceFlow { source, value });
            }
        }
        self.graph.reset_flows();

        if let Some(b) = best {
            info!(
                target = self.graph.code(target).unwrap_or_default(),
                source = self.graph.code(b.source).unwrap_or_default(),
                value = b.value,
                candidates = candidates.len(),
                "最佳水源查询完成"
            );
        }
        best
    }

    /// 单一水源能送达 target 的最大流量
    pub fn max_flow_into(&mut self, target: VertexId) -> Capacity {
        self.best_source(target).map_or(0.0, |b| b.value)
    }

    /// 所有水库同时供水时城市能获得的最大流量
    ///
    /// 临时加入超级源点，指向每个水库，容量为该水库出边容量之和
    /// （上限 `Capacity::MAX`）；无论成功与否，返回前都删除超级源点并重置流量。
    pub fn max_flow_to_city(&mut self, target: VertexId) -> Result<Capacity> {
        if !self.graph.contains_vertex(target) {
            return Ok(0.0);
        }

        let reservoirs: Vec<VertexId> = self
            .graph
            .vertices_with_role(VertexRole::Reservoir)
            .into_iter()
            .filter(|&r| r != target)
            .collect();
        if reservoirs.is_empty() {
            return Ok(0.0);
        }

        let mut code = SUPER_SOURCE_CODE.to_string();
        let mut suffix = 0;
        while self.graph.find_vertex(&code).is_some() {
            suffix += 1;
            code = format!("{}{}", SUPER_SOURCE_CODE, suffix);
        }

        self.graph.reset_flows();
        let super_source = self.graph.add_vertex(code, VertexRole::Reservoir)?;
        let value = self.flow_from_super_source(super_source, &reservoirs, target);

        self.graph.remove_vertex(super_source)?;
        self.graph.reset_flows();

        let value = value?;
        info!(
            target = self.graph.code(target).unwrap_or_default(),
            reservoirs = reservoirs.len(),
            value,
            "城市最大流计算完成"
        );
        Ok(value)
    }

    fn flow_from_super_source(
        &mut self,
        super_source: VertexId,
        reservoirs: &[VertexId],
        target: VertexId,
    ) -> Result<Capacity> {
        for &reservoir in reservoirs {
            // 多条极大容量管道之和会溢出为 inf
            let capacity = self.graph.outgoing_capacity(reservoir).min(Capacity::MAX);
            self.graph.add_edge(super_source, reservoir, capacity)?;
        }
        Ok(self.max_flow(super_source, target).value)
    }

    /// 多源多汇最大流：逐对计算并求和，每对之间重置流量
    pub fn multi_source_sink_max_flow(&mut self, sources: &[VertexId], sinks: &[VertexId]) -> Capacity {
        let mut total_flow = 0.0;
        for &source in sources {
            for &sink in sinks {
                if source != sink {
                    self.graph.reset_flows();
                    total_flow += self.max_flow(source, sink).value;
                }
            }
        }
        self.graph.reset_flows();
        info!(
            sources = sources.len(),
            sinks = sinks.len(),
            total_flow,
            "多源多汇最大流计算完成"
        );
        total_flow
    }
}
