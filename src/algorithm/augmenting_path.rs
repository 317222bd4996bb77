//! 增广路径
//!
//! 残量图上的 BFS 增广路径查找，以及瓶颈计算与流量更新。
//! 搜索状态（访问集合、前驱步）每次调用重新分配，不写入图中。

use crate::graph::{EdgeId, Graph, VertexId};
use crate::types::Capacity;
use std::collections::{HashMap, HashSet, VecDeque};

/// 残量步方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 沿边正向，残量 = 容量 - 流量
    Forward,
    /// 沿边反向（撤销流量），残量 = 流量
    Backward,
}

/// 残量图中的一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidualStep {
    pub edge: EdgeId,
    pub direction: Direction,
}

impl ResidualStep {
    pub fn forward(edge: EdgeId) -> Self {
        Self {
            edge,
            direction: Direction::Forward,
        }
    }

    pub fn backward(edge: EdgeId) -> Self {
        Self {
            edge,
            direction: Direction::Backward,
        }
    }

    /// 该步当前的残量，边已被删除时为 0
    pub fn residual(&self, graph: &Graph) -> Capacity {
        match (graph.edge(self.edge), self.direction) {
            (Some(e), Direction::Forward) => e.residual(),
            (Some(e), Direction::Backward) => e.flow(),
            (None, _) => 0.0,
        }
    }
}

/// 一条从源点到汇点的增广路径
#[derive(Debug, Clone)]
pub struct AugmentingPath {
    /// 路径上的顶点序列（源点在前）
    vertices: Vec<VertexId>,
    /// 路径上的残量步（与顶点序列对应，长度少一）
    steps: Vec<ResidualStep>,
}

impl AugmentingPath {
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn steps(&self) -> &[ResidualStep] {
        &self.steps
    }

    /// 路径边数
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 瓶颈容量：路径上残量的最小值
    pub fn bottleneck(&self, graph: &Graph) -> Capacity {
        if self.steps.is_empty() {
            return 0.0;
        }
        self.steps
            .iter()
            .map(|step| step.residual(graph))
            .fold(Capacity::INFINITY, Capacity::min)
    }

    /// 沿路径增广：正向步增加流量，反向步撤销流量
    pub fn augment(&self, graph: &mut Graph, amount: Capacity) {
        for step in &self.steps {
            if let Some(edge) = graph.edge_mut(step.edge) {
                match step.direction {
                    Direction::Forward => edge.add_flow(amount),
                    Direction::Backward => edge.add_flow(-amount),
                }
            }
        }
    }
}

/// 顶点在残量图中的可达邻居：
/// 残量为正的出边（正向），以及流量为正的入边（反向）
fn residual_neighbors(
    graph: &Graph,
    u: VertexId,
) -> impl Iterator<Item = (VertexId, ResidualStep)> + '_ {
    let forward = graph
        .outgoing_edges(u)
        .filter(|e| e.has_residual())
        .map(|e| (e.dst(), ResidualStep::forward(e.id())));
    let backward = graph
        .incoming_edges(u)
        .filter(|e| e.has_flow())
        .map(|e| (e.src(), ResidualStep::backward(e.id())));
    forward.chain(backward)
}

/// BFS 查找边数最少的增广路径
///
/// 任一端点不存在或源汇相同时返回 `None`。
pub fn find_augmenting_path(
    graph: &Graph,
    source: VertexId,
    sink: VertexId,
) -> Option<AugmentingPath> {
    if source == sink || !graph.contains_vertex(source) || !graph.contains_vertex(sink) {
        return None;
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    let mut parent: HashMap<VertexId, (VertexId, ResidualStep)> = HashMap::new();

    visited.insert(source);
    queue.push_back(source);

    'search: while let Some(u) = queue.pop_front() {
        for (w, step) in residual_neighbors(graph, u) {
            if visited.insert(w) {
                parent.insert(w, (u, step));
                if w == sink {
                    break 'search;
                }
                queue.push_back(w);
            }
        }
    }

    if !parent.contains_key(&sink) {
        return None;
    }

    // 重构路径
    let mut vertices = vec![sink];
    let mut steps = Vec::new();
    let mut current = sink;
    while current != source {
        let &(prev, step) = parent.get(&current)?;
        steps.push(step);
        vertices.push(prev);
        current = prev;
    }
    vertices.reverse();
    steps.reverse();

    Some(AugmentingPath { vertices, steps })
}

/// 残量图中从 `source` 出发可达的顶点集合（最小割的源侧）
pub fn residual_reachable(graph: &Graph, source: VertexId) -> HashSet<VertexId> {
    let mut visited = HashSet::new();
    if !graph.contains_vertex(source) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited.insert(source);
    queue.push_back(source);

    while let Some(u) = queue.pop_front() {
        for (w, _) in residual_neighbors(graph, u) {
            if visited.insert(w) {
                queue.push_back(w);
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VertexRole;

    fn station(graph: &mut Graph, code: &str) -> VertexId {
        graph.add_vertex(code, VertexRole::PumpingStation).unwrap()
    }

    #[test]
    fn test_shortest_path_is_found() {
        // S -> A -> B -> T 和 S -> T 并存，应选择一跳的路径
        let mut graph = Graph::new();
        let s = station(&mut graph, "S");
        let a = station(&mut graph, "A");
        let b = station(&mut graph, "B");
        let t = station(&mut graph, "T");
        graph.add_edge(s, a, 10.0).unwrap();
        graph.add_edge(a, b, 10.0).unwrap();
        graph.add_edge(b, t, 10.0).unwrap();
        graph.add_edge(s, t, 1.0).unwrap();

        let path = find_augmenting_path(&graph, s, t).unwrap();
        assert_eq!(path.len(), 1);
        assert_eq!(path.vertices(), &[s, t]);
        assert_eq!(path.bottleneck(&graph), 1.0);
    }

    #[test]
    fn test_zero_residual_is_skipped() {
        let mut graph = Graph::new();
        let s = station(&mut graph, "S");
        let t = station(&mut graph, "T");
        graph.add_edge(s, t, 0.0).unwrap();

        assert!(find_augmenting_path(&graph, s, t).is_none());
        assert!(find_augmenting_path(&graph, s, s).is_none());
        assert!(find_augmenting_path(&graph, s, VertexId::new(42)).is_none());
    }

    #[test]
    fn test_augment_and_backward_step() {
        // S -> A -> T, S -> B, A 的流量可以通过反向边撤回
        let mut graph = Graph::new();
        let s = station(&mut graph, "S");
        let a = station(&mut graph, "A");
        let b = station(&mut graph, "B");
        let t = station(&mut graph, "T");
        let sa = graph.add_edge(s, a, 4.0).unwrap();
        let at = graph.add_edge(a, t, 4.0).unwrap();
        graph.add_edge(s, b, 4.0).unwrap();
        let ba = graph.add_edge(b, a, 4.0).unwrap();

        let path = find_augmenting_path(&graph, s, t).unwrap();
        let bottleneck = path.bottleneck(&graph);
        assert_eq!(bottleneck, 4.0);
        path.augment(&mut graph, bottleneck);
        assert_eq!(graph.edge(sa).unwrap().flow(), 4.0);
        assert_eq!(graph.edge(at).unwrap().flow(), 4.0);

        // 汇点已饱和，不再有增广路径
        assert!(find_augmenting_path(&graph, s, t).is_none());

        // 从 B 到 S：B -> A 正向，A -> S 反向撤销
        let path = find_augmenting_path(&graph, b, s).unwrap();
        assert_eq!(
            path.steps(),
            &[ResidualStep::forward(ba), ResidualStep::backward(sa)]
        );
        assert_eq!(path.bottleneck(&graph), 4.0);
        path.augment(&mut graph, 1.5);
        assert_eq!(graph.edge(sa).unwrap().flow(), 2.5);
        assert_eq!(graph.edge(ba).unwrap().flow(), 1.5);
    }

    #[test]
    fn test_residual_reachable() {
        let mut graph = Graph::new();
        let s = station(&mut graph, "S");
        let a = station(&mut graph, "A");
        let t = station(&mut graph, "T");
        let sa = graph.add_edge(s, a, 2.0).unwrap();
        graph.add_edge(a, t, 5.0).unwrap();

        assert_eq!(residual_reachable(&graph, s).len(), 3);

        graph.edge_mut(sa).unwrap().add_flow(2.0);
        let side = residual_reachable(&graph, s);
        assert_eq!(side.len(), 1);
        assert!(side.contains(&s));
    }
}
