//! 图数据结构
//!
//! 残量图存储：顶点与边保存在稳定的槽位数组中，通过 ID 引用。
//! 删除只留下空槽，已分配的 ID 在图的生命周期内不会被复用。

use super::edge::{Edge, EdgeId};
use super::index::VertexIndex;
use super::vertex::{Vertex, VertexId};
use crate::error::{Error, Result};
use crate::types::{Capacity, VertexRole};
use tracing::debug;

/// 供水网络图
#[derive(Debug, Default, Clone)]
pub struct Graph {
    /// 顶点槽位
    vertices: Vec<Option<Vertex>>,
    /// 边槽位
    edges: Vec<Option<Edge>>,
    /// 顶点索引
    vertex_index: VertexIndex,
    /// 存活边数量
    live_edges: usize,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点，编码重复时失败
    pub fn add_vertex(&mut self, code: impl Into<String>, role: VertexRole) -> Result<VertexId> {
        let code = code.into();
        if self.vertex_index.contains(&code) {
            return Err(Error::VertexAlreadyExists(code));
        }

        let id = VertexId::new(self.vertices.len());
        self.vertex_index.insert(code.clone(), role, id);
        self.vertices.push(Some(Vertex::new(id, code, role)));

        Ok(id)
    }

    /// 通过编码查找顶点
    pub fn find_vertex(&self, code: &str) -> Option<VertexId> {
        self.vertex_index.get_by_code(code)
    }

    /// 获取顶点
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index()).and_then(Option::as_ref)
    }

    /// 通过编码获取顶点
    pub fn vertex_by_code(&self, code: &str) -> Option<&Vertex> {
        self.find_vertex(code).and_then(|id| self.vertex(id))
    }

    /// 顶点是否存在
    pub fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    /// 获取顶点编码
    pub fn code(&self, id: VertexId) -> Option<&str> {
        self.vertex(id).map(Vertex::code)
    }

    /// 所有顶点（按插入顺序）
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertex_index.ids().filter_map(move |id| self.vertex(id))
    }

    /// 获取角色下的所有顶点
    pub fn vertices_with_role(&self, role: VertexRole) -> Vec<VertexId> {
        self.vertex_index.get_by_role(role)
    }

    /// 删除顶点及其所有关联边（出边和入边）
    pub fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex> {
        let incident: Vec<EdgeId> = match self.vertex(id) {
            Some(v) => {
                let mut edges: Vec<EdgeId> =
                    v.outgoing().iter().chain(v.incoming()).copied().collect();
                // 自环同时出现在出边和入边中
                edges.sort_unstable();
                edges.dedup();
                edges
            }
            None => return Err(Error::VertexNotFound(id.to_string())),
        };

        for edge_id in incident {
            self.remove_edge(edge_id)?;
        }

        let vertex = self.vertices[id.index()]
            .take()
            .ok_or_else(|| Error::VertexNotFound(id.to_string()))?;
        self.vertex_index
            .remove(vertex.code(), vertex.role(), vertex.id());

        debug!(vertex = %vertex.code(), "顶点已删除");
        Ok(vertex)
    }

    /// 通过编码删除顶点
    pub fn remove_vertex_by_code(&mut self, code: &str) -> Result<Vertex> {
        let id = self
            .find_vertex(code)
            .ok_or_else(|| Error::VertexNotFound(code.to_string()))?;
        self.remove_vertex(id)
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertex_index.len()
    }

    // ==================== 边操作 ====================

    /// 添加有向边
    pub fn add_edge(&mut self, src: VertexId, dst: VertexId, capacity: Capacity) -> Result<EdgeId> {
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(Error::InvalidCapacity(capacity));
        }
        if !self.contains_vertex(src) {
            return Err(Error::VertexNotFound(format!("源顶点 {}", src)));
        }
        if !self.contains_vertex(dst) {
            return Err(Error::VertexNotFound(format!("目标顶点 {}", dst)));
        }

        let id = EdgeId::new(self.edges.len());
        self.edges.push(Some(Edge::new(id, src, dst, capacity)));
        self.live_edges += 1;

        if let Some(v) = self.vertex_mut(src) {
            v.attach_outgoing(id);
        }
        if let Some(v) = self.vertex_mut(dst) {
            v.attach_incoming(id);
        }

        Ok(id)
    }

    /// 通过编码添加有向边
    pub fn add_edge_by_code(&mut self, src: &str, dst: &str, capacity: Capacity) -> Result<EdgeId> {
        let src_id = self
            .find_vertex(src)
            .ok_or_else(|| Error::VertexNotFound(src.to_string()))?;
        let dst_id = self
            .find_vertex(dst)
            .ok_or_else(|| Error::VertexNotFound(dst.to_string()))?;
        self.add_edge(src_id, dst_id, capacity)
    }

    /// 添加双向管道（两条独立的有向边）
    pub fn add_bidirectional_edge(
        &mut self,
        a: VertexId,
        b: VertexId,
        capacity: Capacity,
    ) -> Result<(EdgeId, EdgeId)> {
        let forward = self.add_edge(a, b, capacity)?;
        let backward = self.add_edge(b, a, capacity)?;
        Ok((forward, backward))
    }

    /// 获取边
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index()).and_then(Option::as_ref)
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// 所有存活的边（按创建顺序）
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().filter_map(Option::as_ref)
    }

    /// 获取顶点的所有出边
    pub fn outgoing_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.vertex(id)
            .map(Vertex::outgoing)
            .unwrap_or_default()
            .iter()
            .filter_map(move |&e| self.edge(e))
    }

    /// 获取顶点的所有入边
    pub fn incoming_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> + '_ {
        self.vertex(id)
            .map(Vertex::incoming)
            .unwrap_or_default()
            .iter()
            .filter_map(move |&e| self.edge(e))
    }

    /// 顶点出边容量之和
    pub fn outgoing_capacity(&self, id: VertexId) -> Capacity {
        self.outgoing_edges(id).map(Edge::capacity).sum()
    }

    /// 删除边
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge> {
        let edge = self
            .edges
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or_else(|| Error::EdgeNotFound(id.to_string()))?;
        self.live_edges -= 1;

        if let Some(v) = self.vertex_mut(edge.src()) {
            v.detach(id);
        }
        if let Some(v) = self.vertex_mut(edge.dst()) {
            v.detach(id);
        }

        Ok(edge)
    }

    /// 获取边数量
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// 将所有边的流量清零
    pub fn reset_flows(&mut self) {
        for edge in self.edges.iter_mut().flatten() {
            edge.reset_flow();
        }
    }

    fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
        self.vertices.get_mut(id.index()).and_then(Option::as_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (Graph, VertexId, VertexId, VertexId) {
        let mut graph = Graph::new();
        let a = graph.add_vertex("A", VertexRole::Reservoir).unwrap();
        let b = graph.add_vertex("B", VertexRole::PumpingStation).unwrap();
        let c = graph.add_vertex("C", VertexRole::City).unwrap();
        graph.add_edge(a, b, 5.0).unwrap();
        graph.add_edge(b, c, 3.0).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn test_graph_basic() {
        let (graph, a, b, c) = chain();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.find_vertex("B"), Some(b));
        assert_eq!(graph.find_vertex("Z"), None);
        assert_eq!(graph.code(c), Some("C"));

        let out: Vec<VertexId> = graph.outgoing_edges(a).map(|e| e.dst()).collect();
        assert_eq!(out, vec![b]);
        let inc: Vec<VertexId> = graph.incoming_edges(c).map(|e| e.src()).collect();
        assert_eq!(inc, vec![b]);
        assert_eq!(graph.vertices_with_role(VertexRole::City), vec![c]);
    }

    #[test]
    fn test_duplicate_vertex() {
        let (mut graph, _, _, _) = chain();
        let err = graph.add_vertex("A", VertexRole::City).unwrap_err();
        assert!(matches!(err, Error::VertexAlreadyExists(code) if code == "A"));
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_invalid_edges() {
        let (mut graph, a, _, _) = chain();
        assert!(matches!(
            graph.add_edge(a, VertexId::new(99), 1.0),
            Err(Error::VertexNotFound(_))
        ));
        assert!(matches!(
            graph.add_edge_by_code("A", "B", -1.0),
            Err(Error::InvalidCapacity(_))
        ));
        assert!(matches!(
            graph.add_edge_by_code("A", "B", f64::NAN),
            Err(Error::InvalidCapacity(_))
        ));
        // 零容量合法
        assert!(graph.add_edge_by_code("A", "C", 0.0).is_ok());
    }

    #[test]
    fn test_remove_vertex_detaches_edges() {
        let (mut graph, a, b, c) = chain();
        graph.add_edge(c, b, 2.0).unwrap();

        let removed = graph.remove_vertex(b).unwrap();
        assert_eq!(removed.code(), "B");
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.outgoing_edges(a).count(), 0);
        assert_eq!(graph.outgoing_edges(c).count(), 0);
        assert_eq!(graph.incoming_edges(c).count(), 0);
        assert!(graph.find_vertex("B").is_none());
        assert!(graph.vertex(b).is_none());

        // 句柄不复用
        let d = graph.add_vertex("B", VertexRole::PumpingStation).unwrap();
        assert_ne!(d, b);
        assert!(matches!(graph.remove_vertex(b), Err(Error::VertexNotFound(_))));
    }

    #[test]
    fn test_remove_vertex_with_self_loop() {
        let (mut graph, a, _, _) = chain();
        graph.add_edge(a, a, 1.0).unwrap();
        assert_eq!(graph.edge_count(), 3);

        graph.remove_vertex_by_code("A").unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_bidirectional_and_remove_edge() {
        let (mut graph, a, _, c) = chain();
        let (fwd, bwd) = graph.add_bidirectional_edge(a, c, 7.0).unwrap();
        assert_eq!(graph.edge(fwd).unwrap().dst(), c);
        assert_eq!(graph.edge(bwd).unwrap().dst(), a);
        assert_eq!(graph.outgoing_capacity(a), 12.0);

        graph.remove_edge(fwd).unwrap();
        assert!(graph.edge(fwd).is_none());
        assert_eq!(graph.outgoing_capacity(a), 5.0);
        assert!(matches!(graph.remove_edge(fwd), Err(Error::EdgeNotFound(_))));
    }

    #[test]
    fn test_reset_flows() {
        let (mut graph, _, _, _) = chain();
        let ids: Vec<EdgeId> = graph.edges().map(Edge::id).collect();
        for id in &ids {
            graph.edge_mut(*id).unwrap().add_flow(2.0);
        }
        graph.reset_flows();
        assert!(graph.edges().all(|e| e.flow() == 0.0));
    }
}
