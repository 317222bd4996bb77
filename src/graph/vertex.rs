//! 顶点定义
//!
//! 供水网络的顶点：水库、泵站、城市

use crate::graph::edge::EdgeId;
use crate::types::VertexRole;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID（图内顶点槽位下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub usize);

impl VertexId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// 顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// 顶点 ID
    id: VertexId,
    /// 唯一编码
    code: String,
    /// 角色
    role: VertexRole,
    /// 出边
    outgoing: Vec<EdgeId>,
    /// 入边（用于反向残量）
    incoming: Vec<EdgeId>,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(id: VertexId, code: impl Into<String>, role: VertexRole) -> Self {
        Self {
            id,
            code: code.into(),
            role,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// 获取顶点 ID
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// 获取顶点编码
    pub fn code(&self) -> &str {
        &self.code
    }

    /// 获取顶点角色
    pub fn role(&self) -> VertexRole {
        self.role
    }

    /// 出边列表（按插入顺序）
    pub fn outgoing(&self) -> &[EdgeId] {
        &self.outgoing
    }

    /// 入边列表（按插入顺序）
    pub fn incoming(&self) -> &[EdgeId] {
        &self.incoming
    }

    pub fn out_degree(&self) -> usize {
        self.outgoing.len()
    }

    pub fn in_degree(&self) -> usize {
        self.incoming.len()
    }

    pub(crate) fn attach_outgoing(&mut self, edge: EdgeId) {
        self.outgoing.push(edge);
    }

    pub(crate) fn attach_incoming(&mut self, edge: EdgeId) {
        self.incoming.push(edge);
    }

    pub(crate) fn detach(&mut self, edge: EdgeId) {
        self.outgoing.retain(|&e| e != edge);
        self.incoming.retain(|&e| e != edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_adjacency() {
        let mut v = Vertex::new(VertexId::new(0), "R_1", VertexRole::Reservoir);
        v.attach_outgoing(EdgeId::new(3));
        v.attach_outgoing(EdgeId::new(5));
        v.attach_incoming(EdgeId::new(5));

        assert_eq!(v.code(), "R_1");
        assert_eq!(v.role(), VertexRole::Reservoir);
        assert_eq!(v.out_degree(), 2);

        v.detach(EdgeId::new(5));
        assert_eq!(v.outgoing(), &[EdgeId::new(3)]);
        assert!(v.incoming().is_empty());
    }
}
