//! 边定义
//!
//! 管道：有向、带容量与当前流量

use crate::graph::vertex::VertexId;
use crate::types::{Capacity, EPSILON};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边 ID（图内边槽位下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn new(id: usize) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for EdgeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// 边
///
/// 不变量：`0 <= flow <= capacity`。反向残量边不单独存储，
/// 其残量即为正向边的当前流量。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// 边 ID
    id: EdgeId,
    /// 源顶点 ID
    src: VertexId,
    /// 目标顶点 ID
    dst: VertexId,
    /// 容量
    capacity: Capacity,
    /// 当前流量
    flow: Capacity,
}

impl Edge {
    /// 创建新边（流量为 0）
    pub fn new(id: EdgeId, src: VertexId, dst: VertexId, capacity: Capacity) -> Self {
        Self {
            id,
            src,
            dst,
            capacity,
            flow: 0.0,
        }
    }

    /// 获取边 ID
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// 获取源顶点 ID
    pub fn src(&self) -> VertexId {
        self.src
    }

    /// 获取目标顶点 ID
    pub fn dst(&self) -> VertexId {
        self.dst
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn flow(&self) -> Capacity {
        self.flow
    }

    /// 正向残量
    pub fn residual(&self) -> Capacity {
        self.capacity - self.flow
    }

    /// 与容量成比例的浮点容差，容量再小也不会把正残量当作 0
    fn tolerance(&self) -> Capacity {
        self.capacity * EPSILON
    }

    /// 正向是否还能推流
    pub fn has_residual(&self) -> bool {
        self.residual() > self.tolerance()
    }

    /// 是否承载正流量（反向残量为正）
    pub fn has_flow(&self) -> bool {
        self.flow > self.tolerance()
    }

    /// 流量是否已达容量上限
    pub fn is_saturated(&self) -> bool {
        !self.has_residual()
    }

    /// 调整流量，结果被夹在 [0, capacity] 内以吸收浮点误差
    pub(crate) fn add_flow(&mut self, delta: Capacity) {
        let next = self.flow + delta;
        let slack = EPSILON * self.capacity.max(1.0);
        debug_assert!(
            next >= -slack && next <= self.capacity + slack,
            "边 {} 流量越界: {} (容量 {})",
            self.id,
            next,
            self.capacity
        );
        self.flow = next.clamp(0.0, self.capacity);
    }

    pub(crate) fn reset_flow(&mut self) {
        self.flow = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_residual() {
        let mut e = Edge::new(EdgeId::new(1), VertexId::new(0), VertexId::new(1), 10.0);

        assert_eq!(e.residual(), 10.0);
        e.add_flow(4.0);
        assert_eq!(e.flow(), 4.0);
        assert_eq!(e.residual(), 6.0);
        assert!(!e.is_saturated());

        e.add_flow(6.0);
        assert!(e.is_saturated());

        e.add_flow(-10.0);
        assert_eq!(e.flow(), 0.0);
    }

    #[test]
    fn test_tiny_capacity_is_open() {
        let mut e = Edge::new(EdgeId::new(2), VertexId::new(0), VertexId::new(1), 1e-10);
        assert!(e.has_residual());
        assert!(!e.has_flow());

        e.add_flow(1e-10);
        assert!(e.has_flow());
        assert!(e.is_saturated());

        let closed = Edge::new(EdgeId::new(3), VertexId::new(0), VertexId::new(1), 0.0);
        assert!(closed.is_saturated());
    }

    #[test]
    fn test_edge_reset() {
        let mut e = Edge::new(EdgeId::new(1), VertexId::new(0), VertexId::new(1), 3.0);
        e.add_flow(3.0);
        e.reset_flow();
        assert_eq!(e.flow(), 0.0);
        assert_eq!(e.capacity(), 3.0);
    }
}
