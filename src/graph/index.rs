//! 图索引
//!
//! 顶点编码与角色的内存索引，支持 O(1) 查找

use crate::graph::vertex::VertexId;
use crate::types::VertexRole;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// 顶点索引
#[derive(Debug, Default, Clone)]
pub struct VertexIndex {
    /// 编码到顶点 ID 的映射（保持插入顺序）
    code_to_id: IndexMap<String, VertexId>,
    /// 角色到顶点 ID 集合的映射
    role_to_ids: HashMap<VertexRole, IndexSet<VertexId>>,
}

impl VertexIndex {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 编码是否已存在
    pub fn contains(&self, code: &str) -> bool {
        self.code_to_id.contains_key(code)
    }

    /// 添加顶点
    pub fn insert(&mut self, code: String, role: VertexRole, vertex_id: VertexId) {
        self.code_to_id.insert(code, vertex_id);
        self.role_to_ids.entry(role).or_default().insert(vertex_id);
    }

    /// 通过编码查找顶点
    pub fn get_by_code(&self, code: &str) -> Option<VertexId> {
        self.code_to_id.get(code).copied()
    }

    /// 获取角色下的所有顶点（按插入顺序）
    pub fn get_by_role(&self, role: VertexRole) -> Vec<VertexId> {
        self.role_to_ids
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// 移除顶点
    pub fn remove(&mut self, code: &str, role: VertexRole, vertex_id: VertexId) {
        self.code_to_id.shift_remove(code);
        if let Some(set) = self.role_to_ids.get_mut(&role) {
            set.shift_remove(&vertex_id);
        }
    }

    /// 所有顶点 ID（按插入顺序）
    pub fn ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.code_to_id.values().copied()
    }

    /// 获取顶点数量
    pub fn len(&self) -> usize {
        self.code_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code_to_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_insert_and_remove() {
        let mut index = VertexIndex::new();
        index.insert("R_1".to_string(), VertexRole::Reservoir, VertexId::new(0));
        index.insert("C_1".to_string(), VertexRole::City, VertexId::new(1));
        index.insert("R_2".to_string(), VertexRole::Reservoir, VertexId::new(2));

        assert_eq!(index.get_by_code("C_1"), Some(VertexId::new(1)));
        assert_eq!(
            index.get_by_role(VertexRole::Reservoir),
            vec![VertexId::new(0), VertexId::new(2)]
        );

        index.remove("R_1", VertexRole::Reservoir, VertexId::new(0));
        assert!(!index.contains("R_1"));
        assert_eq!(index.get_by_role(VertexRole::Reservoir), vec![VertexId::new(2)]);
        assert_eq!(index.ids().collect::<Vec<_>>(), vec![VertexId::new(1), VertexId::new(2)]);
    }
}
