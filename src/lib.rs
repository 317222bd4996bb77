//! AquaGraph - 供水网络最大流分析引擎
//!
//! 面向水库、泵站与城市组成的有向容量网络，支持：
//! - 残量图存储，按编码 O(1) 查找顶点
//! - Edmonds-Karp 最大流与最小割
//! - 简单路径枚举及瓶颈分析
//! - CSV 批量导入

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod types;

// 重导出常用类型
pub use algorithm::{EdmondsKarp, MaxFlow, PathFinder, PathResult};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use types::{Capacity, VertexRole};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
