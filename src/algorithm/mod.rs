//! 图算法模块
//!
//! 包含增广路径、最大流和路径追踪算法

mod augmenting_path;
mod max_flow;
mod path_tracing;

pub use augmenting_path::{
    find_augmenting_path, residual_reachable, AugmentingPath, Direction, ResidualStep,
};
pub use max_flow::{EdmondsKarp, MaxFlow, SourceFlow};
pub use path_tracing::{PathFinder, PathResult};
