//! 图算法模块
//!
//! 包含单源最短路径与路径重构

mod shortest_path;

pub use shortest_path::{RouteFinder, RouteLeg, RouteStep, RouteTable};
