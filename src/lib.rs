//! TownGraph - 城镇道路网络图引擎
//!
//! 管理带名称、带距离的无向道路网络，支持：
//! - 城镇与道路的增删查改
//! - 最短路径计算与人类可读的路径描述
//! - 行式道路文件批量导入
//! - 交互式命令行界面

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod manager;
pub mod metrics;

// 重导出常用类型
pub use algorithm::{RouteFinder, RouteLeg, RouteStep, RouteTable};
pub use error::{Error, Result};
pub use graph::{EndpointPair, Road, RoadId, Town, TownGraph, TownId, DEFAULT_WEIGHT};
pub use import::{ImportStats, RoadFileImporter};
pub use manager::TownGraphManager;

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
