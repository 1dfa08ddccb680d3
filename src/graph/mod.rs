//! 图核心模块
//!
//! 定义城镇、道路和图引擎的核心数据结构

mod graph;
mod index;
mod road;
mod town;

pub use graph::TownGraph;
pub use index::{RoadIndex, TownIndex};
pub use road::{EndpointPair, Road, RoadId, DEFAULT_WEIGHT};
pub use town::{Town, TownId};
