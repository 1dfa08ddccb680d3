//! 图管理门面
//!
//! 以字符串为参数的便捷层：把城镇名翻译成图引擎操作，
//! 并在查询边界做存在性预检。引擎本身假定收到的 ID 有效。

use crate::algorithm::{RouteFinder, RouteStep};
use crate::error::Result;
use crate::graph::{TownGraph, DEFAULT_WEIGHT};
use crate::import::{ImportStats, RoadFileImporter};
use crate::metrics::global_metrics;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

/// 城镇图管理器
#[derive(Debug, Default)]
pub struct TownGraphManager {
    graph: TownGraph,
}

impl TownGraphManager {
    /// 创建空图的管理器
    pub fn new() -> Self {
        Self {
            graph: TownGraph::new(),
        }
    }

    /// 获取底层图引擎
    pub fn graph(&self) -> &TownGraph {
        &self.graph
    }

    /// 添加城镇；已存在时返回 `Ok(false)`
    pub fn add_town(&mut self, name: &str) -> Result<bool> {
        self.graph.add_town(name)
    }

    /// 城镇是否在图中
    pub fn contains_town(&self, name: &str) -> bool {
        self.graph.contains_town(name)
    }

    /// 添加道路，必要时先补齐两端城镇
    ///
    /// 端点对已有道路时返回 `Ok(false)`。
    pub fn add_road(&mut self, town1: &str, town2: &str, weight: u32, label: &str) -> Result<bool> {
        self.graph.add_town(town1)?;
        self.graph.add_town(town2)?;
        Ok(self.graph.add_road(town1, town2, weight, label)?.is_some())
    }

    /// 添加默认距离的道路（未给出距离时距离为 1）
    pub fn add_connector(&mut self, town1: &str, town2: &str, label: &str) -> Result<bool> {
        self.add_road(town1, town2, DEFAULT_WEIGHT, label)
    }

    /// 查询连接两个城镇的道路名称
    pub fn get_road(&self, town1: &str, town2: &str) -> Option<String> {
        self.graph
            .get_road(town1, town2)
            .map(|r| r.label().to_string())
    }

    /// 两个城镇之间是否有道路
    pub fn contains_road_connection(&self, town1: &str, town2: &str) -> bool {
        self.graph.contains_road(town1, town2)
    }

    /// 删除连接两个城镇的道路
    ///
    /// 按端点对找到道路后，用其现有权重与给定名称做匹配删除。
    pub fn delete_road_connection(&mut self, town1: &str, town2: &str, label: &str) -> bool {
        let Some(weight) = self.graph.get_road(town1, town2).map(|r| r.weight()) else {
            return false;
        };
        self.graph
            .remove_road(town1, town2, Some(weight), Some(label))
            .is_some()
    }

    /// 删除城镇及其所有道路
    pub fn delete_town(&mut self, name: &str) -> bool {
        self.graph.remove_town(name)
    }

    /// 所有城镇名称，按字典序排序
    pub fn all_towns(&self) -> Vec<String> {
        let mut names: Vec<String> = self.graph.towns().map(|t| t.name().to_string()).collect();
        names.sort_unstable();
        names
    }

    /// 所有道路名称，按字典序排序
    pub fn all_roads(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.graph.roads().map(|r| r.label().to_string()).collect();
        labels.sort_unstable();
        labels
    }

    /// 计算两个城镇之间的最短路径，渲染为步骤描述
    ///
    /// 任一城镇不存在或孤立、或两者不连通时返回空序列，
    /// 不报错。
    pub fn get_path(&self, town1: &str, town2: &str) -> Vec<String> {
        let metrics = global_metrics();
        let timer = metrics.record_path_query_start();

        let steps = self.find_steps(town1, town2);
        metrics.record_path_query_complete(timer, !steps.is_empty());

        steps.iter().map(|s| s.to_string()).collect()
    }

    fn find_steps(&self, town1: &str, town2: &str) -> Vec<RouteStep> {
        let (Some(src), Some(dst)) = (self.graph.town_id(town1), self.graph.town_id(town2)) else {
            debug!(town1, town2, "路径查询的城镇不存在");
            return Vec::new();
        };
        // 门面预检：孤立端点直接判为无路径
        if self.graph.degree(src) == 0 || self.graph.degree(dst) == 0 {
            return Vec::new();
        }

        RouteFinder::new(&self.graph).shortest_path_steps(src, dst)
    }

    /// 从道路文件填充图（`名称,距离;城镇1;城镇2` 的行格式）
    pub fn populate_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        RoadFileImporter::new(self).import_file(path)
    }

    /// 从任意带缓冲的读取器填充图
    pub fn populate_reader<R: BufRead>(&mut self, reader: R) -> Result<ImportStats> {
        RoadFileImporter::new(self).import_reader(reader)
    }
}
