//! 图索引
//!
//! 城镇与道路的内存索引：名称到 ID 的映射、无向邻接表、
//! 端点对到道路的映射。邻接表替代了原设计中城镇之间的
//! 相互引用。

use crate::graph::road::{EndpointPair, RoadId};
use crate::graph::town::TownId;
use smallvec::SmallVec;
use std::collections::HashMap;

/// 城镇索引
#[derive(Debug, Default)]
pub struct TownIndex {
    /// 名称到城镇 ID 的映射（区分大小写，精确匹配）
    name_to_id: HashMap<String, TownId>,
}

impl TownIndex {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加名称索引
    pub fn add_name(&mut self, name: impl Into<String>, town_id: TownId) {
        self.name_to_id.insert(name.into(), town_id);
    }

    /// 通过名称查找城镇
    pub fn get_by_name(&self, name: &str) -> Option<TownId> {
        self.name_to_id.get(name).copied()
    }

    /// 名称是否已注册
    pub fn contains_name(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// 移除城镇
    pub fn remove(&mut self, name: &str) -> Option<TownId> {
        self.name_to_id.remove(name)
    }
}

/// 道路索引
#[derive(Debug, Default)]
pub struct RoadIndex {
    /// 城镇到触及道路的映射（无向邻接表）
    touching: HashMap<TownId, SmallVec<[RoadId; 4]>>,
    /// 规范化端点对到道路的映射（每对城镇至多一条道路）
    pair_to_road: HashMap<EndpointPair, RoadId>,
    /// 道路 ID 到端点对的映射
    road_endpoints: HashMap<RoadId, EndpointPair>,
}

impl RoadIndex {
    /// 创建新索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加道路，两端的邻接表同时更新
    pub fn add_road(&mut self, road_id: RoadId, pair: EndpointPair) {
        self.touching.entry(pair.lo()).or_default().push(road_id);
        self.touching.entry(pair.hi()).or_default().push(road_id);
        self.pair_to_road.insert(pair, road_id);
        self.road_endpoints.insert(road_id, pair);
    }

    /// 获取触及城镇的所有道路
    pub fn touching(&self, town_id: TownId) -> &[RoadId] {
        self.touching
            .get(&town_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// 通过端点对查找道路（两个方向得到同一条）
    pub fn get_by_pair(&self, pair: EndpointPair) -> Option<RoadId> {
        self.pair_to_road.get(&pair).copied()
    }

    /// 获取道路的端点对
    pub fn get_endpoints(&self, road_id: RoadId) -> Option<EndpointPair> {
        self.road_endpoints.get(&road_id).copied()
    }

    /// 移除道路，两端的邻接表同时回收
    pub fn remove(&mut self, road_id: RoadId) {
        if let Some(pair) = self.road_endpoints.remove(&road_id) {
            // SmallVec::retain 传入 &mut T，与 Vec::retain 的签名不同
            if let Some(roads) = self.touching.get_mut(&pair.lo()) {
                roads.retain(|id| *id != road_id);
            }
            if let Some(roads) = self.touching.get_mut(&pair.hi()) {
                roads.retain(|id| *id != road_id);
            }
            self.pair_to_road.remove(&pair);
        }
    }

    /// 获取城镇的度数
    pub fn degree(&self, town_id: TownId) -> usize {
        self.touching.get(&town_id).map(|v| v.len()).unwrap_or(0)
    }

    /// 获取邻居城镇
    pub fn neighbors(&self, town_id: TownId) -> Vec<TownId> {
        self.touching(town_id)
            .iter()
            .filter_map(|&road_id| {
                self.get_endpoints(road_id)
                    .and_then(|pair| pair.other(town_id))
            })
            .collect()
    }
}
