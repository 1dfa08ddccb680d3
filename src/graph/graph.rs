//! 图数据结构
//!
//! 内存图引擎：城镇与道路存放在按插入序迭代的 arena 中，
//! 名称与邻接通过索引解析。单线程同步模型，所有变更
//! 都经由 `&mut self` 的操作入口。

use super::index::{RoadIndex, TownIndex};
use super::road::{EndpointPair, Road, RoadId};
use super::town::{Town, TownId};
use crate::error::{Error, Result};
use crate::metrics::global_metrics;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// 城镇图
///
/// 不变式：任何道路的两端都必须是图中现存的城镇；
/// 每对城镇之间至多一条道路。
#[derive(Debug, Default)]
pub struct TownGraph {
    /// 城镇 arena（插入序稳定）
    towns: IndexMap<TownId, Town>,
    /// 道路 arena（插入序稳定）
    roads: IndexMap<RoadId, Road>,
    /// 城镇名称索引
    town_index: TownIndex,
    /// 道路邻接索引
    road_index: RoadIndex,
    /// 下一个城镇 ID
    next_town_id: u64,
    /// 下一个道路 ID
    next_road_id: u64,
}

impl TownGraph {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            towns: IndexMap::new(),
            roads: IndexMap::new(),
            town_index: TownIndex::new(),
            road_index: RoadIndex::new(),
            next_town_id: 1,
            next_road_id: 1,
        }
    }

    // ==================== 城镇操作 ====================

    /// 添加城镇
    ///
    /// 已存在同名城镇时返回 `Ok(false)` 并保持图不变；
    /// 空名称视为缺失标识，拒绝。
    pub fn add_town(&mut self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Err(Error::MissingEndpoint("城镇名称为空".to_string()));
        }
        if self.town_index.contains_name(name) {
            return Ok(false);
        }

        let id = TownId::new(self.next_town_id);
        self.next_town_id += 1;

        self.town_index.add_name(name, id);
        self.towns.insert(id, Town::new(id, name));
        global_metrics().record_town_insert();
        debug!(town = name, id = id.as_u64(), "添加城镇");

        Ok(true)
    }

    /// 名称是否对应图中城镇
    pub fn contains_town(&self, name: &str) -> bool {
        self.town_index.contains_name(name)
    }

    /// 通过名称查找城镇 ID
    pub fn town_id(&self, name: &str) -> Option<TownId> {
        self.town_index.get_by_name(name)
    }

    /// 获取城镇
    pub fn town(&self, id: TownId) -> Option<&Town> {
        self.towns.get(&id)
    }

    /// 获取城镇名称
    pub fn town_name(&self, id: TownId) -> Option<&str> {
        self.towns.get(&id).map(|t| t.name())
    }

    /// 删除城镇，级联删除所有触及它的道路
    ///
    /// 城镇不存在时返回 `false`，不视为错误。
    pub fn remove_town(&mut self, name: &str) -> bool {
        let Some(id) = self.town_index.get_by_name(name) else {
            return false;
        };

        let touching: Vec<RoadId> = self.road_index.touching(id).to_vec();
        for road_id in touching {
            self.road_index.remove(road_id);
            self.roads.shift_remove(&road_id);
            global_metrics().record_road_remove();
        }

        self.town_index.remove(name);
        self.towns.shift_remove(&id);
        global_metrics().record_town_remove();
        debug!(town = name, "删除城镇及其所有道路");

        true
    }

    /// 获取城镇数量
    pub fn town_count(&self) -> usize {
        self.towns.len()
    }

    /// 按插入序迭代所有城镇
    pub fn towns(&self) -> impl Iterator<Item = &Town> {
        self.towns.values()
    }

    // ==================== 道路操作 ====================

    /// 添加道路
    ///
    /// 两端必须是图中现存且不同的城镇。该端点对已有道路时
    /// 返回 `Ok(None)`，既有道路的权重与名称保持不变
    /// （集合语义静默去重）。
    pub fn add_road(
        &mut self,
        a: &str,
        b: &str,
        weight: u32,
        label: &str,
    ) -> Result<Option<RoadId>> {
        let a_id = self.require_town(a)?;
        let b_id = self.require_town(b)?;
        if a_id == b_id {
            warn!(town = a, "拒绝自环道路");
            return Err(Error::InvalidEndpoint(a.to_string()));
        }

        let pair = EndpointPair::new(a_id, b_id);
        if self.road_index.get_by_pair(pair).is_some() {
            debug!(a, b, "端点对已有道路，忽略");
            return Ok(None);
        }

        let id = RoadId::new(self.next_road_id);
        self.next_road_id += 1;

        self.road_index.add_road(id, pair);
        self.roads.insert(id, Road::new(id, a_id, b_id, weight, label));
        global_metrics().record_road_insert();
        debug!(a, b, weight, label, "添加道路");

        Ok(Some(id))
    }

    /// 获取连接两个城镇的道路（方向无关）
    pub fn get_road(&self, a: &str, b: &str) -> Option<&Road> {
        let a_id = self.town_index.get_by_name(a)?;
        let b_id = self.town_index.get_by_name(b)?;
        let road_id = self.road_index.get_by_pair(EndpointPair::new(a_id, b_id))?;
        self.roads.get(&road_id)
    }

    /// 两个城镇之间是否有道路
    pub fn contains_road(&self, a: &str, b: &str) -> bool {
        self.get_road(a, b).is_some()
    }

    /// 获取道路
    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    /// 删除道路
    ///
    /// 按端点对匹配；给定权重时必须与现有道路一致，
    /// 给定名称时必须与现有道路一致，省略的参数跳过检查。
    /// 匹配成功返回被删除的道路，否则返回 `None`。
    pub fn remove_road(
        &mut self,
        a: &str,
        b: &str,
        weight: Option<u32>,
        label: Option<&str>,
    ) -> Option<Road> {
        let a_id = self.town_index.get_by_name(a)?;
        let b_id = self.town_index.get_by_name(b)?;
        let road_id = self.road_index.get_by_pair(EndpointPair::new(a_id, b_id))?;

        {
            let road = self.roads.get(&road_id)?;
            if let Some(w) = weight {
                if w != road.weight() {
                    return None;
                }
            }
            if let Some(l) = label {
                if l != road.label() {
                    return None;
                }
            }
        }

        self.road_index.remove(road_id);
        let removed = self.roads.shift_remove(&road_id);
        global_metrics().record_road_remove();
        debug!(a, b, "删除道路");
        removed
    }

    /// 获取触及城镇的所有道路
    ///
    /// 城镇不存在时报 `InvalidEndpoint`。
    pub fn roads_of(&self, name: &str) -> Result<Vec<&Road>> {
        let id = self
            .town_index
            .get_by_name(name)
            .ok_or_else(|| Error::InvalidEndpoint(name.to_string()))?;
        Ok(self.roads_of_id(id))
    }

    /// 按 ID 获取触及城镇的所有道路（假定 ID 有效）
    pub fn roads_of_id(&self, id: TownId) -> Vec<&Road> {
        self.road_index
            .touching(id)
            .iter()
            .filter_map(|road_id| self.roads.get(road_id))
            .collect()
    }

    /// 获取城镇的度数
    pub fn degree(&self, id: TownId) -> usize {
        self.road_index.degree(id)
    }

    /// 获取道路数量
    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    /// 按插入序迭代所有道路
    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    /// 获取邻居城镇名称
    pub fn neighbors(&self, name: &str) -> Result<Vec<&str>> {
        let id = self
            .town_index
            .get_by_name(name)
            .ok_or_else(|| Error::InvalidEndpoint(name.to_string()))?;
        Ok(self
            .road_index
            .neighbors(id)
            .into_iter()
            .filter_map(|t| self.town_name(t))
            .collect())
    }

    fn require_town(&self, name: &str) -> Result<TownId> {
        if name.is_empty() {
            return Err(Error::MissingEndpoint("城镇名称为空".to_string()));
        }
        self.town_index
            .get_by_name(name)
            .ok_or_else(|| Error::InvalidEndpoint(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_towns(names: &[&str]) -> TownGraph {
        let mut graph = TownGraph::new();
        for name in names {
            graph.add_town(name).unwrap();
        }
        graph
    }

    #[test]
    fn test_add_town_idempotent() {
        let mut graph = TownGraph::new();

        assert!(graph.add_town("Springfield").unwrap());
        assert!(!graph.add_town("Springfield").unwrap());
        assert_eq!(graph.town_count(), 1);
        assert!(graph.contains_town("Springfield"));
    }

    #[test]
    fn test_add_town_empty_name_rejected() {
        let mut graph = TownGraph::new();
        assert!(matches!(
            graph.add_town(""),
            Err(Error::MissingEndpoint(_))
        ));
    }

    #[test]
    fn test_add_road_symmetry() {
        let mut graph = graph_with_towns(&["A", "B"]);
        graph.add_road("A", "B", 5, "Route 1").unwrap();

        // 两个方向都查到同一条道路
        let ab = graph.get_road("A", "B").unwrap();
        assert_eq!(ab.label(), "Route 1");
        assert_eq!(ab.weight(), 5);
        let ba = graph.get_road("B", "A").unwrap();
        assert_eq!(ab.id(), ba.id());
    }

    #[test]
    fn test_add_road_dedup_keeps_first() {
        let mut graph = graph_with_towns(&["A", "B"]);

        let first = graph.add_road("A", "B", 5, "Route 1").unwrap();
        assert!(first.is_some());
        // 第二条同端点对的道路被忽略，名称权重不同也一样
        let second = graph.add_road("B", "A", 99, "Route 2").unwrap();
        assert!(second.is_none());

        assert_eq!(graph.road_count(), 1);
        let road = graph.get_road("A", "B").unwrap();
        assert_eq!(road.weight(), 5);
        assert_eq!(road.label(), "Route 1");
    }

    #[test]
    fn test_add_road_missing_town() {
        let mut graph = graph_with_towns(&["A"]);
        assert!(matches!(
            graph.add_road("A", "B", 3, "Route"),
            Err(Error::InvalidEndpoint(_))
        ));
        assert!(matches!(
            graph.add_road("", "A", 3, "Route"),
            Err(Error::MissingEndpoint(_))
        ));
    }

    #[test]
    fn test_add_road_self_loop_rejected() {
        let mut graph = graph_with_towns(&["A"]);
        assert!(matches!(
            graph.add_road("A", "A", 3, "Loop"),
            Err(Error::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_remove_road_match_policy() {
        let mut graph = graph_with_towns(&["A", "B"]);
        graph.add_road("A", "B", 5, "Route 1").unwrap();

        // 权重不符不删除
        assert!(graph.remove_road("A", "B", Some(7), None).is_none());
        // 名称不符不删除
        assert!(graph.remove_road("A", "B", None, Some("Route 2")).is_none());
        assert_eq!(graph.road_count(), 1);

        // 省略名称则跳过名称检查
        let removed = graph.remove_road("A", "B", Some(5), None).unwrap();
        assert_eq!(removed.label(), "Route 1");
        assert_eq!(graph.road_count(), 0);
        assert!(graph.roads_of("A").unwrap().is_empty());
        assert!(graph.roads_of("B").unwrap().is_empty());
    }

    #[test]
    fn test_remove_town_cascades() {
        let mut graph = graph_with_towns(&["A", "B", "C", "D"]);
        graph.add_road("A", "B", 1, "AB").unwrap();
        graph.add_road("A", "C", 2, "AC").unwrap();
        graph.add_road("B", "C", 3, "BC").unwrap();
        graph.add_road("C", "D", 4, "CD").unwrap();

        // A 触及 2 条道路，删除后边集正好减少 2
        assert!(graph.remove_town("A"));

        assert_eq!(graph.town_count(), 3);
        assert_eq!(graph.road_count(), 2);
        assert!(graph.get_road("B", "C").is_some());
        assert!(graph.get_road("C", "D").is_some());
        // 邻居的邻接表不再包含 A 的道路
        assert_eq!(graph.roads_of("B").unwrap().len(), 1);
        assert_eq!(graph.roads_of("C").unwrap().len(), 2);
    }

    #[test]
    fn test_remove_absent_town() {
        let mut graph = TownGraph::new();
        assert!(!graph.remove_town("Nowhere"));
    }

    #[test]
    fn test_roads_of_unknown_town() {
        let graph = TownGraph::new();
        assert!(matches!(
            graph.roads_of("Nowhere"),
            Err(Error::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_neighbors() {
        let mut graph = graph_with_towns(&["A", "B", "C"]);
        graph.add_road("A", "B", 1, "AB").unwrap();
        graph.add_road("A", "C", 2, "AC").unwrap();

        let mut names = graph.neighbors("A").unwrap();
        names.sort_unstable();
        assert_eq!(names, vec!["B", "C"]);
    }
}
