//! 单源最短路径算法
//!
//! 贪心-松弛变体：前沿中的每个城镇提名其最便宜的未用道路，
//! 全局最便宜的提名胜出并定点其对端；每次定点后对触及的
//! 道路做松弛，严格更优时覆盖已有记录。每个已达城镇保留
//! 一条结构化记录（前驱、经由道路、累计距离），字符串渲染
//! 只发生在表示边界。

use crate::graph::{RoadId, TownGraph, TownId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 最短路径表中的一条记录：到达 `to` 的当前最优方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteLeg {
    /// 前驱城镇
    pub from: TownId,
    /// 经由道路；源点自身记录为 None
    pub via: Option<RoadId>,
    /// 到达城镇（表的键）
    pub to: TownId,
    /// 该段道路的距离
    pub leg_weight: u32,
    /// 从源点出发的累计距离
    pub total_weight: u64,
}

impl RouteLeg {
    fn origin(source: TownId) -> Self {
        Self {
            from: source,
            via: None,
            to: source,
            leg_weight: 0,
            total_weight: 0,
        }
    }
}

/// 单源最短路径表，按到达城镇为键
#[derive(Debug, Clone)]
pub struct RouteTable {
    source: TownId,
    legs: IndexMap<TownId, RouteLeg>,
}

impl RouteTable {
    /// 获取源点
    pub fn source(&self) -> TownId {
        self.source
    }

    /// 获取到达指定城镇的记录
    pub fn leg(&self, to: TownId) -> Option<&RouteLeg> {
        self.legs.get(&to)
    }

    /// 获取到达指定城镇的累计距离；不可达时为 None
    pub fn distance(&self, to: TownId) -> Option<u64> {
        self.legs.get(&to).map(|l| l.total_weight)
    }

    /// 迭代所有记录
    pub fn legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.legs.values()
    }
}

/// 渲染后的一步路径描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStep {
    pub from: String,
    /// 经由道路名称；源点自身记录为 None，渲染为 NONE
    pub via: Option<String>,
    pub to: String,
    pub weight: u32,
}

impl RouteStep {
    /// 从结构化记录渲染一步描述
    pub fn from_leg(leg: &RouteLeg, graph: &TownGraph) -> Self {
        Self {
            from: graph.town_name(leg.from).unwrap_or_default().to_string(),
            via: leg
                .via
                .and_then(|id| graph.road(id))
                .map(|r| r.label().to_string()),
            to: graph.town_name(leg.to).unwrap_or_default().to_string(),
            weight: leg.leg_weight,
        }
    }
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.via {
            Some(label) => write!(
                f,
                "{} via {} to {} {} mi",
                self.from, label, self.to, self.weight
            ),
            None => write!(f, "{} via NONE to {} 0 mi", self.from, self.to),
        }
    }
}

/// 前沿城镇的提名：它最便宜的一条可用道路
struct Nomination {
    weight: u32,
    near: TownId,
    far: TownId,
    road: RoadId,
}

/// 最短路径查找器
pub struct RouteFinder<'g> {
    graph: &'g TownGraph,
}

impl<'g> RouteFinder<'g> {
    /// 创建查找器
    pub fn new(graph: &'g TownGraph) -> Self {
        Self { graph }
    }

    /// 从源点计算整张图的最短路径表
    ///
    /// 调用方保证源点 ID 有效；不可达的城镇不出现在表中。
    /// 平局裁决：按 (距离, 对端名称, 本端名称) 升序取最小，
    /// 与哈希迭代顺序无关。
    pub fn route_tree(&self, source: TownId) -> RouteTable {
        let mut legs: IndexMap<TownId, RouteLeg> = IndexMap::new();
        legs.insert(source, RouteLeg::origin(source));

        // 播种：源点的每条触及道路为对端建立候选记录
        for road in self.graph.roads_of_id(source) {
            let Some(far) = road.other(source) else {
                continue;
            };
            legs.insert(
                far,
                RouteLeg {
                    from: source,
                    via: Some(road.id()),
                    to: far,
                    leg_weight: road.weight(),
                    total_weight: road.weight() as u64,
                },
            );
        }

        let mut settled: HashSet<TownId> = HashSet::new();
        settled.insert(source);
        let mut frontier: Vec<TownId> = vec![source];
        let mut used: HashSet<RoadId> = HashSet::new();

        while settled.len() != self.graph.town_count() && !frontier.is_empty() {
            let mut nominations: Vec<Nomination> = Vec::new();
            let mut exhausted: Vec<TownId> = Vec::new();

            for &near in &frontier {
                match self.nominate(near, &settled, &used) {
                    Some(n) => nominations.push(n),
                    // 没有可用道路的前沿城镇退出考虑
                    None => exhausted.push(near),
                }
            }
            frontier.retain(|t| !exhausted.contains(t));

            let Some(winner) = nominations
                .into_iter()
                .min_by(|x, y| self.nomination_order(x, y))
            else {
                break;
            };

            used.insert(winner.road);
            settled.insert(winner.far);
            frontier.push(winner.far);

            self.relax(winner.far, &mut legs);
        }

        RouteTable { source, legs }
    }

    /// 前沿城镇提名其最便宜的未用道路（对端尚未定点）
    fn nominate(
        &self,
        near: TownId,
        settled: &HashSet<TownId>,
        used: &HashSet<RoadId>,
    ) -> Option<Nomination> {
        let mut best: Option<Nomination> = None;
        for road in self.graph.roads_of_id(near) {
            if used.contains(&road.id()) {
                continue;
            }
            let Some(far) = road.other(near) else {
                continue;
            };
            if settled.contains(&far) {
                continue;
            }
            let candidate = Nomination {
                weight: road.weight(),
                near,
                far,
                road: road.id(),
            };
            let replace = match &best {
                None => true,
                Some(b) => self.nomination_order(&candidate, b) == std::cmp::Ordering::Less,
            };
            if replace {
                best = Some(candidate);
            }
        }
        best
    }

    fn nomination_order(&self, x: &Nomination, y: &Nomination) -> std::cmp::Ordering {
        let name = |id: TownId| self.graph.town_name(id).unwrap_or_default();
        x.weight
            .cmp(&y.weight)
            .then_with(|| name(x.far).cmp(name(y.far)))
            .then_with(|| name(x.near).cmp(name(y.near)))
    }

    /// 定点后松弛新城镇触及的每条道路
    fn relax(&self, settled_town: TownId, legs: &mut IndexMap<TownId, RouteLeg>) {
        let Some(base_total) = legs.get(&settled_town).map(|l| l.total_weight) else {
            return;
        };

        for road in self.graph.roads_of_id(settled_town) {
            let Some(neighbor) = road.other(settled_town) else {
                continue;
            };
            let candidate_total = base_total + road.weight() as u64;
            let improves = match legs.get(&neighbor) {
                None => true,
                // 严格更优才覆盖，修正早期的次优贪心选择
                Some(existing) => candidate_total < existing.total_weight,
            };
            if improves {
                legs.insert(
                    neighbor,
                    RouteLeg {
                        from: settled_town,
                        via: Some(road.id()),
                        to: neighbor,
                        leg_weight: road.weight(),
                        total_weight: candidate_total,
                    },
                );
            }
        }
    }

    /// 重构从源点到目的地的最短路径
    ///
    /// 不可达时返回空序列（正常结果，不是错误）；
    /// 源点与目的地相同则返回单条零距离自身记录。
    pub fn shortest_path(&self, source: TownId, destination: TownId) -> Vec<RouteLeg> {
        let table = self.route_tree(source);

        if source == destination {
            return table.leg(source).map(|l| vec![*l]).unwrap_or_default();
        }

        let mut path: Vec<RouteLeg> = Vec::new();
        let mut current = destination;
        while let Some(leg) = table.leg(current) {
            if leg.via.is_none() {
                break;
            }
            path.push(*leg);
            if leg.from == source {
                path.reverse();
                return path;
            }
            current = leg.from;
        }

        Vec::new()
    }

    /// 重构最短路径并渲染为步骤描述
    pub fn shortest_path_steps(&self, source: TownId, destination: TownId) -> Vec<RouteStep> {
        self.shortest_path(source, destination)
            .iter()
            .map(|leg| RouteStep::from_leg(leg, self.graph))
            .collect()
    }
}
