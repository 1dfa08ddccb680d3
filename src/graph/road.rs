//! 道路（无向边）定义
//!
//! 道路的身份是无序端点对：两条道路只要连接同一对城镇就视为
//! 同一条道路，权重与名称不参与身份判定。该等价关系通过
//! [`EndpointPair`] 与 [`Road::same_pair`] 显式表达，
//! 不在 `Road` 上重载结构化相等。

use crate::graph::town::TownId;
use serde::{Deserialize, Serialize};

/// 道路 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoadId(pub u64);

impl RoadId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RoadId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// 未指定权重时的默认距离
pub const DEFAULT_WEIGHT: u32 = 1;

/// 规范化的无序端点对（道路的身份键）
///
/// 构造时将两端排序，使 `(A, B)` 与 `(B, A)` 得到同一个键。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointPair {
    lo: TownId,
    hi: TownId,
}

impl EndpointPair {
    pub fn new(a: TownId, b: TownId) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// 给定一端，返回另一端；不触及该城镇时返回 None
    pub fn other(&self, town: TownId) -> Option<TownId> {
        if self.lo == town {
            Some(self.hi)
        } else if self.hi == town {
            Some(self.lo)
        } else {
            None
        }
    }

    pub fn lo(&self) -> TownId {
        self.lo
    }

    pub fn hi(&self) -> TownId {
        self.hi
    }
}

/// 道路
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Road {
    /// 道路 ID
    id: RoadId,
    /// 插入时的第一端
    a: TownId,
    /// 插入时的第二端
    b: TownId,
    /// 距离（非负整数）
    weight: u32,
    /// 道路名称（可以为空）
    label: String,
}

impl Road {
    /// 创建新道路
    pub fn new(id: RoadId, a: TownId, b: TownId, weight: u32, label: impl Into<String>) -> Self {
        Self {
            id,
            a,
            b,
            weight,
            label: label.into(),
        }
    }

    /// 获取道路 ID
    pub fn id(&self) -> RoadId {
        self.id
    }

    /// 获取第一端
    pub fn a(&self) -> TownId {
        self.a
    }

    /// 获取第二端
    pub fn b(&self) -> TownId {
        self.b
    }

    /// 获取距离
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// 获取道路名称
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 获取身份键（规范化端点对）
    pub fn key(&self) -> EndpointPair {
        EndpointPair::new(self.a, self.b)
    }

    /// 给定一端，返回另一端
    pub fn other(&self, town: TownId) -> Option<TownId> {
        self.key().other(town)
    }

    /// 无序端点对等价：连接同一对城镇即视为同一条道路，
    /// 与权重、名称无关
    pub fn same_pair(&self, other: &Road) -> bool {
        self.key() == other.key()
    }
}
