//! 城镇（顶点）定义
//!
//! 城镇的身份只由名称决定：相等、哈希、排序都基于名称，
//! 区分大小写、精确匹配。邻接关系不存放在城镇上，
//! 由图引擎的索引维护（避免相互引用的指针图）。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 城镇 ID（图内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TownId(pub u64);

impl TownId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for TownId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// 城镇
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Town {
    /// 城镇 ID
    id: TownId,
    /// 城镇名称（身份键）
    name: String,
}

impl Town {
    /// 创建新城镇
    pub fn new(id: TownId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// 获取城镇 ID
    pub fn id(&self) -> TownId {
        self.id
    }

    /// 获取城镇名称
    pub fn name(&self) -> &str {
        &self.name
    }
}

// 两个城镇相等当且仅当名称相等，ID 不参与比较
impl PartialEq for Town {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Town {}

impl Hash for Town {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Town {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Town {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Town {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_town_identity_by_name() {
        let a = Town::new(TownId::new(1), "Springfield");
        let b = Town::new(TownId::new(2), "Springfield");
        let c = Town::new(TownId::new(3), "Shelbyville");

        // 名称相同即相等，ID 不同也一样
        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_town_name_case_sensitive() {
        let a = Town::new(TownId::new(1), "springfield");
        let b = Town::new(TownId::new(2), "Springfield");
        assert_ne!(a, b);
    }

    #[test]
    fn test_town_ordering() {
        let a = Town::new(TownId::new(9), "Alton");
        let b = Town::new(TownId::new(1), "Boone");
        assert!(a < b);
    }
}
