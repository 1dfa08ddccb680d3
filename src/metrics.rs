//! 性能指标收集模块
//!
//! 提供系统运行时性能指标的收集和快照导出功能

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 系统全局指标
#[derive(Debug)]
pub struct Metrics {
    /// 路径查询统计
    path_query_stats: PathQueryStats,
    /// 图操作统计
    graph_stats: GraphStats,
    /// 导入统计
    import_stats: ImportCounters,
    /// 启动时间
    start_time: Instant,
}

/// 路径查询统计
#[derive(Debug)]
struct PathQueryStats {
    /// 总查询数
    total_queries: AtomicU64,
    /// 有路径的查询数
    found_queries: AtomicU64,
    /// 无路径的查询数
    empty_queries: AtomicU64,
    /// 查询总耗时（微秒）
    total_duration_us: AtomicU64,
    /// 慢查询数（>1s）
    slow_queries: AtomicU64,
}

/// 图操作统计
#[derive(Debug)]
struct GraphStats {
    /// 城镇插入数
    towns_inserted: AtomicU64,
    /// 城镇删除数
    towns_removed: AtomicU64,
    /// 道路插入数
    roads_inserted: AtomicU64,
    /// 道路删除数
    roads_removed: AtomicU64,
}

/// 导入统计
#[derive(Debug)]
struct ImportCounters {
    /// 成功导入的行数
    lines_imported: AtomicU64,
    /// 格式错误的行数
    import_errors: AtomicU64,
}

/// 可导出的指标快照
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    // 路径查询指标
    pub total_queries: u64,
    pub found_queries: u64,
    pub empty_queries: u64,
    pub avg_query_duration_ms: f64,
    pub slow_queries: u64,

    // 图操作指标
    pub towns_inserted: u64,
    pub towns_removed: u64,
    pub roads_inserted: u64,
    pub roads_removed: u64,

    // 导入指标
    pub lines_imported: u64,
    pub import_errors: u64,

    // 系统指标
    pub uptime_seconds: u64,
}

impl Metrics {
    /// 创建新的指标收集器
    pub fn new() -> Self {
        Self {
            path_query_stats: PathQueryStats {
                total_queries: AtomicU64::new(0),
                found_queries: AtomicU64::new(0),
                empty_queries: AtomicU64::new(0),
                total_duration_us: AtomicU64::new(0),
                slow_queries: AtomicU64::new(0),
            },
            graph_stats: GraphStats {
                towns_inserted: AtomicU64::new(0),
                towns_removed: AtomicU64::new(0),
                roads_inserted: AtomicU64::new(0),
                roads_removed: AtomicU64::new(0),
            },
            import_stats: ImportCounters {
                lines_imported: AtomicU64::new(0),
                import_errors: AtomicU64::new(0),
            },
            start_time: Instant::now(),
        }
    }

    /// 记录路径查询开始
    pub fn record_path_query_start(&self) -> QueryTimer {
        self.path_query_stats
            .total_queries
            .fetch_add(1, Ordering::Relaxed);
        QueryTimer::new()
    }

    /// 记录路径查询完成
    pub fn record_path_query_complete(&self, timer: QueryTimer, found: bool) {
        let duration = timer.elapsed();

        if found {
            self.path_query_stats
                .found_queries
                .fetch_add(1, Ordering::Relaxed);
        } else {
            self.path_query_stats
                .empty_queries
                .fetch_add(1, Ordering::Relaxed);
        }

        self.path_query_stats
            .total_duration_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        // 慢查询：超过1秒
        if duration.as_secs() >= 1 {
            self.path_query_stats
                .slow_queries
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 记录城镇插入
    pub fn record_town_insert(&self) {
        self.graph_stats.towns_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录城镇删除
    pub fn record_town_remove(&self) {
        self.graph_stats.towns_removed.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录道路插入
    pub fn record_road_insert(&self) {
        self.graph_stats.roads_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录道路删除
    pub fn record_road_remove(&self) {
        self.graph_stats.roads_removed.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一行成功导入
    pub fn record_line_imported(&self) {
        self.import_stats.lines_imported.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录一行格式错误
    pub fn record_import_error(&self) {
        self.import_stats.import_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// 获取指标快照
    pub fn snapshot(&self) -> MetricsSnapshot {
        let total_queries = self.path_query_stats.total_queries.load(Ordering::Relaxed);
        let total_duration_us = self
            .path_query_stats
            .total_duration_us
            .load(Ordering::Relaxed);

        let avg_query_duration_ms = if total_queries > 0 {
            (total_duration_us as f64) / (total_queries as f64) / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            total_queries,
            found_queries: self.path_query_stats.found_queries.load(Ordering::Relaxed),
            empty_queries: self.path_query_stats.empty_queries.load(Ordering::Relaxed),
            avg_query_duration_ms,
            slow_queries: self.path_query_stats.slow_queries.load(Ordering::Relaxed),
            towns_inserted: self.graph_stats.towns_inserted.load(Ordering::Relaxed),
            towns_removed: self.graph_stats.towns_removed.load(Ordering::Relaxed),
            roads_inserted: self.graph_stats.roads_inserted.load(Ordering::Relaxed),
            roads_removed: self.graph_stats.roads_removed.load(Ordering::Relaxed),
            lines_imported: self.import_stats.lines_imported.load(Ordering::Relaxed),
            import_errors: self.import_stats.import_errors.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// 重置所有指标
    pub fn reset(&self) {
        self.path_query_stats.total_queries.store(0, Ordering::Relaxed);
        self.path_query_stats.found_queries.store(0, Ordering::Relaxed);
        self.path_query_stats.empty_queries.store(0, Ordering::Relaxed);
        self.path_query_stats
            .total_duration_us
            .store(0, Ordering::Relaxed);
        self.path_query_stats.slow_queries.store(0, Ordering::Relaxed);

        self.graph_stats.towns_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.towns_removed.store(0, Ordering::Relaxed);
        self.graph_stats.roads_inserted.store(0, Ordering::Relaxed);
        self.graph_stats.roads_removed.store(0, Ordering::Relaxed);

        self.import_stats.lines_imported.store(0, Ordering::Relaxed);
        self.import_stats.import_errors.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// 查询计时器
pub struct QueryTimer {
    start: Instant,
}

impl QueryTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// 全局指标实例
static METRICS: once_cell::sync::Lazy<Arc<Metrics>> =
    once_cell::sync::Lazy::new(|| Arc::new(Metrics::new()));

/// 获取全局指标实例
pub fn global_metrics() -> Arc<Metrics> {
    METRICS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_snapshot() {
        let metrics = Metrics::new();

        let timer = metrics.record_path_query_start();
        std::thread::sleep(Duration::from_millis(10));
        metrics.record_path_query_complete(timer, true);

        metrics.record_town_insert();
        metrics.record_road_insert();
        metrics.record_line_imported();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_queries, 1);
        assert_eq!(snapshot.found_queries, 1);
        assert_eq!(snapshot.towns_inserted, 1);
        assert_eq!(snapshot.roads_inserted, 1);
        assert_eq!(snapshot.lines_imported, 1);
        assert!(snapshot.avg_query_duration_ms >= 10.0);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = Metrics::new();
        metrics.record_town_insert();
        metrics.record_road_remove();
        metrics.record_import_error();

        metrics.reset();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.towns_inserted, 0);
        assert_eq!(snapshot.roads_removed, 0);
        assert_eq!(snapshot.import_errors, 0);
    }

    #[test]
    fn test_empty_query_counted() {
        let metrics = Metrics::new();
        let timer = metrics.record_path_query_start();
        metrics.record_path_query_complete(timer, false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_queries, 1);
        assert_eq!(snapshot.empty_queries, 1);
        assert_eq!(snapshot.found_queries, 0);
    }
}
