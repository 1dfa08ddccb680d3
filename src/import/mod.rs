//! 数据导入模块
//!
//! 从行式文本文件批量导入道路数据，行格式为
//! `道路名称,距离;城镇1;城镇2`：恰好一个 `,`、两个 `;`，
//! 且 `,` 出现在所有 `;` 之前。违反格式的行立即中止导入，
//! 已应用的前缀保留（不回滚）。

use crate::error::{Error, Result};
use crate::manager::TownGraphManager;
use crate::metrics::global_metrics;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// 导入统计
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ImportStats {
    pub lines: usize,
    pub towns_added: usize,
    pub roads_added: usize,
    pub duration_ms: u64,
}

/// 解析后的一行道路记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadRecord {
    pub label: String,
    pub weight: u32,
    pub town_a: String,
    pub town_b: String,
}

/// 解析一行道路记录
///
/// 城镇名称逐字保留（分隔符除外），距离两侧允许空白。
pub fn parse_line(line: &str) -> Result<RoadRecord> {
    let mut semicolons = 0;
    let mut commas = 0;
    for c in line.chars() {
        match c {
            ';' => semicolons += 1,
            ',' => {
                commas += 1;
                if semicolons > 0 {
                    return Err(Error::MalformedRecord(format!(
                        "逗号出现在分号之后: {line:?}"
                    )));
                }
            }
            _ => {}
        }
    }
    if semicolons != 2 || commas != 1 {
        return Err(Error::MalformedRecord(format!(
            "应为 1 个逗号与 2 个分号: {line:?}"
        )));
    }

    // 分隔符数量已校验，各段一定存在
    let (label, rest) = line.split_once(',').unwrap_or_default();
    let (weight_str, rest) = rest.split_once(';').unwrap_or_default();
    let (town_a, town_b) = rest.split_once(';').unwrap_or_default();

    let weight: u32 = weight_str.trim().parse().map_err(|_| {
        Error::MalformedRecord(format!("距离不是非负整数: {:?}", weight_str.trim()))
    })?;

    Ok(RoadRecord {
        label: label.to_string(),
        weight,
        town_a: town_a.to_string(),
        town_b: town_b.to_string(),
    })
}

/// 道路文件导入器
pub struct RoadFileImporter<'m> {
    manager: &'m mut TownGraphManager,
}

impl<'m> RoadFileImporter<'m> {
    /// 创建导入器
    pub fn new(manager: &'m mut TownGraphManager) -> Self {
        Self { manager }
    }

    /// 从文件导入
    pub fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let file = File::open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "开始导入道路文件");
        self.import_reader(BufReader::new(file))
    }

    /// 从带缓冲的读取器导入
    pub fn import_reader<R: BufRead>(&mut self, reader: R) -> Result<ImportStats> {
        let start = std::time::Instant::now();
        let metrics = global_metrics();
        let mut stats = ImportStats::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let record = parse_line(&line).map_err(|e| {
                metrics.record_import_error();
                match e {
                    Error::MalformedRecord(msg) => {
                        Error::MalformedRecord(format!("第 {} 行: {}", idx + 1, msg))
                    }
                    other => other,
                }
            })?;

            if self.manager.add_town(&record.town_a)? {
                stats.towns_added += 1;
            }
            if self.manager.add_town(&record.town_b)? {
                stats.towns_added += 1;
            }
            if self
                .manager
                .add_road(&record.town_a, &record.town_b, record.weight, &record.label)?
            {
                stats.roads_added += 1;
            }

            stats.lines += 1;
            metrics.record_line_imported();
            debug!(
                label = %record.label,
                weight = record.weight,
                a = %record.town_a,
                b = %record.town_b,
                "导入道路"
            );
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            lines = stats.lines,
            towns = stats.towns_added,
            roads = stats.roads_added,
            "导入完成"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_line_round_trip() {
        let record = parse_line("Route9,12;Springfield;Shelbyville").unwrap();
        assert_eq!(
            record,
            RoadRecord {
                label: "Route9".to_string(),
                weight: 12,
                town_a: "Springfield".to_string(),
                town_b: "Shelbyville".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_line_weight_whitespace() {
        let record = parse_line("Route 66, 42 ;Alton;Boone").unwrap();
        assert_eq!(record.weight, 42);
        assert_eq!(record.label, "Route 66");
    }

    #[test]
    fn test_parse_line_towns_verbatim() {
        // 城镇名中的标点（分隔符除外）逐字保留
        let record = parse_line("R1,3;St. Mary's;O'Fallon").unwrap();
        assert_eq!(record.town_a, "St. Mary's");
        assert_eq!(record.town_b, "O'Fallon");
    }

    #[test]
    fn test_parse_line_delimiter_violations() {
        // 逗号在分号之后
        assert!(matches!(
            parse_line("Route;9,12;Springfield"),
            Err(Error::MalformedRecord(_))
        ));
        // 分号数量不对
        assert!(matches!(
            parse_line("Route9,12;Springfield"),
            Err(Error::MalformedRecord(_))
        ));
        // 逗号数量不对
        assert!(matches!(
            parse_line("Route9 12;Springfield;Shelbyville"),
            Err(Error::MalformedRecord(_))
        ));
        // 距离不可解析
        assert!(matches!(
            parse_line("Route9,twelve;Springfield;Shelbyville"),
            Err(Error::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_import_reader_round_trip() {
        let mut manager = TownGraphManager::new();
        let input = "Route9,12;Springfield;Shelbyville\n";
        let stats = manager.populate_reader(Cursor::new(input)).unwrap();

        assert_eq!(stats.lines, 1);
        assert_eq!(stats.towns_added, 2);
        assert_eq!(stats.roads_added, 1);

        let road = manager.graph().get_road("Springfield", "Shelbyville").unwrap();
        assert_eq!(road.weight(), 12);
        assert_eq!(road.label(), "Route9");
    }

    #[test]
    fn test_import_reader_idempotent_towns() {
        let mut manager = TownGraphManager::new();
        let input = "R1,1;A;B\nR2,2;B;C\nR3,3;C;A\n";
        let stats = manager.populate_reader(Cursor::new(input)).unwrap();

        assert_eq!(stats.towns_added, 3);
        assert_eq!(stats.roads_added, 3);
        assert_eq!(manager.graph().town_count(), 3);
    }

    #[test]
    fn test_import_stops_at_malformed_line_keeps_prefix() {
        let mut manager = TownGraphManager::new();
        let input = "R1,1;A;B\nbroken line\nR2,2;B;C\n";
        let err = manager.populate_reader(Cursor::new(input)).unwrap_err();

        assert!(matches!(err, Error::MalformedRecord(_)));
        assert!(err.to_string().contains("第 2 行"));
        // 出错行之前的内容保留，之后的不再处理
        assert!(manager.contains_road_connection("A", "B"));
        assert!(!manager.contains_town("C"));
    }

    #[test]
    fn test_import_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Main St,5;Alton;Boone").unwrap();
        writeln!(file, "Oak Ave,3;Boone;Clayton").unwrap();

        let mut manager = TownGraphManager::new();
        let stats = manager.populate_file(file.path()).unwrap();

        assert_eq!(stats.lines, 2);
        assert_eq!(manager.all_towns(), vec!["Alton", "Boone", "Clayton"]);
        assert_eq!(manager.all_roads(), vec!["Main St", "Oak Ave"]);
    }
}
