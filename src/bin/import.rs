//! TownGraph 数据导入工具
//!
//! 从行式道路文件批量导入城镇与道路

use clap::Parser;
use std::path::PathBuf;
use towngraph::TownGraphManager;

#[derive(Parser, Debug)]
#[command(name = "towngraph-import")]
#[command(about = "TownGraph 数据导入工具")]
struct Args {
    /// 输入文件路径
    #[arg(short, long)]
    input: PathBuf,

    /// 以 JSON 格式输出导入统计
    #[arg(long)]
    json: bool,

    /// 导入完成后查询最短路径：起点城镇
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// 导入完成后查询最短路径：终点城镇
    #[arg(long, requires = "from")]
    to: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut manager = TownGraphManager::new();
    let stats = manager.populate_file(&args.input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("TownGraph 数据导入工具");
        println!("========================");
        println!("输入文件: {}", args.input.display());
        println!("\n导入完成!");
        println!("  行数: {}", stats.lines);
        println!("  城镇导入: {}", stats.towns_added);
        println!("  道路导入: {}", stats.roads_added);
        println!("  耗时: {} ms", stats.duration_ms);
        println!("\n当前图大小:");
        println!("  城镇数: {}", manager.graph().town_count());
        println!("  道路数: {}", manager.graph().road_count());
    }

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        let steps = manager.get_path(from, to);
        if steps.is_empty() {
            println!("\n{} 到 {} 之间未找到路径", from, to);
        } else {
            println!("\n{} 到 {} 的最短路径:", from, to);
            for step in steps {
                println!("  {}", step);
            }
        }
    }

    Ok(())
}
