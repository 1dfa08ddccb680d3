//! TownGraph CLI 工具
//!
//! 交互式命令行界面

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use towngraph::cli::{
    execute_console_command, is_console_command, CommandResult, ConsoleState, Printer,
};
use towngraph::metrics::global_metrics;
use towngraph::TownGraphManager;

#[derive(Parser, Debug)]
#[command(name = "towngraph-cli")]
#[command(about = "TownGraph 命令行工具")]
struct Args {
    /// 启动时加载的道路文件（名称,距离;城镇1;城镇2 的行格式）
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// 执行单个命令后退出
    #[arg(short = 'e', long)]
    execute: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    println!("TownGraph CLI - 城镇道路网络图引擎 v{}", towngraph::VERSION);
    println!("=============================================");

    let mut manager = TownGraphManager::new();

    if let Some(path) = &args.file {
        let stats = manager.populate_file(path)?;
        println!(
            "已加载 {}: {} 行, {} 个城镇, {} 条道路",
            path.display(),
            stats.lines,
            stats.towns_added,
            stats.roads_added
        );
    }

    let printer = Printer::new();
    let mut state = ConsoleState::new();

    // 单个命令模式
    if let Some(command) = args.execute {
        handle_command(&mut manager, &mut state, &printer, &command)?;
        return Ok(());
    }

    // 交互模式
    println!("\n输入 'help' 查看命令列表，'quit' 退出\n");

    let stdin = io::stdin();
    loop {
        print!("towngraph> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // 控制台命令以 : 开头
        if is_console_command(line) {
            match execute_console_command(line, &mut state) {
                CommandResult::Continue => {}
                CommandResult::Exit => break,
                CommandResult::Message(msg) => println!("{}", msg),
                CommandResult::Error(err) => println!("{}", err.red()),
            }
            continue;
        }

        match handle_command(&mut manager, &mut state, &printer, line) {
            Ok(true) => break,
            Ok(false) => {}
            Err(e) => println!("{} {}", "错误:".red(), e),
        }
    }

    println!("再见！");
    Ok(())
}

fn handle_command(
    manager: &mut TownGraphManager,
    state: &mut ConsoleState,
    printer: &Printer,
    input: &str,
) -> anyhow::Result<bool> {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).copied().unwrap_or("");

    match cmd.as_str() {
        "quit" | "exit" | "q" => return Ok(true),

        "help" | "h" | "?" => print_help(),

        "stats" | "info" => {
            let output = printer.print_stats(
                manager.graph().town_count(),
                manager.graph().road_count(),
            );
            emit(state, &output, 2);
        }

        "metrics" => {
            let output = printer.print_metrics(&global_metrics().snapshot());
            emit(state, &output, 12);
        }

        "towns" => {
            let names = manager.all_towns();
            let count = names.len();
            emit(state, &printer.print_towns(&names), count);
        }

        "roads" => {
            let labels = manager.all_roads();
            let count = labels.len();
            emit(state, &printer.print_roads(&labels), count);
        }

        "addtown" => {
            if args.trim().is_empty() {
                println!("用法: addtown <城镇名称>");
            } else if manager.add_town(args.trim())? {
                println!("已添加城镇 {}", args.trim().green());
            } else {
                println!("城镇 {} 已存在", args.trim());
            }
        }

        "addroad" => {
            if let Some(fields) = split_fields(args, 4) {
                let weight: u32 = match fields[2].parse() {
                    Ok(w) => w,
                    Err(_) => {
                        println!("{}", "距离必须是非负整数".red());
                        return Ok(false);
                    }
                };
                if manager.add_road(fields[0], fields[1], weight, fields[3])? {
                    println!("已添加道路 {}", fields[3].green());
                } else {
                    println!("两城镇之间已有道路");
                }
            } else if let Some(fields) = split_fields(args, 3) {
                // 省略距离时使用默认距离 1
                if manager.add_connector(fields[0], fields[1], fields[2])? {
                    println!("已添加道路 {}", fields[2].green());
                } else {
                    println!("两城镇之间已有道路");
                }
            } else {
                println!("用法: addroad <城镇1>; <城镇2>; [<距离>;] <道路名称>");
            }
        }

        "road" => match split_fields(args, 2) {
            Some(fields) => match manager.get_road(fields[0], fields[1]) {
                Some(label) => println!("{}", label),
                None => println!("两城镇之间没有道路"),
            },
            None => println!("用法: road <城镇1>; <城镇2>"),
        },

        "connected" => match split_fields(args, 2) {
            Some(fields) => {
                println!("{}", manager.contains_road_connection(fields[0], fields[1]));
            }
            None => println!("用法: connected <城镇1>; <城镇2>"),
        },

        "delroad" => match split_fields(args, 3) {
            Some(fields) => {
                if manager.delete_road_connection(fields[0], fields[1], fields[2]) {
                    println!("已删除道路 {}", fields[2]);
                } else {
                    println!("未找到匹配的道路");
                }
            }
            None => println!("用法: delroad <城镇1>; <城镇2>; <道路名称>"),
        },

        "deltown" => {
            if args.trim().is_empty() {
                println!("用法: deltown <城镇名称>");
            } else if manager.delete_town(args.trim()) {
                println!("已删除城镇 {}", args.trim());
            } else {
                println!("城镇 {} 不存在", args.trim());
            }
        }

        "path" => match split_fields(args, 2) {
            Some(fields) => {
                let steps = manager.get_path(fields[0], fields[1]);
                let count = steps.len();
                emit(state, &printer.print_path(&steps), count);
            }
            None => println!("用法: path <起点城镇>; <终点城镇>"),
        },

        "load" => {
            if args.trim().is_empty() {
                println!("用法: load <道路文件路径>");
            } else {
                let stats = manager.populate_file(args.trim())?;
                println!(
                    "已加载 {} 行: {} 个新城镇, {} 条新道路 (耗时 {} ms)",
                    stats.lines, stats.towns_added, stats.roads_added, stats.duration_ms
                );
            }
        }

        _ => {
            println!("未知命令: {}。输入 'help' 查看帮助。", cmd);
        }
    }

    Ok(false)
}

/// 输出结果，必要时走分页器与 tee 文件
fn emit(state: &mut ConsoleState, content: &str, row_count: usize) {
    if !state.paginate(content, row_count) {
        state.write_output(content);
    }
}

/// 按分号切分参数并去除两侧空白，数量不符时返回 None
fn split_fields(args: &str, expected: usize) -> Option<Vec<&str>> {
    let fields: Vec<&str> = args.split(';').map(str::trim).collect();
    if fields.len() == expected && fields.iter().all(|f| !f.is_empty()) {
        Some(fields)
    } else {
        None
    }
}

fn print_help() {
    println!(
        "
═══════════════════════════════════════════════════════════════
                   TownGraph CLI 命令帮助
═══════════════════════════════════════════════════════════════

基础命令:
  help, h, ?           显示帮助
  quit, exit, q        退出程序
  stats, info          显示图统计信息
  metrics              显示运行时指标

查询命令:
  towns                列出所有城镇（字典序）
  roads                列出所有道路（字典序）
  road <A>; <B>        查询连接两城镇的道路名称
  connected <A>; <B>   两城镇之间是否有道路
  path <A>; <B>        计算最短路径
                       示例: path Springfield; Shelbyville

修改命令:
  addtown <名称>       添加城镇
  addroad <A>; <B>; [<距离>;] <名称>
                       添加道路（必要时自动补齐城镇；省略距离则为 1）
                       示例: addroad Springfield; Shelbyville; 4; Route 1
  delroad <A>; <B>; <名称>
                       删除道路
  deltown <名称>       删除城镇及其所有道路

数据导入:
  load <文件路径>      加载道路文件
                       行格式: 名称,距离;城镇1;城镇2

控制台命令 (以 : 开头):
  :help, :h              显示控制台命令帮助
  :quit, :q              退出程序
  :tee [-o] <file>       输出到文件 (-o 覆盖)
  :notee                 停止输出到文件
  :pager <cmd> <limit>   设置分页器 (例: :pager less 100)
  :nopager               禁用分页器
  :clear                 清屏

═══════════════════════════════════════════════════════════════
"
    );
}
