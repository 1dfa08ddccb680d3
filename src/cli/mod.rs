//! 命令行界面模块
//!
//! 控制台命令处理与结果打印

pub mod commands;
pub mod printer;

pub use commands::{execute_console_command, is_console_command, CommandResult, ConsoleState};
pub use printer::Printer;
