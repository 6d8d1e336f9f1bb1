//! # operando - 原位 XRD 与电化学联合处理工具
//!
//! 将一组按时间采集的 XRD 扫描与同期电化学记录对齐，生成强度等高线 +
//! 电化学曲线的联合图。
//!
//! ## 子命令
//! - `plot`   - 完整流程，输出 PNG/SVG 图像
//! - `echem`  - 解析电化学记录，打印摘要并可导出 CSV
//! - `export` - 导出（变换后的）强度矩阵为 CSV
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (扫描与电化学记录解析)
//!   │     ├── xrd/       (收集、构建、变换、作图、导出)
//!   │     └── models/    (数据模型与运行配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod models;
mod parsers;
mod utils;
mod xrd;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    pretty_env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
