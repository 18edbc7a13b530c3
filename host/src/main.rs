//! # Robot Face Host
//!
//! 机器人表情演示程序。
//!
//! ## 用法
//!
//! ```bash
//! # 交互模式：每行输入一个按键或表情名（h = happy，quit 或 esc 退出）
//! cargo run -p host
//!
//! # 幻灯片模式，导出前 10 秒的帧
//! cargo run -p host -- --mode slideshow --ticks 600 --export-dir frames
//!
//! # 可复现运行
//! cargo run -p host -- --seed 42 --log-level debug
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use face_runtime::MonotonicClock;
use host::{
    App, AppConfig, AppMode, Display, Headless, HostResult, InputManager, KeyMap, PngSequence,
    RunSummary,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "robot-face")]
#[command(about = "机器人表情状态机演示")]
#[command(version)]
struct Cli {
    /// 配置文件（默认：config.json，不存在时使用默认配置）
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// 运行模式
    #[arg(short, long, value_enum, default_value_t = AppMode::Interactive)]
    mode: AppMode,

    /// 随机种子（覆盖配置文件）
    #[arg(long)]
    seed: Option<u64>,

    /// 运行指定 tick 数后退出
    #[arg(long)]
    ticks: Option<u64>,

    /// PNG 帧导出目录（覆盖配置文件）
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// 每隔多少个 tick 导出一帧（覆盖配置文件）
    #[arg(long)]
    export_every: Option<u32>,

    /// 日志级别（覆盖配置文件；设置了 RUST_LOG 时以其为准）
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// 命令行参数覆盖配置文件
    fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(dir) = &self.export_dir {
            config.output.frames_dir = Some(dir.clone());
        }
        if let Some(every) = self.export_every {
            config.output.export_every = every;
        }
        if let Some(level) = &self.log_level {
            config.debug.log_level = level.clone();
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // 日志级别来自配置，加载结果要等日志初始化之后再输出
    let (mut config, outcome) = AppConfig::load(&cli.config);
    cli.apply(&mut config);
    init_tracing(&config.debug.log_level);
    outcome.log(&cli.config);

    match real_main(&cli, &config) {
        Ok(summary) => {
            info!(ticks = summary.ticks, final_state = %summary.final_state, "退出");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "运行失败");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

fn real_main(cli: &Cli, config: &AppConfig) -> HostResult<RunSummary> {
    match &config.output.frames_dir {
        Some(dir) => {
            let display = PngSequence::new(dir, config.output.export_every)?;
            run(cli, config, display)
        }
        None => run(cli, config, Headless::new()),
    }
}

fn run<D: Display>(cli: &Cli, config: &AppConfig, display: D) -> HostResult<RunSummary> {
    let keymap = KeyMap::default();
    if cli.mode == AppMode::Interactive {
        for (key, expression) in keymap.bindings() {
            debug!(%key, expression, "按键绑定");
        }
    }

    let input = InputManager::stdin(keymap);
    let mut app = App::new(config, cli.mode, input, display, MonotonicClock)?;

    info!(mode = ?cli.mode, tick_rate = config.tick_rate, "启动主循环");
    app.run(cli.ticks)
}
