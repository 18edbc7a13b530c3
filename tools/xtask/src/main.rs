//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-runtime`: 运行 face-runtime 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `config-check`: 检查配置文件（保持时长、自主行为间隔）

use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, ExitCode};

use face_runtime::{
    AutonomyConfig, DiagnosticResult, ExpressionCatalog, analyze_autonomy, analyze_catalog,
};

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn cargo(args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    cmd
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    match cargo(&["llvm-cov", "--version"]).status() {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            run(
                "cargo fmt --all -- --check",
                &mut cargo(&["fmt", "--all", "--", "--check"]),
            )?;
            run(
                "cargo clippy --workspace --all-targets",
                &mut cargo(&["clippy", "--workspace", "--all-targets"]),
            )?;
            run(
                "cargo test --workspace",
                &mut cargo(&["test", "--workspace"]),
            )?;
        }
        "cov-runtime" => {
            ensure_cargo_llvm_cov_available()?;
            run(
                "cargo llvm-cov -p face-runtime --html",
                &mut cargo(&["llvm-cov", "-p", "face-runtime", "--html"]),
            )?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            ensure_cargo_llvm_cov_available()?;
            // xtask 不计入覆盖率
            run(
                "cargo llvm-cov --workspace --exclude xtask --html",
                &mut cargo(&["llvm-cov", "--workspace", "--exclude", "xtask", "--html"]),
            )?;
            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "config-check" => {
            let path = args.next().unwrap_or_else(|| "config.json".to_string());
            config_check(Path::new(&path))?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-runtime     运行 face-runtime 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  config-check    检查配置文件

CONFIG-CHECK:
  cargo xtask config-check [path]

  不带参数：检查 ./config.json（不存在时检查默认配置）
  带路径参数：检查指定文件

  检查内容：
    - hold_durations 中的未知表情名与非正时长
    - 保持时长短于动画（动画被截断）
    - 自主行为间隔是否有效，眨眼间隔是否短于眨眼动画

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo cov-runtime   -> cargo xtask cov-runtime
  cargo cov-workspace -> cargo xtask cov-workspace
  cargo config-check  -> cargo xtask config-check
"#
    );
}

//=============================================================================
// config-check 命令实现
//=============================================================================

/// 从配置文件中读出的检查对象
///
/// 只关心 `hold_durations` 与 `autonomy` 两个字段，其余字段由 host 负责。
struct CheckTarget {
    hold_durations: HashMap<String, f64>,
    autonomy: AutonomyConfig,
}

impl CheckTarget {
    fn defaults() -> Self {
        Self {
            hold_durations: HashMap::new(),
            autonomy: AutonomyConfig::default(),
        }
    }

    fn from_json(content: &str) -> anyhow::Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(content)?;
        let mut target = Self::defaults();

        if let Some(holds) = value.get_mut("hold_durations") {
            target.hold_durations = serde_json::from_value(holds.take())?;
        }
        if let Some(autonomy) = value.get_mut("autonomy") {
            target.autonomy = serde_json::from_value(autonomy.take())?;
        }
        Ok(target)
    }
}

/// 执行配置检查
fn config_check(path: &Path) -> anyhow::Result<()> {
    let target = if path.is_file() {
        eprintln!("==> 检查 {}\n", path.display());
        CheckTarget::from_json(&std::fs::read_to_string(path)?)?
    } else {
        eprintln!("==> {} 不存在，检查默认配置\n", path.display());
        CheckTarget::defaults()
    };

    let mut result = DiagnosticResult::new();
    let mut override_errors = 0;

    let mut catalog = ExpressionCatalog::default();
    if let Err(e) = catalog.apply_overrides(&target.hold_durations) {
        eprintln!("[ERROR] hold_durations: {e}");
        override_errors += 1;
    }
    result.merge(analyze_catalog(&catalog));
    result.merge(analyze_autonomy(&target.autonomy));

    print_check_result(&result, override_errors);

    if override_errors > 0 || result.has_errors() {
        anyhow::bail!("配置检查发现错误");
    }
    Ok(())
}

/// 输出检查结果
fn print_check_result(result: &DiagnosticResult, override_errors: usize) {
    for diag in &result.diagnostics {
        eprintln!("{}", diag);
    }

    let error_count = override_errors + result.error_count();
    let warn_count = result.warn_count();

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", error_count, warn_count);
    } else if warn_count > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", warn_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
