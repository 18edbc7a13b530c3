//! # 诊断模块
//!
//! 对表情目录和自主行为配置做静态检查，不依赖 IO 或渲染。
//!
//! ## 设计原则
//!
//! - 纯函数 API，构建动画库之前就能运行
//! - 诊断分级：Error（必须修复）、Warn（建议修复）、Info（信息提示）
//! - 只报告会影响实际播放效果的问题

use std::fmt;
use std::time::Duration;

use crate::autonomy::AutonomyConfig;
use crate::catalog::ExpressionCatalog;
use crate::expression::ExpressionId;
use crate::machine::PLAYBACK_FPS;
use crate::profile::profile;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 诊断对象（表情名或配置项名）
    pub subject: String,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选）
    pub detail: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            subject: subject.into(),
            message: message.into(),
            detail: None,
        }
    }

    /// 创建错误诊断
    pub fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, subject, message)
    }

    /// 创建警告诊断
    pub fn warn(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, subject, message)
    }

    /// 创建信息诊断
    pub fn info(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, subject, message)
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.subject, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticLevel::Error)
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.count(DiagnosticLevel::Warn)
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 按级别过滤
    pub fn filter_by_level(&self, min_level: DiagnosticLevel) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.level >= min_level)
            .collect()
    }
}

//=============================================================================
// 检查 API
//=============================================================================

/// 保持时长与动画时长的关系
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoldFit {
    /// 保持时长先到期，动画后半段不会被看到
    Truncated,
    /// 两者同时结束
    Exact,
    /// 动画先播完，保持时长不会生效
    Outlived,
}

fn hold_fit(hold: Duration, frame_count: usize) -> HoldFit {
    // 整数比较：hold * fps 与 frame_count 秒
    let lhs = hold.as_nanos() * PLAYBACK_FPS as u128;
    let rhs = frame_count as u128 * 1_000_000_000;
    match lhs.cmp(&rhs) {
        std::cmp::Ordering::Less => HoldFit::Truncated,
        std::cmp::Ordering::Equal => HoldFit::Exact,
        std::cmp::Ordering::Greater => HoldFit::Outlived,
    }
}

/// 检查表情目录
///
/// 执行以下检查：
/// - 保持时长短于动画：动画会被截断（Warn）
/// - 保持时长长于动画：动画播完即回到 idle，保持时长不生效（Info）
/// - 没有保持时长：只播放一次（Info）
pub fn analyze_catalog(catalog: &ExpressionCatalog) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    for id in ExpressionId::ALL.into_iter().filter(|id| !id.is_idle()) {
        let frames = profile(id).frame_count;
        let playback = profile(id).playback_secs();

        let Some(hold) = catalog.hold_duration(id) else {
            result.push(Diagnostic::info(
                id.as_str(),
                "没有保持时长，动画播放一次后回到 idle",
            ));
            continue;
        };

        let detail = format!(
            "保持 {:.2}s，动画 {:.2}s（{} 帧）",
            hold.as_secs_f64(),
            playback,
            frames
        );
        match hold_fit(hold, frames) {
            HoldFit::Truncated => result.push(
                Diagnostic::warn(id.as_str(), "保持时长短于动画，动画会被截断")
                    .with_detail(detail),
            ),
            HoldFit::Outlived => result.push(
                Diagnostic::info(id.as_str(), "动画先于保持时长结束，将提前回到 idle")
                    .with_detail(detail),
            ),
            HoldFit::Exact => {}
        }
    }

    result
}

/// 检查自主行为配置
///
/// 执行以下检查：
/// - 区间非法（Error）
/// - 最短眨眼间隔短于眨眼动画，眨眼会首尾相接（Warn）
pub fn analyze_autonomy(config: &AutonomyConfig) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    if let Err(e) = config.validate() {
        result.push(Diagnostic::error("autonomy", e.to_string()));
        return result;
    }

    let blink = profile(ExpressionId::Blink).playback_secs();
    let (min, _) = config.blink_interval;
    if min < blink {
        result.push(
            Diagnostic::warn("blink_interval", "最短眨眼间隔短于眨眼动画")
                .with_detail(format!("间隔下限 {:.2}s，动画 {:.2}s", min, blink)),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(items: &[&Diagnostic]) -> String {
        items
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::warn("shy", "保持时长短于动画").with_detail("保持 2.00s");
        assert_eq!(diag.to_string(), "[WARN] shy: 保持时长短于动画\n  | 保持 2.00s");
    }

    #[test]
    fn test_hold_fit_uses_exact_frame_boundary() {
        assert_eq!(hold_fit(Duration::from_millis(800), 12), HoldFit::Exact);
        assert_eq!(hold_fit(Duration::from_millis(799), 12), HoldFit::Truncated);
        assert_eq!(hold_fit(Duration::from_millis(801), 12), HoldFit::Outlived);
    }

    #[test]
    fn test_default_catalog_truncations() {
        let result = analyze_catalog(&ExpressionCatalog::default());
        assert!(!result.has_errors());
        insta::assert_snapshot!(render(&result.filter_by_level(DiagnosticLevel::Warn)), @r"
        [WARN] shy: 保持时长短于动画，动画会被截断
          | 保持 2.00s，动画 3.33s（50 帧）
        [WARN] mischievous: 保持时长短于动画，动画会被截断
          | 保持 1.50s，动画 2.00s（30 帧）
        [WARN] excited: 保持时长短于动画，动画会被截断
          | 保持 2.00s，动画 2.67s（40 帧）
        [WARN] puzzled: 保持时长短于动画，动画会被截断
          | 保持 3.00s，动画 3.67s（55 帧）
        [WARN] triumphant: 保持时长短于动画，动画会被截断
          | 保持 2.50s，动画 3.00s（45 帧）
        ");
    }

    #[test]
    fn test_empty_catalog_reports_every_expression() {
        let result = analyze_catalog(&ExpressionCatalog::empty());
        assert_eq!(result.diagnostics.len(), ExpressionId::ALL.len() - 1);
        assert_eq!(result.warn_count(), 0);
        assert!(result.diagnostics.iter().all(|d| d.subject != "idle"));
    }

    #[test]
    fn test_exact_hold_is_silent() {
        let mut catalog = ExpressionCatalog::empty();
        catalog.set_hold_duration(ExpressionId::Blink, 0.8).unwrap();
        let result = analyze_catalog(&catalog);
        assert!(result.diagnostics.iter().all(|d| d.subject != "blink"));
    }

    #[test]
    fn test_analyze_autonomy() {
        assert!(analyze_autonomy(&AutonomyConfig::default()).is_empty());

        let eager = AutonomyConfig {
            blink_interval: (0.5, 1.0),
            ..Default::default()
        };
        let result = analyze_autonomy(&eager);
        assert_eq!(result.warn_count(), 1);
        assert_eq!(result.diagnostics[0].subject, "blink_interval");

        let broken = AutonomyConfig {
            micro_interval: (2.0, 1.0),
            ..Default::default()
        };
        let mut result = analyze_autonomy(&broken);
        assert!(result.has_errors());

        result.merge(analyze_autonomy(&eager));
        assert_eq!(result.diagnostics.len(), 2);
    }
}
