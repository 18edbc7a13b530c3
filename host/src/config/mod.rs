//! # Config 模块
//!
//! 宿主配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use face_runtime::{AutonomyConfig, ExpressionCatalog, FaceLayout};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 显示配置
    #[serde(default)]
    pub display: DisplayConfig,

    /// 主循环频率（Hz）
    ///
    /// 与动画播放帧率无关：动画固定按 15fps 推进。
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,

    /// 随机种子
    ///
    /// 配置后动画库与自主行为间隔都可复现。
    #[serde(default)]
    pub seed: Option<u64>,

    /// 空闲自主行为
    #[serde(default)]
    pub autonomy: AutonomyConfig,

    /// 覆盖默认保持时长（表情名 → 秒）
    #[serde(default)]
    pub hold_durations: HashMap<String, f64>,

    /// 幻灯片演示配置
    #[serde(default)]
    pub slideshow: SlideshowConfig,

    /// 帧导出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// 屏幕宽度
    #[serde(default = "default_display_width")]
    pub width: u32,

    /// 屏幕高度
    #[serde(default = "default_display_height")]
    pub height: u32,
}

/// 幻灯片演示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideshowConfig {
    /// 每个表情展示的秒数
    #[serde(default = "default_slide_interval")]
    pub interval: f64,

    /// 启动时是否暂停
    #[serde(default)]
    pub start_paused: bool,
}

/// 帧导出配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// PNG 导出目录，未配置时不导出
    #[serde(default)]
    pub frames_dir: Option<PathBuf>,

    /// 每隔多少个 tick 导出一帧
    #[serde(default = "default_export_every")]
    pub export_every: u32,
}

/// 调试配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 启动时是否输出表情目录诊断
    ///
    /// - debug build 默认开启
    /// - 只输出诊断，不阻塞启动
    #[serde(default = "default_catalog_check")]
    pub catalog_check: bool,

    /// 日志级别（trace/debug/info/warn/error）
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// 默认值函数
fn default_display_width() -> u32 {
    800
}

fn default_display_height() -> u32 {
    480
}

fn default_tick_rate() -> u32 {
    60
}

fn default_slide_interval() -> f64 {
    2.5
}

fn default_export_every() -> u32 {
    1
}

fn default_catalog_check() -> bool {
    cfg!(debug_assertions)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            tick_rate: default_tick_rate(),
            seed: None,
            autonomy: AutonomyConfig::default(),
            hold_durations: HashMap::new(),
            slideshow: SlideshowConfig::default(),
            output: OutputConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_display_width(),
            height: default_display_height(),
        }
    }
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            interval: default_slide_interval(),
            start_paused: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            catalog_check: default_catalog_check(),
            log_level: default_log_level(),
        }
    }
}

/// 配置文件的加载结果
///
/// 日志级别本身来自配置，所以加载时不输出日志；
/// 调用方在初始化日志后调用 [`LoadOutcome::log`]。
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// 从文件加载
    Loaded,
    /// 文件不存在，使用默认配置
    Missing,
    /// 读取或解析失败，使用默认配置
    Fallback(ConfigError),
}

impl LoadOutcome {
    /// 记录加载结果
    pub fn log(&self, path: &Path) {
        let path = path.display();
        match self {
            Self::Loaded => info!(%path, "配置文件加载成功"),
            Self::Missing => info!(%path, "配置文件不存在，使用默认配置"),
            Self::Fallback(e) => warn!(%path, error = %e, "配置文件加载失败，使用默认配置"),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置。
    pub fn load(path: impl AsRef<Path>) -> (Self, LoadOutcome) {
        let path = path.as_ref();

        if !path.exists() {
            return (Self::default(), LoadOutcome::Missing);
        }

        match Self::try_load(path) {
            Ok(config) => (config, LoadOutcome::Loaded),
            Err(e) => (Self::default(), LoadOutcome::Fallback(e)),
        }
    }

    /// 加载配置文件，失败时返回错误
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 脸部布局
    pub fn layout(&self) -> FaceLayout {
        FaceLayout::new(self.display.width, self.display.height)
    }

    /// 应用了覆盖项的表情目录
    pub fn catalog(&self) -> Result<ExpressionCatalog, ConfigError> {
        let mut catalog = ExpressionCatalog::default();
        catalog
            .apply_overrides(&self.hold_durations)
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        Ok(catalog)
    }

    /// 主循环单个 tick 的时长
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate.max(1) as f64)
    }

    /// 幻灯片切换间隔
    pub fn slide_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.slideshow.interval.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 屏幕至少要放得下两只眼睛和嘴巴
        if self.display.width < 320 || self.display.height < 240 {
            return Err(ConfigError::Validation(format!(
                "屏幕尺寸过小: {}x{}（至少 320x240）",
                self.display.width, self.display.height
            )));
        }

        if self.tick_rate == 0 || self.tick_rate > 240 {
            return Err(ConfigError::Validation(format!(
                "主循环频率必须在 1 - 240 之间: {}",
                self.tick_rate
            )));
        }

        if self.slideshow.interval <= 0.0
            || Duration::try_from_secs_f64(self.slideshow.interval).is_err()
        {
            return Err(ConfigError::Validation(format!(
                "幻灯片间隔必须为正数: {}",
                self.slideshow.interval
            )));
        }

        if self.output.export_every == 0 {
            return Err(ConfigError::Validation(
                "export_every 必须大于 0".to_string(),
            ));
        }

        self.autonomy
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        self.catalog()?;

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// 解析失败
    #[error("配置解析失败: {0}")]
    Parse(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use face_runtime::ExpressionId;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.display.width, 800);
        assert_eq!(config.display.height, 480);
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.slideshow.interval, 2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "tick_rate": 30, "autonomy": { "blink_interval": [2.0, 4.0] } }"#,
        )
        .unwrap();
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.display.width, 800);
        assert_eq!(config.autonomy.blink_interval, (2.0, 4.0));
        assert_eq!(config.autonomy.micro_interval, (0.5, 2.0));
        assert_eq!(config.output.export_every, 1);
    }

    #[test]
    fn test_hold_overrides() {
        let mut config = AppConfig::default();
        config.hold_durations.insert("happy".to_string(), 1.0);
        let catalog = config.catalog().unwrap();
        assert_eq!(
            catalog.hold_duration(ExpressionId::Happy),
            Some(Duration::from_secs(1))
        );

        config.hold_durations.insert("idle".to_string(), 1.0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.tick_rate = 0;
        assert!(config.validate().is_err());
        config.tick_rate = 60;

        config.display.width = 100;
        assert!(config.validate().is_err());
        config.display.width = 800;

        config.slideshow.interval = -1.0;
        assert!(config.validate().is_err());
        config.slideshow.interval = 2.5;

        config.autonomy.blink_interval = (8.0, 3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unrepresentable_values_fail_validation() {
        let configs = [
            r#"{ "hold_durations": { "happy": 1e20 } }"#,
            r#"{ "autonomy": { "blink_interval": [1e20, 2e20] } }"#,
            r#"{ "autonomy": { "micro_offset": [-2147483648, 1] } }"#,
            r#"{ "slideshow": { "interval": 1e20 } }"#,
        ];
        for json in configs {
            let config: AppConfig = serde_json::from_str(json).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{json}"
            );
        }

        let config: AppConfig =
            serde_json::from_str(r#"{ "slideshow": { "interval": 1e20 } }"#).unwrap();
        assert_eq!(config.slide_interval(), Duration::MAX);
    }

    #[test]
    fn test_tick_duration() {
        let config = AppConfig {
            tick_rate: 50,
            ..Default::default()
        };
        assert_eq!(config.tick_duration(), Duration::from_millis(20));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.seed = Some(42);
        config.hold_durations.insert("joy".to_string(), 2.0);
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let (loaded, outcome) = AppConfig::load(&path);
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert_eq!(loaded.seed, Some(42));
        assert_eq!(loaded.hold_durations.get("joy"), Some(&2.0));
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let (missing, outcome) = AppConfig::load(dir.path().join("missing.json"));
        assert_eq!(outcome, LoadOutcome::Missing);
        assert_eq!(missing.tick_rate, 60);

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::try_load(&broken),
            Err(ConfigError::Parse(_))
        ));
        let (config, outcome) = AppConfig::load(&broken);
        assert!(matches!(outcome, LoadOutcome::Fallback(ConfigError::Parse(_))));
        assert_eq!(config.tick_rate, 60);
    }
}
