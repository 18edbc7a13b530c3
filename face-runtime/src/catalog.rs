//! # Catalog 模块
//!
//! 表情目录：每个非空闲表情的保持时长（秒）。
//!
//! 保持时长是经验调出来的配置数据，到期后状态机自动回到 `idle`。
//! 没有条目的表情只播放一次动画，播放完毕后回到 `idle`。

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::error::{FaceError, FaceResult};
use crate::expression::ExpressionId;

/// 默认保持时长（秒）
const DEFAULT_HOLD_SECS: [(ExpressionId, f64); 24] = [
    (ExpressionId::Happy, 3.0),
    // 11 帧 ≈ 0.73 秒，加一点缓冲
    (ExpressionId::Surprised, 0.8),
    (ExpressionId::Confused, 4.0),
    (ExpressionId::Wink, 1.0),
    (ExpressionId::LookLeft, 2.0),
    (ExpressionId::LookRight, 2.0),
    (ExpressionId::LookUp, 2.0),
    (ExpressionId::LookDown, 2.0),
    (ExpressionId::Blink, 0.8),
    // 21 帧 ≈ 1.4 秒
    (ExpressionId::Joy, 1.5),
    (ExpressionId::Thinking, 1.5),
    (ExpressionId::Angry, 1.5),
    (ExpressionId::Sleepy, 8.0),
    (ExpressionId::SurprisedMouth, 3.0),
    (ExpressionId::Sadness, 3.0),
    (ExpressionId::Furious, 2.5),
    (ExpressionId::Shy, 2.0),
    (ExpressionId::Mischievous, 1.5),
    (ExpressionId::Bored, 4.0),
    (ExpressionId::Excited, 2.0),
    (ExpressionId::Fear, 3.0),
    (ExpressionId::Focused, 3.5),
    (ExpressionId::Puzzled, 3.0),
    (ExpressionId::Triumphant, 2.5),
];

/// 表情目录
///
/// 只读查表；缺少条目表示"不自动结束"。
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionCatalog {
    holds: BTreeMap<ExpressionId, Duration>,
}

impl Default for ExpressionCatalog {
    fn default() -> Self {
        Self {
            holds: DEFAULT_HOLD_SECS
                .iter()
                .map(|(id, secs)| (*id, Duration::from_secs_f64(*secs)))
                .collect(),
        }
    }
}

impl ExpressionCatalog {
    /// 创建空目录（所有表情都只播放一次）
    pub fn empty() -> Self {
        Self {
            holds: BTreeMap::new(),
        }
    }

    /// 查询保持时长
    pub fn hold_duration(&self, id: ExpressionId) -> Option<Duration> {
        self.holds.get(&id).copied()
    }

    /// 设置保持时长
    ///
    /// `idle` 不接受条目；时长必须是能表示为 `Duration` 的正数。
    pub fn set_hold_duration(&mut self, id: ExpressionId, seconds: f64) -> FaceResult<()> {
        if id.is_idle() {
            return Err(FaceError::IdleHoldDuration);
        }
        let invalid = || FaceError::InvalidHoldDuration {
            expression: id.to_string(),
            seconds,
        };
        if seconds <= 0.0 {
            return Err(invalid());
        }
        let hold = Duration::try_from_secs_f64(seconds).map_err(|_| invalid())?;
        self.holds.insert(id, hold);
        Ok(())
    }

    /// 移除条目（该表情改为播放一次）
    pub fn remove(&mut self, id: ExpressionId) -> Option<Duration> {
        self.holds.remove(&id)
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.holds.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.holds.is_empty()
    }

    /// 遍历所有条目（按表情顺序）
    pub fn iter(&self) -> impl Iterator<Item = (ExpressionId, Duration)> + '_ {
        self.holds.iter().map(|(id, d)| (*id, *d))
    }

    /// 用 `表情名 -> 秒数` 映射覆盖条目
    ///
    /// 任一条目无效时返回错误，目录保持调用前的状态。
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, f64>) -> FaceResult<()> {
        let mut next = self.clone();
        for (name, seconds) in overrides {
            let id = ExpressionId::parse(name)?;
            next.set_hold_duration(id, *seconds)?;
        }
        *self = next;
        Ok(())
    }

    /// 从 JSON 对象解析完整目录，例如 `{"happy": 3.0, "blink": 0.8}`
    pub fn from_json_str(json: &str) -> FaceResult<Self> {
        let raw: HashMap<String, f64> =
            serde_json::from_str(json).map_err(|e| FaceError::CatalogParse {
                message: e.to_string(),
            })?;
        let mut catalog = Self::empty();
        catalog.apply_overrides(&raw)?;
        Ok(catalog)
    }

    /// 导出为 JSON 对象
    pub fn to_json_string(&self) -> String {
        let raw: BTreeMap<&str, f64> = self
            .holds
            .iter()
            .map(|(id, d)| (id.as_str(), d.as_secs_f64()))
            .collect();
        serde_json::to_string_pretty(&raw).unwrap_or_default()
    }
}
