//! # Expression 模块
//!
//! 表情标识符的封闭集合。
//!
//! 外部输入（按键映射、幻灯片、配置文件）都以字符串形式给出表情名，
//! 这里负责字符串与 [`ExpressionId`] 之间的双向转换。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FaceError, FaceResult};

/// 表情标识符
///
/// 除 `Idle` 以外的每个表情都有预计算的非空动画；`Idle` 至少有一帧。
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionId {
    /// 空闲（基线状态，永不自动结束）
    #[default]
    Idle,
    /// 开心
    Happy,
    /// 惊讶
    Surprised,
    /// 困惑（左右扫视）
    Confused,
    /// 单眼眨眼
    Wink,
    /// 向左看
    LookLeft,
    /// 向右看
    LookRight,
    /// 向上看
    LookUp,
    /// 向下看
    LookDown,
    /// 眨眼（空闲自主行为也会触发）
    Blink,
    /// 大笑
    Joy,
    /// 思考
    Thinking,
    /// 生气
    Angry,
    /// 瞌睡
    Sleepy,
    /// 带嘴巴的惊讶
    SurprisedMouth,
    /// 悲伤
    Sadness,
    /// 狂怒
    Furious,
    /// 害羞
    Shy,
    /// 恶作剧
    Mischievous,
    /// 无聊
    Bored,
    /// 兴奋
    Excited,
    /// 恐惧
    Fear,
    /// 专注
    Focused,
    /// 迷惑
    Puzzled,
    /// 胜利
    Triumphant,
}

impl ExpressionId {
    /// 所有表情（稳定顺序）
    pub const ALL: [ExpressionId; 25] = [
        Self::Idle,
        Self::Happy,
        Self::Surprised,
        Self::Confused,
        Self::Wink,
        Self::LookLeft,
        Self::LookRight,
        Self::LookUp,
        Self::LookDown,
        Self::Blink,
        Self::Joy,
        Self::Thinking,
        Self::Angry,
        Self::Sleepy,
        Self::SurprisedMouth,
        Self::Sadness,
        Self::Furious,
        Self::Shy,
        Self::Mischievous,
        Self::Bored,
        Self::Excited,
        Self::Fear,
        Self::Focused,
        Self::Puzzled,
        Self::Triumphant,
    ];

    /// 规范字符串形式
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Happy => "happy",
            Self::Surprised => "surprised",
            Self::Confused => "confused",
            Self::Wink => "wink",
            Self::LookLeft => "look_left",
            Self::LookRight => "look_right",
            Self::LookUp => "look_up",
            Self::LookDown => "look_down",
            Self::Blink => "blink",
            Self::Joy => "joy",
            Self::Thinking => "thinking",
            Self::Angry => "angry",
            Self::Sleepy => "sleepy",
            Self::SurprisedMouth => "surprised_mouth",
            Self::Sadness => "sadness",
            Self::Furious => "furious",
            Self::Shy => "shy",
            Self::Mischievous => "mischievous",
            Self::Bored => "bored",
            Self::Excited => "excited",
            Self::Fear => "fear",
            Self::Focused => "focused",
            Self::Puzzled => "puzzled",
            Self::Triumphant => "triumphant",
        }
    }

    /// 是否为空闲基线
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// 解析外部表情名（忽略首尾空白与大小写）
    pub fn parse(name: &str) -> FaceResult<Self> {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| FaceError::UnknownExpression {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpressionId {
    type Err = FaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
