use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::errors::{GradebookError, Result};
use crate::utils::object_id::generate_object_id;

static RECORD_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Fa-f0-9]{24}$").expect("Invalid record id regex"));

/// class_id 取值范围
pub const CLASS_ID_MIN: i64 = 0;
pub const CLASS_ID_MAX: i64 = 300;
/// learner_id 下限
pub const LEARNER_ID_MIN: i64 = 0;

/// 成绩记录标识符（24 位十六进制，统一为小写）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RecordId(String);

impl RecordId {
    /// 校验并解析外部传入的标识符
    pub fn parse(raw: &str) -> Result<Self> {
        if !RECORD_ID_RE.is_match(raw) {
            return Err(GradebookError::invalid_identifier(format!(
                "Invalid ID format: {raw}"
            )));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    /// 生成新的标识符
    pub fn generate() -> Self {
        Self(generate_object_id())
    }

    /// 从数据库读取的标识符，写入时已校验
    pub(crate) fn from_stored(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 分数类型
///
/// 只有 exam / quiz / homework 参与加权计算，其他类型原样保留。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScoreType {
    Exam,
    Quiz,
    Homework,
    Other(String),
}

impl ScoreType {
    pub fn as_str(&self) -> &str {
        match self {
            ScoreType::Exam => "exam",
            ScoreType::Quiz => "quiz",
            ScoreType::Homework => "homework",
            ScoreType::Other(raw) => raw,
        }
    }

    /// 加权权重，未识别类型为 None
    pub fn weight(&self) -> Option<f64> {
        match self {
            ScoreType::Exam => Some(0.50),
            ScoreType::Quiz => Some(0.30),
            ScoreType::Homework => Some(0.20),
            ScoreType::Other(_) => None,
        }
    }
}

impl From<String> for ScoreType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "exam" => ScoreType::Exam,
            "quiz" => ScoreType::Quiz,
            "homework" => ScoreType::Homework,
            _ => ScoreType::Other(raw),
        }
    }
}

impl From<ScoreType> for String {
    fn from(score_type: ScoreType) -> Self {
        match score_type {
            ScoreType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ScoreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单条分数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ScoreEntry {
    #[serde(rename = "type")]
    #[ts(type = "string")]
    pub score_type: ScoreType,
    pub score: f64,
}

impl ScoreEntry {
    pub fn new(score_type: ScoreType, score: f64) -> Self {
        Self { score_type, score }
    }
}

/// 成绩记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeRecord {
    // 记录ID
    pub id: RecordId,
    // 学生ID
    pub learner_id: i64,
    // 班级ID
    pub class_id: i64,
    // 分数列表（追加顺序）
    pub scores: Vec<ScoreEntry>,
}

/// 数值范围校验警告（记录仍会被写入）
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// 校验 learner_id 范围
pub fn check_learner_id(learner_id: i64) -> Option<ValidationWarning> {
    (learner_id < LEARNER_ID_MIN).then(|| ValidationWarning {
        field: "learner_id".to_string(),
        message: format!("Must be an integer greater than or equal to {LEARNER_ID_MIN}."),
    })
}

/// 校验 class_id 范围
pub fn check_class_id(class_id: i64) -> Option<ValidationWarning> {
    (!(CLASS_ID_MIN..=CLASS_ID_MAX).contains(&class_id)).then(|| ValidationWarning {
        field: "class_id".to_string(),
        message: format!("Must be an integer between {CLASS_ID_MIN} and {CLASS_ID_MAX}."),
    })
}
