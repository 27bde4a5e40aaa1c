use serde::Deserialize;
use tracing::debug;
use ts_rs::TS;

use super::entities::{ScoreEntry, ValidationWarning, check_class_id, check_learner_id};
use crate::errors::GradebookError;

// 原始创建请求（兼容旧版 student_id 字段）
#[derive(Debug, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct RawGradePayload {
    pub learner_id: Option<i64>,
    pub student_id: Option<i64>,
    pub class_id: i64,
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
}

// 创建成绩记录请求
//
// 请求体先按 RawGradePayload 解析，再经过 TryFrom 转换：
// - 只有 student_id 时映射为 learner_id
// - 两者都没有时拒绝
// - 两者同时存在且不一致时拒绝
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawGradePayload")]
pub struct CreateGradeRequest {
    pub learner_id: i64,
    pub class_id: i64,
    pub scores: Vec<ScoreEntry>,
}

impl TryFrom<RawGradePayload> for CreateGradeRequest {
    type Error = GradebookError;

    fn try_from(raw: RawGradePayload) -> Result<Self, Self::Error> {
        let learner_id = match (raw.learner_id, raw.student_id) {
            (Some(learner_id), None) => learner_id,
            (None, Some(student_id)) => {
                debug!("Mapping legacy student_id {} to learner_id", student_id);
                student_id
            }
            (Some(learner_id), Some(student_id)) if learner_id == student_id => learner_id,
            (Some(_), Some(_)) => {
                return Err(GradebookError::validation(
                    "learner_id and student_id must not disagree",
                ));
            }
            (None, None) => {
                return Err(GradebookError::validation("missing field `learner_id`"));
            }
        };

        Ok(Self {
            learner_id,
            class_id: raw.class_id,
            scores: raw.scores,
        })
    }
}

impl CreateGradeRequest {
    pub fn new(learner_id: i64, class_id: i64, scores: Vec<ScoreEntry>) -> Self {
        Self {
            learner_id,
            class_id,
            scores,
        }
    }

    /// 数值范围校验，仅产生警告
    pub fn validate(&self) -> Vec<ValidationWarning> {
        check_learner_id(self.learner_id)
            .into_iter()
            .chain(check_class_id(self.class_id))
            .collect()
    }
}

// 批量修改班级请求
#[derive(Debug, Deserialize, TS)]
#[serde(deny_unknown_fields)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReassignClassRequest {
    pub class_id: i64,
}

// 按学生查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct LearnerGradeQuery {
    pub class: Option<i64>,
}

// 按班级查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ClassGradeQuery {
    pub learner: Option<i64>,
}
