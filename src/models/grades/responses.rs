use super::entities::GradeRecord;
use serde::Serialize;
use ts_rs::TS;

// 成绩记录列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeRecord>,
}

// 更新结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateResult {
    pub fn unmatched() -> Self {
        Self::default()
    }

    pub fn matched(modified_count: u64) -> Self {
        Self {
            matched_count: 1,
            modified_count,
        }
    }
}

// 删除结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

// 班级内单个学生的分数统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct LearnerScoreStats {
    pub learner_id: i64,
    // 没有任何分数时为 null
    pub average_score: Option<f64>,
    pub total_score: f64,
    pub score_count: i64,
    pub record_count: i64,
}

// 班级统计响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ClassStatsResponse {
    pub class_id: i64,
    pub items: Vec<LearnerScoreStats>,
}
