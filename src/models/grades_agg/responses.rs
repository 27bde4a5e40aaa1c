use serde::Serialize;
use ts_rs::TS;

/// 学生在单个班级内的加权平均分
///
/// 任一加权类型缺失时 `weighted_average` 为 null，缺失类型列在 `missing_types` 中。
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_agg.ts")]
pub struct ClassWeightedAverage {
    pub class_id: i64,
    pub weighted_average: Option<f64>,
    pub exam_average: Option<f64>,
    pub quiz_average: Option<f64>,
    pub homework_average: Option<f64>,
    pub missing_types: Vec<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_agg.ts")]
pub struct LearnerClassAveragesResponse {
    pub learner_id: i64,
    pub items: Vec<ClassWeightedAverage>,
}

/// 全体记录的及格线统计
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/grade_agg.ts")]
pub struct CohortStats {
    pub total_learners: i64,
    pub above70_count: i64,
    // totalLearners 为 0 时为 null
    pub above70_percentage: Option<f64>,
    // 没有任何分数的记录数
    pub unscored_count: i64,
}
