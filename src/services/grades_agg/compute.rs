//! 成绩聚合计算
//!
//! 纯函数实现，输入为已从存储层取出的成绩记录。

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::errors::{GradebookError, Result};
use crate::models::grades::entities::{GradeRecord, ScoreType};
use crate::models::grades::responses::LearnerScoreStats;
use crate::models::grades_agg::responses::{ClassWeightedAverage, CohortStats};

/// 及格线（严格大于）
pub const COHORT_THRESHOLD: f64 = 70.0;

/// 算术平均，空集合返回 ComputationUndefined
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(GradebookError::computation_undefined(
            "mean of an empty score set",
        ));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// 百分比，总数为 0 时返回 ComputationUndefined
pub fn percentage(count: i64, total: i64) -> Result<f64> {
    if total == 0 {
        return Err(GradebookError::computation_undefined(
            "percentage of an empty cohort",
        ));
    }
    Ok(count as f64 / total as f64 * 100.0)
}

#[derive(Default)]
struct ClassPartitions {
    exam: Vec<f64>,
    quiz: Vec<f64>,
    homework: Vec<f64>,
}

impl ClassPartitions {
    fn push(&mut self, score_type: &ScoreType, score: f64) {
        match score_type {
            ScoreType::Exam => self.exam.push(score),
            ScoreType::Quiz => self.quiz.push(score),
            ScoreType::Homework => self.homework.push(score),
            ScoreType::Other(_) => {}
        }
    }

    fn into_average(self, class_id: i64) -> ClassWeightedAverage {
        let partitions = [
            (ScoreType::Exam, mean(&self.exam).ok()),
            (ScoreType::Quiz, mean(&self.quiz).ok()),
            (ScoreType::Homework, mean(&self.homework).ok()),
        ];

        let missing_types = partitions
            .iter()
            .filter(|(_, avg)| avg.is_none())
            .map(|(score_type, _)| score_type.to_string())
            .collect();

        // 任一类型缺失则加权平均无定义
        let weighted_average = partitions
            .iter()
            .map(|(score_type, avg)| Some(avg.as_ref()? * score_type.weight()?))
            .sum::<Option<f64>>();

        let [(_, exam_average), (_, quiz_average), (_, homework_average)] = partitions;

        ClassWeightedAverage {
            class_id,
            weighted_average,
            exam_average,
            quiz_average,
            homework_average,
            missing_types,
        }
    }
}

/// 学生各班级的加权平均分，按 class_id 升序
///
/// 没有任何分数条目的记录不参与分组。
pub fn weighted_class_averages(records: &[GradeRecord]) -> Vec<ClassWeightedAverage> {
    let mut classes: BTreeMap<i64, ClassPartitions> = BTreeMap::new();

    for record in records.iter().filter(|r| !r.scores.is_empty()) {
        let partitions = classes.entry(record.class_id).or_default();
        for entry in &record.scores {
            partitions.push(&entry.score_type, entry.score);
        }
    }

    classes
        .into_iter()
        .map(|(class_id, partitions)| partitions.into_average(class_id))
        .collect()
}

/// 全体记录的及格线统计，每条记录取所有分数的简单平均
pub fn cohort_stats(records: &[GradeRecord]) -> CohortStats {
    let total_learners = records.len() as i64;
    let mut above70_count = 0;
    let mut unscored_count = 0;

    for record in records {
        let values: Vec<f64> = record.scores.iter().map(|entry| entry.score).collect();
        match mean(&values) {
            Ok(average) if average > COHORT_THRESHOLD => above70_count += 1,
            Ok(_) => {}
            Err(_) => unscored_count += 1,
        }
    }

    CohortStats {
        total_learners,
        above70_count,
        above70_percentage: percentage(above70_count, total_learners).ok(),
        unscored_count,
    }
}

/// 班级内按学生分组的分数统计，按平均分降序（稳定排序，无分数的学生排最后）
pub fn class_learner_stats(records: &[GradeRecord]) -> Vec<LearnerScoreStats> {
    let mut order: Vec<i64> = Vec::new();
    let mut groups: HashMap<i64, (Vec<f64>, i64)> = HashMap::new();

    for record in records {
        let (values, record_count) = groups.entry(record.learner_id).or_insert_with(|| {
            order.push(record.learner_id);
            (Vec::new(), 0)
        });
        values.extend(record.scores.iter().map(|entry| entry.score));
        *record_count += 1;
    }

    let mut stats: Vec<LearnerScoreStats> = order
        .into_iter()
        .filter_map(|learner_id| {
            let (values, record_count) = groups.remove(&learner_id)?;
            Some(LearnerScoreStats {
                learner_id,
                average_score: mean(&values).ok(),
                total_score: values.iter().sum(),
                score_count: values.len() as i64,
                record_count,
            })
        })
        .collect();

    stats.sort_by(|a, b| match (a.average_score, b.average_score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    stats
}
