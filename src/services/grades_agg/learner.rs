use actix_web::{HttpResponse, Result as ActixResult};
use tracing::debug;

use super::GradeAggService;
use super::compute::weighted_class_averages;
use crate::models::ApiResponse;
use crate::models::grades_agg::responses::LearnerClassAveragesResponse;
use crate::services::error_response;
use crate::storage::GradeFilter;

pub async fn learner_class_averages(
    service: &GradeAggService,
    learner_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    let records = match storage
        .find_grades(GradeFilter::by_learner(learner_id, None))
        .await
    {
        Ok(records) => records,
        Err(e) => return Ok(error_response(&e, "Learner class averages")),
    };

    let items = weighted_class_averages(&records);
    debug!(
        "Computed weighted averages for learner {} across {} class(es)",
        learner_id,
        items.len()
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        LearnerClassAveragesResponse { learner_id, items },
        "Weighted averages computed successfully",
    )))
}
