use actix_web::{HttpResponse, Result as ActixResult};

use super::GradeAggService;
use super::compute::cohort_stats as compute_cohort_stats;
use crate::models::ApiResponse;
use crate::services::error_response;
use crate::storage::GradeFilter;

pub async fn cohort_stats(service: &GradeAggService) -> ActixResult<HttpResponse> {
    let storage = service.get_storage();

    match storage.find_grades(GradeFilter::all()).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            compute_cohort_stats(&records),
            "Statistics computed successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Cohort stats")),
    }
}
