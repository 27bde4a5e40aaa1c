use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::services::GradeAggService;

// HTTP处理程序
pub async fn learner_class_averages(
    service: web::Data<GradeAggService>,
    learner_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service
        .learner_class_averages(learner_id.into_inner())
        .await
}

pub async fn cohort_stats(service: web::Data<GradeAggService>) -> ActixResult<HttpResponse> {
    service.cohort_stats().await
}

// 配置路由
pub fn configure_grade_agg_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/grades_agg")
            .route(
                "/learner/{id}/avg-class",
                web::get().to(learner_class_averages),
            )
            .route("/stats", web::get().to(cohort_stats)),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    use crate::routes::configure_app;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    macro_rules! post_grade {
        ($app:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri("/grades")
                .set_json($body)
                .to_request();
            let resp = test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        }};
    }

    #[actix_web::test]
    async fn test_learner_class_averages() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let app = test::init_service(
            App::new().configure(move |cfg| configure_app(cfg, storage.clone())),
        )
        .await;

        post_grade!(
            &app,
            json!({
                "learner_id": 1,
                "class_id": 5,
                "scores": [{ "type": "exam", "score": 80 }, { "type": "quiz", "score": 70 }]
            })
        );
        post_grade!(
            &app,
            json!({
                "learner_id": 1,
                "class_id": 5,
                "scores": [{ "type": "exam", "score": 90 }, { "type": "homework", "score": 100 }]
            })
        );
        post_grade!(
            &app,
            json!({
                "learner_id": 1,
                "class_id": 6,
                "scores": [{ "type": "exam", "score": 100 }]
            })
        );

        let req = test::TestRequest::get()
            .uri("/grades_agg/learner/1/avg-class")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let items = body["data"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0]["class_id"], 5);
        let weighted = items[0]["weighted_average"].as_f64().unwrap();
        assert!((weighted - 83.5).abs() < 1e-9);

        assert_eq!(items[1]["class_id"], 6);
        assert!(items[1]["weighted_average"].is_null());
        assert_eq!(items[1]["missing_types"], json!(["quiz", "homework"]));
    }

    #[actix_web::test]
    async fn test_cohort_stats() {
        let storage: Arc<dyn Storage> = Arc::new(SeaOrmStorage::in_memory().await.unwrap());
        let app = test::init_service(
            App::new().configure(move |cfg| configure_app(cfg, storage.clone())),
        )
        .await;

        let req = test::TestRequest::get().uri("/grades_agg/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["totalLearners"], 0);
        assert!(body["data"]["above70Percentage"].is_null());

        for (learner_id, score) in [(1, 60), (2, 75), (3, 80), (4, 90)] {
            post_grade!(
                &app,
                json!({
                    "learner_id": learner_id,
                    "class_id": 1,
                    "scores": [{ "type": "exam", "score": score }]
                })
            );
        }

        let req = test::TestRequest::get().uri("/grades_agg/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["totalLearners"], 4);
        assert_eq!(body["data"]["above70Count"], 3);
        assert_eq!(body["data"]["above70Percentage"], 75.0);
    }
}
