use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::debug;

use crate::models::grades::entities::ScoreEntry;
use crate::models::grades::requests::{
    ClassGradeQuery, CreateGradeRequest, LearnerGradeQuery, ReassignClassRequest,
};
use crate::services::GradeService;

// HTTP处理程序
pub async fn list_grades(service: web::Data<GradeService>) -> ActixResult<HttpResponse> {
    service.list_grades().await
}

pub async fn create_grade(
    service: web::Data<GradeService>,
    grade: web::Json<CreateGradeRequest>,
) -> ActixResult<HttpResponse> {
    service.create_grade(grade.into_inner()).await
}

pub async fn get_grade(
    service: web::Data<GradeService>,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    service.get_grade(&id).await
}

pub async fn add_score(
    service: web::Data<GradeService>,
    id: web::Path<String>,
    entry: web::Json<ScoreEntry>,
) -> ActixResult<HttpResponse> {
    service.add_score(&id, entry.into_inner()).await
}

pub async fn remove_score(
    service: web::Data<GradeService>,
    id: web::Path<String>,
    entry: web::Json<ScoreEntry>,
) -> ActixResult<HttpResponse> {
    service.remove_score(&id, entry.into_inner()).await
}

pub async fn delete_grade(
    service: web::Data<GradeService>,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    service.delete_grade(&id).await
}

pub async fn list_by_learner(
    service: web::Data<GradeService>,
    learner_id: web::Path<i64>,
    query: web::Query<LearnerGradeQuery>,
) -> ActixResult<HttpResponse> {
    service
        .list_by_learner(learner_id.into_inner(), query.class)
        .await
}

// 旧版 /student/{id} 路由，直接复用 learner 处理程序
pub async fn list_by_student(
    service: web::Data<GradeService>,
    learner_id: web::Path<i64>,
    query: web::Query<LearnerGradeQuery>,
) -> ActixResult<HttpResponse> {
    debug!("Legacy student route used for learner {}", learner_id);
    list_by_learner(service, learner_id, query).await
}

pub async fn delete_by_learner(
    service: web::Data<GradeService>,
    learner_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service.delete_by_learner(learner_id.into_inner()).await
}

pub async fn list_by_class(
    service: web::Data<GradeService>,
    class_id: web::Path<i64>,
    query: web::Query<ClassGradeQuery>,
) -> ActixResult<HttpResponse> {
    service
        .list_by_class(class_id.into_inner(), query.learner)
        .await
}

pub async fn reassign_class(
    service: web::Data<GradeService>,
    class_id: web::Path<i64>,
    update: web::Json<ReassignClassRequest>,
) -> ActixResult<HttpResponse> {
    service
        .reassign_class(class_id.into_inner(), update.into_inner())
        .await
}

pub async fn delete_by_class(
    service: web::Data<GradeService>,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service.delete_by_class(class_id.into_inner()).await
}

pub async fn class_stats(
    service: web::Data<GradeService>,
    class_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    service.class_stats(class_id.into_inner()).await
}

// 配置路由
pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/grades")
            .service(
                web::resource("")
                    .route(web::get().to(list_grades))
                    .route(web::post().to(create_grade)),
            )
            .service(
                web::resource("/learner/{id}")
                    .route(web::get().to(list_by_learner))
                    .route(web::delete().to(delete_by_learner)),
            )
            .service(web::resource("/student/{id}").route(web::get().to(list_by_student)))
            .service(
                web::resource("/class/{id}")
                    .route(web::get().to(list_by_class))
                    .route(web::patch().to(reassign_class))
                    .route(web::delete().to(delete_by_class)),
            )
            .service(web::resource("/stats/{id}").route(web::get().to(class_stats)))
            .service(web::resource("/{id}/add").route(web::patch().to(add_score)))
            .service(web::resource("/{id}/remove").route(web::patch().to(remove_score)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_grade))
                    .route(web::delete().to(delete_grade)),
            ),
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

    async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::in_memory().await.unwrap())
    }

    macro_rules! app {
        ($storage:expr) => {{
            let storage = $storage.clone();
            test::init_service(App::new().configure(move |cfg| configure_app(cfg, storage))).await
        }};
    }

    async fn only_record(storage: &Arc<dyn Storage>) -> String {
        let records = storage
            .find_grades(crate::storage::GradeFilter::all())
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        records[0].id.to_string()
    }

    #[actix_web::test]
    async fn test_create_then_fetch() {
        let storage = storage().await;
        let app = app!(storage);

        let req = test::TestRequest::post()
            .uri("/grades")
            .set_json(json!({
                "learner_id": 7,
                "class_id": 12,
                "scores": [{ "type": "exam", "score": 88 }]
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let id = only_record(&storage).await;
        let req = test::TestRequest::get()
            .uri(&format!("/grades/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["learner_id"], 7);
        assert_eq!(body["data"]["class_id"], 12);
        assert_eq!(body["data"]["scores"], json!([{ "type": "exam", "score": 88.0 }]));
    }

    #[actix_web::test]
    async fn test_create_with_legacy_student_id() {
        let storage = storage().await;
        let app = app!(storage);

        let req = test::TestRequest::post()
            .uri("/grades")
            .set_json(json!({ "student_id": 3, "class_id": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri("/grades/learner/3").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_create_out_of_range_warns() {
        let storage = storage().await;
        let app = app!(storage);

        let req = test::TestRequest::post()
            .uri("/grades")
            .set_json(json!({ "learner_id": 1, "class_id": 301 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(resp.headers().contains_key("x-validation-warning"));
        only_record(&storage).await;
    }

    #[actix_web::test]
    async fn test_create_rejects_malformed_payload() {
        let storage = storage().await;
        let app = app!(storage);

        let req = test::TestRequest::post()
            .uri("/grades")
            .set_json(json!({ "learner_id": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_bad_request() {
        let storage = storage().await;
        let app = app!(storage);

        for req in [
            test::TestRequest::get().uri("/grades/xyz").to_request(),
            test::TestRequest::delete().uri("/grades/xyz").to_request(),
            test::TestRequest::patch()
                .uri("/grades/xyz/add")
                .set_json(json!({ "type": "quiz", "score": 1 }))
                .to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], crate::models::ErrorCode::InvalidIdentifier as i32);
        }
    }

    #[actix_web::test]
    async fn test_absent_id_is_not_found() {
        let storage = storage().await;
        let app = app!(storage);

        for req in [
            test::TestRequest::get()
                .uri("/grades/65a1b2c3d4e5f60718293a4b")
                .to_request(),
            test::TestRequest::delete()
                .uri("/grades/65a1b2c3d4e5f60718293a4b")
                .to_request(),
            test::TestRequest::patch()
                .uri("/grades/65a1b2c3d4e5f60718293a4b/remove")
                .set_json(json!({ "type": "quiz", "score": 1 }))
                .to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn test_add_and_remove_score() {
        let storage = storage().await;
        let app = app!(storage);

        let req = test::TestRequest::post()
            .uri("/grades")
            .set_json(json!({ "learner_id": 1, "class_id": 1 }))
            .to_request();
        test::call_service(&app, req).await;
        let id = only_record(&storage).await;

        let req = test::TestRequest::patch()
            .uri(&format!("/grades/{id}/add"))
            .set_json(json!({ "type": "homework", "score": 92.5 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["matched_count"], 1);
        assert_eq!(body["data"]["modified_count"], 1);

        let req = test::TestRequest::patch()
            .uri(&format!("/grades/{id}/remove"))
            .set_json(json!({ "type": "homework", "score": 92.5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        // 条目已不存在
        let req = test::TestRequest::patch()
            .uri(&format!("/grades/{id}/remove"))
            .set_json(json!({ "type": "homework", "score": 92.5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], crate::models::ErrorCode::NotFound as i32);
        assert_eq!(body["message"], "Score entry not found");
    }

    #[actix_web::test]
    async fn test_learner_and_class_routes() {
        let storage = storage().await;
        let app = app!(storage);

        for (learner_id, class_id) in [(1, 10), (1, 20), (2, 10)] {
            let req = test::TestRequest::post()
                .uri("/grades")
                .set_json(json!({ "learner_id": learner_id, "class_id": class_id }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let count = |body: Value| body["data"]["items"].as_array().unwrap().len();

        let req = test::TestRequest::get().uri("/grades/learner/1").to_request();
        assert_eq!(count(test::call_and_read_body_json(&app, req).await), 2);

        let req = test::TestRequest::get()
            .uri("/grades/learner/1?class=20")
            .to_request();
        assert_eq!(count(test::call_and_read_body_json(&app, req).await), 1);

        let req = test::TestRequest::get().uri("/grades/student/1").to_request();
        assert_eq!(count(test::call_and_read_body_json(&app, req).await), 2);

        let req = test::TestRequest::get()
            .uri("/grades/class/10?learner=2")
            .to_request();
        assert_eq!(count(test::call_and_read_body_json(&app, req).await), 1);

        let req = test::TestRequest::get().uri("/grades").to_request();
        assert_eq!(count(test::call_and_read_body_json(&app, req).await), 3);

        let req = test::TestRequest::patch()
            .uri("/grades/class/10")
            .set_json(json!({ "class_id": 30 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["matched_count"], 2);

        let req = test::TestRequest::delete().uri("/grades/class/30").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["deleted_count"], 2);

        let req = test::TestRequest::delete().uri("/grades/learner/1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["deleted_count"], 1);

        let req = test::TestRequest::delete().uri("/grades/learner/1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/grades/learner/1").to_request();
        assert_eq!(count(test::call_and_read_body_json(&app, req).await), 0);
    }

    #[actix_web::test]
    async fn test_class_routes_without_matches() {
        let storage = storage().await;
        let app = app!(storage);

        let req = test::TestRequest::patch()
            .uri("/grades/class/42")
            .set_json(json!({ "class_id": 43 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], crate::models::ErrorCode::NotFound as i32);

        let req = test::TestRequest::delete().uri("/grades/class/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], crate::models::ErrorCode::NotFound as i32);
    }

    #[actix_web::test]
    async fn test_reassign_out_of_range_warns_but_applies() {
        let storage = storage().await;
        let app = app!(storage);

        let req = test::TestRequest::post()
            .uri("/grades")
            .set_json(json!({ "learner_id": 1, "class_id": 5 }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::patch()
            .uri("/grades/class/5")
            .set_json(json!({ "class_id": 301 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let warning = resp
            .headers()
            .get("x-validation-warning")
            .and_then(|value| value.to_str().ok())
            .unwrap()
            .to_string();
        assert!(warning.starts_with("class_id"));

        let req = test::TestRequest::get().uri("/grades/class/301").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);

        // 范围内的目标班级不带警告
        let req = test::TestRequest::patch()
            .uri("/grades/class/301")
            .set_json(json!({ "class_id": 7 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(!resp.headers().contains_key("x-validation-warning"));
    }

    #[actix_web::test]
    async fn test_class_stats_route() {
        let storage = storage().await;
        let app = app!(storage);

        for (learner_id, score) in [(1, 55), (2, 95), (3, 70)] {
            let req = test::TestRequest::post()
                .uri("/grades")
                .set_json(json!({
                    "learner_id": learner_id,
                    "class_id": 4,
                    "scores": [{ "type": "exam", "score": score }]
                }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/grades/stats/4").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let learners: Vec<i64> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["learner_id"].as_i64().unwrap())
            .collect();
        assert_eq!(learners, vec![2, 3, 1]);

        let req = test::TestRequest::get().uri("/grades/stats/abc").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
