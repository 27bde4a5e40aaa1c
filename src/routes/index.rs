use actix_web::{HttpResponse, Responder, web};

pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to the API.")
}

pub fn configure_index_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn test_index() {
        let app = test::init_service(App::new().configure(configure_index_routes)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "Welcome to the API.");
    }
}
