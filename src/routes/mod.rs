pub mod grades;

pub mod grades_agg;

pub mod index;

pub use grades::configure_grade_routes;
pub use grades_agg::configure_grade_agg_routes;
pub use index::configure_index_routes;

use actix_web::web;
use std::sync::Arc;

use crate::services::{GradeAggService, GradeService};
use crate::storage::Storage;
use crate::utils::{json_error_handler, path_error_handler, query_error_handler};

/// 注册全部服务、参数错误处理器与路由
pub fn configure_app(cfg: &mut web::ServiceConfig, storage: Arc<dyn Storage>) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler)) // 设置查询参数错误处理器
        .app_data(web::JsonConfig::default().error_handler(json_error_handler)) // 设置JSON错误处理器
        .app_data(web::PathConfig::default().error_handler(path_error_handler)) // 设置路径参数错误处理器
        .app_data(web::Data::new(GradeService::new(storage.clone())))
        .app_data(web::Data::new(GradeAggService::new(storage)))
        .configure(configure_index_routes) // 配置欢迎页路由
        .configure(configure_grade_routes) // 配置成绩记录相关路由
        .configure(configure_grade_agg_routes); // 配置成绩聚合相关路由
}
