// Registry API route configuration
// Maps HTTP routes to handler functions

use actix_web::web;

use super::{config, group, health};

/// Register every registry route on an application
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(config_routes())
        .service(group_routes())
        .route("/health", web::get().to(health::health));
}

pub fn config_routes() -> actix_web::Scope {
    web::scope("/config")
        .route("", web::post().to(config::create_configuration))
        .route("", web::get().to(config::get_all_configurations))
        .route("/{id}", web::get().to(config::get_configuration_versions))
        .route("/{id}", web::post().to(config::add_configuration_version))
        .route("/{id}/{version}", web::get().to(config::get_configuration))
        .route(
            "/{id}/{version}",
            web::delete().to(config::delete_configuration),
        )
}

pub fn group_routes() -> actix_web::Scope {
    web::scope("/group")
        .route("", web::post().to(group::create_group))
        .route("", web::get().to(group::get_all_groups))
        .route("/{id}", web::get().to(group::get_group_versions))
        .route("/{id}/{version}", web::get().to(group::get_group))
        .route("/{id}/{version}", web::post().to(group::add_group_version))
        .route("/{id}/{version}", web::put().to(group::replace_group))
        .route("/{id}/{version}", web::delete().to(group::delete_group))
        .route(
            "/{id}/{version}/{labels}",
            web::get().to(group::find_group_members),
        )
}
