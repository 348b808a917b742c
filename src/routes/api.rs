use actix_session::Session;
use actix_web::http::StatusCode;
use actix_web::{Responder, delete, get, post, web};
use log::error;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::domain::component::Component;
use crate::domain::types::{BuildId, CategorySlug, UserId};
use crate::forms::builds::{SaveBuildForm, SaveBuildPayload};
use crate::forms::configurator::{AutoBuildForm, FilterCompatibleForm, ValidateBuildForm};
use crate::repository::{CategoryReader, ComponentReader, DieselRepository};
use crate::routes::{json_error, json_error_with_details, json_success, service_error_response};
use crate::services::{autobuild, builds, configurator, options};

/// Owner id planted in the cookie session by the auth collaborator.
fn session_user(session: &Session) -> Option<UserId> {
    session
        .get::<i32>("user_id")
        .ok()
        .flatten()
        .and_then(|id| UserId::new(id).ok())
}

#[get("/v1/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match repo.list_categories() {
        Ok(categories) => json_success(&categories),
        Err(e) => {
            error!("Failed to list categories: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

#[derive(Deserialize, Debug)]
struct ComponentsQueryParams {
    category: String,
}

#[get("/v1/components")]
pub async fn list_components(
    params: web::Query<ComponentsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(slug) = CategorySlug::try_from(params.category.as_str()) else {
        return json_success(&Vec::<Component>::new());
    };

    match repo.list_components_by_category(slug) {
        Ok(components) => json_success(&components),
        Err(e) => {
            error!("Failed to list components: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

#[post("/v1/compatible")]
pub async fn get_compatible(
    body: web::Json<FilterCompatibleForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return json_error(StatusCode::BAD_REQUEST, &e.to_string());
    }

    match configurator::filter_compatible(&body.category, &body.current_build, repo.get_ref()) {
        Ok(result) => json_success(&json!({
            "category": body.category,
            "total_found": result.components.len(),
            "components": result.components,
            "selected_components": result.selected,
        })),
        Err(err) => service_error_response(err),
    }
}

#[post("/v1/validate")]
pub async fn validate_build(
    body: web::Json<ValidateBuildForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return json_error(StatusCode::BAD_REQUEST, &e.to_string());
    }

    match configurator::validate_build(&body.component_ids, repo.get_ref()) {
        Ok(report) => json_success(&json!({
            "validation": report.validation,
            "components": report.components,
            "stats": {
                "total_components": report.components.len(),
                "total_price": report.total_price,
                "total_tdp": report.total_tdp,
            },
        })),
        Err(err) => service_error_response(err),
    }
}

#[post("/v1/autobuild")]
pub async fn auto_build(
    body: web::Json<AutoBuildForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(e) = body.validate() {
        return json_error(StatusCode::BAD_REQUEST, &e.to_string());
    }

    match autobuild::generate_build(&body.task, body.budget, repo.get_ref()) {
        Ok(result) if result.success => json_success(&result),
        Ok(result) => json_error_with_details(
            StatusCode::BAD_REQUEST,
            "failed to generate a build",
            &json!({
                "errors": result.errors,
                "partial_build": result.build,
            }),
        ),
        Err(err) => service_error_response(err),
    }
}

#[get("/v1/options")]
pub async fn get_options() -> impl Responder {
    json_success(&json!({
        "task_types": options::task_types(),
        "budget_ranges": options::budget_ranges(),
    }))
}

#[post("/v1/builds")]
pub async fn save_build(
    session: Session,
    body: web::Json<SaveBuildForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(user_id) = session_user(&session) else {
        return json_error(StatusCode::UNAUTHORIZED, "authentication required");
    };

    let payload: SaveBuildPayload = match body.into_inner().try_into() {
        Ok(payload) => payload,
        Err(e) => return json_error(StatusCode::BAD_REQUEST, &format!("{e}")),
    };

    match builds::save_build(payload, user_id, repo.get_ref()) {
        Ok(build) => json_success(&json!({
            "build_id": build.id,
            "build_name": build.name,
            "total_price": build.total_price,
            "total_tdp": build.total_tdp,
            "components_count": build.components.len(),
        })),
        Err(err) => service_error_response(err),
    }
}

#[get("/v1/builds")]
pub async fn list_builds(session: Session, repo: web::Data<DieselRepository>) -> impl Responder {
    let Some(user_id) = session_user(&session) else {
        return json_error(StatusCode::UNAUTHORIZED, "authentication required");
    };

    match builds::list_builds(user_id, repo.get_ref()) {
        Ok(items) => json_success(&json!({
            "total_builds": items.len(),
            "builds": items,
        })),
        Err(err) => service_error_response(err),
    }
}

#[get("/v1/builds/{build_id}")]
pub async fn get_build(
    session: Session,
    build_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(user_id) = session_user(&session) else {
        return json_error(StatusCode::UNAUTHORIZED, "authentication required");
    };

    let Ok(build_id) = BuildId::new(build_id.into_inner()) else {
        return json_error(StatusCode::BAD_REQUEST, "invalid build id");
    };

    match builds::get_build_details(build_id, user_id, repo.get_ref()) {
        Ok(build) => json_success(&build),
        Err(err) => service_error_response(err),
    }
}

#[delete("/v1/builds/{build_id}")]
pub async fn delete_build(
    session: Session,
    build_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Some(user_id) = session_user(&session) else {
        return json_error(StatusCode::UNAUTHORIZED, "authentication required");
    };

    let Ok(build_id) = BuildId::new(build_id.into_inner()) else {
        return json_error(StatusCode::BAD_REQUEST, "invalid build id");
    };

    match builds::delete_build(build_id, user_id, repo.get_ref()) {
        Ok(()) => json_success(&json!({ "build_id": build_id })),
        Err(err) => service_error_response(err),
    }
}
