use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path,
    },
    response::{Json, Response},
};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::documents_to_json;
use crate::error::ApiResult;
use crate::models::Collection;
use crate::response::respond;
use crate::services::OrmService;
use crate::utils::{document_to_json, json_to_document};

pub async fn load_movies(Extension(orm): Extension<Arc<OrmService>>) -> ApiResult<Response> {
    let movies = orm.find(Collection::Movies, None).await?;
    Ok(respond(200, Some(documents_to_json(movies))))
}

pub async fn add_movie(
    Extension(orm): Extension<Arc<OrmService>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(body) = payload?;
    let movie = orm
        .insert_one(Collection::Movies, json_to_document(body)?)
        .await?;
    Ok(respond(201, Some(document_to_json(movie))))
}

pub async fn load_movie(
    path: Result<Path<String>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
) -> ApiResult<Response> {
    let Path(id) = path?;
    let movie = orm.find_one(Collection::Movies, &id, None).await?;
    Ok(respond(200, Some(document_to_json(movie))))
}

pub async fn update_movie(
    path: Result<Path<String>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Response> {
    let Path(id) = path?;
    let Json(body) = payload?;
    let patch = json_to_document(body)?;

    orm.find_one(Collection::Movies, &id, None).await?;
    let movie = orm.update_one(Collection::Movies, patch, &id).await?;
    Ok(respond(200, Some(document_to_json(movie))))
}

pub async fn delete_movie(
    path: Result<Path<String>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
) -> ApiResult<Response> {
    let Path(id) = path?;
    orm.delete_one(Collection::Movies, &id).await?;
    Ok(respond(204, None))
}
