use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path,
    },
    response::{Json, Response},
};
use chrono::Utc;
use mongodb::bson::DateTime;
use serde_json::{Map, Value};
use std::sync::Arc;

use super::documents_to_json;
use crate::error::ApiResult;
use crate::models::{
    comment_model::{CREATED_AT, MOVIE_REF},
    Collection,
};
use crate::response::respond;
use crate::services::OrmService;
use crate::store::parse_object_id;
use crate::utils::{document_to_json, json_to_document};

pub async fn load_comments(
    path: Result<Path<String>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
) -> ApiResult<Response> {
    let Path(movie_id) = path?;
    let comments = orm.find(Collection::Comments, Some(&movie_id)).await?;
    Ok(respond(200, Some(documents_to_json(comments))))
}

/// The owning movie and creation time come from the server, never from the body.
pub async fn add_comment(
    path: Result<Path<String>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Response> {
    let Path(movie_id) = path?;
    let Json(body) = payload?;
    let mut candidate = json_to_document(body)?;
    candidate.insert(MOVIE_REF, parse_object_id(&movie_id)?);
    candidate.insert(CREATED_AT, DateTime::from_chrono(Utc::now()));

    let comment = orm.insert_one(Collection::Comments, candidate).await?;
    Ok(respond(201, Some(document_to_json(comment))))
}

pub async fn load_comment(
    path: Result<Path<(String, String)>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
) -> ApiResult<Response> {
    let Path((movie_id, comment_id)) = path?;
    let comment = orm
        .find_one(Collection::Comments, &comment_id, Some(&movie_id))
        .await?;
    Ok(respond(200, Some(document_to_json(comment))))
}

/// Re-attaches the comment to the movie named in the path.
pub async fn update_comment(
    path: Result<Path<(String, String)>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Response> {
    let Path((movie_id, comment_id)) = path?;
    let Json(body) = payload?;
    let mut patch = json_to_document(body)?;

    orm.find_one(Collection::Comments, &comment_id, None).await?;
    patch.insert(MOVIE_REF, parse_object_id(&movie_id)?);
    let comment = orm
        .update_one(Collection::Comments, patch, &comment_id)
        .await?;
    Ok(respond(200, Some(document_to_json(comment))))
}

pub async fn delete_comment(
    path: Result<Path<(String, String)>, PathRejection>,
    Extension(orm): Extension<Arc<OrmService>>,
) -> ApiResult<Response> {
    let Path((_movie_id, comment_id)) = path?;
    orm.delete_one(Collection::Comments, &comment_id).await?;
    Ok(respond(204, None))
}
