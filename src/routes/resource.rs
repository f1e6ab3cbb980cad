//! Generic CRUD handlers, instantiated once per entity.
//!
//! Routes for an entity `E`:
//! - `GET    /api/{collection}`       list live rows
//! - `POST   /api/{collection}`       create (201)
//! - `GET    /api/{collection}/{id}`  fetch one
//! - `PUT    /api/{collection}/{id}`  merge the body into the stored row
//! - `DELETE /api/{collection}/{id}`  soft or hard delete, per entity

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult, OptionExt};
use crate::extract::ApiJson;
use crate::metrics::Metrics;
use crate::models::Entity;
use crate::repository::Repository;

/// The entity a child row points at, e.g. the product of an inventory item.
#[async_trait]
pub trait ParentLookup: Send + Sync {
    fn name(&self) -> &'static str;

    async fn exists(&self, id: i64) -> AppResult<bool>;
}

struct ParentRepository<P>(Arc<dyn Repository<P>>);

#[async_trait]
impl<P: Entity> ParentLookup for ParentRepository<P> {
    fn name(&self) -> &'static str {
        P::NAME
    }

    async fn exists(&self, id: i64) -> AppResult<bool> {
        self.0.exists(id).await
    }
}

pub struct ResourceState<E> {
    pub repo: Arc<dyn Repository<E>>,
    pub parent: Option<Arc<dyn ParentLookup>>,
    pub metrics: Metrics,
}

impl<E> Clone for ResourceState<E> {
    fn clone(&self) -> Self {
        Self { repo: self.repo.clone(), parent: self.parent.clone(), metrics: self.metrics.clone() }
    }
}

/// Mounts the five CRUD routes for `E`. The returned router is already bound
/// to its repository, so it merges into a router of any state type.
pub fn resource_routes<E, S>(repo: Arc<dyn Repository<E>>, metrics: Metrics) -> Router<S>
where
    E: Entity,
    S: Clone + Send + Sync + 'static,
{
    mount(ResourceState { repo, parent: None, metrics })
}

/// Like [`resource_routes`], but POST answers 404 `"<Parent> not found"` unless
/// the row named by `E::parent_id` is live in `parent`.
pub fn child_resource_routes<E, P, S>(
    repo: Arc<dyn Repository<E>>,
    parent: Arc<dyn Repository<P>>,
    metrics: Metrics,
) -> Router<S>
where
    E: Entity,
    P: Entity,
    S: Clone + Send + Sync + 'static,
{
    let parent: Arc<dyn ParentLookup> = Arc::new(ParentRepository(parent));
    mount(ResourceState { repo, parent: Some(parent), metrics })
}

fn mount<E, S>(state: ResourceState<E>) -> Router<S>
where
    E: Entity,
    S: Clone + Send + Sync + 'static,
{
    let collection = format!("/api/{}", E::COLLECTION);
    let item = format!("{}/{{id}}", collection);
    Router::new()
        .route(&collection, get(list::<E>).post(create::<E>))
        .route(&item, get(read::<E>).put(update::<E>).delete(remove::<E>))
        .with_state(state)
}

// Identifiers are opaque path segments; anything that is not exactly an
// integer cannot name a row.
fn parse_id<E: Entity>(raw: &str, metrics: &Metrics) -> AppResult<i64> {
    raw.parse::<i64>().ok().ok_or_else(|| {
        metrics.inc_missed();
        AppError::NotFound(format!("{} not found", E::NAME))
    })
}

fn missed<E: Entity, T>(found: Option<T>, metrics: &Metrics) -> AppResult<T> {
    if found.is_none() {
        metrics.inc_missed();
    }
    found.ok_or_not_found(E::NAME)
}

pub async fn list<E: Entity>(State(state): State<ResourceState<E>>) -> AppResult<Json<Vec<E>>> {
    let rows = state.repo.find_all().await?;
    Ok(Json(rows))
}

pub async fn create<E: Entity>(
    State(state): State<ResourceState<E>>,
    ApiJson(input): ApiJson<E::Create>,
) -> AppResult<(StatusCode, Json<E>)> {
    if let (Some(parent), Some(parent_id)) = (&state.parent, E::parent_id(&input)) {
        if !parent.exists(parent_id).await? {
            state.metrics.inc_missed();
            return Err(AppError::NotFound(format!("{} not found", parent.name())));
        }
    }
    let created = state.repo.create(input).await?;
    state.metrics.inc_created();
    tracing::info!(entity = E::NAME, id = created.id(), "created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn read<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<E>> {
    let id = parse_id::<E>(&raw_id, &state.metrics)?;
    let found = state.repo.find_by_id(id).await?;
    Ok(Json(missed::<E, _>(found, &state.metrics)?))
}

/// Looks the row up before reading the body, so an unknown id wins over a
/// malformed payload.
pub async fn update<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(raw_id): Path<String>,
    payload: Result<ApiJson<E::Patch>, AppError>,
) -> AppResult<Json<E>> {
    let id = parse_id::<E>(&raw_id, &state.metrics)?;
    let found = state.repo.find_by_id(id).await?;
    let mut entity = missed::<E, _>(found, &state.metrics)?;
    let ApiJson(patch) = payload?;
    entity.apply(patch, Utc::now());
    // The row may have been deleted since the lookup.
    let saved = state.repo.save(&entity).await.map_err(|e| match e {
        AppError::NotFound(_) => {
            state.metrics.inc_missed();
            AppError::NotFound(format!("{} not found", E::NAME))
        }
        other => other,
    })?;
    state.metrics.inc_updated();
    tracing::info!(entity = E::NAME, id, "updated");
    Ok(Json(saved))
}

pub async fn remove<E: Entity>(
    State(state): State<ResourceState<E>>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parse_id::<E>(&raw_id, &state.metrics)?;
    if !state.repo.delete(id).await? {
        state.metrics.inc_missed();
        return Err(AppError::NotFound(format!("{} not found", E::NAME)));
    }
    state.metrics.inc_deleted();
    tracing::info!(entity = E::NAME, id, soft = E::SOFT_DELETE, "deleted");
    Ok(Json(json!({ "message": format!("{} deleted", E::NAME) })))
}
