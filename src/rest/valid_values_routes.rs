//! Valid value definition routes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::dispatch::{ExternalSourceRequestBody, ReferenceableRequestBody};
use crate::model::ValidValueElement;

use super::server::CatalogState;
use super::{
    CreateQuery, ElementListResponse, ElementResponse, GuidResponse, NameQuery, PagingQuery,
    RemoveQuery, SearchQuery, UpdateQuery, VoidResponse,
};

/// Routes mounted under `/servers/:server_name/users/:user_id`
pub fn valid_values_routes() -> Router<Arc<CatalogState>> {
    Router::new()
        .route("/valid-values", post(create_valid_value))
        .route("/valid-values/search", get(find_valid_values))
        .route("/valid-values/by-name", get(get_valid_values_by_name))
        .route(
            "/valid-values/for-owner/:owner_guid",
            get(get_valid_values_for_owner),
        )
        .route(
            "/valid-values/:valid_value_guid",
            get(get_valid_value_by_guid)
                .patch(update_valid_value)
                .delete(remove_valid_value),
        )
}

async fn create_valid_value(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.valid_values.create_valid_value(
        &server_name,
        &user_id,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_valid_value(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, valid_value_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.valid_values.update_valid_value(
        &server_name,
        &user_id,
        &valid_value_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_valid_value(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, valid_value_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.valid_values.remove_valid_value(
        &server_name,
        &user_id,
        &valid_value_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_valid_values(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<ValidValueElement>> {
    let result = state.valid_values.find_valid_values(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_valid_values_by_name(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<NameQuery>,
) -> Json<ElementListResponse<ValidValueElement>> {
    let result = state.valid_values.get_valid_values_by_name(
        &server_name,
        &user_id,
        &query.name,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_valid_value_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, valid_value_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<ValidValueElement>> {
    let result = state
        .valid_values
        .get_valid_value_by_guid(&server_name, &user_id, &valid_value_guid);
    Json(result.into())
}

async fn get_valid_values_for_owner(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, owner_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<ValidValueElement>> {
    let result = state.valid_values.get_valid_values_for_owner(
        &server_name,
        &user_id,
        &owner_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}
