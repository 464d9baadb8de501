//! API family routes: deployed APIs, operations and parameter lists.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::dispatch::{ExternalSourceRequestBody, ReferenceableRequestBody, TemplateRequestBody};
use crate::model::{ApiElement, ApiOperationElement, ApiParameterListElement};

use super::server::CatalogState;
use super::{
    CreateQuery, ElementListResponse, ElementResponse, GuidResponse, NameQuery,
    PagingQuery, ParameterListQuery, RemoveQuery, SearchQuery, UpdateQuery, VoidResponse,
};

/// Routes mounted under `/servers/:server_name/users/:user_id`
pub fn api_routes() -> Router<Arc<CatalogState>> {
    Router::new()
        .route("/apis", post(create_api))
        .route("/apis/from-template/:template_guid", post(create_api_from_template))
        .route("/apis/search", get(find_apis))
        .route("/apis/by-name", get(get_apis_by_name))
        .route("/apis/for-owner/:owner_guid", get(get_apis_for_owner))
        .route(
            "/apis/:api_guid",
            get(get_api_by_guid).patch(update_api).delete(remove_api),
        )
        .route("/apis/:api_guid/publish", post(publish_api))
        .route("/apis/:api_guid/withdraw", post(withdraw_api))
        .route("/apis/:api_guid/operations", post(create_api_operation).get(get_operations_for_api))
        .route("/api-operations/search", get(find_api_operations))
        .route(
            "/api-operations/:operation_guid",
            get(get_api_operation_by_guid)
                .patch(update_api_operation)
                .delete(remove_api_operation),
        )
        .route(
            "/api-operations/:operation_guid/parameter-lists",
            post(create_api_parameter_list).get(get_parameter_lists_for_operation),
        )
        .route(
            "/api-parameter-lists/:parameter_list_guid",
            get(get_api_parameter_list_by_guid)
                .patch(update_api_parameter_list)
                .delete(remove_api_parameter_list),
        )
}

async fn create_api(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.apis.create_api(
        &server_name,
        &user_id,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn create_api_from_template(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, template_guid)): Path<(String, String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<TemplateRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.apis.create_api_from_template(
        &server_name,
        &user_id,
        &template_guid,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_api(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, api_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.apis.update_api(
        &server_name,
        &user_id,
        &api_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn publish_api(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, api_guid)): Path<(String, String, String)>,
) -> Json<VoidResponse> {
    Json(state.apis.publish_api(&server_name, &user_id, &api_guid).into())
}

async fn withdraw_api(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, api_guid)): Path<(String, String, String)>,
) -> Json<VoidResponse> {
    Json(state.apis.withdraw_api(&server_name, &user_id, &api_guid).into())
}

async fn remove_api(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, api_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.apis.remove_api(
        &server_name,
        &user_id,
        &api_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_apis(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<ApiElement>> {
    let result = state.apis.find_apis(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_apis_by_name(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<NameQuery>,
) -> Json<ElementListResponse<ApiElement>> {
    let result = state.apis.get_apis_by_name(
        &server_name,
        &user_id,
        &query.name,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_api_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, api_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<ApiElement>> {
    Json(state.apis.get_api_by_guid(&server_name, &user_id, &api_guid).into())
}

async fn get_apis_for_owner(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, owner_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<ApiElement>> {
    let result = state.apis.get_apis_for_owner(
        &server_name,
        &user_id,
        &owner_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn create_api_operation(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, api_guid)): Path<(String, String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.apis.create_api_operation(
        &server_name,
        &user_id,
        &api_guid,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_api_operation(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, operation_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.apis.update_api_operation(
        &server_name,
        &user_id,
        &operation_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_api_operation(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, operation_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.apis.remove_api_operation(
        &server_name,
        &user_id,
        &operation_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_api_operations(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<ApiOperationElement>> {
    let result = state.apis.find_api_operations(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_operations_for_api(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, api_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<ApiOperationElement>> {
    let result = state.apis.get_operations_for_api(
        &server_name,
        &user_id,
        &api_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn get_api_operation_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, operation_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<ApiOperationElement>> {
    let result = state
        .apis
        .get_api_operation_by_guid(&server_name, &user_id, &operation_guid);
    Json(result.into())
}

async fn create_api_parameter_list(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, operation_guid)): Path<(String, String, String)>,
    Query(query): Query<ParameterListQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.apis.create_api_parameter_list(
        &server_name,
        &user_id,
        &operation_guid,
        query.parameter_list_type,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_api_parameter_list(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, parameter_list_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.apis.update_api_parameter_list(
        &server_name,
        &user_id,
        &parameter_list_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_api_parameter_list(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, parameter_list_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.apis.remove_api_parameter_list(
        &server_name,
        &user_id,
        &parameter_list_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn get_parameter_lists_for_operation(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, operation_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<ApiParameterListElement>> {
    let result = state.apis.get_parameter_lists_for_operation(
        &server_name,
        &user_id,
        &operation_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn get_api_parameter_list_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, parameter_list_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<ApiParameterListElement>> {
    let result = state
        .apis
        .get_api_parameter_list_by_guid(&server_name, &user_id, &parameter_list_guid);
    Json(result.into())
}
