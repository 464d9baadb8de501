//! Connection family routes: connections, endpoints, connector types and
//! their relationship edges.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::dispatch::{EdgeRequestBody, ExternalSourceRequestBody, ReferenceableRequestBody, TemplateRequestBody};
use crate::model::{
    AssetConnectionProperties, ConnectionElement, ConnectorTypeElement,
    EmbeddedConnectionProperties, EndpointElement,
};

use super::server::CatalogState;
use super::{
    CreateQuery, ElementListResponse, ElementResponse, GuidResponse, NameQuery, RemoveQuery,
    SearchQuery, UpdateQuery, VoidResponse,
};

/// Routes mounted under `/servers/:server_name/users/:user_id`
pub fn connection_routes() -> Router<Arc<CatalogState>> {
    Router::new()
        .route("/connections", post(create_connection))
        .route(
            "/connections/from-template/:template_guid",
            post(create_connection_from_template),
        )
        .route("/connections/search", get(find_connections))
        .route("/connections/by-name", get(get_connections_by_name))
        .route("/connections/for-owner/:owner_guid", get(get_connections_for_owner))
        .route(
            "/connections/:connection_guid",
            get(get_connection_by_guid)
                .patch(update_connection)
                .delete(remove_connection),
        )
        .route(
            "/connections/:connection_guid/connector-types/:connector_type_guid",
            post(setup_connector_type).delete(clear_connector_type),
        )
        .route(
            "/connections/:connection_guid/endpoints/:endpoint_guid",
            post(setup_endpoint).delete(clear_endpoint),
        )
        .route(
            "/connections/:connection_guid/embedded-connections/:embedded_connection_guid",
            post(setup_embedded_connection).delete(clear_embedded_connection),
        )
        .route(
            "/connections/:connection_guid/assets/:asset_guid",
            post(setup_asset_connection).delete(clear_asset_connection),
        )
        .route("/endpoints", post(create_endpoint))
        .route("/endpoints/search", get(find_endpoints))
        .route("/endpoints/by-name", get(get_endpoints_by_name))
        .route(
            "/endpoints/:endpoint_guid",
            get(get_endpoint_by_guid)
                .patch(update_endpoint)
                .delete(remove_endpoint),
        )
        .route("/connector-types", post(create_connector_type))
        .route("/connector-types/search", get(find_connector_types))
        .route(
            "/connector-types/:connector_type_guid",
            get(get_connector_type_by_guid)
                .patch(update_connector_type)
                .delete(remove_connector_type),
        )
}

async fn create_connection(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.connections.create_connection(
        &server_name,
        &user_id,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn create_connection_from_template(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, template_guid)): Path<(String, String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<TemplateRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.connections.create_connection_from_template(
        &server_name,
        &user_id,
        &template_guid,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_connection(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.update_connection(
        &server_name,
        &user_id,
        &connection_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_connection(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.remove_connection(
        &server_name,
        &user_id,
        &connection_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_connections(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<ConnectionElement>> {
    let result = state.connections.find_connections(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_connections_by_name(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<NameQuery>,
) -> Json<ElementListResponse<ConnectionElement>> {
    let result = state.connections.get_connections_by_name(
        &server_name,
        &user_id,
        &query.name,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_connection_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<ConnectionElement>> {
    let result = state
        .connections
        .get_connection_by_guid(&server_name, &user_id, &connection_guid);
    Json(result.into())
}

async fn get_connections_for_owner(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, owner_guid)): Path<(String, String, String)>,
    Query(paging): Query<super::PagingQuery>,
) -> Json<ElementListResponse<ConnectionElement>> {
    let result = state.connections.get_connections_for_owner(
        &server_name,
        &user_id,
        &owner_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn setup_connector_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, connector_type_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.setup_connector_type_edge(
        &server_name,
        &user_id,
        &connection_guid,
        &connector_type_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn clear_connector_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, connector_type_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.clear_connector_type_edge(
        &server_name,
        &user_id,
        &connection_guid,
        &connector_type_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn setup_endpoint(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, endpoint_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.setup_endpoint_edge(
        &server_name,
        &user_id,
        &connection_guid,
        &endpoint_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn clear_endpoint(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, endpoint_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.clear_endpoint_edge(
        &server_name,
        &user_id,
        &connection_guid,
        &endpoint_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn setup_embedded_connection(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, embedded_connection_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<EdgeRequestBody<EmbeddedConnectionProperties>>>,
) -> Json<VoidResponse> {
    let result = state.connections.setup_embedded_connection(
        &server_name,
        &user_id,
        &connection_guid,
        &embedded_connection_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn clear_embedded_connection(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, embedded_connection_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.clear_embedded_connection(
        &server_name,
        &user_id,
        &connection_guid,
        &embedded_connection_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn setup_asset_connection(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, asset_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<EdgeRequestBody<AssetConnectionProperties>>>,
) -> Json<VoidResponse> {
    let result = state.connections.setup_asset_connection(
        &server_name,
        &user_id,
        &connection_guid,
        &asset_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn clear_asset_connection(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connection_guid, asset_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.clear_asset_connection(
        &server_name,
        &user_id,
        &connection_guid,
        &asset_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn create_endpoint(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.connections.create_endpoint(
        &server_name,
        &user_id,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_endpoint(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, endpoint_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.update_endpoint(
        &server_name,
        &user_id,
        &endpoint_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_endpoint(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, endpoint_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.remove_endpoint(
        &server_name,
        &user_id,
        &endpoint_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_endpoints(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<EndpointElement>> {
    let result = state.connections.find_endpoints(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_endpoints_by_name(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<NameQuery>,
) -> Json<ElementListResponse<EndpointElement>> {
    let result = state.connections.get_endpoints_by_name(
        &server_name,
        &user_id,
        &query.name,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_endpoint_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, endpoint_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<EndpointElement>> {
    let result = state
        .connections
        .get_endpoint_by_guid(&server_name, &user_id, &endpoint_guid);
    Json(result.into())
}

async fn create_connector_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.connections.create_connector_type(
        &server_name,
        &user_id,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_connector_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connector_type_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.update_connector_type(
        &server_name,
        &user_id,
        &connector_type_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_connector_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connector_type_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.connections.remove_connector_type(
        &server_name,
        &user_id,
        &connector_type_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_connector_types(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<ConnectorTypeElement>> {
    let result = state.connections.find_connector_types(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_connector_type_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, connector_type_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<ConnectorTypeElement>> {
    let result = state
        .connections
        .get_connector_type_by_guid(&server_name, &user_id, &connector_type_guid);
    Json(result.into())
}
