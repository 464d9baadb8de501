//! Topic family routes: topics and attached event types.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::dispatch::{ExternalSourceRequestBody, ReferenceableRequestBody, TemplateRequestBody};
use crate::model::{EventTypeElement, TopicElement};

use super::server::CatalogState;
use super::{
    CreateQuery, ElementListResponse, ElementResponse, GuidResponse, NameQuery, PagingQuery,
    RemoveQuery, SearchQuery, UpdateQuery, VoidResponse,
};

/// Routes mounted under `/servers/:server_name/users/:user_id`
pub fn topic_routes() -> Router<Arc<CatalogState>> {
    Router::new()
        .route("/topics", post(create_topic))
        .route("/topics/from-template/:template_guid", post(create_topic_from_template))
        .route("/topics/search", get(find_topics))
        .route("/topics/by-name", get(get_topics_by_name))
        .route("/topics/for-owner/:owner_guid", get(get_topics_for_owner))
        .route(
            "/topics/:topic_guid",
            get(get_topic_by_guid).patch(update_topic).delete(remove_topic),
        )
        .route("/topics/:topic_guid/publish", post(publish_topic))
        .route("/topics/:topic_guid/withdraw", post(withdraw_topic))
        .route(
            "/topics/:topic_guid/event-types",
            post(create_event_type).get(get_event_types_for_topic),
        )
        .route("/event-types/search", get(find_event_types))
        .route(
            "/event-types/:event_type_guid",
            get(get_event_type_by_guid)
                .patch(update_event_type)
                .delete(remove_event_type),
        )
}

async fn create_topic(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.topics.create_topic(
        &server_name,
        &user_id,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn create_topic_from_template(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, template_guid)): Path<(String, String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<TemplateRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.topics.create_topic_from_template(
        &server_name,
        &user_id,
        &template_guid,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_topic(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, topic_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.topics.update_topic(
        &server_name,
        &user_id,
        &topic_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn publish_topic(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, topic_guid)): Path<(String, String, String)>,
) -> Json<VoidResponse> {
    Json(state.topics.publish_topic(&server_name, &user_id, &topic_guid).into())
}

async fn withdraw_topic(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, topic_guid)): Path<(String, String, String)>,
) -> Json<VoidResponse> {
    Json(state.topics.withdraw_topic(&server_name, &user_id, &topic_guid).into())
}

async fn remove_topic(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, topic_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.topics.remove_topic(
        &server_name,
        &user_id,
        &topic_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_topics(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<TopicElement>> {
    let result = state.topics.find_topics(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_topics_by_name(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<NameQuery>,
) -> Json<ElementListResponse<TopicElement>> {
    let result = state.topics.get_topics_by_name(
        &server_name,
        &user_id,
        &query.name,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_topic_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, topic_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<TopicElement>> {
    Json(state.topics.get_topic_by_guid(&server_name, &user_id, &topic_guid).into())
}

async fn get_topics_for_owner(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, owner_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<TopicElement>> {
    let result = state.topics.get_topics_for_owner(
        &server_name,
        &user_id,
        &owner_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn create_event_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, topic_guid)): Path<(String, String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.topics.create_event_type(
        &server_name,
        &user_id,
        &topic_guid,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_event_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, event_type_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.topics.update_event_type(
        &server_name,
        &user_id,
        &event_type_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_event_type(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, event_type_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.topics.remove_event_type(
        &server_name,
        &user_id,
        &event_type_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_event_types(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<EventTypeElement>> {
    let result = state.topics.find_event_types(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_event_types_for_topic(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, topic_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<EventTypeElement>> {
    let result = state.topics.get_event_types_for_topic(
        &server_name,
        &user_id,
        &topic_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn get_event_type_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, event_type_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<EventTypeElement>> {
    let result = state
        .topics
        .get_event_type_by_guid(&server_name, &user_id, &event_type_guid);
    Json(result.into())
}
