//! Filesystem family routes: file systems, folders and data files.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::dispatch::{ExternalSourceRequestBody, ReferenceableRequestBody};
use crate::model::{DataFileElement, FileFolderElement, FileSystemElement};

use super::server::CatalogState;
use super::{
    CreateQuery, DataFileQuery, ElementListResponse, ElementResponse, GuidResponse, NameQuery,
    PagingQuery, RemoveQuery, SearchQuery, UpdateQuery, VoidResponse,
};

/// Routes mounted under `/servers/:server_name/users/:user_id`
pub fn files_routes() -> Router<Arc<CatalogState>> {
    Router::new()
        .route("/file-systems", post(create_file_system))
        .route("/file-systems/search", get(find_file_systems))
        .route("/file-systems/by-name", get(get_file_systems_by_name))
        .route("/file-systems/:file_system_guid", get(get_file_system_by_guid))
        .route(
            "/file-systems/:file_system_guid/folders",
            get(get_top_level_folders),
        )
        .route(
            "/file-systems/:file_system_guid/folders/:folder_guid",
            post(attach_top_level_folder).delete(detach_top_level_folder),
        )
        .route("/folders", post(create_folder))
        .route("/folders/search", get(find_folders))
        .route(
            "/folders/:folder_guid",
            get(get_folder_by_guid).patch(update_folder).delete(remove_folder),
        )
        .route(
            "/folders/:folder_guid/nested-folders",
            post(create_nested_folder).get(get_nested_folders),
        )
        .route("/folders/:folder_guid/files", get(get_folder_files))
        .route("/data-files", post(create_data_file))
        .route("/data-files/search", get(find_data_files))
        .route(
            "/data-files/:file_guid",
            get(get_data_file_by_guid)
                .patch(update_data_file)
                .delete(remove_data_file),
        )
        .route("/data-files/:file_guid/publish", post(publish_data_file))
        .route("/data-files/:file_guid/withdraw", post(withdraw_data_file))
}

async fn create_file_system(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state
        .files
        .create_file_system(&server_name, &user_id, body.map(|Json(body)| body));
    Json(result.into())
}

async fn find_file_systems(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<FileSystemElement>> {
    let result = state.files.find_file_systems(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_file_systems_by_name(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<NameQuery>,
) -> Json<ElementListResponse<FileSystemElement>> {
    let result = state.files.get_file_systems_by_name(
        &server_name,
        &user_id,
        &query.name,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_file_system_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_system_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<FileSystemElement>> {
    let result = state
        .files
        .get_file_system_by_guid(&server_name, &user_id, &file_system_guid);
    Json(result.into())
}

async fn attach_top_level_folder(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_system_guid, folder_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.files.attach_top_level_folder(
        &server_name,
        &user_id,
        &file_system_guid,
        &folder_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn detach_top_level_folder(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_system_guid, folder_guid)): Path<(
        String,
        String,
        String,
        String,
    )>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.files.detach_top_level_folder(
        &server_name,
        &user_id,
        &file_system_guid,
        &folder_guid,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn get_top_level_folders(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_system_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<FileFolderElement>> {
    let result = state.files.get_top_level_folders(
        &server_name,
        &user_id,
        &file_system_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn create_folder(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.files.create_folder(
        &server_name,
        &user_id,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn create_nested_folder(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, folder_guid)): Path<(String, String, String)>,
    Query(query): Query<CreateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.files.create_nested_folder(
        &server_name,
        &user_id,
        &folder_guid,
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_folder(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, folder_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.files.update_folder(
        &server_name,
        &user_id,
        &folder_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn remove_folder(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, folder_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.files.remove_folder(
        &server_name,
        &user_id,
        &folder_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_folders(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<FileFolderElement>> {
    let result = state.files.find_folders(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_folder_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, folder_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<FileFolderElement>> {
    Json(state.files.get_folder_by_guid(&server_name, &user_id, &folder_guid).into())
}

async fn get_nested_folders(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, folder_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<FileFolderElement>> {
    let result = state.files.get_nested_folders(
        &server_name,
        &user_id,
        &folder_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn get_folder_files(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, folder_guid)): Path<(String, String, String)>,
    Query(paging): Query<PagingQuery>,
) -> Json<ElementListResponse<DataFileElement>> {
    let result = state.files.get_folder_files(
        &server_name,
        &user_id,
        &folder_guid,
        paging.start_from,
        paging.page_size,
    );
    Json(result.into())
}

async fn create_data_file(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<DataFileQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<GuidResponse> {
    let result = state.files.create_data_file(
        &server_name,
        &user_id,
        query.folder_guid.as_deref(),
        query.owner_is_home,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn update_data_file(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_guid)): Path<(String, String, String)>,
    Query(query): Query<UpdateQuery>,
    body: Option<Json<ReferenceableRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.files.update_data_file(
        &server_name,
        &user_id,
        &file_guid,
        query.is_merge_update,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn publish_data_file(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_guid)): Path<(String, String, String)>,
) -> Json<VoidResponse> {
    Json(state.files.publish_data_file(&server_name, &user_id, &file_guid).into())
}

async fn withdraw_data_file(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_guid)): Path<(String, String, String)>,
) -> Json<VoidResponse> {
    Json(state.files.withdraw_data_file(&server_name, &user_id, &file_guid).into())
}

async fn remove_data_file(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_guid)): Path<(String, String, String)>,
    Query(query): Query<RemoveQuery>,
    body: Option<Json<ExternalSourceRequestBody>>,
) -> Json<VoidResponse> {
    let result = state.files.remove_data_file(
        &server_name,
        &user_id,
        &file_guid,
        &query.qualified_name,
        body.map(|Json(body)| body),
    );
    Json(result.into())
}

async fn find_data_files(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id)): Path<(String, String)>,
    Query(query): Query<SearchQuery>,
) -> Json<ElementListResponse<DataFileElement>> {
    let result = state.files.find_data_files(
        &server_name,
        &user_id,
        &query.search_string,
        query.paging.start_from,
        query.paging.page_size,
    );
    Json(result.into())
}

async fn get_data_file_by_guid(
    State(state): State<Arc<CatalogState>>,
    Path((server_name, user_id, file_guid)): Path<(String, String, String)>,
) -> Json<ElementResponse<DataFileElement>> {
    Json(state.files.get_data_file_by_guid(&server_name, &user_id, &file_guid).into())
}
