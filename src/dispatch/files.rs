//! Dispatch for the filesystem family: file systems, folders and data
//! files, with the folder-hierarchy and nested-file edges between them.
//!
//! File beans describe locations already visible on disk, so read paths
//! do not enrich them with vendor properties.

use std::sync::Arc;

use crate::errors::{CatalogError, CatalogResult};
use crate::model::{DataFileElement, FileFolderElement, FileSystemElement, ResourceProperties};
use crate::observability::CallLog;
use crate::repository::{CallerContext, MetadataRepository, PagingRequest};

use super::core::ResourceDispatcher;
use super::{
    external_source, relationship_type, ExternalSourceRequestBody, ReferenceableRequestBody,
};

/// REST dispatch for file systems, folders and data files
pub struct FilesService {
    core: ResourceDispatcher,
}

impl FilesService {
    pub fn new(repository: Arc<dyn MetadataRepository>, call_log: Arc<dyn CallLog>) -> Self {
        Self {
            core: ResourceDispatcher::new(repository, call_log),
        }
    }

    // ==================
    // File systems
    // ==================

    pub fn create_file_system(
        &self,
        server_name: &str,
        user_id: &str,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createFileSystem", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createFileSystem",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::FileSystem(properties) => {
                    self.core.create(&ctx, false, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createFileSystem",
                    expected: "FileSystem",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn find_file_systems(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<FileSystemElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findFileSystems", &ctx, || {
            self.core.find(&ctx, search_string, &paging, false)
        })
    }

    pub fn get_file_systems_by_name(
        &self,
        server_name: &str,
        user_id: &str,
        name: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<FileSystemElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getFileSystemsByName", &ctx, || {
            self.core.get_by_name(&ctx, name, &paging, false)
        })
    }

    pub fn get_file_system_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        file_system_guid: &str,
    ) -> CatalogResult<FileSystemElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getFileSystemByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, file_system_guid, false)
        })
    }

    // ==================
    // Folders
    // ==================

    pub fn create_folder(
        &self,
        server_name: &str,
        user_id: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createFolder", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createFolder",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            match body.properties {
                ResourceProperties::FileFolder(properties) => {
                    self.core.create(&ctx, owner_is_home, source, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "createFolder",
                    expected: "FileFolder",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    /// Create a folder nested inside an existing one
    pub fn create_nested_folder(
        &self,
        server_name: &str,
        user_id: &str,
        parent_folder_guid: &str,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createNestedFolder", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createNestedFolder",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            let properties = match body.properties {
                ResourceProperties::FileFolder(properties) => properties,
                other => {
                    return Err(CatalogError::InvalidPropertiesObject {
                        method: "createNestedFolder",
                        expected: "FileFolder",
                        received: other.variant_name().to_string(),
                    })
                }
            };

            self.core
                .repository()
                .get_element_by_guid(&ctx, parent_folder_guid, Some("FileFolder"))?;
            let guid = self.core.create(&ctx, owner_is_home, source, &properties)?;
            self.core.repository().link_elements(
                &ctx,
                relationship_type::FOLDER_HIERARCHY,
                parent_folder_guid,
                &guid,
                None,
            )?;
            Ok(guid)
        })
    }

    /// Record a folder as a top-level entry of a file system
    pub fn attach_top_level_folder(
        &self,
        server_name: &str,
        user_id: &str,
        file_system_guid: &str,
        folder_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("attachTopLevelFolder", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "attachTopLevelFolder",
            })?;
            let repository = self.core.repository();
            repository.get_element_by_guid(&ctx, file_system_guid, Some("FileSystem"))?;
            repository.get_element_by_guid(&ctx, folder_guid, Some("FileFolder"))?;
            repository.link_elements(
                &ctx,
                relationship_type::SERVER_ASSET_USE,
                file_system_guid,
                folder_guid,
                None,
            )?;
            Ok(())
        })
    }

    pub fn detach_top_level_folder(
        &self,
        server_name: &str,
        user_id: &str,
        file_system_guid: &str,
        folder_guid: &str,
        body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("detachTopLevelFolder", &ctx, || {
            body.ok_or(CatalogError::MissingRequestBody {
                method: "detachTopLevelFolder",
            })?;
            self.core.repository().unlink_elements(
                &ctx,
                relationship_type::SERVER_ASSET_USE,
                file_system_guid,
                folder_guid,
            )
        })
    }

    pub fn update_folder(
        &self,
        server_name: &str,
        user_id: &str,
        folder_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateFolder", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateFolder",
            })?;
            match body.properties {
                ResourceProperties::FileFolder(properties) => {
                    self.core
                        .update(&ctx, folder_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateFolder",
                    expected: "FileFolder",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn remove_folder(
        &self,
        server_name: &str,
        user_id: &str,
        folder_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeFolder", &ctx, || {
            self.core
                .remove::<crate::model::FileFolderProperties>(&ctx, folder_guid, qualified_name)
        })
    }

    pub fn find_folders(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<FileFolderElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findFolders", &ctx, || {
            self.core.find(&ctx, search_string, &paging, false)
        })
    }

    pub fn get_folder_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        folder_guid: &str,
    ) -> CatalogResult<FileFolderElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getFolderByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, folder_guid, false)
        })
    }

    /// Folders directly beneath a parent folder
    pub fn get_nested_folders(
        &self,
        server_name: &str,
        user_id: &str,
        parent_folder_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<FileFolderElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getNestedFolders", &ctx, || {
            self.core.get_attached(
                &ctx,
                parent_folder_guid,
                relationship_type::FOLDER_HIERARCHY,
                &paging,
                false,
            )
        })
    }

    /// Top-level folders of a file system
    pub fn get_top_level_folders(
        &self,
        server_name: &str,
        user_id: &str,
        file_system_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<FileFolderElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getTopLevelFolders", &ctx, || {
            self.core.get_for_owner(&ctx, file_system_guid, &paging, false)
        })
    }

    // ==================
    // Data files
    // ==================

    /// Create a data file, optionally filed under a folder
    pub fn create_data_file(
        &self,
        server_name: &str,
        user_id: &str,
        folder_guid: Option<&str>,
        owner_is_home: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<String> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("createDataFile", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "createDataFile",
            })?;
            let source = external_source(&body.external_source_guid, &body.external_source_name);
            let properties = match body.properties {
                ResourceProperties::DataFile(properties) => properties,
                other => {
                    return Err(CatalogError::InvalidPropertiesObject {
                        method: "createDataFile",
                        expected: "DataFile",
                        received: other.variant_name().to_string(),
                    })
                }
            };

            if let Some(folder_guid) = folder_guid {
                self.core
                    .repository()
                    .get_element_by_guid(&ctx, folder_guid, Some("FileFolder"))?;
            }
            let guid = self.core.create(&ctx, owner_is_home, source, &properties)?;
            if let Some(folder_guid) = folder_guid {
                self.core.repository().link_elements(
                    &ctx,
                    relationship_type::NESTED_FILE,
                    folder_guid,
                    &guid,
                    None,
                )?;
            }
            Ok(guid)
        })
    }

    pub fn update_data_file(
        &self,
        server_name: &str,
        user_id: &str,
        file_guid: &str,
        is_merge_update: bool,
        body: Option<ReferenceableRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("updateDataFile", &ctx, || {
            let body = body.ok_or(CatalogError::MissingRequestBody {
                method: "updateDataFile",
            })?;
            match body.properties {
                ResourceProperties::DataFile(properties) => {
                    self.core
                        .update(&ctx, file_guid, is_merge_update, &properties)
                }
                other => Err(CatalogError::InvalidPropertiesObject {
                    method: "updateDataFile",
                    expected: "DataFile",
                    received: other.variant_name().to_string(),
                }),
            }
        })
    }

    pub fn publish_data_file(
        &self,
        server_name: &str,
        user_id: &str,
        file_guid: &str,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("publishDataFile", &ctx, || {
            self.core.publish(&ctx, file_guid)
        })
    }

    pub fn withdraw_data_file(
        &self,
        server_name: &str,
        user_id: &str,
        file_guid: &str,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("withdrawDataFile", &ctx, || {
            self.core.withdraw(&ctx, file_guid)
        })
    }

    pub fn remove_data_file(
        &self,
        server_name: &str,
        user_id: &str,
        file_guid: &str,
        qualified_name: &str,
        _body: Option<ExternalSourceRequestBody>,
    ) -> CatalogResult<()> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("removeDataFile", &ctx, || {
            self.core
                .remove::<crate::model::DataFileProperties>(&ctx, file_guid, qualified_name)
        })
    }

    pub fn find_data_files(
        &self,
        server_name: &str,
        user_id: &str,
        search_string: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<DataFileElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("findDataFiles", &ctx, || {
            self.core.find(&ctx, search_string, &paging, false)
        })
    }

    /// Files directly inside a folder
    pub fn get_folder_files(
        &self,
        server_name: &str,
        user_id: &str,
        folder_guid: &str,
        start_from: usize,
        page_size: usize,
    ) -> CatalogResult<Vec<DataFileElement>> {
        let ctx = CallerContext::new(server_name, user_id);
        let paging = PagingRequest::new(start_from, page_size);
        self.core.tracked("getFolderFiles", &ctx, || {
            self.core.get_attached(
                &ctx,
                folder_guid,
                relationship_type::NESTED_FILE,
                &paging,
                false,
            )
        })
    }

    pub fn get_data_file_by_guid(
        &self,
        server_name: &str,
        user_id: &str,
        file_guid: &str,
    ) -> CatalogResult<DataFileElement> {
        let ctx = CallerContext::new(server_name, user_id);
        self.core.tracked("getDataFileByGUID", &ctx, || {
            self.core.get_by_guid(&ctx, file_guid, false)
        })
    }
}
