//! `/projects`.

use serde_json::Value;
use tracing::{debug, error};

use super::decode;
use crate::client::Api;
use crate::dto::{PaginatedResponse, Project, ProjectPayload, RawPage, RawProject};
use crate::error::ApiError;
use crate::transport::Transport;

const PATH: &str = "/projects";

/// One page of projects; `page` defaults to 1.
pub fn get_items<T: Transport>(api: &Api<T>, page: Option<u32>) -> Result<PaginatedResponse<Project>, ApiError> {
    let page = page.unwrap_or(1);
    fetch_page(api, page).inspect_err(|e| error!(error = %e, page, "failed to fetch projects"))
}

/// Every project visible to the current user, unpaged.
pub fn get_all_items<T: Transport>(api: &Api<T>) -> Result<Vec<Project>, ApiError> {
    fetch_all(api).inspect_err(|e| error!(error = %e, "failed to fetch the full project list"))
}

pub fn store_item<T: Transport>(api: &Api<T>, item: &ProjectPayload) -> Result<Value, ApiError> {
    api.post(PATH, item)
        .inspect_err(|e| error!(error = %e, "failed to create project"))
}

pub fn update_item<T: Transport>(api: &Api<T>, id: i64, item: &ProjectPayload) -> Result<Value, ApiError> {
    api.put(&format!("{PATH}/{id}"), item)
        .inspect_err(|e| error!(error = %e, id, "failed to update project"))
}

fn fetch_page<T: Transport>(api: &Api<T>, page: u32) -> Result<PaginatedResponse<Project>, ApiError> {
    let data = api.get(PATH, &[("page", Some(page.to_string()))])?;
    debug!(%data, "projects page");
    let raw: RawPage<RawProject> = decode(data)?;
    raw.try_map(Project::try_from)
}

fn fetch_all<T: Transport>(api: &Api<T>) -> Result<Vec<Project>, ApiError> {
    let data = api.get(&format!("{PATH}/all"), &[])?;
    debug!(%data, "all projects");
    let raw: Vec<RawProject> = decode(data)?;
    raw.into_iter().map(Project::try_from).collect()
}
