//! Wire bodies for POST endpoints. Unset optional fields are skipped.

use super::options::{BrowseOptions, SessionData};
use super::workflow::{Importance, Variables};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct BrowseRequest<'a> {
    pub url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a BrowseOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<&'a SessionData>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchRequest<'a> {
    pub urls: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<&'a BrowseOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<&'a SessionData>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StartRecordingRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub domain: &'a str,
    #[serde(skip_serializing_if = "<[&str]>::is_empty")]
    pub tags: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(crate) struct StopRecordingRequest {
    pub save: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotateRequest<'a> {
    pub step_number: u32,
    pub annotation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReplayRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<&'a Variables>,
}
