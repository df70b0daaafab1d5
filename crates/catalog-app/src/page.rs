//! Outcome of a page handler: a view to render or a redirect.
//!
//! Markup is produced by a template layer outside of this crate, so a view
//! travels as an envelope with the view name and its model:
//! `{"view": "genre_list", "model": {...}}`.

use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewEnvelope {
    pub view: String,
    pub model: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    View(ViewEnvelope),
    Redirect(String),
}

impl Page {
    pub fn render(view: &str, model: &impl Serialize) -> ApiResult<Self> {
        Ok(Page::View(ViewEnvelope {
            view: view.to_string(),
            model: serde_json::to_value(model)?,
        }))
    }

    pub fn redirect(path: impl Into<String>) -> Self {
        Page::Redirect(path.into())
    }

    pub fn view_name(&self) -> Option<&str> {
        match self {
            Page::View(envelope) => Some(&envelope.view),
            Page::Redirect(_) => None,
        }
    }

    pub fn model(&self) -> Option<&serde_json::Value> {
        match self {
            Page::View(envelope) => Some(&envelope.model),
            Page::Redirect(_) => None,
        }
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Page::Redirect(path) => Some(path),
            Page::View(_) => None,
        }
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::View(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
            Page::Redirect(path) => Redirect::to(&path).into_response(),
        }
    }
}
