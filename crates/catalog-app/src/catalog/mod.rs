pub mod genre;
pub mod views;

use axum::routing::get;

use crate::state::AppState;

pub const GENRE_LIST_PATH: &str = "/catalog/genres";

/// Catalog pages, to be nested under `/catalog`.
pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/genres", get(genre::list))
        .route("/genre/create", get(genre::create_form).post(genre::create))
        .route("/genre/{id}", get(genre::detail))
        .route(
            "/genre/{id}/delete",
            get(genre::delete_form).post(genre::delete),
        )
        .route(
            "/genre/{id}/update",
            get(genre::update_form).post(genre::update),
        )
}
