use axum::{extract::Path, Form};
use catalog_dal::{
    book::BookRepository,
    genre::{CreateGenre, GenreRepository},
    Order,
};
use catalog_types::{escape_html, sanitize_text};
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    views::{GenreBooksView, GenreDraft, GenreFormView, GenreItem, GenreListView},
    GENRE_LIST_PATH,
};
use crate::{
    error::{ApiError, ApiResult},
    page::Page,
    repository_from_request,
    validate::{validate_form, FieldError},
};

repository_from_request!(GenreRepository);
repository_from_request!(BookRepository);

const FORM_VIEW: &str = "genre_form";
const DELETE_VIEW: &str = "genre_delete";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: Option<String>,
}

/// Id of the genre to remove. It is read only when removal goes ahead,
/// a page with remaining books is rendered whatever the body holds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreDeleteForm {
    #[serde(default)]
    pub genreid: Option<String>,
}

impl GenreDeleteForm {
    fn genre_id(&self) -> ApiResult<i64> {
        let raw = self.genreid.as_deref().map(str::trim).unwrap_or_default();
        raw.parse()
            .map_err(|_| ApiError::InvalidRequest(format!("Invalid genre id '{raw}'")))
    }
}

enum Submission {
    Valid(CreateGenre),
    Invalid {
        name: String,
        errors: Vec<FieldError>,
    },
}

/// Trims the name, checks its length and escapes markup in it.
fn sanitize(form: GenreForm) -> Submission {
    let payload = CreateGenre::new(sanitize_text(form.name.as_deref()));
    match validate_form(payload) {
        Ok(payload) => Submission::Valid(CreateGenre::new(escape_html(&payload.name))),
        Err(errors) => Submission::Invalid {
            name: errors
                .iter()
                .find(|e| e.param == "name")
                .map(|e| escape_html(&e.value))
                .unwrap_or_default(),
            errors: errors
                .into_iter()
                .map(|e| e.map_value(escape_html))
                .collect(),
        },
    }
}

fn genre_not_found() -> ApiError {
    ApiError::NotFound("Genre".to_string())
}

pub async fn list(repository: GenreRepository) -> ApiResult<Page> {
    let genres = repository.list_all(Order::asc("name")).await?;
    Page::render(
        "genre_list",
        &GenreListView {
            title: "Genre List".to_string(),
            genre_list: genres.into_iter().map(GenreItem::from).collect(),
        },
    )
}

pub async fn detail(
    Path(id): Path<i64>,
    repository: GenreRepository,
    book_repository: BookRepository,
) -> ApiResult<Page> {
    let (genre, books) =
        futures::try_join!(repository.find(id), book_repository.list_by_genre(id))?;
    let genre = genre.ok_or_else(genre_not_found)?;
    Page::render(
        "genre_detail",
        &GenreBooksView::new("Genre Detail", genre, books),
    )
}

pub async fn create_form() -> ApiResult<Page> {
    Page::render(
        FORM_VIEW,
        &GenreFormView {
            title: "Create Genre".to_string(),
            genre: None,
            errors: vec![],
        },
    )
}

pub async fn create(repository: GenreRepository, Form(form): Form<GenreForm>) -> ApiResult<Page> {
    let payload = match sanitize(form) {
        Submission::Valid(payload) => payload,
        Submission::Invalid { name, errors } => {
            debug!("Invalid genre submitted: {errors:?}");
            return Page::render(
                FORM_VIEW,
                &GenreFormView {
                    title: "Create Genre".to_string(),
                    genre: Some(GenreDraft { id: None, name }),
                    errors,
                },
            );
        }
    };

    if let Some(existing) = repository.find_by_name(&payload.name).await? {
        debug!("Genre {} already exists", existing.id);
        return Ok(Page::redirect(existing.reference_path()));
    }

    let genre = repository.create(payload).await?;
    Ok(Page::redirect(genre.reference_path()))
}

pub async fn delete_form(
    Path(id): Path<i64>,
    repository: GenreRepository,
    book_repository: BookRepository,
) -> ApiResult<Page> {
    let (genre, books) =
        futures::try_join!(repository.find(id), book_repository.list_by_genre(id))?;
    match genre {
        Some(genre) => Page::render(
            DELETE_VIEW,
            &GenreBooksView::new("Delete Genre", genre, books),
        ),
        // Confirmation page revisited after the genre was deleted
        None => Ok(Page::redirect(GENRE_LIST_PATH)),
    }
}

pub async fn delete(
    Path(id): Path<i64>,
    repository: GenreRepository,
    book_repository: BookRepository,
    Form(form): Form<GenreDeleteForm>,
) -> ApiResult<Page> {
    let (genre, books) =
        futures::try_join!(repository.find(id), book_repository.list_by_genre(id))?;

    if !books.is_empty() {
        debug!("Genre {id} still has {} books, not deleting", books.len());
        let genre = genre.ok_or_else(genre_not_found)?;
        return Page::render(
            DELETE_VIEW,
            &GenreBooksView::new("Delete Genre", genre, books),
        );
    }

    let genre_id = form.genre_id()?;
    if genre_id != id {
        warn!("Deleting genre {genre_id} submitted from confirmation page of genre {id}");
    }
    if !repository.delete(genre_id).await? {
        debug!("Genre {genre_id} was already deleted");
    }
    Ok(Page::redirect(GENRE_LIST_PATH))
}

pub async fn update_form(Path(id): Path<i64>, repository: GenreRepository) -> ApiResult<Page> {
    let genre = repository.find(id).await?.ok_or_else(genre_not_found)?;
    Page::render(
        FORM_VIEW,
        &GenreFormView {
            title: "Update Genre".to_string(),
            genre: Some(GenreDraft {
                id: Some(genre.id),
                name: genre.name,
            }),
            errors: vec![],
        },
    )
}

/// Name uniqueness is checked only on create.
pub async fn update(
    Path(id): Path<i64>,
    repository: GenreRepository,
    Form(form): Form<GenreForm>,
) -> ApiResult<Page> {
    match sanitize(form) {
        Submission::Valid(payload) => {
            let genre = repository.update(id, payload).await?;
            Ok(Page::redirect(genre.reference_path()))
        }
        Submission::Invalid { name, errors } => {
            debug!("Invalid genre update submitted: {errors:?}");
            Page::render(
                FORM_VIEW,
                &GenreFormView {
                    title: "Update Genre".to_string(),
                    genre: Some(GenreDraft { id: Some(id), name }),
                    errors,
                },
            )
        }
    }
}
