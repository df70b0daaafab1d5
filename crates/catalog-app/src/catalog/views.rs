//! View models handed to the template layer.

use catalog_dal::{book::Book, genre::Genre};
use serde::{Deserialize, Serialize};

use crate::validate::FieldError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreItem {
    pub id: i64,
    pub name: String,
    pub url: String,
}

impl From<Genre> for GenreItem {
    fn from(genre: Genre) -> Self {
        GenreItem {
            url: genre.reference_path(),
            id: genre.id,
            name: genre.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookItem {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub url: String,
}

impl From<Book> for BookItem {
    fn from(book: Book) -> Self {
        BookItem {
            url: book.reference_path(),
            id: book.id,
            title: book.title,
            summary: book.summary,
        }
    }
}

/// Genre as filled in the form, not necessarily stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreListView {
    pub title: String,
    pub genre_list: Vec<GenreItem>,
}

/// Shared by the detail and the delete confirmation pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreBooksView {
    pub title: String,
    pub genre: GenreItem,
    pub genre_books: Vec<BookItem>,
}

impl GenreBooksView {
    pub fn new(title: &str, genre: Genre, books: Vec<Book>) -> Self {
        GenreBooksView {
            title: title.to_string(),
            genre: genre.into(),
            genre_books: books.into_iter().map(BookItem::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreFormView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<GenreDraft>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}
