//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod borrows;
pub mod categories;
pub mod fines;
pub mod library_cards;
pub mod notifications;
pub mod reading_progress;
pub mod reviews;
pub mod users;
pub mod wishlist;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub authors: authors::AuthorsRepository,
    pub categories: categories::CategoriesRepository,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
    pub fines: fines::FinesRepository,
    pub library_cards: library_cards::LibraryCardsRepository,
    pub reviews: reviews::ReviewsRepository,
    pub wishlist: wishlist::WishlistRepository,
    pub reading_progress: reading_progress::ReadingProgressRepository,
    pub notifications: notifications::NotificationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool.clone()),
            categories: categories::CategoriesRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            fines: fines::FinesRepository::new(pool.clone()),
            library_cards: library_cards::LibraryCardsRepository::new(pool.clone()),
            reviews: reviews::ReviewsRepository::new(pool.clone()),
            wishlist: wishlist::WishlistRepository::new(pool.clone()),
            reading_progress: reading_progress::ReadingProgressRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            pool,
        }
    }
}
