//! In-memory book information repository (for development/testing)

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::BookInformationRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{BookInformation, NewBookInformation},
};

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    rows: BTreeMap<i32, BookInformation>,
}

impl Store {
    fn title_taken(&self, title: &str, except: Option<i32>) -> bool {
        let title = title.to_lowercase();
        self.rows
            .values()
            .any(|b| Some(b.id) != except && b.title.to_lowercase() == title)
    }
}

/// Same contract as the Postgres repository, held in a map keyed by id.
/// Each call takes the lock once, so a check-then-write is atomic.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookInformationRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBookInformationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookInformationRepository for InMemoryBookInformationRepository {
    async fn list_all(&self) -> AppResult<Vec<BookInformation>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<BookInformation>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn search(&self, term: &str) -> AppResult<Vec<BookInformation>> {
        let term = term.to_lowercase();
        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|b| b.title.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn create(&self, book: &NewBookInformation) -> AppResult<BookInformation> {
        let mut store = self.store.write().await;

        if store.title_taken(&book.title, None) {
            return Err(AppError::Conflict(format!(
                "Book information '{}' already exists",
                book.title
            )));
        }

        store.last_id += 1;
        let created = BookInformation::from_new(store.last_id, book.clone());
        store.rows.insert(created.id, created.clone());

        tracing::debug!(book_id = created.id, "Inserted book information");
        Ok(created)
    }

    async fn update(&self, book: &BookInformation) -> AppResult<BookInformation> {
        let mut store = self.store.write().await;

        if !store.rows.contains_key(&book.id) {
            return Err(AppError::NotFound(format!(
                "Book information {} not found",
                book.id
            )));
        }
        if store.title_taken(&book.title, Some(book.id)) {
            return Err(AppError::Conflict(format!(
                "Book information '{}' already exists",
                book.title
            )));
        }

        store.rows.insert(book.id, book.clone());
        Ok(book.clone())
    }

    async fn delete(&self, book: &BookInformation) -> AppResult<()> {
        let mut store = self.store.write().await;
        store
            .rows
            .remove(&book.id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Book information {} not found", book.id)))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str, stock: i32) -> NewBookInformation {
        NewBookInformation {
            title: title.to_string(),
            stock,
            available: stock,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryBookInformationRepository::new();

        let first = repo.create(&new_book("The Great Gatsby", 3)).await.unwrap();
        let second = repo.create(&new_book("Moby Dick", 2)).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.get_by_id(1).await.unwrap(), Some(first));
        assert_eq!(repo.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_title_ignores_case() {
        let repo = InMemoryBookInformationRepository::new();
        repo.create(&new_book("The Great Gatsby", 3)).await.unwrap();

        let result = repo.create(&new_book("the great GATSBY", 1)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_title_conflicts() {
        let repo = InMemoryBookInformationRepository::new();
        repo.create(&new_book("Dune", 3)).await.unwrap();
        let mut other = repo.create(&new_book("Emma", 3)).await.unwrap();

        other.title = "DUNE".to_string();
        assert!(matches!(
            repo.update(&other).await,
            Err(AppError::Conflict(_))
        ));

        // Re-saving a record under its own title is not a conflict
        other.title = "Emma".to_string();
        other.stock = 9;
        assert_eq!(repo.update(&other).await.unwrap().stock, 9);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_record() {
        let repo = InMemoryBookInformationRepository::new();
        let ghost = BookInformation {
            id: 42,
            title: "Ghost".to_string(),
            stock: 1,
            available: 1,
        };

        assert!(matches!(repo.update(&ghost).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.delete(&ghost).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = InMemoryBookInformationRepository::new();
        repo.create(&new_book("The Great Gatsby", 1)).await.unwrap();
        repo.create(&new_book("GATSBY Returns", 1)).await.unwrap();
        repo.create(&new_book("Moby Dick", 1)).await.unwrap();

        let titles: Vec<String> = repo
            .search("gatsby")
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["The Great Gatsby", "GATSBY Returns"]);
        assert!(repo.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_duplicate_creates_have_one_winner() {
        let repo = InMemoryBookInformationRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(&new_book("Race", 1)).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
    }
}
