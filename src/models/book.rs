//! Book information models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Stored book information record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInformation {
    /// Storage-assigned identifier, never reassigned
    #[schema(example = 1)]
    pub id: i32,
    /// Title, unique across all records (case-insensitive)
    #[schema(example = "The Great Gatsby")]
    pub title: String,
    /// Total owned copies
    #[schema(example = 5)]
    pub stock: i32,
    /// Copies currently available
    #[schema(example = 5)]
    pub available: i32,
}

/// Row to insert; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookInformation {
    pub title: String,
    pub stock: i32,
    pub available: i32,
}

/// Create/update request body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookInformationInput {
    #[validate(length(min = 3, max = 150, message = "Title must be between 3 and 150 characters"))]
    #[schema(example = "The Great Gatsby", min_length = 3, max_length = 150)]
    pub title: String,
    #[validate(range(min = 0, max = 100, message = "Stock must be between 0 and 100"))]
    #[schema(example = 5, minimum = 0, maximum = 100)]
    pub stock: i32,
}

/// Book information as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookInformationDisplay {
    #[schema(example = "The Great Gatsby")]
    pub title: String,
    #[schema(example = 5)]
    pub stock: i32,
    #[schema(example = 5)]
    pub available: i32,
}

impl From<BookInformation> for BookInformationDisplay {
    fn from(book: BookInformation) -> Self {
        Self {
            title: book.title,
            stock: book.stock,
            available: book.available,
        }
    }
}

impl From<BookInformationInput> for NewBookInformation {
    /// A new record starts with every copy available.
    fn from(input: BookInformationInput) -> Self {
        Self {
            available: input.stock,
            title: input.title,
            stock: input.stock,
        }
    }
}

impl BookInformation {
    /// Overwrite the client-writable fields, keeping `id` and `available`.
    pub fn apply_input(&mut self, input: BookInformationInput) {
        self.title = input.title;
        self.stock = input.stock;
    }

    /// Build the record a store hands back after an insert.
    pub fn from_new(id: i32, new: NewBookInformation) -> Self {
        Self {
            id,
            title: new.title,
            stock: new.stock,
            available: new.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, stock: i32) -> BookInformationInput {
        BookInformationInput {
            title: title.to_string(),
            stock,
        }
    }

    #[test]
    fn test_new_record_starts_fully_available() {
        let new = NewBookInformation::from(input("The Great Gatsby", 7));
        assert_eq!(new.stock, 7);
        assert_eq!(new.available, 7);
    }

    #[test]
    fn test_apply_input_keeps_id_and_available() {
        let mut book = BookInformation {
            id: 4,
            title: "Moby Dick".to_string(),
            stock: 10,
            available: 3,
        };
        book.apply_input(input("Moby-Dick; or, The Whale", 2));

        assert_eq!(book.id, 4);
        assert_eq!(book.title, "Moby-Dick; or, The Whale");
        assert_eq!(book.stock, 2);
        assert_eq!(book.available, 3);
    }

    #[test]
    fn test_display_has_no_id() {
        let display = BookInformationDisplay::from(BookInformation {
            id: 9,
            title: "Dune".to_string(),
            stock: 1,
            available: 1,
        });
        let json = serde_json::to_value(&display).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["title"], "Dune");
    }

    #[test]
    fn test_input_validation_bounds() {
        assert!(input("abc", 0).validate().is_ok());
        assert!(input("abc", 100).validate().is_ok());
        assert!(input("ab", 5).validate().is_err());
        assert!(input(&"x".repeat(151), 5).validate().is_err());
        assert!(input("abc", -1).validate().is_err());
        assert!(input("abc", 101).validate().is_err());
    }
}
