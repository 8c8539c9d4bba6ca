//! Shared domain enums, mapped to the Postgres enum types of the schema

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role attached to a local user row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    User,
    Admin,
    Librarian,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
            UserRole::Librarian => "LIBRARIAN",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BookFormat
// ---------------------------------------------------------------------------

/// Digital formats a catalog book can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "book_format", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BookFormat {
    Pdf,
    Epub,
    Mobi,
    Audiobook,
}

impl Default for BookFormat {
    fn default() -> Self {
        BookFormat::Pdf
    }
}

impl std::fmt::Display for BookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookFormat::Pdf => "PDF",
            BookFormat::Epub => "EPUB",
            BookFormat::Mobi => "MOBI",
            BookFormat::Audiobook => "AUDIOBOOK",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BorrowStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a borrow; RETURNED is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "borrow_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BorrowStatus {
    Borrowed,
    Returned,
}

impl BorrowStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BorrowStatus::Returned)
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BorrowStatus::Borrowed => "BORROWED",
            BorrowStatus::Returned => "RETURNED",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// FineStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a fine; PAID and WAIVED are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "fine_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum FineStatus {
    Pending,
    Paid,
    Waived,
}

impl FineStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FineStatus::Paid | FineStatus::Waived)
    }
}

impl std::fmt::Display for FineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FineStatus::Pending => "PENDING",
            FineStatus::Paid => "PAID",
            FineStatus::Waived => "WAIVED",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrow_status_terminality() {
        assert!(!BorrowStatus::Borrowed.is_terminal());
        assert!(BorrowStatus::Returned.is_terminal());
    }

    #[test]
    fn fine_status_terminality() {
        assert!(!FineStatus::Pending.is_terminal());
        assert!(FineStatus::Paid.is_terminal());
        assert!(FineStatus::Waived.is_terminal());
    }

    #[test]
    fn enums_serialize_uppercase() {
        assert_eq!(
            serde_json::to_string(&BorrowStatus::Borrowed).unwrap(),
            "\"BORROWED\""
        );
        assert_eq!(serde_json::to_string(&FineStatus::Waived).unwrap(), "\"WAIVED\"");
        assert_eq!(serde_json::to_string(&BookFormat::Epub).unwrap(), "\"EPUB\"");
        assert_eq!(serde_json::to_string(&UserRole::User).unwrap(), "\"USER\"");
    }

    #[test]
    fn fine_status_deserializes_from_wire_form() {
        let status: FineStatus = serde_json::from_str("\"PAID\"").unwrap();
        assert_eq!(status, FineStatus::Paid);
    }
}
