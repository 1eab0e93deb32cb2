use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Note as returned by the backend. Wire casing is camelCase throughout.
///
/// `reminder` and `created_date` are RFC 3339 strings; the client only
/// displays them and never does date arithmetic.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub reminder: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub created_date: String,
}

/// `notes_count` is server-computed and read-only from the client.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Category {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub notes_count: i64,
}

/// Account row in the admin view; only `is_active` is client-mutable.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct User {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub register_date: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
}

/// One page of a paginated list response: `{ content: [...], totalPages }`.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageOf<T> {
    #[serde(default)]
    pub content: Vec<T>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
}

fn default_total_pages() -> u32 {
    1
}

/// Sort order understood by the notes list endpoint.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SortBy {
    #[default]
    Newest,
    Oldest,
    Title,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_contract_deserialize() {
        let json = r#"{
            "id": 4,
            "title": "App idea",
            "content": "Task manager with calendar integration",
            "categoryId": 2,
            "reminder": "2025-08-01T10:00:00",
            "completed": false,
            "imagePath": "uploads/idea.jpg",
            "createdDate": "2025-07-24T09:15:00"
        }"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert_eq!(note.id, 4);
        assert_eq!(note.category_id, Some(2));
        assert_eq!(note.image_path.as_deref(), Some("uploads/idea.jpg"));
        assert!(!note.completed);
    }

    #[test]
    fn note_tolerates_missing_optional_fields() {
        let json = r#"{"id": 1, "title": "Milk"}"#;
        let note: Note = serde_json::from_str(json).expect("sparse note should parse");
        assert!(note.category_id.is_none());
        assert!(note.reminder.is_none());
        assert!(note.image_path.is_none());
        assert_eq!(note.content, "");
    }

    #[test]
    fn category_contract_deserialize() {
        let json = r#"{"id": 7, "title": "Work", "notesCount": 12}"#;
        let cat: Category = serde_json::from_str(json).expect("category should parse");
        assert_eq!(cat.notes_count, 12);
    }

    #[test]
    fn user_contract_deserialize() {
        let json = r#"{
            "id": 7,
            "login": "alice",
            "registerDate": "2025-01-02T00:00:00",
            "role": "USER",
            "isActive": true
        }"#;
        let user: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.login, "alice");
        assert!(user.is_active);
    }

    #[test]
    fn page_defaults_to_one_total_page() {
        let json = r#"{"content": []}"#;
        let page: PageOf<Note> = serde_json::from_str(json).expect("page should parse");
        assert_eq!(page.total_pages, 1);
        assert!(page.content.is_empty());
    }

    #[test]
    fn sort_by_wire_format_is_lowercase() {
        assert_eq!(serde_json::to_value(SortBy::Newest).unwrap(), "newest");
        assert_eq!(SortBy::Oldest.to_string(), "oldest");
        assert_eq!("title".parse::<SortBy>().unwrap(), SortBy::Title);
    }
}
