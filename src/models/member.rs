//! Directory member records.
//!
//! Members are fetched from the platform when a session is held; the
//! built-in sample roster keeps the directory page usable before login
//! or when the fetch fails.

use serde::{Deserialize, Serialize};

use crate::table::{CellValue, TableRow};

/// Directory column keys, in display order.
pub mod columns {
    pub const NAME: &str = "name";
    pub const AGE: &str = "age";
    pub const EMAIL: &str = "email";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl Member {
    fn new(name: &str, age: u32, email: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            email: email.to_string(),
        }
    }

    /// Offline fallback roster for the directory page.
    pub fn sample_roster() -> Vec<Member> {
        vec![
            Member::new("Alice", 30, "alice@example.com"),
            Member::new("Bob", 25, "bob@example.com"),
            Member::new("Charlie", 35, "charlie@example.com"),
        ]
    }
}

impl TableRow for Member {
    fn cell(&self, column: &str) -> CellValue {
        match column {
            columns::NAME => CellValue::Text(self.name.clone()),
            columns::AGE => CellValue::Number(f64::from(self.age)),
            columns::EMAIL => CellValue::Text(self.email.clone()),
            _ => CellValue::Text(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_by_column() {
        let member = Member::new("Alice", 30, "alice@example.com");
        assert_eq!(member.cell(columns::NAME).to_string(), "Alice");
        assert_eq!(member.cell(columns::AGE).as_number(), Some(30.0));
        assert_eq!(member.cell(columns::EMAIL).to_string(), "alice@example.com");
        // Undeclared columns read as empty text
        assert_eq!(member.cell("missing").to_string(), "");
    }

    #[test]
    fn test_parse_members_payload() {
        let json = r#"[
            {"name": "Dana", "age": 41, "email": "dana@example.com"},
            {"name": "Eli", "age": 28, "email": "eli@example.com"}
        ]"#;
        let members: Vec<Member> = serde_json::from_str(json).expect("parse members");
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "Dana");
        assert_eq!(members[1].age, 28);
    }
}
