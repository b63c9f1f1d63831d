/// Describes one table: the column sets each operation touches and the labels
/// used in response messages.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    pub table: &'static str,
    /// Lowercase singular used in messages ("user").
    pub noun: &'static str,
    pub plural: &'static str,
    pub read_columns: Vec<&'static str>,
    pub list_columns: Vec<&'static str>,
    pub create_returning: Vec<&'static str>,
    pub update_columns: Vec<&'static str>,
    pub update_returning: Vec<&'static str>,
    pub unique_columns: Vec<&'static str>,
    pub conflict_message: Option<&'static str>,
    pub filter_column: Option<&'static str>,
}

impl EntitySchema {
    pub fn users(extended_updates: bool) -> Self {
        let mut update_columns = vec!["username", "email", "full_name"];
        let mut update_returning = vec!["id", "username", "email", "full_name", "created_at"];
        if extended_updates {
            update_columns.extend(["phone", "role"]);
            update_returning.extend(["phone", "role"]);
        }

        let read_columns = vec!["id", "username", "email", "full_name", "created_at"];
        Self {
            table: "users",
            noun: "user",
            plural: "users",
            list_columns: read_columns.clone(),
            read_columns,
            create_returning: vec![
                "id",
                "username",
                "email",
                "full_name",
                "phone",
                "role",
                "created_at",
            ],
            update_columns,
            update_returning,
            unique_columns: vec!["username", "email"],
            conflict_message: Some("Username or email already exists"),
            filter_column: None,
        }
    }

    pub fn products(extended_updates: bool) -> Self {
        let mut update_returning = vec!["id", "name", "brand", "price", "category"];
        if extended_updates {
            update_returning.push("stock");
        }

        let read_columns = vec![
            "id",
            "name",
            "brand",
            "price",
            "stock",
            "category",
            "created_at",
        ];
        Self {
            table: "products",
            noun: "product",
            plural: "products",
            list_columns: read_columns.clone(),
            read_columns,
            create_returning: vec!["id", "name", "brand", "price", "stock", "category"],
            update_columns: vec!["name", "brand", "price", "stock", "category"],
            update_returning,
            unique_columns: Vec::new(),
            conflict_message: None,
            filter_column: Some("category"),
        }
    }

    /// Capitalized noun ("User").
    pub fn title(&self) -> String {
        let mut chars = self.noun.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn not_found_message(&self) -> String {
        format!("{} not found", self.title())
    }

    pub fn conflict_message(&self) -> String {
        self.conflict_message
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} already exists", self.title()))
    }

    pub fn is_updatable(&self, column: &str) -> bool {
        self.update_columns.iter().any(|c| *c == column)
    }
}

/// Schemas in force for this process, fixed at startup.
#[derive(Debug, Clone)]
pub struct Schemas {
    pub users: EntitySchema,
    pub products: EntitySchema,
}

impl Schemas {
    pub fn new(extended_updates: bool) -> Self {
        Self {
            users: EntitySchema::users(extended_updates),
            products: EntitySchema::products(extended_updates),
        }
    }
}
