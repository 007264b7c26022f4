use uuid::Uuid;

const TEMP_PREFIX: &str = "local-";

/// Identifier for a row that the server has not confirmed yet.
pub fn temp_id() -> String {
    format!("{TEMP_PREFIX}{}", Uuid::new_v4())
}

pub fn is_temp_id(id: &str) -> bool {
    id.starts_with(TEMP_PREFIX)
}

/// Identifier handed out by the backend service.
pub fn server_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_ids_are_unique_and_recognised() {
        let a = temp_id();
        let b = temp_id();
        assert_ne!(a, b);
        assert!(is_temp_id(&a));
        assert!(!is_temp_id(&server_id()));
    }
}
