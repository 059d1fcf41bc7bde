//! Property keys and typed accessors for person and status nodes.

use socnet_core::{NodeId, SocnetError, SocnetResult, Value};
use socnet_storage::GraphRead;

/// Person display name.
pub const PERSON_NAME: &str = "person_name";
/// Status update body.
pub const STATUS_TEXT: &str = "text";
/// Status update creation time, epoch millis.
pub const STATUS_CREATED_AT: &str = "created_at";

/// Read a required string property.
pub fn read_string<R: GraphRead + ?Sized>(reader: &R, node: NodeId, key: &str) -> SocnetResult<String> {
    match reader.get_property(node, key)? {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(SocnetError::type_mismatch(node, key, "string", other.type_name())),
        None => Err(SocnetError::missing_property(node, key)),
    }
}

/// Read a required integer property.
pub fn read_int<R: GraphRead + ?Sized>(reader: &R, node: NodeId, key: &str) -> SocnetResult<i64> {
    match reader.get_property(node, key)? {
        Some(Value::Int(i)) => Ok(i),
        Some(other) => Err(SocnetError::type_mismatch(node, key, "int", other.type_name())),
        None => Err(SocnetError::missing_property(node, key)),
    }
}

/// Validate a person name.
pub fn validate_name(name: &str, max_len: usize) -> SocnetResult<()> {
    if name.trim().is_empty() {
        return Err(SocnetError::invalid_input("Person name must not be empty"));
    }
    if name.len() > max_len {
        return Err(SocnetError::invalid_input(format!(
            "Person name exceeds {} bytes",
            max_len
        )));
    }
    Ok(())
}

/// Validate a status text. Empty text is allowed.
pub fn validate_status_text(text: &str, max_len: usize) -> SocnetResult<()> {
    if text.len() > max_len {
        return Err(SocnetError::invalid_input(format!(
            "Status text exceeds {} bytes",
            max_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use socnet_storage::{GraphStore, GraphWrite, MemoryGraphStore};

    #[test]
    fn read_string_variants() {
        let store = MemoryGraphStore::new();
        let n = store
            .run_atomic(|txn| {
                let n = txn.create_node()?;
                txn.set_property(n, PERSON_NAME, Value::from("ada"))?;
                txn.set_property(n, STATUS_CREATED_AT, Value::from(5i64))?;
                Ok(n)
            })
            .unwrap();

        assert_eq!(read_string(&store, n, PERSON_NAME).unwrap(), "ada");
        assert!(matches!(
            read_string(&store, n, STATUS_CREATED_AT),
            Err(SocnetError::TypeMismatch { .. })
        ));
        assert!(matches!(
            read_string(&store, n, STATUS_TEXT),
            Err(SocnetError::MissingProperty { .. })
        ));
        assert_eq!(read_int(&store, n, STATUS_CREATED_AT).unwrap(), 5);
    }

    #[test]
    fn name_validation() {
        assert!(validate_name("ada", 10).is_ok());
        assert!(validate_name("", 10).is_err());
        assert!(validate_name("   ", 10).is_err());
        assert!(validate_name("abcdefghijk", 10).is_err());
    }

    #[test]
    fn status_text_validation() {
        assert!(validate_status_text("", 4).is_ok());
        assert!(validate_status_text("four", 4).is_ok());
        assert!(validate_status_text("fives", 4).is_err());
    }
}
