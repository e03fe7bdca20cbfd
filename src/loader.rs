use std::{fs::File, io::Read, path::Path};

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::ExportError;

/// Read a JSON document holding a top-level array and decode every element,
/// keeping the order they appear in the file.
pub fn load_records<T>(path: impl AsRef<Path>) -> Result<Vec<T>, ExportError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)
        .map_err(|e| ExportError::io(path, e))?;

    parse_records(&buf).map_err(|source| ExportError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an in-memory JSON array of records.
///
/// Every element must be a JSON object: arrays would otherwise fill struct
/// fields by position, and `null` is not a record. A key repeated inside an
/// object keeps its last value.
pub fn parse_records<T>(content: &str) -> Result<Vec<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    serde_json::from_str::<Vec<Value>>(content)?
        .into_iter()
        .enumerate()
        .map(|(position, element)| {
            if !element.is_object() {
                return Err(serde_json::Error::custom(format!(
                    "element {position} is not an object"
                )));
            }
            serde_json::from_value::<T>(element)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::{Issue, User};

    #[test]
    fn keeps_input_order() {
        let issues: Vec<Issue> =
            parse_records(r#"[{"name": "b"}, {"name": "a"}, {"name": "c"}]"#).unwrap();
        let names: Vec<&str> = issues.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn object_instead_of_array_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"users": []}}"#).unwrap();

        match load_records::<User>(file.path()) {
            Err(ExportError::Decode { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"id\": ").unwrap();

        assert!(matches!(
            load_records::<User>(file.path()),
            Err(ExportError::Decode { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("member.json");

        assert!(matches!(
            load_records::<User>(&missing),
            Err(ExportError::Io { .. })
        ));
    }

    #[test]
    fn positional_arrays_are_not_records() {
        assert!(parse_records::<Issue>(r#"[["i1", "Fix"]]"#).is_err());
        assert!(parse_records::<Issue>("[[]]").is_err());
        assert!(parse_records::<User>(r#"[{"id": "u1"}, ["u2", ["m2"]]]"#).is_err());
    }

    #[test]
    fn null_element_is_not_a_record() {
        let err = parse_records::<User>("[null]").unwrap_err();
        assert!(err.to_string().contains("element 0 is not an object"));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let issues: Vec<Issue> =
            parse_records(r#"[{"name": "a", "created_by": "x", "name": "b"}]"#).unwrap();
        assert_eq!(issues[0].name, "b");
        assert_eq!(issues[0].created_by, "x");

        let users: Vec<User> =
            parse_records(r#"[{"member": {"id": "m1"}, "member": {"id": "m2"}}]"#).unwrap();
        assert_eq!(users[0].member.id, "m2");
    }

    #[test]
    fn non_object_element_in_file_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "ok"}}, ["i2", "Fix"]]"#).unwrap();

        assert!(matches!(
            load_records::<Issue>(file.path()),
            Err(ExportError::Decode { .. })
        ));
    }

    #[test]
    fn empty_array_is_fine() {
        let users: Vec<User> = parse_records("[]").unwrap();
        assert!(users.is_empty());
    }
}
