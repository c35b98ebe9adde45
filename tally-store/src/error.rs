use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("Person name cannot be empty")]
    EmptyName,

    #[error("A person named '{0}' already exists")]
    DuplicatePerson(String),

    #[error("Could not find a data directory for the store file")]
    NoDataDir,
}
