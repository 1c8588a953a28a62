use thiserror::Error;

#[derive(Error, Debug)]
pub enum SgpaError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Validation error: {message}")]
    Validation { message: String },
    #[error("Lock poisoned: {0}")]
    Lock(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SgpaError>;

impl SgpaError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }
}

// Helper conversions
impl From<rusqlite::Error> for SgpaError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}

impl From<config::ConfigError> for SgpaError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}

impl<T> From<std::sync::PoisonError<T>> for SgpaError {
    fn from(e: std::sync::PoisonError<T>) -> Self { Self::Lock(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let err: SgpaError = std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken").into();
        assert!(matches!(err, SgpaError::Io(_)));
        assert_eq!(err.to_string(), "IO error: taken");
    }

    #[test]
    fn poisoned_locks_convert() {
        let lock = std::sync::Mutex::new(());
        let _ = std::thread::scope(|s| {
            s.spawn(|| {
                let _guard = lock.lock().unwrap();
                panic!("poison");
            })
            .join()
        });
        let err: SgpaError = lock.lock().unwrap_err().into();
        assert!(matches!(err, SgpaError::Lock(_)));
    }
}
