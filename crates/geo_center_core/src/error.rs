use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub(crate) fn empty_points(operation: &str) -> Self {
        Self::InvalidInput(format!("{operation} requires at least one point"))
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn empty_points_names_the_operation() {
        let err = Error::empty_points("mass center");
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(
            err.to_string(),
            "invalid input: mass center requires at least one point"
        );
    }

    #[test]
    fn io_errors_convert_transparently() {
        let err: Error = std::io::Error::other("disk gone").into();
        assert_eq!(err.to_string(), "disk gone");
    }
}
