use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("filter '{filter}': parameter '{param}' must be {expected}")]
    InvalidParam {
        filter: String,
        param: String,
        expected: &'static str,
    },

    #[error("filter '{filter}' produced a degenerate image")]
    Degenerate { filter: String },
}
