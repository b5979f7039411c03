use std::fmt;
use thiserror::Error;

pub type QuadResult<T> = Result<T, QuadError>;

/// A user-actionable failure, serialized as `{"error":"..."}` at the edge.
#[derive(Debug, Error)]
#[error("{{\"error\":\"{message}\"}}")]
pub struct ApiError {
  pub message: String,
}

impl ApiError {
  pub fn err(msg: &str) -> Self {
    ApiError {
      message: msg.to_string(),
    }
  }
}

#[derive(Debug)]
pub struct QuadError {
  pub inner: anyhow::Error,
}

impl fmt::Display for QuadError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    self.inner.fmt(f)
  }
}

impl From<anyhow::Error> for QuadError {
  fn from(e: anyhow::Error) -> Self {
    QuadError { inner: e }
  }
}

impl From<ApiError> for QuadError {
  fn from(e: ApiError) -> Self {
    QuadError { inner: e.into() }
  }
}

impl From<diesel::result::Error> for QuadError {
  fn from(e: diesel::result::Error) -> Self {
    QuadError { inner: e.into() }
  }
}

impl From<diesel::ConnectionError> for QuadError {
  fn from(e: diesel::ConnectionError) -> Self {
    QuadError { inner: e.into() }
  }
}

impl From<diesel::r2d2::PoolError> for QuadError {
  fn from(e: diesel::r2d2::PoolError) -> Self {
    QuadError { inner: e.into() }
  }
}

impl From<config::ConfigError> for QuadError {
  fn from(e: config::ConfigError) -> Self {
    QuadError { inner: e.into() }
  }
}

impl From<std::io::Error> for QuadError {
  fn from(e: std::io::Error) -> Self {
    QuadError { inner: e.into() }
  }
}
