use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Git2(#[from] git2::Error),
  #[error("{0}")]
  Git(String),
  #[error(transparent)]
  Config(#[from] config::ConfigError),
}
