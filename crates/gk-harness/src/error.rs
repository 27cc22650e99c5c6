use gk_tensor::KernelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
