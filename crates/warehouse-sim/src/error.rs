use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot place {agents} agents on {floor} distinct floor cells")]
    TooManyAgents { agents: usize, floor: usize },

    #[error("joint action length {got} does not match agent count {expected}")]
    ActionCountMismatch { expected: usize, got: usize },
}

pub type SimResult<T> = Result<T, SimError>;
