use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::generation::error::GenerationFailure;

/// Outcome of one generation request; built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult<T> {
    Success(Vec<T>),
    Failure(GenerationFailure),
}

impl<T> GenerationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success(_))
    }

    pub fn into_result(self) -> Result<Vec<T>, GenerationFailure> {
        match self {
            GenerationResult::Success(data) => Ok(data),
            GenerationResult::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<Result<Vec<T>, GenerationFailure>> for GenerationResult<T> {
    fn from(result: Result<Vec<T>, GenerationFailure>) -> Self {
        match result {
            Ok(data) => GenerationResult::Success(data),
            Err(failure) => GenerationResult::Failure(failure),
        }
    }
}

/// `{success: true, data}` or `{success: false, error: {message, kind}}`.
impl<T: Serialize> Serialize for GenerationResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GenerationResult", 2)?;
        match self {
            GenerationResult::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            GenerationResult::Failure(error) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}
