use serde::{ser::SerializeStruct, Serialize, Serializer};
use warp::{http::StatusCode, reply::Response, Reply};

use crate::error::{AdminError, ErrorKind};

const CODE_SUCCESS: i32 = 1;
const CODE_FAILURE: i32 = 0;

/// Uniform response wrapper returned by every employee endpoint.
///
/// On the wire this is the back-office's `{code, msg, data}` object: `code` is
/// 1 for success and 0 for failure, `msg` carries the failure message and
/// `data` the success payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure { kind: ErrorKind, message: String },
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope::Success(data)
    }

    pub fn failure(error: &AdminError) -> Self {
        Envelope::Failure {
            kind: error.kind(),
            message: error.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Envelope::Success(_) => StatusCode::OK,
            Envelope::Failure { kind, .. } => kind.status(),
        }
    }
}

impl Envelope<()> {
    pub fn empty() -> Self {
        Envelope::Success(())
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Success(data) => {
                let mut state = serializer.serialize_struct("Envelope", 3)?;
                state.serialize_field("code", &CODE_SUCCESS)?;
                state.serialize_field("msg", &Option::<String>::None)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Envelope::Failure { kind, message } => {
                let mut state = serializer.serialize_struct("Envelope", 4)?;
                state.serialize_field("code", &CODE_FAILURE)?;
                state.serialize_field("msg", message)?;
                state.serialize_field("kind", kind)?;
                state.serialize_field("data", &Option::<()>::None)?;
                state.end()
            }
        }
    }
}

impl<T: Serialize + Send> Reply for Envelope<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        warp::reply::with_status(warp::reply::json(&self), status).into_response()
    }
}
