//! Line protocol: JSON request/response messages for a light transport.
//!
//! One JSON object per line in each direction:
//!
//! ```text
//! → {"op":"set_light_state","id":4,"state":{"color":4294901760,"flash_mode":"timed","flash_on_ms":500,"flash_off_ms":500}}
//! ← {"status":"ok"}
//! → {"op":"get_lights"}
//! ← {"status":"lights","lights":[{"id":4,"ordinal":0,"type":"notifications"}, ...]}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LightsError, Result};
use crate::led::{Delay, LedNode};
use crate::model::{HwLight, HwLightState};
use crate::service::Lights;

/// Error code for an unknown light id.
pub const CODE_UNSUPPORTED: &str = "unsupported_operation";
/// Error code for a line that is not a valid request.
pub const CODE_BAD_REQUEST: &str = "bad_request";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    SetLightState {
        id: i32,
        #[serde(default)]
        state: HwLightState,
    },
    GetLights,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Lights { lights: Vec<HwLight> },
    Error { code: String, message: String },
}

impl Response {
    fn error(code: &str, message: impl Into<String>) -> Self {
        Response::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Decode one request line.
pub fn parse_request(line: &str) -> Result<Request> {
    serde_json::from_str(line.trim()).map_err(|e| LightsError::Protocol(e.to_string()))
}

/// Run one request against the service.
pub fn handle_request<N: LedNode, D: Delay>(lights: &Lights<N, D>, request: Request) -> Response {
    match request {
        Request::SetLightState { id, state } => match lights.set_light_state(id, state) {
            Ok(()) => Response::Ok,
            Err(e @ LightsError::UnsupportedCategory(_)) => {
                Response::error(CODE_UNSUPPORTED, e.to_string())
            }
            Err(e) => Response::error(CODE_BAD_REQUEST, e.to_string()),
        },
        Request::GetLights => Response::Lights {
            lights: lights.get_lights(),
        },
    }
}

/// Decode and run one request line.
pub fn handle_line<N: LedNode, D: Delay>(lights: &Lights<N, D>, line: &str) -> Response {
    match parse_request(line) {
        Ok(request) => handle_request(lights, request),
        Err(e) => {
            log::warn!("rejected request line: {e}");
            Response::error(CODE_BAD_REQUEST, e.to_string())
        }
    }
}

/// Encode a response as a single line (no trailing newline).
pub fn encode_response(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        format!(r#"{{"status":"error","code":"{CODE_BAD_REQUEST}","message":"encode: {e}"}}"#)
    })
}
