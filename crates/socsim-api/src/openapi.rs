// OpenAPI documentation generation
//
// Generated at compile time by utoipa from the handler annotations.

use utoipa::OpenApi;

use crate::common::{ApiError, ApiErrorCode};
use crate::dtos::{CoreTelemetry, StatusResponse, TelemetryResponse};

/// OpenAPI documentation for the simulator REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SoC Simulator REST API",
        version = "1.0.0",
        description = "Power and thermal governor simulation of a mobile SoC",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        crate::endpoints::dashboard::get_dashboard,
        crate::endpoints::telemetry::get_telemetry,
        crate::endpoints::control::post_set_mode,
        crate::endpoints::control::post_reboot,
    ),
    components(
        schemas(
            TelemetryResponse,
            CoreTelemetry,
            StatusResponse,
            ApiError,
            ApiErrorCode,
        )
    ),
    tags(
        (name = "dashboard", description = "Browser monitor"),
        (name = "telemetry", description = "Per-tick chip readings"),
        (name = "control", description = "Power mode and reboot overrides"),
    )
)]
pub struct ApiDoc;
