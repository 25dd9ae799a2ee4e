//! API Documentation
//!
//! OpenAPI document plus the Swagger UI and ReDoc pages that render it.

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use crate::domain::SYSTEM_INFO_UNAVAILABLE;
use crate::health::{API_VERSION, SERVICE_NAME};

/// Path of the OpenAPI document
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Path of the ReDoc page
pub const REDOC_PATH: &str = "/redoc";

static OPENAPI: Lazy<Value> = Lazy::new(|| {
    let error_response = |description: &str| {
        json!({
            "description": description,
            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/HttpError"}}}
        })
    };

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": SERVICE_NAME,
            "description": "A simple health check API service",
            "version": API_VERSION
        },
        "paths": {
            "/": {
                "get": {
                    "summary": "Root",
                    "description": "Basic API information.",
                    "operationId": "root",
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Banner"}}}
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "summary": "Health Check",
                    "description": "Current status of the application along with system information.",
                    "operationId": "health_check",
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/DetailedHealth"}}}
                        },
                        "500": error_response("Health check failed")
                    }
                }
            },
            "/health/simple": {
                "get": {
                    "summary": "Simple Health Check",
                    "description": "Minimal health status.",
                    "operationId": "simple_health_check",
                    "responses": {
                        "200": {
                            "description": "Successful Response",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/SimpleHealth"}}}
                        },
                        "500": error_response("Health check failed")
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Banner": {
                    "type": "object",
                    "required": ["message", "version", "docs"],
                    "properties": {
                        "message": {"type": "string"},
                        "version": {"type": "string"},
                        "docs": {"type": "string"}
                    }
                },
                "HealthStatus": {"type": "string", "enum": ["Healthy"]},
                "SimpleHealth": {
                    "type": "object",
                    "required": ["status", "timestamp"],
                    "properties": {
                        "status": {"$ref": "#/components/schemas/HealthStatus"},
                        "timestamp": {"type": "string", "format": "date-time"}
                    }
                },
                "DetailedHealth": {
                    "type": "object",
                    "required": ["status", "timestamp", "system_info"],
                    "properties": {
                        "status": {"$ref": "#/components/schemas/HealthStatus"},
                        "timestamp": {"type": "string", "format": "date-time"},
                        "system_info": {
                            "oneOf": [
                                {"$ref": "#/components/schemas/SystemInfo"},
                                {"$ref": "#/components/schemas/SystemInfoUnavailable"}
                            ]
                        }
                    }
                },
                "SystemInfo": {
                    "type": "object",
                    "required": [
                        "runtime_version", "platform", "cpu_count",
                        "memory_total", "memory_available", "disk_usage"
                    ],
                    "properties": {
                        "runtime_version": {"type": "string"},
                        "platform": {"type": "string"},
                        "cpu_count": {"type": "integer", "minimum": 0},
                        "memory_total": {"type": "integer", "minimum": 0},
                        "memory_available": {"type": "integer", "minimum": 0},
                        "disk_usage": {"type": "number", "minimum": 0, "maximum": 100}
                    }
                },
                "SystemInfoUnavailable": {
                    "type": "object",
                    "required": ["error"],
                    "properties": {"error": {"type": "string", "const": SYSTEM_INFO_UNAVAILABLE}}
                },
                "HttpError": {
                    "type": "object",
                    "required": ["detail"],
                    "properties": {"detail": {"type": "string"}}
                }
            }
        }
    })
});

/// OpenAPI 3.1 document describing the service
pub fn openapi_document() -> &'static Value {
    &OPENAPI
}

/// Swagger UI page
pub fn swagger_ui_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
<title>{title} - Swagger UI</title>
</head>
<body>
<div id="swagger-ui"></div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{openapi}',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
    presets: [SwaggerUIBundle.presets.apis, SwaggerUIBundle.SwaggerUIStandalonePreset],
}})
</script>
</body>
</html>
"#,
        title = SERVICE_NAME,
        openapi = OPENAPI_PATH,
    )
}

/// ReDoc page
pub fn redoc_html() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1">
<style>body {{ margin: 0; padding: 0; }}</style>
</head>
<body>
<redoc spec-url="{openapi}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"></script>
</body>
</html>
"#,
        title = SERVICE_NAME,
        openapi = OPENAPI_PATH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = openapi_document();
        assert_eq!(doc["info"]["version"], "1.0.0");
        for path in ["/", "/health", "/health/simple"] {
            assert!(doc["paths"][path]["get"].is_object(), "missing {}", path);
        }
    }

    #[test]
    fn test_pages_point_at_openapi() {
        assert!(swagger_ui_html().contains("url: '/openapi.json'"));
        assert!(redoc_html().contains(r#"spec-url="/openapi.json""#));
    }
}
