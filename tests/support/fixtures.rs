//! Test fixtures and standard project configs.

use serde_json::{json, Value};

/// Two backend services, no database, no auth template.
pub fn two_backends() -> Value {
    json!({
        "name": "demo",
        "services": [
            {"name": "auth-service", "type": "nestjs", "port": 3001},
            {"name": "bff-service", "type": "nestjs", "port": 3003}
        ]
    })
}

/// Full project: auth template, database-backed auth service, a next.js
/// frontend, a spa, and a worker.
pub fn full_project() -> Value {
    json!({
        "name": "demo",
        "templates": ["auth"],
        "services": [
            {"name": "auth-service", "type": "nestjs", "port": 3001, "hasDatabase": true},
            {"name": "bff-service", "type": "nestjs", "port": 3003},
            {"name": "web-app", "type": "nextjs", "port": 3000},
            {"name": "admin-app", "type": "spa", "port": 3002},
            {"name": "auth-worker", "type": "worker", "baseService": "auth-service"}
        ]
    })
}

/// Config with a service that is about to be deleted in tests.
pub fn with_demo_service() -> Value {
    json!({
        "name": "demo",
        "services": [
            {"name": "auth-service", "type": "nestjs", "port": 3001},
            {"name": "demo-service", "type": "nestjs", "port": 3009}
        ]
    })
}
