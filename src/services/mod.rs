/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Mix read models and target color lifecycle.
pub mod mix_service;
/// Debounced external color-name resolution.
pub mod naming;
/// Palette edit orchestration and persistence.
pub mod palette_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Storage persistence coordinator with reconnection backoff.
pub mod storage_supervisor;
