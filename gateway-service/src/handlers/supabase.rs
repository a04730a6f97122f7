use crate::dtos::SupabaseTestResponse;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// Probe the data store with a one-row read.
///
/// A query error still yields `200` with `status: "connected"`: the request
/// reached the project, and a missing table is not told apart from other
/// failures.
pub async fn supabase_test(State(state): State<AppState>) -> Json<SupabaseTestResponse> {
    match state.data_store.probe(&state.probe_table, 1).await {
        Ok(data) => {
            metrics::record_datastore_probe("ok");
            Json(SupabaseTestResponse {
                status: "connected".to_string(),
                message: "Supabase connection successful".to_string(),
                data: Some(data),
                error: None,
            })
        }
        Err(e) => {
            metrics::record_datastore_probe("error");
            tracing::warn!(
                table = %state.probe_table,
                error = %e,
                "Supabase probe query failed"
            );
            Json(SupabaseTestResponse {
                status: "connected".to_string(),
                message: "Supabase connected (query returned an error)".to_string(),
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}
