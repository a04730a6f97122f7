pub mod gemini;
pub mod health;
pub mod review;
pub mod supabase;

pub use gemini::gemini_test;
pub use health::{api_test, health_check, metrics_endpoint};
pub use review::code_review;
pub use supabase::supabase_test;

use crate::services::metrics;
use crate::services::{ProviderError, ProviderResponse, TextProvider};
use std::time::Instant;

/// Call the provider once and record latency, tokens and outcome.
pub(crate) async fn generate_recorded(
    provider: &dyn TextProvider,
    operation: &'static str,
    prompt: &str,
) -> Result<ProviderResponse, ProviderError> {
    let start = Instant::now();
    let result = provider.generate(prompt).await;
    metrics::record_provider_latency(
        provider.provider_name(),
        provider.model(),
        start.elapsed().as_secs_f64(),
    );

    match &result {
        Ok(response) => {
            metrics::record_genai_request(operation, "success");
            metrics::record_tokens(
                provider.model(),
                response.input_tokens,
                response.output_tokens,
            );
            tracing::info!(
                operation,
                model = %provider.model(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = response.finish_reason.as_str(),
                "Generation completed"
            );
        }
        Err(e) => {
            metrics::record_genai_request(operation, "error");
            metrics::record_provider_error(provider.provider_name(), e.kind());
        }
    }

    result
}
