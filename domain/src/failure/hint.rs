//! Human-readable hints for well-known backend failures.

/// Rewrite a raw backend error into something a user can act on.
///
/// Unrecognised messages are returned unchanged.
pub fn friendly_message(raw: &str) -> String {
    let lower = raw.to_lowercase();

    if lower.contains("unsupported_country_region_territory") {
        return "The backend API is not available in your region. Consider a different \
                endpoint or an Azure-hosted deployment."
            .to_string();
    }
    if lower.contains("invalid_api_key") || lower.contains("unauthorized") {
        return "Invalid backend API key. Check the key configured for the backend \
                (OPENAI_API_KEY by default)."
            .to_string();
    }
    if lower.contains("rate_limit") || lower.contains("quota") {
        return "Rate limit exceeded. Wait and retry, or upgrade the backend API plan.".to_string();
    }
    if lower.contains("model") && (lower.contains("not found") || lower.contains("does not exist"))
    {
        return "Model not found. Check the big/middle/small model mapping in the relay \
                configuration."
            .to_string();
    }
    if lower.contains("billing") || lower.contains("payment") {
        return "Billing issue. Check the backend account's billing status.".to_string();
    }

    raw.to_string()
}
