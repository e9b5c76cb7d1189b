use gurobi_classifier::classify;

/// Classify each token and print `<token>\t<status>\t<label>`.
/// Returns `true` if every token validated.
pub fn run(tokens: &[String]) -> bool {
    let mut all_ok = true;
    for token in tokens {
        let outcome = classify(token);
        if let Some(error) = &outcome.error {
            tracing::debug!(token = token.as_str(), "{}", error);
        }
        all_ok &= outcome.is_ok();
        println!(
            "{}\t{}\t{}",
            token,
            outcome.status.http_status(),
            outcome.label
        );
    }
    all_ok
}
