pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // no color codes in piped output.
        .with_ansi(false)
        .without_time()
        .json()
        .init();
}
