fn main() {
    // ESP-IDF link/env plumbing is only meaningful for device builds.
    // Host builds (tests, fuzzing) skip it entirely.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
