/// Source of wall-clock time for the path store, in Unix seconds.
///
/// Injected everywhere time matters so expiry and decay can be driven
/// deterministically in tests.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> u64;
}
