/// Intercept messages using the `log` crate and print them to STDERR. Defaults to `info`, but
/// `RUST_LOG` overrides that.
///
/// STDOUT is reserved for the per-map progress lines, so nothing logged here ever lands there.
pub fn setup() {
    use env_logger::{Builder, Env, Target};
    // A second call (from tests, say) is harmless
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .try_init();
}
