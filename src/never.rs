/// Return type for loops that only end by failing.
///
/// Rust's `!` is unstable as a type argument. This empty enum is a stable equivalent, so
/// `Result<Never>` reads as "runs forever or returns an error".
#[derive(Debug)]
pub enum Never {}
