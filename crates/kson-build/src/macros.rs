/// Build-script entry point: generates adapters for the current crate and prints the cargo
/// directives. Expects to run inside a function returning a `Result` whose error converts from
/// `kson_build::BuildError`.
#[macro_export]
macro_rules! build {
    () => {
        ::kson_build::Builder::from_env()?.run()?;
    };
}
