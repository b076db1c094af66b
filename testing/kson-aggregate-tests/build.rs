fn main() -> Result<(), kson_build::BuildError> {
    kson_build::build!();

    Ok(())
}
