//! Collects build metadata for `wayfinder --version`.
use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;
use shadow_rs::ShadowError;

fn main() -> Result<(), ShadowError> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()?;

    Ok(())
}
