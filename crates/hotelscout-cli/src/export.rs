use std::path::Path;

use anyhow::Context;

pub(crate) fn run_export_hotels(input: &Path, output: &Path) -> anyhow::Result<()> {
    let profiles = hotelscout_store::read_profiles(input)
        .with_context(|| format!("failed to read aggregate {}", input.display()))?;
    let rows = hotelscout_store::export_hotels_csv(&profiles, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!("Wrote {rows} rows to {}", output.display());
    Ok(())
}
