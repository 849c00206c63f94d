//! Flat per-post hotels CSV derived from the aggregate file.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use hotelscout_core::ProfileRecord;

use crate::error::StoreError;

pub const HOTELS_CSV_HEADER: [&str; 12] = [
    "Creator Profile",
    "Post URL",
    "Post Date",
    "Sponsored",
    "Reason",
    "Hotel Name",
    "Hotel Instagram",
    "Hotel Website",
    "Hotel Email",
    "Hotel Address",
    "Hotel Phone",
    "Enrichment Source",
];

/// Writes one row per post to `writer`. Returns the number of data rows.
///
/// # Errors
///
/// Returns [`StoreError::Csv`] if a row cannot be written.
pub fn write_hotels_csv<W: Write>(
    profiles: &[ProfileRecord],
    writer: W,
) -> Result<usize, StoreError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(HOTELS_CSV_HEADER)?;

    let mut rows = 0usize;
    for profile in profiles {
        for post in &profile.posts {
            let hotel = &post.hotel;
            let reasons = post
                .sponsored_reasons
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let sponsored = if post.sponsored { "true" } else { "false" };
            let source = hotel
                .enrichment_source
                .map(|s| s.as_str())
                .unwrap_or_default();

            csv.write_record([
                profile.profile_url.as_str(),
                post.post_url.as_str(),
                post.date_iso.as_str(),
                sponsored,
                reasons.as_str(),
                hotel.name.as_deref().unwrap_or_default(),
                hotel.instagram_handle.as_deref().unwrap_or_default(),
                hotel.website.as_deref().unwrap_or_default(),
                hotel.email.as_deref().unwrap_or_default(),
                hotel.address.as_deref().unwrap_or_default(),
                hotel.phone.as_deref().unwrap_or_default(),
                source,
            ])?;
            rows += 1;
        }
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(rows)
}

/// Writes the hotels CSV to `out_path`, creating parent directories.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the file cannot be created and
/// [`StoreError::Csv`] if writing fails.
pub fn export_hotels_csv(profiles: &[ProfileRecord], out_path: &Path) -> Result<usize, StoreError> {
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let file = File::create(out_path).map_err(|e| StoreError::io(out_path, e))?;
    let rows = write_hotels_csv(profiles, file)?;
    tracing::info!(path = %out_path.display(), rows, "hotels CSV written");
    Ok(rows)
}
