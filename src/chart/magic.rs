//! Magic-number overlays
//!
//! Nucleon counts with enhanced nuclear stability are marked on the chart
//! of nuclides with translucent bands. Each band spans the observed extent
//! of the dataset at that count, so the set is recomputed per dataset.

use crate::dataset::{Column, Dataset, NEUTRON_FIELD, PROTON_FIELD};

use super::spec::Overlay;

/// Magic proton numbers
pub const MAGIC_PROTONS: [u32; 7] = [2, 8, 20, 28, 50, 82, 126];

/// Magic neutron numbers
pub const MAGIC_NEUTRONS: [u32; 8] = [2, 8, 20, 28, 50, 82, 126, 184];

/// Padding along N for proton bands
pub const PROTON_BAND_PADDING: f64 = 4.0;

/// Padding along Z for neutron bands
pub const NEUTRON_BAND_PADDING: f64 = 3.0;

const BAND_HALF_WIDTH: f64 = 0.5;

/// Proton bands followed by neutron bands. Magic numbers absent from the
/// dataset are skipped.
pub fn magic_overlays(dataset: &Dataset) -> Vec<Overlay> {
    let (Some(n), Some(z)) = (dataset.column(NEUTRON_FIELD), dataset.column(PROTON_FIELD)) else {
        return Vec::new();
    };

    let protons = MAGIC_PROTONS.iter().filter_map(|&p| {
        let p = f64::from(p);
        extent_where(z, p, n).map(|(lo, hi)| {
            Overlay::rect(
                lo - PROTON_BAND_PADDING,
                p - BAND_HALF_WIDTH,
                hi + PROTON_BAND_PADDING,
                p + BAND_HALF_WIDTH,
            )
        })
    });

    let neutrons = MAGIC_NEUTRONS.iter().filter_map(|&m| {
        let m = f64::from(m);
        extent_where(n, m, z).map(|(lo, hi)| {
            Overlay::rect(
                m - BAND_HALF_WIDTH,
                lo - NEUTRON_BAND_PADDING,
                m + BAND_HALF_WIDTH,
                hi + NEUTRON_BAND_PADDING,
            )
        })
    });

    protons.chain(neutrons).collect()
}

/// Min and max of `values` over rows where `key == target`
fn extent_where(key: &Column, target: f64, values: &Column) -> Option<(f64, f64)> {
    (0..key.len())
        .filter(|&row| key.number(row) == Some(target))
        .filter_map(|row| values.number(row))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
