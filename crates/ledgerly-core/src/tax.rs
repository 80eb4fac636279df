//! # Tax Descriptors
//!
//! Turns a human-readable tax label into a percentage.
//!
//! ## Descriptor Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "GST @ 14% + cess @ 12%"                                               │
//! │         ──┬──      ──┬──                                                │
//! │           │          └── preceded by '@' and followed by '%'  → 12      │
//! │           └───────────── preceded by '@' and followed by '%'  → 14      │
//! │                                                                         │
//! │  A number counts once if EITHER side marks it as a rate.                │
//! │  All counted numbers are summed: 14 + 12 = 26                           │
//! │                                                                         │
//! │  "None", "Exempted", "", "garbage"  → no rate tokens → 0                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The labels come from a dropdown, but they travel through user-editable
//! records, so [`parse_tax_percent`] accepts any string and never fails.
//! [`TaxDescriptor`] is the closed vocabulary for populating that dropdown.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Lenient Parser
// =============================================================================

/// Parses a tax descriptor into a total percentage (always `>= 0`).
///
/// ## Example
/// ```rust
/// use ledgerly_core::tax::parse_tax_percent;
///
/// assert_eq!(parse_tax_percent("GST @ 18%"), 18.0);
/// assert_eq!(parse_tax_percent("GST @ 14% + cess @ 12%"), 26.0);
/// assert_eq!(parse_tax_percent("Exempted"), 0.0);
/// assert_eq!(parse_tax_percent("not a tax"), 0.0);
/// ```
pub fn parse_tax_percent(descriptor: &str) -> f64 {
    let (total, tokens) = scan_rates(descriptor);

    if tokens == 0 {
        if !is_zero_label(descriptor) {
            trace!(descriptor, "No rate tokens in tax descriptor, using 0%");
        }
        return 0.0;
    }

    if !total.is_finite() {
        trace!(descriptor, "Tax descriptor overflowed, using 0%");
        return 0.0;
    }

    total
}

/// One `+`-separated part of a compound descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxComponent {
    /// Text before the rate, e.g. `"GST"` or `"cess"`.
    pub label: String,
    pub percent: f64,
}

/// Splits a descriptor into its rate components.
///
/// Parts with no rate token (such as `"None"`) are dropped, so the
/// component percentages always add up to [`parse_tax_percent`].
///
/// ```rust
/// use ledgerly_core::tax::tax_components;
///
/// let parts = tax_components("GST @ 28% + Cess @ 5%");
/// assert_eq!(parts.len(), 2);
/// assert_eq!(parts[0].label, "GST");
/// assert_eq!(parts[1].percent, 5.0);
/// assert!(tax_components("None").is_empty());
/// ```
pub fn tax_components(descriptor: &str) -> Vec<TaxComponent> {
    descriptor
        .split('+')
        .filter_map(|part| {
            let (percent, tokens) = scan_rates(part);
            if tokens == 0 || !percent.is_finite() {
                return None;
            }
            let label_end = part
                .find(|c: char| c == '@' || c.is_ascii_digit())
                .unwrap_or(part.len());
            Some(TaxComponent {
                label: part[..label_end].trim().to_string(),
                percent,
            })
        })
        .collect()
}

/// A number is a rate when `@` sits before it or `%` sits after it.
/// A number marked on both sides is consumed by the first branch, so it
/// counts once.
static RATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@\s*([0-9]+(?:\.[0-9]+)?)|([0-9]+(?:\.[0-9]+)?)\s*%")
        .expect("rate token pattern is valid")
});

/// Sums every rate-marked number in `text`, returning `(sum, token_count)`.
fn scan_rates(text: &str) -> (f64, usize) {
    RATE_TOKEN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .filter_map(|number| number.as_str().parse::<f64>().ok())
        .fold((0.0, 0), |(total, tokens), value| (total + value, tokens + 1))
}

fn is_zero_label(descriptor: &str) -> bool {
    let label = descriptor.trim();
    label.is_empty()
        || label.eq_ignore_ascii_case("none")
        || label.eq_ignore_ascii_case("exempted")
}

// =============================================================================
// Controlled Vocabulary
// =============================================================================

/// The tax labels offered on every transaction screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TaxDescriptor {
    #[default]
    #[serde(rename = "None")]
    None,
    #[serde(rename = "Exempted")]
    Exempted,
    #[serde(rename = "GST @ 0%")]
    Gst0,
    #[serde(rename = "GST @ 0.1%")]
    Gst0Point1,
    #[serde(rename = "GST @ 0.25%")]
    Gst0Point25,
    #[serde(rename = "GST @ 1.5%")]
    Gst1Point5,
    #[serde(rename = "GST @ 3%")]
    Gst3,
    #[serde(rename = "GST @ 5%")]
    Gst5,
    #[serde(rename = "GST @ 6%")]
    Gst6,
    #[serde(rename = "GST @ 8.9%")]
    Gst8Point9,
    #[serde(rename = "GST @ 12%")]
    Gst12,
    #[serde(rename = "GST @ 13.8%")]
    Gst13Point8,
    #[serde(rename = "GST @ 18%")]
    Gst18,
    #[serde(rename = "GST @ 14% + cess @ 12%")]
    Gst14Cess12,
    #[serde(rename = "GST @ 28%")]
    Gst28,
    #[serde(rename = "GST @ 28% + Cess @ 5%")]
    Gst28Cess5,
    #[serde(rename = "GST @ 40%")]
    Gst40,
    #[serde(rename = "GST @ 28% + Cess @ 36%")]
    Gst28Cess36,
    #[serde(rename = "GST @ 28% + Cess @ 60%")]
    Gst28Cess60,
}

impl TaxDescriptor {
    /// Every descriptor, in dropdown order.
    pub const ALL: [TaxDescriptor; 19] = [
        TaxDescriptor::None,
        TaxDescriptor::Exempted,
        TaxDescriptor::Gst0,
        TaxDescriptor::Gst0Point1,
        TaxDescriptor::Gst0Point25,
        TaxDescriptor::Gst1Point5,
        TaxDescriptor::Gst3,
        TaxDescriptor::Gst5,
        TaxDescriptor::Gst6,
        TaxDescriptor::Gst8Point9,
        TaxDescriptor::Gst12,
        TaxDescriptor::Gst13Point8,
        TaxDescriptor::Gst18,
        TaxDescriptor::Gst14Cess12,
        TaxDescriptor::Gst28,
        TaxDescriptor::Gst28Cess5,
        TaxDescriptor::Gst40,
        TaxDescriptor::Gst28Cess36,
        TaxDescriptor::Gst28Cess60,
    ];

    /// The label exactly as stored on line items.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TaxDescriptor::None => "None",
            TaxDescriptor::Exempted => "Exempted",
            TaxDescriptor::Gst0 => "GST @ 0%",
            TaxDescriptor::Gst0Point1 => "GST @ 0.1%",
            TaxDescriptor::Gst0Point25 => "GST @ 0.25%",
            TaxDescriptor::Gst1Point5 => "GST @ 1.5%",
            TaxDescriptor::Gst3 => "GST @ 3%",
            TaxDescriptor::Gst5 => "GST @ 5%",
            TaxDescriptor::Gst6 => "GST @ 6%",
            TaxDescriptor::Gst8Point9 => "GST @ 8.9%",
            TaxDescriptor::Gst12 => "GST @ 12%",
            TaxDescriptor::Gst13Point8 => "GST @ 13.8%",
            TaxDescriptor::Gst18 => "GST @ 18%",
            TaxDescriptor::Gst14Cess12 => "GST @ 14% + cess @ 12%",
            TaxDescriptor::Gst28 => "GST @ 28%",
            TaxDescriptor::Gst28Cess5 => "GST @ 28% + Cess @ 5%",
            TaxDescriptor::Gst40 => "GST @ 40%",
            TaxDescriptor::Gst28Cess36 => "GST @ 28% + Cess @ 36%",
            TaxDescriptor::Gst28Cess60 => "GST @ 28% + Cess @ 60%",
        }
    }

    /// Total percentage encoded by this label.
    pub fn percent(&self) -> f64 {
        parse_tax_percent(self.as_str())
    }

    /// True for the labels that carry no tax at all.
    pub const fn is_zero_rated(&self) -> bool {
        matches!(self, TaxDescriptor::None | TaxDescriptor::Exempted)
    }
}

impl fmt::Display for TaxDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict lookup. Use [`parse_tax_percent`] when any text must be accepted.
impl FromStr for TaxDescriptor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        TaxDescriptor::ALL
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| CoreError::UnknownTaxDescriptor(s.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_labels() {
        assert_eq!(parse_tax_percent("None"), 0.0);
        assert_eq!(parse_tax_percent("Exempted"), 0.0);
        assert_eq!(parse_tax_percent(""), 0.0);
        assert_eq!(parse_tax_percent("GST @ 0%"), 0.0);
    }

    #[test]
    fn test_single_rates() {
        assert_eq!(parse_tax_percent("GST @ 18%"), 18.0);
        assert_eq!(parse_tax_percent("GST @ 0.1%"), 0.1);
        assert_eq!(parse_tax_percent("GST @ 0.25%"), 0.25);
        assert_eq!(parse_tax_percent("GST @ 13.8%"), 13.8);
    }

    #[test]
    fn test_compound_rates() {
        assert_eq!(parse_tax_percent("GST @ 14% + cess @ 12%"), 26.0);
        assert_eq!(parse_tax_percent("GST @ 28% + Cess @ 5%"), 33.0);
        assert_eq!(parse_tax_percent("GST @ 28% + Cess @ 60%"), 88.0);
    }

    #[test]
    fn test_token_marked_on_one_side_only() {
        assert_eq!(parse_tax_percent("VAT 7%"), 7.0);
        assert_eq!(parse_tax_percent("levy @ 2"), 2.0);
        assert_eq!(parse_tax_percent("slab 5 of 2024"), 0.0);
    }

    #[test]
    fn test_malformed_degrades_to_zero() {
        assert_eq!(parse_tax_percent("GST @ %"), 0.0);
        assert_eq!(parse_tax_percent("@@@"), 0.0);
        assert_eq!(parse_tax_percent("GST 18.%"), 0.0);
        assert_eq!(parse_tax_percent("GST @ 18.%"), 18.0);
        assert_eq!(parse_tax_percent("₹ 100 flat"), 0.0);
        assert_eq!(parse_tax_percent(&format!("@ {}%", "9".repeat(400))), 0.0);
    }

    #[test]
    fn test_rate_marked_on_both_sides_counts_once() {
        assert_eq!(parse_tax_percent("@ 5%"), 5.0);
        assert_eq!(parse_tax_percent("@5%@6%"), 11.0);
        assert_eq!(parse_tax_percent("GST @ 1.5% + 1.5 %"), 3.0);
        assert_eq!(parse_tax_percent("GST @ 12.5.0%"), 12.5);
    }

    #[test]
    fn test_never_negative() {
        assert_eq!(parse_tax_percent("GST @ -5%"), 5.0);
    }

    #[test]
    fn test_components_sum_to_total() {
        for descriptor in TaxDescriptor::ALL {
            let sum: f64 = tax_components(descriptor.as_str())
                .iter()
                .map(|c| c.percent)
                .sum();
            assert_eq!(sum, descriptor.percent(), "{descriptor}");
        }
    }

    #[test]
    fn test_component_labels() {
        let parts = tax_components("GST @ 14% + cess @ 12%");
        assert_eq!(
            parts,
            vec![
                TaxComponent {
                    label: "GST".to_string(),
                    percent: 14.0,
                },
                TaxComponent {
                    label: "cess".to_string(),
                    percent: 12.0,
                },
            ]
        );
    }

    #[test]
    fn test_vocabulary_round_trips_through_from_str() {
        for descriptor in TaxDescriptor::ALL {
            assert_eq!(descriptor.as_str().parse::<TaxDescriptor>(), Ok(descriptor));
        }
        assert_eq!(
            "gst @ 18%".parse::<TaxDescriptor>(),
            Ok(TaxDescriptor::Gst18)
        );
        assert!("GST @ 19%".parse::<TaxDescriptor>().is_err());
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&TaxDescriptor::Gst28Cess5).unwrap();
        assert_eq!(json, "\"GST @ 28% + Cess @ 5%\"");

        let back: TaxDescriptor = serde_json::from_str("\"Exempted\"").unwrap();
        assert_eq!(back, TaxDescriptor::Exempted);
    }

    #[test]
    fn test_zero_rated() {
        assert!(TaxDescriptor::None.is_zero_rated());
        assert!(TaxDescriptor::Exempted.is_zero_rated());
        assert!(!TaxDescriptor::Gst0.is_zero_rated());
    }
}
