//! Submit-time coercion of form text.
//!
//! Numbers follow browser `parseFloat`/`parseInt` rules: leading whitespace is
//! skipped and the longest numeric prefix wins, so `"12abc"` is 12. Text with no
//! numeric prefix is not-a-number and is forwarded as such.

use crate::models::{AttractionPayload, NearbyAttraction};

/// Browser-style `parseFloat`. Returns `NAN` when there is no numeric prefix.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Browser-style `parseInt` in base 10. `None` stands for not-a-number.
pub fn parse_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Split a comma-delimited list, trimming items and dropping blank ones.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split `"name|distance, name|distance"` into attractions.
///
/// Items without a pipe get an empty distance; blank items are dropped.
pub fn split_attractions(text: &str) -> Vec<AttractionPayload> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let mut parts = item.split('|');
            let name = parts
                .next()
                .filter(|p| !p.is_empty())
                .map(str::trim)
                .unwrap_or(item);
            let distance = parts
                .next()
                .filter(|p| !p.is_empty())
                .map(str::trim)
                .unwrap_or("");
            AttractionPayload {
                name: name.to_string(),
                distance: distance.to_string(),
            }
        })
        .collect()
}

/// Inverse of [`split_list`] for re-entering edit mode.
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}

/// Inverse of [`split_attractions`] for re-entering edit mode.
pub fn join_attractions(attractions: &[NearbyAttraction]) -> String {
    attractions
        .iter()
        .map(|a| {
            format!(
                "{}|{}",
                a.name.as_deref().unwrap_or(""),
                a.distance.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text form of a stored number.
pub fn number_text(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
