// SPDX-FileCopyrightText: 2026 tmgc Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret masking for terminal and JSON output.

/// Mask a secret value for display: `ab****yz`.
///
/// Keeps the first two and last two characters. Values of six characters or
/// fewer are fully masked as `******`; an empty value stays empty.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    match chars.len() {
        0 => String::new(),
        n if n <= 6 => "******".to_string(),
        n => {
            let prefix: String = chars[..2].iter().collect();
            let suffix: String = chars[n - 2..].iter().collect();
            format!("{prefix}{}{suffix}", "*".repeat(n - 4))
        }
    }
}
