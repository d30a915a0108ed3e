//! SKU normalization.

/// Variant suffix letters that may follow a `-` or `_`.
const VARIANT_SUFFIXES: [char; 5] = ['A', 'X', 'U', 'O', 'R'];

/// Reduce a SKU to its base part number.
///
/// Upper-cases and trims, then strips one trailing `-X` / `_X` style suffix
/// where the letter is a known variant code.
///
/// ```
/// use parts_catalog::catalog::base_sku;
/// assert_eq!(base_sku(" ue12345-a "), "UE12345");
/// assert_eq!(base_sku("UE12345_R"), "UE12345");
/// assert_eq!(base_sku("UE12345B"), "UE12345B");
/// ```
pub fn base_sku(sku: &str) -> String {
    let normalized = sku.trim().to_uppercase();
    let mut chars = normalized.chars().rev();

    // The separator is required. `UB83268A` is a distinct part number and
    // exact SKU lookups rely on it not collapsing to `UB83268`.
    if let (Some(letter), Some(sep)) = (chars.next(), chars.next()) {
        if VARIANT_SUFFIXES.contains(&letter) && (sep == '-' || sep == '_') {
            let cut = normalized.len() - letter.len_utf8() - sep.len_utf8();
            return normalized[..cut].to_string();
        }
    }

    normalized
}
