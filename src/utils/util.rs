//! # Utility Module
//!
//! Miscellaneous helpers shared by the generator and the viewer.
//!
//! ## Example Function: `clamp`
//!
//! The `clamp` function restricts a value to lie within a specified range. If the value
//! is below the minimum, it returns the minimum; if it's above the maximum, it returns the
//! maximum; otherwise, it returns the value unchanged. It works for any partially ordered
//! type, so the same helper clamps fill percentages and pass counts.

/// Clamps a value between a minimum and maximum.
///
/// # Arguments
///
/// * `value` - The input value to be clamped.
/// * `min` - The minimum allowable value.
/// * `max` - The maximum allowable value.
///
/// # Examples
///
/// ```
/// use cavegen::utils::util::clamp;
///
/// assert_eq!(clamp(5, 0, 100), 5);
/// assert_eq!(clamp(-5, 0, 100), 0);
/// assert_eq!(clamp(150, 0, 100), 100);
/// ```
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
