//! Height rendering shared by every surface that prints a build.

/// Render a height in inches as feet and inches, e.g. `79` → `6'7"`.
pub fn format_height(inches: u32) -> String {
    let feet = inches / 12;
    let remaining = inches % 12;
    format!("{feet}'{remaining}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_typical_heights() {
        assert_eq!(format_height(69), "5'9\"");
        assert_eq!(format_height(79), "6'7\"");
        assert_eq!(format_height(84), "7'0\"");
    }

    #[test]
    fn exact_feet_show_zero_inches() {
        assert_eq!(format_height(72), "6'0\"");
    }
}
