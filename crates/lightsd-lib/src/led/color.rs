//! Color handling for single-channel LED drivers.
//!
//! Colors use the `0xAARRGGBB` format. A mono LED only has a brightness, so
//! the color is reduced to perceptual luminance after alpha scaling.

/// True if any RGB channel is nonzero. Alpha alone does not light the LED.
pub fn is_lit(color: u32) -> bool {
    color & 0x00FF_FFFF != 0
}

/// Convert an `0xAARRGGBB` color to a 0..=255 brightness.
///
/// A partial alpha (neither 0 nor 255) scales each channel first; alpha 0 and
/// 255 leave channels untouched.
pub fn rgba_to_brightness(color: u32) -> u8 {
    let alpha = (color >> 24) & 0xFF;
    let mut red = (color >> 16) & 0xFF;
    let mut green = (color >> 8) & 0xFF;
    let mut blue = color & 0xFF;

    if alpha != 0xFF && alpha != 0 {
        red = red * alpha / 0xFF;
        green = green * alpha / 0xFF;
        blue = blue * alpha / 0xFF;
    }

    // Max is (77 + 150 + 29) * 255 >> 8 == 255.
    ((77 * red + 150 * green + 29 * blue) >> 8) as u8
}

/// Parse a color string into `0xAARRGGBB`.
///
/// Accepts:
/// - Hex with alpha: `"#80FF0000"`, `"80ff0000"`
/// - Hex without alpha (opaque): `"#FF0000"`, `"FF0000"`
/// - Named: `"red"`, `"green"`, `"blue"`, `"white"`, `"orange"`, `"yellow"`, `"purple"`, `"cyan"`, `"off"`
pub fn parse_color(s: &str) -> crate::error::Result<u32> {
    let s = s.trim();

    match s.to_lowercase().as_str() {
        "red" => return Ok(0xFFFF_0000),
        "green" => return Ok(0xFF00_FF00),
        "blue" => return Ok(0xFF00_00FF),
        "white" => return Ok(0xFFFF_FFFF),
        "orange" => return Ok(0xFFFF_8000),
        "yellow" => return Ok(0xFFFF_FF00),
        "purple" => return Ok(0xFF80_00FF),
        "cyan" => return Ok(0xFF00_FFFF),
        "off" | "black" => return Ok(0x0000_0000),
        _ => {}
    }

    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .unwrap_or(s);
    let implied_alpha = match hex.len() {
        6 => 0xFF00_0000,
        8 => 0,
        _ => {
            return Err(crate::LightsError::Color(format!(
                "Invalid color: {s} (use #AARRGGBB, #RRGGBB or a color name)"
            )));
        }
    };
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| crate::LightsError::Color(format!("Invalid hex color: {s}")))?;
    Ok(val | implied_alpha)
}

/// Format a color as `#AARRGGBB`.
pub fn format_color(color: u32) -> String {
    format!("#{color:08X}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── is_lit ──

    #[test]
    fn lit_ignores_alpha() {
        assert!(!is_lit(0x0000_0000));
        assert!(!is_lit(0xFF00_0000));
        assert!(!is_lit(0x8000_0000));
        assert!(is_lit(0x0000_0001));
        assert!(is_lit(0x0001_0000));
        assert!(is_lit(0x00FF_FFFF));
    }

    #[test]
    fn lit_matches_rgb_mask_for_sampled_colors() {
        let mut color = 0x1234_5678u32;
        for _ in 0..1000 {
            assert_eq!(is_lit(color), color & 0x00FF_FFFF != 0, "{color:#010x}");
            color = color.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        }
    }

    // ── rgba_to_brightness ──

    #[test]
    fn opaque_red() {
        assert_eq!(rgba_to_brightness(0xFFFF_0000), 76);
    }

    #[test]
    fn half_alpha_red() {
        // 255 * 128 / 255 = 128; (77 * 128) >> 8 = 38
        assert_eq!(rgba_to_brightness(0x80FF_0000), 38);
    }

    #[test]
    fn opaque_green_and_blue() {
        assert_eq!(rgba_to_brightness(0xFF00_FF00), ((150u32 * 255) >> 8) as u8);
        assert_eq!(rgba_to_brightness(0xFF00_00FF), ((29u32 * 255) >> 8) as u8);
    }

    #[test]
    fn white_is_full_brightness() {
        assert_eq!(rgba_to_brightness(0xFFFF_FFFF), 255);
        assert_eq!(rgba_to_brightness(0x00FF_FFFF), 255);
    }

    #[test]
    fn black_is_zero() {
        assert_eq!(rgba_to_brightness(0x0000_0000), 0);
        assert_eq!(rgba_to_brightness(0xFF00_0000), 0);
    }

    #[test]
    fn zero_alpha_skips_scaling() {
        // Alpha 0 is treated like opaque, not like fully transparent.
        for rgb in [0x00FF_0000u32, 0x0012_3456, 0x0000_00FF, 0x00AB_CDEF] {
            assert_eq!(rgba_to_brightness(rgb), rgba_to_brightness(0xFF00_0000 | rgb));
        }
    }

    #[test]
    fn scaling_truncates() {
        // alpha 1: 255 * 1 / 255 = 1 per channel → (77 + 150 + 29) >> 8 = 1
        assert_eq!(rgba_to_brightness(0x01FF_FFFF), 1);
        // alpha 254: 100 * 254 / 255 = 99
        assert_eq!(rgba_to_brightness(0xFE64_0000), ((77 * 99) >> 8) as u8);
    }

    #[test]
    fn brightness_in_range_for_sampled_alphas() {
        for alpha in 0..=255u32 {
            for rgb in [0x00FF_FFFFu32, 0x0080_8080, 0x0001_0203, 0x00FF_0000] {
                let b = rgba_to_brightness((alpha << 24) | rgb);
                let opaque = rgba_to_brightness(0xFF00_0000 | rgb);
                assert!(b <= opaque, "alpha {alpha} brightened {rgb:#08x}");
            }
        }
    }

    // ── parse_color ──

    #[test]
    fn parse_named() {
        assert_eq!(parse_color("red").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("GREEN").unwrap(), 0xFF00_FF00);
        assert_eq!(parse_color("  blue ").unwrap(), 0xFF00_00FF);
        assert_eq!(parse_color("off").unwrap(), 0);
        assert_eq!(parse_color("black").unwrap(), 0);
    }

    #[test]
    fn parse_rgb_hex_is_opaque() {
        assert_eq!(parse_color("#FF0000").unwrap(), 0xFFFF_0000);
        assert_eq!(parse_color("00ff00").unwrap(), 0xFF00_FF00);
    }

    #[test]
    fn parse_argb_hex_keeps_alpha() {
        assert_eq!(parse_color("#80FF0000").unwrap(), 0x80FF_0000);
        assert_eq!(parse_color("0x00123456").unwrap(), 0x0012_3456);
    }

    #[test]
    fn parse_invalid() {
        assert!(parse_color("#FFF").is_err());
        assert!(parse_color("#FF00000000").is_err());
        assert!(parse_color("#GGHHII").is_err());
        assert!(parse_color("chartreuse").is_err());
    }

    // ── format_color ──

    #[test]
    fn format_pads_to_eight_digits() {
        assert_eq!(format_color(0xFFFF_0000), "#FFFF0000");
        assert_eq!(format_color(0x0000_00FF), "#000000FF");
    }

    #[test]
    fn parse_accepts_formatted_output() {
        let val = 0x80AB_12CD;
        assert_eq!(parse_color(&format_color(val)).unwrap(), val);
    }
}
