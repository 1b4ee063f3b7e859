//! Parsers for the compact value strings used in manifests
//!
//! Regions are written as `"x,y,width,height"`, sizes and points as
//! `"a,b"` and colours as `"#rrggbb"` or `"#rrggbbaa"`.

use image::Rgba;
use lazy_static::lazy_static;
use regex::Regex;

use crate::canvas::Region;
use crate::errors::{SliceError, SliceResult};

lazy_static! {
    static ref REGION_PATTERN: Regex =
        Regex::new(r"^\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*$").unwrap();
    static ref PAIR_PATTERN: Regex =
        Regex::new(r"^\s*(\d+)\s*,\s*(\d+)\s*$").unwrap();
    static ref COLOR_PATTERN: Regex =
        Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})?$").unwrap();
}

fn number(text: &str, value: &str) -> SliceResult<u32> {
    text.parse::<u32>()
        .map_err(|_| SliceError::Manifest(format!("Number out of range in '{}'", value)))
}

/// Parse a region string (`"x,y,width,height"`)
pub fn parse_region(value: &str) -> SliceResult<Region> {
    let caps = REGION_PATTERN.captures(value).ok_or_else(|| {
        SliceError::Manifest(format!("Region must be 'x,y,width,height', got '{}'", value))
    })?;

    Ok(Region::new(
        number(&caps[1], value)?,
        number(&caps[2], value)?,
        number(&caps[3], value)?,
        number(&caps[4], value)?,
    ))
}

/// Parse a pair string (`"a,b"`), used for sizes and points
pub fn parse_pair(value: &str) -> SliceResult<(u32, u32)> {
    let caps = PAIR_PATTERN.captures(value).ok_or_else(|| {
        SliceError::Manifest(format!("Expected two comma-separated numbers, got '{}'", value))
    })?;

    Ok((number(&caps[1], value)?, number(&caps[2], value)?))
}

/// Parse a hex colour (`"#rrggbb"` or `"#rrggbbaa"`)
pub fn parse_color(value: &str) -> SliceResult<Rgba<u8>> {
    let caps = COLOR_PATTERN.captures(value.trim()).ok_or_else(|| {
        SliceError::Manifest(format!("Colour must be '#rrggbb' or '#rrggbbaa', got '{}'", value))
    })?;

    // The pattern guarantees two hex digits per channel
    let channel = |i: usize| caps.get(i).map(|m| u8::from_str_radix(m.as_str(), 16).unwrap_or(0));
    Ok(Rgba([
        channel(1).unwrap_or(0),
        channel(2).unwrap_or(0),
        channel(3).unwrap_or(0),
        channel(4).unwrap_or(255),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("0, 16,32 ,8").unwrap(), Region::new(0, 16, 32, 8));
        assert!(parse_region("0,16,32").is_err());
        assert!(parse_region("-1,0,2,2").is_err());
        assert!(parse_region("0,0,99999999999,1").is_err());
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("64,32").unwrap(), (64, 32));
        assert!(parse_pair("64x32").is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ff0080").unwrap(), Rgba([255, 0, 128, 255]));
        assert_eq!(parse_color("#00000040").unwrap(), Rgba([0, 0, 0, 64]));
        assert!(parse_color("red").is_err());
    }
}
