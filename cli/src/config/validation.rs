//! Setting value validation.

use dither_engine::Algorithm;
use dither_engine::options::MAX_SCREENING_SIZE;
use raster_printer::protocol::escpos::MAX_BLOCK_HEIGHT;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "DITHER_ALGORITHM" => {
            value.parse::<Algorithm>().map_err(|e| e.to_string())?;
        }
        "DITHER_SCREENING_SIZE" => {
            validate_int_range(value, 2, MAX_SCREENING_SIZE as i64)?
        }
        "DITHER_SEED" => {
            value.parse::<u64>().map_err(|_| "must be an unsigned integer")?;
        }
        "DITHER_BLOCK_HEIGHT" => validate_int_range(value, 1, i64::from(MAX_BLOCK_HEIGHT))?,
        "DITHER_FEED_LINES" => validate_int_range(value, 0, 255)?,
        // Boolean settings
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "DITHER_SERPENTINE")
}
