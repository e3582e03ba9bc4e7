//! MPC packed epochs.
//!
//! Five characters `CYYMD`: the century letter (`I` = 18, `J` = 19, `K` = 20), the last two
//! digits of the year, then month and day each packed on one character (`1`–`9`, then `A` = 10
//! up to `V` = 31). `K2555` is 2025-05-05. The epoch is 0h TT of that date.
use crate::constants::JDE;
use crate::time::calendar_to_jde;

use super::ParseOrbitError;

fn century(c: char) -> Option<i32> {
    match c {
        'I' => Some(1800),
        'J' => Some(1900),
        'K' => Some(2000),
        _ => None,
    }
}

/// `1`–`9` then `A`–`V`
fn packed_number(c: char) -> Option<u8> {
    match c {
        '1'..='9' => Some(c as u8 - b'0'),
        'A'..='V' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

/// Decode a packed epoch into `(year, month, day)`.
pub fn unpack_epoch(packed: &str) -> Result<(i32, u8, u8), ParseOrbitError> {
    let invalid = || ParseOrbitError::InvalidPackedEpoch(packed.to_string());

    let chars: Vec<char> = packed.chars().collect();
    let &[c, y1, y2, m, d] = chars.as_slice() else {
        return Err(invalid());
    };

    let year = century(c).ok_or_else(invalid)?
        + y1.to_digit(10).ok_or_else(invalid)? as i32 * 10
        + y2.to_digit(10).ok_or_else(invalid)? as i32;
    let month = packed_number(m).filter(|m| *m <= 12).ok_or_else(invalid)?;
    let day = packed_number(d).ok_or_else(invalid)?;

    Ok((year, month, day))
}

/// Julian Ephemeris Date of a packed epoch.
pub fn packed_epoch_to_jde(packed: &str) -> Result<JDE, ParseOrbitError> {
    let (year, month, day) = unpack_epoch(packed)?;
    calendar_to_jde(year, month, day)
        .map_err(|_| ParseOrbitError::InvalidPackedEpoch(packed.to_string()))
}
