use time::OffsetDateTime;
use time::error::Format;
use time::macros::format_description;

/// `HH:MM DD-MM-YYYY` in the offset carried by `at`, 24-hour clock, zero-padded.
///
/// # Errors
/// Returns the formatter error.
pub fn format_updated_at(at: OffsetDateTime) -> Result<String, Format> {
    at.format(format_description!("[hour]:[minute] [day]-[month]-[year]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn pads_every_component() {
        assert_eq!(
            format_updated_at(datetime!(2025-02-03 07:05 UTC)).unwrap(),
            "07:05 03-02-2025"
        );
    }

    #[test]
    fn uses_24_hour_clock_in_the_given_offset() {
        assert_eq!(
            format_updated_at(datetime!(2024-12-31 23:59 +05:30)).unwrap(),
            "23:59 31-12-2024"
        );
        let utc = datetime!(2024-12-31 20:00 UTC);
        let ist = utc.to_offset(time::macros::offset!(+5:30));
        assert_eq!(format_updated_at(ist).unwrap(), "01:30 01-01-2025");
    }
}
