/// Plausibility bounds used to tell a real frame header from random low bits.
///
/// These are heuristics for disambiguating the two payload shapes, not
/// guarantees of the format: a carrier can hold a bytes payload longer than
/// [`max_payload_len`][Limits::max_payload_len], but it will not be
/// recognised on decode unless the receiver raises the limit.
///
/// # Examples
///
/// ```
/// use planesteg::Limits;
///
/// let limits = Limits::default().with_max_payload_len(1 << 20);
///
/// assert!(limits.accepts_payload_len(100_000));
/// assert!(!limits.accepts_payload_len(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Exclusive upper bound on the byte length stored in a bytes frame.
    pub max_payload_len: u64,
    /// Inclusive upper bound on the row count stored in an image frame.
    pub max_image_rows: u16,
}

impl Limits {
    /// Default for [`max_payload_len`][Limits::max_payload_len].
    pub const DEFAULT_MAX_PAYLOAD_LEN: u64 = 50_000;
    /// Default for [`max_image_rows`][Limits::max_image_rows].
    pub const DEFAULT_MAX_IMAGE_ROWS: u16 = 2_200;

    /// Replaces the exclusive bound on bytes frame lengths.
    #[must_use]
    pub fn with_max_payload_len(mut self, len: u64) -> Self {
        self.max_payload_len = len;
        self
    }

    /// Replaces the inclusive bound on image frame row counts.
    #[must_use]
    pub fn with_max_image_rows(mut self, rows: u16) -> Self {
        self.max_image_rows = rows;
        self
    }

    /// Returns `true` if `len` is a plausible bytes frame length.
    #[must_use]
    pub fn accepts_payload_len(&self, len: u64) -> bool {
        len != 0 && len < self.max_payload_len
    }

    /// Returns `true` if `rows` is a plausible image frame row count.
    #[must_use]
    pub fn accepts_image_rows(&self, rows: u16) -> bool {
        rows != 0 && rows <= self.max_image_rows
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_payload_len: Self::DEFAULT_MAX_PAYLOAD_LEN,
            max_image_rows: Self::DEFAULT_MAX_IMAGE_ROWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_bounds_payload_len_exclusively() {
        let limits = Limits::default();

        assert!(limits.accepts_payload_len(1));
        assert!(limits.accepts_payload_len(49_999));
        assert!(!limits.accepts_payload_len(50_000));
        assert!(!limits.accepts_payload_len(0));
    }

    #[test]
    fn it_bounds_image_rows_inclusively() {
        let limits = Limits::default().with_max_image_rows(16);

        assert!(limits.accepts_image_rows(16));
        assert!(!limits.accepts_image_rows(17));
        assert!(!limits.accepts_image_rows(0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn it_deserializes_partial_config() -> Result<(), serde_json::Error> {
        let limits: Limits = serde_json::from_str(r#"{ "max_image_rows": 640 }"#)?;

        assert_eq!(limits, Limits::default().with_max_image_rows(640));

        Ok(())
    }
}
