//! Upload checks, applied in a fixed order: extension first, then size.

use crate::errors::AppError;

/// 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Accepted RFP document formats, identified by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfpFormat {
    Pdf,
    Pptx,
    Docx,
    Hwp,
}

impl RfpFormat {
    pub const ALL: [RfpFormat; 4] = [
        RfpFormat::Pdf,
        RfpFormat::Pptx,
        RfpFormat::Docx,
        RfpFormat::Hwp,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            RfpFormat::Pdf => ".pdf",
            RfpFormat::Pptx => ".pptx",
            RfpFormat::Docx => ".docx",
            RfpFormat::Hwp => ".hwp",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            RfpFormat::Pdf => "application/pdf",
            RfpFormat::Pptx => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
            RfpFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            RfpFormat::Hwp => "application/x-hwp",
        }
    }

    /// Plain suffix match; `REPORT.PDF` is not accepted.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| file_name.ends_with(format.extension()))
    }
}

pub fn check_extension(file_name: &str) -> Result<RfpFormat, AppError> {
    RfpFormat::from_file_name(file_name).ok_or_else(|| {
        AppError::InvalidFormat(format!(
            "'{file_name}' is not a supported RFP file (expected .pdf, .pptx, .docx or .hwp)"
        ))
    })
}

pub fn check_size(len: usize) -> Result<(), AppError> {
    if len > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(format!(
            "{len} bytes exceeds the {MAX_UPLOAD_BYTES} byte limit"
        )));
    }
    Ok(())
}

pub fn validate_upload(file_name: &str, len: usize) -> Result<RfpFormat, AppError> {
    let format = check_extension(file_name)?;
    check_size(len)?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_supported_extension_is_accepted() {
        assert_eq!(validate_upload("rfp.pdf", 1).unwrap(), RfpFormat::Pdf);
        assert_eq!(validate_upload("deck.pptx", 1).unwrap(), RfpFormat::Pptx);
        assert_eq!(validate_upload("brief.docx", 1).unwrap(), RfpFormat::Docx);
        assert_eq!(validate_upload("공고.hwp", 1).unwrap(), RfpFormat::Hwp);
    }

    #[test]
    fn test_unsupported_extensions_are_invalid_format() {
        for name in ["notes.txt", "rfp.pdf.exe", "rfp", "deck.ppt", "REPORT.PDF", ""] {
            let err = validate_upload(name, 1).unwrap_err();
            assert!(
                matches!(err, AppError::InvalidFormat(_)),
                "{name:?} should be InvalidFormat"
            );
        }
    }

    #[test]
    fn test_exactly_max_size_is_accepted() {
        assert!(validate_upload("rfp.pdf", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn test_one_byte_over_is_payload_too_large() {
        let err = validate_upload("rfp.pdf", MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_extension_is_checked_before_size() {
        let err = validate_upload("huge.zip", MAX_UPLOAD_BYTES * 3).unwrap_err();
        assert!(matches!(err, AppError::InvalidFormat(_)));
    }

    #[test]
    fn test_content_type_per_format() {
        assert_eq!(RfpFormat::Pdf.content_type(), "application/pdf");
        assert!(RfpFormat::Docx.content_type().contains("wordprocessingml"));
    }
}
