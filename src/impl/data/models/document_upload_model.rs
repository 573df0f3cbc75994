use fractic_server_error::ServerError;

use crate::errors::InvalidUpload;

/// A document about to be sent to the extraction service.
#[derive(Debug)]
pub(crate) struct DocumentUploadModel {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DocumentUploadModel {
    /// Rejects uploads the extraction service would refuse anyway, before
    /// spending a round trip on them.
    pub(crate) fn validate(&self, max_upload_bytes: u64) -> Result<(), ServerError> {
        if self.file_name.trim().is_empty() {
            return Err(InvalidUpload::new("no file selected"));
        }
        if !self.file_name.to_lowercase().ends_with(".pdf") {
            return Err(InvalidUpload::new(&format!(
                "file must be a PDF (received '{}')",
                self.file_name
            )));
        }
        if self.bytes.is_empty() {
            return Err(InvalidUpload::new("file is empty"));
        }
        if self.bytes.len() as u64 > max_upload_bytes {
            return Err(InvalidUpload::new(&format!(
                "file size ({} bytes) exceeds maximum limit of {} bytes",
                self.bytes.len(),
                max_upload_bytes
            )));
        }
        Ok(())
    }
}
