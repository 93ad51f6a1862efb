//! Content handed to a download sink.

/// A rendered document ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// The document body.
    pub content: String,
    /// Suggested file name, including extension.
    pub filename: String,
    /// MIME type of the content.
    pub mime_type: &'static str,
}

impl Artifact {
    /// Creates an artifact named `base.extension`.
    pub fn new(
        content: String,
        base_filename: &str,
        extension: &str,
        mime_type: &'static str,
    ) -> Self {
        Self {
            content,
            filename: format!("{}.{}", base_filename, extension),
            mime_type,
        }
    }

    /// Returns the file name with `suffix` inserted before the extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use rep_p_toolkit::models::Artifact;
    ///
    /// let artifact = Artifact::new(String::new(), "registros_ponto", "csv", "text/csv");
    /// assert_eq!(artifact.filename_with_suffix("2024-03-10"), "registros_ponto_2024-03-10.csv");
    /// ```
    pub fn filename_with_suffix(&self, suffix: &str) -> String {
        match self.filename.rsplit_once('.') {
            Some((stem, extension)) => format!("{}_{}.{}", stem, suffix, extension),
            None => format!("{}_{}", self.filename, suffix),
        }
    }
}
