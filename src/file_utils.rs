use rand::Rng;

/// MIME type browsers report for PDF files.
pub const PDF_MIME: &str = "application/pdf";

const ID_LEN: usize = 7;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Decides whether an uploaded file is accepted as a PDF.
///
/// # Arguments
///
/// * `mime_type` - The MIME type reported by the browser (may be empty)
/// * `name` - The filename as selected or dropped by the user
///
/// # Returns
///
/// `true` when the MIME type is exactly `application/pdf` or the filename
/// ends with `.pdf`. The suffix check is case-sensitive, so `REPORT.PDF`
/// with an empty MIME type is rejected. The content itself is never looked at.
pub fn is_pdf_upload(mime_type: &str, name: &str) -> bool {
    mime_type == PDF_MIME || name.ends_with(".pdf")
}

/// Builds the filename used for the exported download.
///
/// # Example
///
/// ```
/// use pdf_redact_wasm::file_utils::redacted_file_name;
///
/// assert_eq!(
///     redacted_file_name("merged_redacted_", "invoice.pdf"),
///     "merged_redacted_invoice.pdf"
/// );
/// ```
pub fn redacted_file_name(prefix: &str, original: &str) -> String {
    format!("{}{}", prefix, original)
}

/// Generates a short random identifier.
///
/// Identifiers are seven lowercase base-36 characters. Uniqueness is the
/// caller's responsibility; see [`generate_unique_id`].
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Generates an identifier for which `taken` returns `false`.
pub fn generate_unique_id<R, F>(rng: &mut R, taken: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let id = generate_id(rng);
        if !taken(&id) {
            return id;
        }
    }
}

/// Picks a random display color formatted as `#rrggbb`.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("#{:06x}", rng.gen_range(0..0xFF_FFFFu32))
}
