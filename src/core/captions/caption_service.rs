// Caption handling for the cat images.
//
// Captions come from users or from document context (file titles, greetings) and
// end up inside an image API URL path. This module turns arbitrary text into a short,
// safe caption. URL-encoding is NOT done here - callers encode when they build URLs.

/// Longest caption (in characters) the image API renders legibly.
pub const MAX_CAPTION_LENGTH: usize = 40;

/// Appended to captions that had to be cut.
const ELLIPSIS: &str = "...";

/// Punctuation accepted in captions besides letters and digits.
const ALLOWED_PUNCTUATION: &str = " .:,;¿?¡![](){}~@#$%^`*+='\"|\\/_-";

/// Characters we prefer to cut at when a caption is too long.
fn is_word_separator(c: char) -> bool {
    matches!(c, ':' | ';' | '_' | '-' | ',') || c.is_whitespace()
}

/// Letters from the scripts the image API font set can draw.
fn is_supported_letter(c: char) -> bool {
    if !c.is_alphabetic() {
        return false;
    }

    let code = c as u32;
    matches!(code,
        // Latin
        0x0041..=0x005A
        | 0x0061..=0x007A
        | 0x00AA
        | 0x00BA
        | 0x00C0..=0x00D6
        | 0x00D8..=0x00F6
        | 0x00F8..=0x024F
        | 0x0250..=0x02AF
        | 0x1E00..=0x1EFF
        // Greek
        | 0x0370..=0x03E1
        | 0x03F0..=0x03FF
        | 0x1F00..=0x1FFF
        // Cyrillic
        | 0x0400..=0x052F
        | 0x1C80..=0x1C8F
        | 0x2DE0..=0x2DFF
        | 0xA640..=0xA69F
        // Hebrew
        | 0x0591..=0x05F4
        | 0xFB1D..=0xFB4F
        // Arabic
        | 0x0620..=0x064A
        | 0x066E..=0x06D3
        | 0x06D5
        | 0x06E5..=0x06E6
        | 0x06EE..=0x06FF
        | 0x0750..=0x077F
        | 0x08A0..=0x08FF
        | 0xFB50..=0xFDFF
        | 0xFE70..=0xFEFF
    )
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || is_supported_letter(c) || ALLOWED_PUNCTUATION.contains(c)
}

/// Sanitizes, normalizes and truncates a caption.
///
/// - Unsupported characters (emoji, CJK, control characters...) become a space.
/// - Runs of whitespace collapse into one space; the result is trimmed.
/// - Captions longer than [`MAX_CAPTION_LENGTH`] are cut at the last word separator
///   at or before `MAX_CAPTION_LENGTH - 3` (or hard-cut there) and get an ellipsis.
pub fn sanitize(caption: Option<&str>) -> String {
    let caption = match caption {
        Some(c) if !c.is_empty() => c,
        _ => return String::new(),
    };

    let replaced: String = caption
        .chars()
        .map(|c| if is_allowed(c) { c } else { ' ' })
        .collect();

    let normalized = replaced.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = normalized.chars().collect();

    if chars.len() <= MAX_CAPTION_LENGTH {
        return normalized;
    }

    let truncation_point = MAX_CAPTION_LENGTH - ELLIPSIS.len();
    let cut_index = (0..=truncation_point)
        .rev()
        .find(|&i| is_word_separator(chars[i]))
        .unwrap_or(truncation_point);

    let mut truncated: String = chars[..cut_index].iter().collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Lowercases the text and uppercases the first letter of every space-separated word.
pub fn capitalize(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
