//! Sanitizing untrusted text before it reaches the terminal
//!
//! Card titles and descriptions come from a config file anyone can edit, and chat replies
//! come from a CLI on the server that likes to emit colors. Escape sequences in either would
//! repaint or move the cursor in our alternate screen, so everything displayed goes through
//! [`strip_ansi_codes`] (multi-line) or [`sanitize_inline`] (single row).

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Strips ANSI escape sequences and control characters from a string.
///
/// Removes CSI sequences (`ESC [ ... letter`), OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`) and lone two-byte escapes. Tab, newline and carriage return survive.
///
/// ```
/// use catalog_portal::utils::sanitize::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[1;32mOK\x1b[0m"), "OK");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                Some('[') => {
                    // CSI: parameters then a final byte in @..~
                    for next in chars.by_ref() {
                        if ('@'..='~').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    // OSC: terminated by BEL or ST (ESC \)
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                // Two-byte escape (ESC 7, ESC c, ...) or a trailing ESC
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Sanitize text for a single display row: escapes stripped, line breaks and tabs folded
/// into single spaces.
pub fn sanitize_inline(text: &str) -> String {
    strip_ansi_codes(text).split_whitespace().collect::<Vec<_>>().join(" ")
}
