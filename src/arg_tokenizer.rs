use crate::errors::{ParseError, Result};

/// Decodes one inline argument value from the remainder of a workload line,
/// starting just after the `key=` marker.
///
/// Returns the decoded value together with the number of input bytes
/// consumed, so the caller can resume scanning at the terminator. The count
/// never includes the terminating whitespace itself.
///
/// Rules:
/// - unescaped whitespace (space, tab, newline) outside quotes ends the value
/// - `'...'` and `"..."` regions keep whitespace; the other quote kind is a
///   literal character inside a region, the same kind closes it
/// - `\n`, `\r`, `\t` decode to the control character; `\<any other>` decodes
///   to that character itself
/// - a backslash with nothing after it is a fatal [`ParseError::PrematureEscapeEof`]
pub fn parse_arg(input: &str) -> Result<(String, usize)> {
    let mut value = String::new();
    let mut single_quoted = false;
    let mut double_quoted = false;
    let mut escaped = false;
    let mut consumed = input.len();

    for (pos, ch) in input.char_indices() {
        if escaped {
            match ch {
                'n' => value.push('\n'),
                'r' => value.push('\r'),
                't' => value.push('\t'),
                other => value.push(other),
            }
            escaped = false;
        } else if ch == '"' && double_quoted {
            double_quoted = false;
        } else if ch == '\'' && single_quoted {
            single_quoted = false;
        } else {
            match ch {
                ' ' | '\t' | '\n' => {
                    if single_quoted || double_quoted {
                        value.push(ch);
                    } else {
                        consumed = pos;
                        break;
                    }
                }
                '\\' => escaped = true,
                '"' => {
                    if single_quoted {
                        value.push(ch);
                    } else {
                        double_quoted = true;
                    }
                }
                '\'' => {
                    if double_quoted {
                        value.push(ch);
                    } else {
                        single_quoted = true;
                    }
                }
                other => value.push(other),
            }
        }
    }

    if escaped {
        return Err(ParseError::PrematureEscapeEof {
            fragment: input.to_string(),
        });
    }
    Ok((value, consumed))
}
