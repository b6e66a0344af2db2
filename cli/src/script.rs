//! Script bake: strip comments and collapse blank lines.

use std::fs;
use std::path::Path;

use crate::error::CliError;
use crate::input_stem;

/// Bake one JavaScript file into `<stem>.baked.js` in `output_dir`.
pub fn bake_script(input: &Path, output_dir: &Path) -> Result<(), CliError> {
    let source = fs::read_to_string(input)?;
    let baked = strip_comments(&source);

    let output_path = output_dir.join(format!("{}.baked.js", input_stem(input)?));
    fs::write(&output_path, baked)?;
    log::info!("wrote {}", output_path.display());
    Ok(())
}

enum State {
    Code,
    LineComment,
    BlockComment,
    // The quote character that opened the literal.
    StringLiteral(char),
    StringEscape(char),
}

/// Remove `//` and `/* */` comments, then collapse runs of blank lines.
///
/// Comment markers inside string literals are left alone. Regular
/// expression literals are not tracked; a `//` inside one is treated as
/// a comment, which matches how simple minifiers behave.
fn strip_comments(source: &str) -> String {
    let mut stripped = String::with_capacity(source.len());
    let mut state = State::Code;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = State::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = State::BlockComment;
                }
                '"' | '\'' | '`' => {
                    state = State::StringLiteral(c);
                    stripped.push(c);
                }
                _ => stripped.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    stripped.push('\n');
                    state = State::Code;
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = State::Code;
                }
            }
            State::StringLiteral(quote) => {
                stripped.push(c);
                if c == '\\' {
                    state = State::StringEscape(quote);
                } else if c == quote {
                    state = State::Code;
                }
            }
            State::StringEscape(quote) => {
                stripped.push(c);
                state = State::StringLiteral(quote);
            }
        }
    }

    collapse_blank_lines(&stripped)
}

fn collapse_blank_lines(source: &str) -> String {
    let mut collapsed = String::with_capacity(source.len());
    // Starting "blank" also drops leading blank lines.
    let mut previous_blank = true;
    for line in source.lines() {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        previous_blank = blank;
        collapsed.push_str(line.trim_end());
        collapsed.push('\n');
    }
    collapsed
}
