use std::fmt;

/// A single command line, ready to hand to the process-creation call.
///
/// Stored as bytes: UTF-8 when the arguments came from the wide command line,
/// whatever the runtime supplied otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandLine(Vec<u8>);

impl CommandLine {
    /// Joins `tokens` with single spaces, wrapping any token that contains a
    /// space in double quotes. Embedded quotes are passed through untouched.
    pub fn join<I, S>(tokens: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut line = Vec::new();
        for token in tokens {
            let token = token.as_ref();
            if !line.is_empty() {
                line.push(b' ');
            }
            if token.contains(&b' ') {
                line.push(b'"');
                line.extend_from_slice(token);
                line.push(b'"');
            } else {
                line.extend_from_slice(token);
            }
        }
        CommandLine(line)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}
