/// Field separator within a stored line.
pub const SEPARATOR: &str = " || ";

/// Literal third field marking a record whose reminder already fired.
pub const REMINDED_MARKER: &str = "reminded";

/// One line of the store. The variant is decided purely by how the line
/// splits on [`SEPARATOR`]; parsing never fails. Lines with an unexpected
/// field count are carried verbatim as `Malformed` so a rewrite of the
/// store reproduces them byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Plain { description: String },
    Scheduled { description: String, time: String },
    Reminded { description: String, time: String },
    Malformed { line: String },
}

impl Record {
    pub fn parse(line: &str) -> Self {
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        match fields.as_slice() {
            [description] => Self::Plain {
                description: description.to_string(),
            },
            [description, time] => Self::Scheduled {
                description: description.to_string(),
                time: time.to_string(),
            },
            [description, time, marker] if *marker == REMINDED_MARKER => Self::Reminded {
                description: description.to_string(),
                time: time.to_string(),
            },
            _ => Self::Malformed {
                line: line.to_string(),
            },
        }
    }

    pub fn render(&self) -> String {
        match self {
            Self::Plain { description } => description.clone(),
            Self::Scheduled { description, time } => {
                format!("{description}{SEPARATOR}{time}")
            }
            Self::Reminded { description, time } => {
                format!("{description}{SEPARATOR}{time}{SEPARATOR}{REMINDED_MARKER}")
            }
            Self::Malformed { line } => line.clone(),
        }
    }

    /// Human-readable list line for the record at a 1-based position.
    pub fn display_line(&self, position: usize) -> String {
        match self {
            Self::Plain { description } => format!("{position}. {description}"),
            Self::Scheduled { description, time } => {
                format!("{position}. {description} (Time: {time})")
            }
            Self::Reminded { description, time } => {
                format!("{position}. {description} (Time: {time}) - Reminder Sent")
            }
            Self::Malformed { line } => format!("{position}. {line}"),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Plain { description }
            | Self::Scheduled { description, .. }
            | Self::Reminded { description, .. } => description,
            Self::Malformed { line } => line,
        }
    }

    pub fn time(&self) -> Option<&str> {
        match self {
            Self::Scheduled { time, .. } | Self::Reminded { time, .. } => Some(time),
            Self::Plain { .. } | Self::Malformed { .. } => None,
        }
    }

    pub fn is_reminded(&self) -> bool {
        matches!(self, Self::Reminded { .. })
    }
}
