//! Menu entries and option parsing.
//!
//! Front ends collect a free-form option token and map it to a
//! [`MenuChoice`]. `1`-`8` are the operations in menu order and `9` exits.

use crate::OperationId;

/// Parsed menu option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Run an operation on the current document.
    Operation(OperationId),
    /// Discard the current document and enter new text.
    Reset,
    /// Leave the program.
    Exit,
    /// Retry loading the model.
    Reload,
    /// Anything else, as typed.
    Invalid(String),
}

impl MenuChoice {
    /// Parse an option token, case-insensitively.
    pub fn parse(input: &str) -> Self {
        let token = input.trim().to_ascii_lowercase();

        match token.as_str() {
            "9" | "exit" | "quit" | "q" => Self::Exit,
            "n" | "new" | "reset" => Self::Reset,
            "r" | "reload" => Self::Reload,
            _ => token
                .parse::<OperationId>()
                .map_or_else(|_| Self::Invalid(input.trim().to_owned()), Self::Operation),
        }
    }

    /// Commands recognised where free text is expected.
    ///
    /// Only spelled-out words count, so a line like `9` is still analyzed
    /// as text.
    pub fn parse_text_command(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Some(Self::Exit),
            "r" | "reload" => Some(Self::Reload),
            _ => None,
        }
    }
}

/// A line in the displayed menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    /// One of the operations.
    Operation(OperationId),
    /// Analyze new text.
    NewText,
    /// Exit the program.
    Exit,
}

impl MenuEntry {
    /// All entries in display order.
    pub const ALL: [Self; OperationId::COUNT + 2] = [
        Self::Operation(OperationId::Tokenize),
        Self::Operation(OperationId::Annotate),
        Self::Operation(OperationId::Lemmatize),
        Self::Operation(OperationId::SegmentSentences),
        Self::Operation(OperationId::TagPos),
        Self::Operation(OperationId::RecognizeEntities),
        Self::Operation(OperationId::RemoveStopwords),
        Self::Operation(OperationId::ParseDependencies),
        Self::NewText,
        Self::Exit,
    ];

    /// Key the user types to pick this entry.
    pub fn key(self) -> String {
        match self {
            Self::Operation(op) => op.menu_number().to_string(),
            Self::NewText => "n".to_owned(),
            Self::Exit => "9".to_owned(),
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Operation(op) => op.label(),
            Self::NewText => "Analyze new text",
            Self::Exit => "Exit the program",
        }
    }

    /// The choice this entry stands for.
    pub fn choice(self) -> MenuChoice {
        match self {
            Self::Operation(op) => MenuChoice::Operation(op),
            Self::NewText => MenuChoice::Reset,
            Self::Exit => MenuChoice::Exit,
        }
    }
}
