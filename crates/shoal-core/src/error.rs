pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] shoal_graphlib::GraphError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("handle must start with '@': {handle}")]
    MissingSigil { handle: String },

    #[error("the file must contain both a 'users' and a 'relations' section")]
    MissingSections,

    #[error("line {line}: relation must use the format '@from, @to': {text}")]
    MalformedRelation { line: usize, text: String },

    #[error("user already exists: {handle}")]
    DuplicateUser { handle: String },

    #[error("unknown user: {handle}")]
    UnknownUser { handle: String },

    #[error("a user cannot follow themselves: {handle}")]
    SelfFollow { handle: String },

    #[error("relation already exists: {from} -> {to}")]
    DuplicateRelation { from: String, to: String },

    #[error("relation does not exist: {from} -> {to}")]
    UnknownRelation { from: String, to: String },

    #[error("no file is associated with the current graph")]
    NoCurrentFile,
}
