//! Subcommand implementations

pub mod compare;
pub mod normalize;

/// How a successful command run should end the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Clean,
    /// Actual issues found and the caller asked to fail on them
    IssuesFound,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::IssuesFound => 2,
        }
    }
}
