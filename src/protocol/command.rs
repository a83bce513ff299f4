//! Command definitions
//!
//! Represents requests from clients.

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Invoke = 0x01,
    Ping = 0x02,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Invoke a contract operation by name
    Invoke { function: String, args: Vec<String> },

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Build an invoke command from borrowed parts
    pub fn invoke<A: AsRef<str>>(function: &str, args: &[A]) -> Self {
        Command::Invoke {
            function: function.to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        }
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Invoke { .. } => CommandType::Invoke,
            Command::Ping => CommandType::Ping,
        }
    }
}
