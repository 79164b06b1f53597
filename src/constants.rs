//! # Constants
//!
//! Constants used throughout the application

/// The single path delimiter
///
/// Splits user input into segments and terminates every non-empty prefix.
pub const PATH_DELIMITER: char = '/';

/// [`PATH_DELIMITER`] as a string slice
pub const PATH_DELIMITER_STR: &str = "/";

/// Appended to the rendered current location to form the prompt
pub const PROMPT_SUFFIX: &str = " $ ";

/// Supported shell commands
pub const COMMANDS: [&str; 5] = ["cd", "exit", "ls", "pwd", "type"];

/// Frames drawn by the progress spinner
pub const SPINNER_FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Delay between two spinner frames, in milliseconds
pub const SPINNER_INTERVAL_MS: u64 = 80;
