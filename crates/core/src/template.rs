//! Command line templates
//!
//! Tasks declare their commands as templates: a base line, optional argument groups
//! that only apply when a task flag has a given value, and `{placeholder}` slots that
//! are filled from the execution context when the command actually runs.

use crate::tasks::TaskOptions;
use crate::types::{ChoresError, ChoresResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct FlagArgs {
    flag: String,
    enabled: bool,
    args: String,
}

/// A shell command line with flag-dependent arguments and placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    base: String,
    flag_args: Vec<FlagArgs>,
}

impl CommandTemplate {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            flag_args: Vec::new(),
        }
    }

    /// Append `args` when `flag` is set
    pub fn when(self, flag: &str, args: impl Into<String>) -> Self {
        self.flag_args(flag, true, args)
    }

    /// Append `args` when `flag` is not set
    pub fn unless(self, flag: &str, args: impl Into<String>) -> Self {
        self.flag_args(flag, false, args)
    }

    fn flag_args(mut self, flag: &str, enabled: bool, args: impl Into<String>) -> Self {
        self.flag_args.push(FlagArgs {
            flag: flag.to_string(),
            enabled,
            args: args.into(),
        });
        self
    }

    /// The command line for the given options, placeholders still unresolved
    pub fn line_for(&self, options: &TaskOptions) -> String {
        let mut line = self.base.clone();
        for group in &self.flag_args {
            if options.get(&group.flag) == group.enabled {
                line.push(' ');
                line.push_str(&group.args);
            }
        }
        line
    }

    /// Produce the final command line, resolving each placeholder through `resolve`
    pub fn render<F>(&self, options: &TaskOptions, resolve: F) -> ChoresResult<String>
    where
        F: FnMut(&str) -> ChoresResult<String>,
    {
        render_placeholders(&self.line_for(options), resolve)
    }
}

/// Replace every `{name}` in `input` with the value `resolve` returns for `name`.
///
/// Only lowercase identifiers count as placeholders; other braces are left untouched.
/// `resolve` is called lazily, so values nobody asks for are never computed.
pub fn render_placeholders<F>(input: &str, mut resolve: F) -> ChoresResult<String>
where
    F: FnMut(&str) -> ChoresResult<String>,
{
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('}') {
            Some(end) if is_placeholder_name(&after[..end]) => {
                output.push_str(&resolve(&after[..end])?);
                rest = &after[end + 1..];
            }
            _ => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    Ok(output)
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_lowercase() || c == '_')
}

/// Error for a placeholder no resolver knows about
pub fn unknown_placeholder(name: &str) -> ChoresError {
    ChoresError::Config(format!("Unknown placeholder '{{{}}}' in command template", name))
}
