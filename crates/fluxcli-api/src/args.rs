use crate::ModuleError;

/// Positional argument accessor for operation implementations.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [String],
}

impl<'a> Args<'a> {
    pub fn new(values: &'a [String]) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn required(&self, index: usize, name: &str) -> Result<&'a str, ModuleError> {
        self.optional(index)
            .ok_or_else(|| ModuleError::MissingArgument(name.to_string()))
    }

    pub fn optional(&self, index: usize) -> Option<&'a str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn or_default(&self, index: usize, default: &'a str) -> &'a str {
        self.optional(index).unwrap_or(default)
    }

    /// Rejects calls passing more than `max` arguments.
    pub fn ensure_max(&self, max: usize) -> Result<(), ModuleError> {
        if self.values.len() > max {
            return Err(ModuleError::TooManyArguments {
                max,
                got: self.values.len(),
            });
        }
        Ok(())
    }
}
