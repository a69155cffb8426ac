use crate::{Error, Result};

/// A possibly application-qualified model name, `app.Model` or `Model`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName {
    pub app: Option<String>,
    pub model: String,
}

impl ModelName {
    pub fn parse(src: &str) -> Result<Self> {
        let (app, model) = match src.split_once('.') {
            Some((app, model)) => (Some(app), model),
            None => (None, src),
        };

        if let Some(app) = app {
            validate_code_name(src, app)?;
        }
        validate_code_name(src, model)?;

        Ok(Self {
            app: app.map(str::to_string),
            model: model.to_string(),
        })
    }
}

impl core::fmt::Display for ModelName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.app {
            Some(app) => write!(f, "{app}.{}", self.model),
            None => f.write_str(&self.model),
        }
    }
}

/// Checks `name` against `^[A-Za-z_][A-Za-z0-9_]+$`.
///
/// Model, step, and field names end up as SQL aliases, so anything else is
/// rejected.
pub fn validate_code_name(model: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();

    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            let rest = chars.as_str();
            !rest.is_empty()
                && rest
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::invalid_definition(
            model,
            format!("`{name}` is not a valid name; use letters, digits, and underscores"),
        ))
    }
}
