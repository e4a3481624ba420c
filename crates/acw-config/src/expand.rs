//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced forms are recognised. A value without `${` is returned
/// unchanged, so a bare `$` inside a URL survives.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // Unset variables resolve to `None` so that `:-` defaults apply; references
    // without a default must be set.
    if let Some(var) = required_vars(value).find(|var| std::env::var(var).is_err()) {
        return Err(unset(field, var));
    }

    shellexpand::env_with_context(value, |var| {
        Ok::<_, std::env::VarError>(std::env::var(var).ok())
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| unset(field, &e.var_name))
}

/// Names referenced as `${NAME}` without a default.
fn required_vars(value: &str) -> impl Iterator<Item = &str> {
    value
        .split("${")
        .skip(1)
        .filter_map(|rest| rest.split_once('}'))
        .map(|(inner, _)| inner)
        .filter(|inner| !inner.contains(":-"))
}

fn unset(field: &str, var: &str) -> ConfigError {
    ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{var}}} not set"),
    }
}

/// Expand `value` in place, reporting failures against `field`.
pub(crate) fn expand_in_place(value: &mut String, field: &str) -> Result<(), ConfigError> {
    let expanded = expand_env(value, field)?;
    *value = expanded;
    Ok(())
}
