use anyhow::Result;
use dialoguer::{Confirm, Input, Password};

/// Ask before a destructive action. `assume_yes` skips the prompt.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

pub fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let value = Input::<String>::new().with_prompt(prompt).interact_text()?;
    Ok(value)
}

pub fn secret_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let value = Password::new().with_prompt(prompt).interact()?;
    Ok(value)
}
