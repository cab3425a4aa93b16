use anyhow::{Context, Result};
use propelhub_app_core::TokenSource;
use propelhub_infra::CredentialStore;

/// Token used for this run: an explicit one wins over the stored credential.
pub fn resolve_token(explicit: Option<String>) -> Result<String> {
    let source: Box<dyn TokenSource> = match explicit {
        Some(token) => Box::new(token),
        None => Box::new(CredentialStore::new().context("Failed to locate credential store")?),
    };
    source.load().context("Failed to load credential")
}

pub fn handle_set(store: &CredentialStore, token: &str) -> Result<()> {
    store
        .save_token(token.trim())
        .context("Failed to save credential")?;
    println!("Credential saved to {}", store.path().display());
    Ok(())
}

pub fn handle_clear(store: &CredentialStore) -> Result<()> {
    store.clear().context("Failed to remove credential")?;
    println!("Credential removed.");
    Ok(())
}

pub fn handle_show(store: &CredentialStore) -> Result<()> {
    let token = store.read_token().context("Failed to read credential")?;
    if token.is_empty() {
        println!("No credential stored.");
    } else {
        println!("{}", mask(&token));
    }
    Ok(())
}

/// Keep the last four characters visible. Tokens of eight characters or
/// fewer are hidden entirely.
pub fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let visible = if chars.len() > 8 { 4 } else { 0 };
    let hidden = chars.len() - visible;
    let tail: String = chars[hidden..].iter().collect();
    format!("{}{}", "*".repeat(hidden), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_token_wins() {
        assert_eq!(resolve_token(Some("flag".into())).unwrap(), "flag");
    }

    #[test]
    fn mask_hides_all_but_tail() {
        assert_eq!(mask("abcdefghij"), "******ghij");
        assert_eq!(mask("abcdefgh"), "********");
        assert_eq!(mask("abc"), "***");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn set_then_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::at(dir.path().join("credentials.json"));
        handle_set(&store, " secret \n").unwrap();
        assert_eq!(store.read_token().unwrap(), "secret");
        handle_clear(&store).unwrap();
        assert_eq!(store.read_token().unwrap(), "");
    }
}
