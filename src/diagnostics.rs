use std::path::Path;

use crate::config::Config;

pub fn check(cfg: &Config, vault_path: &Path) -> anyhow::Result<()> {
    let mut errors: Vec<String> = Vec::new();

    // Check 1: request file is readable JSON
    let request = cfg.command.request_path();
    match std::fs::read(request) {
        Ok(bytes) => {
            if let Err(e) = serde_json::from_slice::<serde_json::Value>(&bytes) {
                errors.push(format!("{} is not valid JSON: {e}", request.display()));
            }
        }
        Err(e) => errors.push(format!("cannot read request {}: {e}", request.display())),
    }

    // Check 2: vault snapshot present when the command reads it
    if cfg.command.needs_vault() && !vault_path.is_file() {
        errors.push(format!(
            "vault snapshot not found: {}\n  \
             → export decrypted ciphers as {{\"ciphers\": [...]}}\n  \
             → or pass --vault PATH",
            vault_path.display()
        ));
    }

    if errors.is_empty() {
        return Ok(());
    }

    for err in &errors {
        eprintln!("ERROR: {err}");
    }
    anyhow::bail!("{} preflight check(s) failed", errors.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Command;

    fn config(command: Command) -> Config {
        Config {
            verbose: 0,
            vault: None,
            command,
        }
    }

    #[test]
    fn test_missing_request_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(Command::Origin {
            request: dir.path().join("missing.json"),
        });
        assert!(check(&cfg, &dir.path().join("vault.json")).is_err());
    }

    #[test]
    fn test_vault_only_required_for_entries() {
        let dir = tempfile::tempdir().unwrap();
        let request = dir.path().join("request.json");
        std::fs::write(&request, "{}").unwrap();
        let vault = dir.path().join("vault.json");

        let origin = config(Command::Origin {
            request: request.clone(),
        });
        assert!(check(&origin, &vault).is_ok());

        let entries = config(Command::Entries { request });
        assert!(check(&entries, &vault).is_err());
        std::fs::write(&vault, r#"{"ciphers": []}"#).unwrap();
        assert!(check(&entries, &vault).is_ok());
    }

    #[test]
    fn test_invalid_json_fails() {
        let dir = tempfile::tempdir().unwrap();
        let request = dir.path().join("request.json");
        std::fs::write(&request, "not json").unwrap();
        let cfg = config(Command::Origin { request });
        assert!(check(&cfg, &dir.path().join("vault.json")).is_err());
    }
}
