use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

use super::Failure;

const BIN_NAME: &str = "rawprompt";

pub fn run(shell: Shell, install: bool) {
    super::finish(run_inner(shell, install));
}

fn run_inner(shell: Shell, install: bool) -> Result<(), Failure> {
    let mut cmd = crate::Cli::command();
    if !install {
        clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
        return Ok(());
    }

    let home = std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| "HOME is not set.".to_string())?;
    let target = completion_path(shell, &home).ok_or_else(|| {
        format!(
            "Auto-install not supported for {shell:?}. \
             Use `{BIN_NAME} completions {shell:?}` to print completions and install manually."
        )
    })?;

    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    write_file(&target, &buf)?;
    println!("Installed {shell:?} completions to {}", target.display());

    if shell == Shell::Zsh {
        ensure_zfunc_in_zshrc(&home)?;
        println!("Restart your shell or run: source ~/.zshrc");
    } else if shell == Shell::Bash {
        println!("Restart your shell to activate.");
    }
    Ok(())
}

/// Where each supported shell picks up per-user completion files.
fn completion_path(shell: Shell, home: &Path) -> Option<PathBuf> {
    match shell {
        Shell::Zsh => Some(home.join(".zfunc").join(format!("_{BIN_NAME}"))),
        Shell::Bash => Some(
            home.join(".local/share/bash-completion/completions")
                .join(BIN_NAME),
        ),
        Shell::Fish => Some(
            home.join(".config/fish/completions")
                .join(format!("{BIN_NAME}.fish")),
        ),
        _ => None,
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Could not create {}: {e}", parent.display()))?;
    }
    fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

fn ensure_zfunc_in_zshrc(home: &Path) -> Result<(), String> {
    let zshrc_path = home.join(".zshrc");
    let zshrc = fs::read_to_string(&zshrc_path).unwrap_or_default();
    if zshrc.contains(".zfunc") {
        return Ok(());
    }
    let snippet = format!(
        "\n# {BIN_NAME} shell completions\nfpath=(~/.zfunc $fpath)\nautoload -Uz compinit && compinit\n"
    );
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&zshrc_path)
        .and_then(|mut f| f.write_all(snippet.as_bytes()))
        .map_err(|e| format!("Failed to update ~/.zshrc: {e}"))?;
    println!("Added fpath + compinit to ~/.zshrc");
    Ok(())
}
