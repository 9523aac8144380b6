//! Command-line equivalents of console actions, shown so that operators can
//! script what they just clicked. The executable path comes from
//! `GET /api/v1/cli`.

use crate::types::SourceInfo;

/// Quotes an argument for a POSIX shell when it needs it.
pub fn quote_arg(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@=,+%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Policy target argument: `--global` or `user@host[:path]`.
pub fn policy_target_arg(target: &SourceInfo) -> String {
    if target.is_global() {
        "--global".to_string()
    } else {
        quote_arg(&target.to_string())
    }
}

fn command(executable: &str, args: &[String]) -> String {
    let exe = if executable.is_empty() { "kopia" } else { executable };
    std::iter::once(quote_arg(exe))
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn policy_set(executable: &str, target: &SourceInfo) -> String {
    command(executable, &["policy".into(), "set".into(), policy_target_arg(target)])
}

pub fn policy_show(executable: &str, target: &SourceInfo) -> String {
    command(executable, &["policy".into(), "show".into(), policy_target_arg(target)])
}

pub fn snapshot_create(executable: &str, path: &str) -> String {
    command(executable, &["snapshot".into(), "create".into(), quote_arg(path)])
}

pub fn snapshot_list(executable: &str, source: &SourceInfo) -> String {
    command(executable, &["snapshot".into(), "list".into(), quote_arg(&source.to_string())])
}

pub fn snapshot_estimate(executable: &str, path: &str) -> String {
    command(executable, &["snapshot".into(), "estimate".into(), quote_arg(path)])
}

pub fn restore(executable: &str, root: &str, destination: &str) -> String {
    command(
        executable,
        &["snapshot".into(), "restore".into(), quote_arg(root), quote_arg(destination)],
    )
}
