//! Installed font families, as offered by Format > Font Style.

use std::collections::BTreeSet;
use std::process::Command;

use quillcraft_logger as logger;

/// Offered when fontconfig is not available
const FALLBACK_FAMILIES: &[&str] = &[
    "Courier New",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Monospace",
    "Noto Sans Mono",
    "Sans",
    "Serif",
];

/// Sorted, deduplicated family names from `fc-list`, or a fixed list when
/// fontconfig is missing or reports nothing
pub fn installed_families() -> Vec<String> {
    match Command::new("fc-list").args([":", "family"]).output() {
        Ok(output) if output.status.success() => {
            let families = parse_fc_list(&String::from_utf8_lossy(&output.stdout));
            if families.is_empty() {
                logger::warn("fc-list reported no fonts, using built-in font list");
                fallback_families()
            } else {
                families
            }
        }
        Ok(output) => {
            logger::warn(format!("fc-list exited with {}", output.status));
            fallback_families()
        }
        Err(e) => {
            logger::debug(format!("fc-list unavailable: {}", e));
            fallback_families()
        }
    }
}

fn fallback_families() -> Vec<String> {
    FALLBACK_FAMILIES.iter().map(|f| f.to_string()).collect()
}

/// One family per line; localized aliases follow the first name after commas
fn parse_fc_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(|name| name.trim().replace("\\-", "-"))
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fc_list() {
        let output = "DejaVu Sans,DejaVu Sans Condensed\nNoto Sans Mono\n\nDejaVu Sans\nNoto Sans CJK JP,Noto Sans CJK JP Regular\n";
        assert_eq!(
            parse_fc_list(output),
            vec!["DejaVu Sans", "Noto Sans CJK JP", "Noto Sans Mono"]
        );
    }

    #[test]
    fn test_installed_families_never_empty() {
        assert!(!installed_families().is_empty());
    }
}
