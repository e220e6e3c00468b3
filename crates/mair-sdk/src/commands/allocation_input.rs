//! Allocation list readers.
//!
//! Two formats are accepted: a JSON array of `{ "address", "amount" }` objects, or CSV lines
//! of `address,amount` with optional `#` comments and an optional `address,amount` header.

use std::path::Path;

use eyre::{Context as _, ensure, eyre};
use mair_core::base::{Address, Amount};
use mair_core::schema::allocation::AllocationEntry;

/// Load an allocation list from disk.
///
/// # Errors
/// Returns an error if the file cannot be read, does not parse, or is empty.
pub(super) async fn read_allocation(path: &Path) -> eyre::Result<Vec<AllocationEntry>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read allocation file {}", path.display()))?;
    let entries = parse_allocation(&contents)
        .with_context(|| format!("Failed to parse allocation file {}", path.display()))?;
    ensure!(
        !entries.is_empty(),
        "Allocation file {} contains no entries",
        path.display()
    );
    Ok(entries)
}

fn parse_allocation(contents: &str) -> eyre::Result<Vec<AllocationEntry>> {
    if contents.trim_start().starts_with('[') {
        return serde_json::from_str(contents).context("Invalid JSON allocation list");
    }
    parse_csv(contents)
}

fn parse_csv(contents: &str) -> eyre::Result<Vec<AllocationEntry>> {
    let mut entries = Vec::new();
    for (index, raw) in contents.lines().enumerate() {
        let line_no = index.saturating_add(1);
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (address, amount) = line
            .split_once(',')
            .ok_or_else(|| eyre!("Line {line_no}: expected `address,amount`"))?;
        let (address, amount) = (address.trim(), amount.trim());
        if entries.is_empty() && address.eq_ignore_ascii_case("address") {
            continue;
        }

        let address: Address = address
            .parse()
            .with_context(|| format!("Line {line_no}: invalid address {address:?}"))?;
        let amount: Amount = amount
            .parse()
            .with_context(|| format!("Line {line_no}: invalid amount {amount:?}"))?;
        entries.push(AllocationEntry::new(address, amount));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use test_utils::address;

    use super::*;

    #[test]
    fn parses_csv_with_header_and_comments() {
        let csv = "\
# airdrop round 1
address,amount
0x1111111111111111111111111111111111111111, 100

2222222222222222222222222222222222222222,200
";
        let entries = parse_allocation(csv).expect("csv should parse");
        assert_eq!(
            entries,
            vec![
                AllocationEntry::new(address(0x11), 100),
                AllocationEntry::new(address(0x22), 200),
            ]
        );
    }

    #[test]
    fn parses_json_array() {
        let json = r#"[{ "address": "0x3333333333333333333333333333333333333333", "amount": "7" }]"#;
        let entries = parse_allocation(json).expect("json should parse");
        assert_eq!(entries, vec![AllocationEntry::new(address(0x33), 7)]);
    }

    #[test]
    fn reports_offending_line() {
        let err = parse_allocation("0x1111111111111111111111111111111111111111,100\nnonsense\n")
            .expect_err("second line is malformed");
        assert!(err.to_string().contains("Line 2"));

        let err = parse_allocation("0x1111111111111111111111111111111111111111,-5\n")
            .expect_err("negative amount");
        assert!(err.to_string().contains("invalid amount"));
    }

    #[tokio::test]
    async fn empty_file_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("allocation.csv");
        tokio::fs::write(&path, "# nothing here\n")
            .await
            .expect("write");

        let err = read_allocation(&path).await.expect_err("empty allocation");
        assert!(err.to_string().contains("contains no entries"));
    }
}
