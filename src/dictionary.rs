use anyhow::Context as _;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub accepted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

/// Builds a trie from whitespace-separated tokens. Tokens that are not
/// entirely alphabetic, including ones that are not UTF-8, are skipped.
pub fn load(reader: impl std::io::BufRead) -> anyhow::Result<(crate::words::Trie, Stats)> {
    let mut trie = crate::words::Trie::new();
    let mut stats = Stats::default();

    for (lineno, line) in reader.split(b'\n').enumerate() {
        let line = line.with_context(|| format!("reading line {}", lineno + 1))?;
        for token in line
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
        {
            let inserted = std::str::from_utf8(token)
                .map_err(|err| err.to_string())
                .and_then(|token| trie.insert(token).map_err(|err| err.to_string()));
            match inserted {
                Ok(true) => stats.accepted += 1,
                Ok(false) => stats.duplicates += 1,
                Err(err) => {
                    let token = String::from_utf8_lossy(token);
                    log::debug!(line = lineno + 1, token = &*token; "skipping token: {err}");
                    stats.skipped += 1;
                }
            }
        }
    }

    Ok((trie, stats))
}

pub fn load_path(
    path: impl AsRef<std::path::Path>,
) -> anyhow::Result<(crate::words::Trie, Stats)> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("could not open dictionary {}", path.display()))?;
    let (trie, stats) = load(std::io::BufReader::new(file))
        .with_context(|| format!("could not read dictionary {}", path.display()))?;

    log::info!(
        path = path.display().to_string().as_str(),
        words = stats.accepted,
        duplicates = stats.duplicates,
        skipped = stats.skipped,
        nodes = trie.node_count();
        "dictionary loaded"
    );

    Ok((trie, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(trie: &crate::words::Trie, suffix: &str) -> Vec<String> {
        let cursor = trie
            .locate(&crate::words::Reversed::parse(suffix).unwrap())
            .unwrap();
        trie.enumerate(cursor, usize::MAX, 0).unwrap().words
    }

    #[test]
    fn test_load_skips_non_alphabetic() {
        let input = "Sing ring\nbring it's 42\n\n  king\tsing\n";
        let (trie, stats) = load(std::io::Cursor::new(input)).unwrap();
        assert_eq!(
            stats,
            Stats {
                accepted: 4,
                duplicates: 1,
                skipped: 2,
            }
        );
        assert_eq!(trie.len(), 4);
        assert_eq!(matches(&trie, "ing"), vec!["sing", "ring", "bring", "king"]);
    }

    #[test]
    fn test_load_skips_non_utf8_tokens() {
        let input: &[u8] = b"sing\ncaf\xe9 king\r\nring\n\xff\xfe";
        let (trie, stats) = load(std::io::Cursor::new(input)).unwrap();
        assert_eq!(
            stats,
            Stats {
                accepted: 3,
                duplicates: 0,
                skipped: 2,
            }
        );
        assert_eq!(matches(&trie, "ing"), vec!["sing", "king", "ring"]);
    }

    #[test]
    fn test_load_empty() {
        let (trie, stats) = load(std::io::Cursor::new("")).unwrap();
        assert!(trie.is_empty());
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_load_path_missing() {
        let err = load_path("/nonexistent/dictionary.txt").unwrap_err();
        assert!(err.to_string().contains("could not open dictionary"));
    }

    #[test]
    fn test_load_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"cat\nhat\nsat\n").unwrap();
        let (trie, stats) = load_path(file.path()).unwrap();
        assert_eq!(stats.accepted, 3);
        assert_eq!(matches(&trie, "at"), vec!["cat", "hat", "sat"]);
    }
}
