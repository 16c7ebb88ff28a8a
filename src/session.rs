use crate::words::{Cursor, Page, Reversed, Trie};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Words(#[from] crate::words::Error),

    #[error("suffix not found: {0}")]
    SuffixNotFound(String),

    #[error("word not found: {0}")]
    WordNotFound(String),

    #[error("no suffix has been found yet")]
    NoActiveSuffix,

    #[error("all of the words ending in {0} have been printed; choose another suffix")]
    Exhausted(String),
}

struct Search {
    suffix: Reversed,
    cursor: Cursor,
    shown: usize,
    exhausted: bool,
}

/// Keeps the trie and the state of the current suffix search between
/// commands.
pub struct Session {
    trie: Trie,
    search: Option<Search>,
}

impl Session {
    pub fn new(trie: Trie) -> Self {
        Self { trie, search: None }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Starts a new search episode, discarding any previous one. Returns the
    /// normalized suffix.
    pub fn find(&mut self, input: &str) -> Result<String, Error> {
        self.search = None;
        let suffix = Reversed::parse(input)?;
        let Some(cursor) = self.trie.locate(&suffix) else {
            return Err(Error::SuffixNotFound(suffix.to_string()));
        };
        let found = self.trie.word_at(cursor)?;
        log::debug!(suffix = found.as_str(); "suffix found");
        self.search = Some(Search {
            suffix,
            cursor,
            shown: 0,
            exhausted: false,
        });
        Ok(found)
    }

    /// Prints the next `count` words of the current episode.
    pub fn print(&mut self, count: usize) -> Result<Page, Error> {
        let Some(search) = self.search.as_mut() else {
            return Err(Error::NoActiveSuffix);
        };
        if search.exhausted {
            return Err(Error::Exhausted(search.suffix.to_string()));
        }

        let page = self.trie.enumerate(search.cursor, count, search.shown)?;
        search.shown += page.words.len();
        search.exhausted = !page.more;
        log::debug!(shown = search.shown, more = page.more; "printed page");
        Ok(page)
    }

    /// Returns whether the word was new.
    pub fn add(&mut self, input: &str) -> Result<bool, Error> {
        let added = self.trie.insert(input)?;
        log::debug!(word = input, added = added; "add");
        Ok(added)
    }

    /// Deletes a word ending in the current suffix. The search episode ends
    /// either way.
    pub fn delete(&mut self, input: &str) -> Result<(), Error> {
        let Some(search) = self.search.take() else {
            return Err(Error::NoActiveSuffix);
        };
        let word = Reversed::parse(input)?;
        if !self.trie.delete_word(&word, search.cursor)? {
            return Err(Error::WordNotFound(word.to_string()));
        }
        log::debug!(word = word.to_string().as_str(), words = self.trie.len(); "deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(words: &[&str]) -> Session {
        let mut trie = Trie::new();
        for word in words {
            trie.insert(word).unwrap();
        }
        Session::new(trie)
    }

    #[test]
    fn test_find_and_page() {
        let mut session = session(&["sing", "ring", "bring"]);
        assert_eq!(session.find("ING").unwrap(), "ing");

        let page = session.print(2).unwrap();
        assert_eq!(page.words.len(), 2);
        assert!(page.more);

        let page = session.print(2).unwrap();
        assert_eq!(page.words, vec!["bring"]);
        assert!(!page.more);

        assert_eq!(session.print(2), Err(Error::Exhausted("ing".to_string())));

        session.find("ing").unwrap();
        assert_eq!(session.print(5).unwrap().words.len(), 3);
    }

    #[test]
    fn test_print_without_find() {
        let mut session = session(&["sing"]);
        assert_eq!(session.print(1), Err(Error::NoActiveSuffix));
    }

    #[test]
    fn test_failed_find_clears_search() {
        let mut session = session(&["sing"]);
        session.find("ing").unwrap();
        assert_eq!(session.find("xyz"), Err(Error::SuffixNotFound("xyz".to_string())));
        assert_eq!(session.print(1), Err(Error::NoActiveSuffix));
    }

    #[test]
    fn test_invalid_input_is_recoverable() {
        let mut session = session(&["sing"]);
        assert_eq!(
            session.find("in9"),
            Err(Error::Words(crate::words::Error::InvalidInput("in9".to_string())))
        );
        assert!(session.add("don't").is_err());
        session.find("ing").unwrap();
        assert_eq!(session.print(1).unwrap().words, vec!["sing"]);
    }

    #[test]
    fn test_empty_tree() {
        let mut session = session(&[]);
        assert_eq!(session.find("xyz"), Err(Error::SuffixNotFound("xyz".to_string())));
        assert_eq!(session.delete("xyz"), Err(Error::NoActiveSuffix));
    }

    #[test]
    fn test_add_then_find() {
        let mut session = session(&[]);
        assert!(session.add("Spring").unwrap());
        assert!(!session.add("spring").unwrap());
        session.find("ring").unwrap();
        assert_eq!(session.print(1).unwrap().words, vec!["spring"]);
    }

    #[test]
    fn test_delete_requires_find() {
        let mut session = session(&["cat", "cats"]);
        assert_eq!(session.delete("cats"), Err(Error::NoActiveSuffix));

        session.find("ts").unwrap();
        session.delete("cats").unwrap();
        assert_eq!(session.print(1), Err(Error::NoActiveSuffix));

        session.find("at").unwrap();
        assert_eq!(session.print(5).unwrap().words, vec!["cat"]);
        assert_eq!(session.trie().len(), 1);
    }

    #[test]
    fn test_delete_not_found_ends_search() {
        let mut session = session(&["sing", "ring"]);
        session.find("ing").unwrap();
        assert_eq!(session.delete("king"), Err(Error::WordNotFound("king".to_string())));
        assert_eq!(session.print(1), Err(Error::NoActiveSuffix));

        session.find("ing").unwrap();
        session.delete("sing").unwrap();
        session.find("ing").unwrap();
        assert_eq!(session.delete("sing"), Err(Error::WordNotFound("sing".to_string())));
    }

    #[test]
    fn test_delete_word_not_ending_in_suffix() {
        let mut session = session(&["sing", "cat"]);
        session.find("ing").unwrap();
        assert_eq!(session.delete("cat"), Err(Error::WordNotFound("cat".to_string())));
        assert_eq!(session.trie().len(), 2);
    }
}
