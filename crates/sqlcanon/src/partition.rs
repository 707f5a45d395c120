//! Partition-name detection.
//!
//! A pass over the finished token stream that finds identifiers naming a
//! partition: `PARTITION <name>` or `PARTITION ( <name> )`. The result is
//! a side table of token start offsets; token kinds are never changed, so
//! tokenization stays independent of this pass.

use std::collections::HashSet;

use crate::tokens::{Token, TokenKind};

/// Start offsets of identifiers that name a partition.
///
/// `partition by` tags nothing: the token after the connector is a
/// keyword, not an identifier.
pub fn partition_names(tokens: &[Token]) -> HashSet<usize> {
    let mut tagged = HashSet::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Keyword || !token.text.eq_ignore_ascii_case("partition") {
            continue;
        }
        let Some(conn) = tokens.get(i + 1) else {
            continue;
        };
        let Some(candidate) = tokens.get(i + 2) else {
            continue;
        };
        if conn.kind != TokenKind::Conn || candidate.kind != TokenKind::Ident {
            continue;
        }
        let bare = !conn.text.is_empty() && conn.text.chars().all(|c| c.is_whitespace());
        let parenthesized = conn.text.trim() == "("
            && tokens
                .get(i + 3)
                .is_some_and(|t| t.kind == TokenKind::Conn && t.text.trim_start().starts_with(')'));
        if bare || parenthesized {
            tagged.insert(candidate.start);
        }
    }
    tagged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Tokenizer;

    fn tagged_texts(stmt: &str) -> Vec<String> {
        let tokens = Tokenizer::new().tokenize(stmt).unwrap();
        let tagged = partition_names(&tokens);
        tokens
            .iter()
            .filter(|t| tagged.contains(&t.start))
            .map(|t| t.text.clone())
            .collect()
    }

    #[test]
    fn bare_form_tags_the_name() {
        assert_eq!(
            tagged_texts("alter table t move partition SYS_P32596"),
            vec!["SYS_P32596"]
        );
    }

    #[test]
    fn parenthesized_form_tags_the_name() {
        assert_eq!(
            tagged_texts("insert into t partition ( SYS_P32596 ) values (1)"),
            vec!["SYS_P32596"]
        );
        assert_eq!(tagged_texts("select * from t partition(P1)"), vec!["P1"]);
    }

    #[test]
    fn partition_by_is_not_a_name() {
        assert!(tagged_texts("select sum(x) over( partition by x) from t").is_empty());
    }

    #[test]
    fn both_occurrences_are_tagged() {
        let stmt = "insert into t partition ( SYS_P32596 )  select sum(x) \
                    over( partition by x) from t partition(SYS_P32596)";
        assert_eq!(tagged_texts(stmt), vec!["SYS_P32596", "SYS_P32596"]);
    }

    #[test]
    fn unclosed_parenthesized_form_is_ignored() {
        assert!(tagged_texts("select * from t partition ( p1").is_empty());
    }
}
